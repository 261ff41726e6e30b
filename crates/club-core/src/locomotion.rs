//! Teleport locomotion: controller rays, target resolution and rig commits.
//!
//! Each slot runs `Idle ⇄ Selecting`. Every frame all slots cast a ray into
//! the scene; the first slot (in slot order) whose nearest hit faces upwards
//! supplies the target. The shared marker shows that target only while at
//! least one slot is selecting. Releasing a selecting slot while the marker
//! is visible moves the rig there in one step.

use crate::constants::{CONTROLLER_FORWARD, CONTROLLER_SLOTS, FLOOR_NORMAL_MIN_Y};
use crate::scene::{RayHit, Raycast};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    Connected,
    Disconnected,
    SelectStart,
    SelectEnd,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray along the pose's local forward axis; scale and translation do not
    /// affect the direction.
    pub fn from_pose(world: &Mat4) -> Self {
        let (_, rotation, translation) = world.to_scale_rotation_translation();
        Self {
            origin: translation,
            direction: (rotation * CONTROLLER_FORWARD).normalize_or_zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerState {
    pub slot: usize,
    /// World-space pose (rig transform already applied).
    pub pose: Mat4,
    pub selection: SelectionState,
    pub connected: bool,
    /// Cosmetic pointer beam; follows connection, nothing else reads it.
    pub beam_attached: bool,
}

impl ControllerState {
    fn new(slot: usize) -> Self {
        Self {
            slot,
            pose: Mat4::IDENTITY,
            selection: SelectionState::Idle,
            connected: false,
            beam_attached: false,
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.selection == SelectionState::Selecting
    }

    pub fn ray(&self) -> Ray {
        Ray::from_pose(&self.pose)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TeleportMarker {
    visible: bool,
    position: Vec3,
}

impl TeleportMarker {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Marker position, only while visible.
    pub fn position(&self) -> Option<Vec3> {
        self.visible.then_some(self.position)
    }

    fn show_at(&mut self, p: Vec3) {
        self.position = p;
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

/// The user's locomotion frame; its position is the user's feet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rig {
    pub position: Vec3,
}

impl Rig {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }
}

/// Accepts a hit as teleport target when the surface faces mostly up.
#[inline]
pub fn is_walkable(hit: &RayHit) -> bool {
    hit.normal.y > FLOOR_NORMAL_MIN_Y
}

pub struct LocomotionController {
    controllers: [ControllerState; CONTROLLER_SLOTS],
    marker: TeleportMarker,
    rig: Rig,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new()
    }
}

impl LocomotionController {
    pub fn new() -> Self {
        Self {
            controllers: std::array::from_fn(ControllerState::new),
            marker: TeleportMarker::default(),
            rig: Rig::default(),
        }
    }

    pub fn controllers(&self) -> &[ControllerState] {
        &self.controllers
    }

    pub fn controller(&self, slot: usize) -> Option<&ControllerState> {
        self.controllers.get(slot)
    }

    pub fn marker(&self) -> &TeleportMarker {
        &self.marker
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn set_rig_position(&mut self, position: Vec3) {
        self.rig.position = position;
    }

    pub fn any_selecting(&self) -> bool {
        self.controllers.iter().any(ControllerState::is_selecting)
    }

    /// Set a slot's world-space pose.
    pub fn set_pose(&mut self, slot: usize, world: Mat4) {
        if let Some(c) = self.controllers.get_mut(slot) {
            c.pose = world;
        }
    }

    /// Set a slot's pose from tracking space (relative to the rig).
    pub fn set_tracked_pose(&mut self, slot: usize, local: Mat4) {
        let world = self.rig.transform() * local;
        self.set_pose(slot, world);
    }

    /// Apply an input event. Returns the new rig position when the event
    /// committed a teleport.
    pub fn handle(&mut self, slot: usize, event: ControllerEvent) -> Option<Vec3> {
        let Some(c) = self.controllers.get_mut(slot) else {
            log::warn!("[locomotion] event {:?} for unknown slot {}", event, slot);
            return None;
        };
        match event {
            ControllerEvent::Connected => {
                c.connected = true;
                c.beam_attached = true;
                log::info!("[locomotion] controller {} connected", slot);
                None
            }
            ControllerEvent::Disconnected => {
                c.connected = false;
                c.beam_attached = false;
                log::info!("[locomotion] controller {} disconnected", slot);
                None
            }
            ControllerEvent::SelectStart => {
                c.selection = SelectionState::Selecting;
                None
            }
            ControllerEvent::SelectEnd => {
                if !c.is_selecting() {
                    return None;
                }
                c.selection = SelectionState::Idle;
                self.commit_teleport()
            }
        }
    }

    fn commit_teleport(&mut self) -> Option<Vec3> {
        let target = self.marker.position();
        if let Some(p) = target {
            self.rig.position = p;
            log::info!(
                "[locomotion] teleport to ({:.2},{:.2},{:.2})",
                p.x,
                p.y,
                p.z
            );
        }
        self.marker.hide();
        target
    }

    /// First walkable hit in slot order, using each slot's nearest hit only.
    pub fn resolve_target(&self, scene: &dyn Raycast) -> Option<Vec3> {
        self.controllers.iter().find_map(|c| {
            let ray = c.ray();
            if ray.direction == Vec3::ZERO {
                return None;
            }
            scene
                .raycast(ray.origin, ray.direction)
                .first()
                .filter(|hit| is_walkable(hit))
                .map(|hit| hit.point)
        })
    }

    /// Per-frame marker resolution.
    pub fn update(&mut self, scene: &dyn Raycast) {
        let target = self.resolve_target(scene);
        match target {
            Some(p) if self.any_selecting() => self.marker.show_at(p),
            _ => self.marker.hide(),
        }
    }
}
