use super::{SceneGraph, Shape};
use crate::config::ClubConfig;
use crate::constants::*;
use glam::{Mat4, Quat, Vec3};

/// Static club geometry: platform, DJ booth and the two speaker stacks.
///
/// Effects attach their own colliders during setup (see
/// `VisualEffectsDirector::setup`).
pub fn club_environment(config: &ClubConfig) -> SceneGraph {
    let mut scene = SceneGraph::new();

    scene.add(
        "platform",
        Shape::cylinder(
            Vec3::new(0.0, -PLATFORM_THICKNESS * 0.5, 0.0),
            config.platform_size,
            PLATFORM_THICKNESS,
        ),
    );

    // DJ booth: desk with two decks and a mixer on top
    scene.add(
        "dj-desk",
        Shape::cuboid(Vec3::new(0.0, 0.5, DJ_BOOTH_Z), Vec3::new(4.0, 1.0, 1.5), 0.0),
    );
    for (name, x) in [("dj-deck-left", -1.0), ("dj-deck-right", 1.0)] {
        scene.add(
            name,
            Shape::cuboid(Vec3::new(x, 1.05, DJ_BOOTH_Z), Vec3::new(0.8, 0.1, 0.6), 0.0),
        );
    }
    for (name, x) in [("dj-pillar-left", -DJ_PILLAR_X), ("dj-pillar-right", DJ_PILLAR_X)] {
        scene.add(
            name,
            Shape::cylinder(Vec3::new(x, 0.5, DJ_BOOTH_Z), DJ_PILLAR_RADIUS, 1.0),
        );
    }
    scene.add(
        "dj-mixer",
        Shape::cuboid(Vec3::new(0.0, 1.05, DJ_BOOTH_Z), Vec3::new(0.8, 0.15, 0.6), 0.0),
    );

    // Speaker stacks: sub cabinet with a mid/top cabinet on it
    let cab = Vec3::splat(SPEAKER_CABINET_SIZE);
    for (names, x, yaw) in [
        (
            ["speaker-left-sub", "speaker-left-top"],
            -SPEAKER_STACK_X,
            stack_yaw(-SPEAKER_STACK_X),
        ),
        (
            ["speaker-right-sub", "speaker-right-top"],
            SPEAKER_STACK_X,
            stack_yaw(SPEAKER_STACK_X),
        ),
    ] {
        for (name, level) in names.into_iter().zip([0.5, 1.5]) {
            let center = Vec3::new(x, SPEAKER_CABINET_SIZE * level, DJ_BOOTH_Z);
            scene.add(name, Shape::cuboid(center, cab, yaw));
        }
    }

    log::debug!("[scene] environment colliders={}", scene.len());
    scene
}

/// Stacks on the right turn left and vice versa, facing the dance floor.
fn stack_yaw(x: f32) -> f32 {
    if x > 0.0 {
        -SPEAKER_STACK_YAW
    } else {
        SPEAKER_STACK_YAW
    }
}

/// Driver cone on a speaker cabinet front. Decoration only; the cabinet
/// collider already covers it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeakerCone {
    pub center: Vec3,
    pub yaw: f32,
}

impl SpeakerCone {
    /// Outward facing direction of the cone.
    pub fn normal(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::Z
    }

    /// Maps the unit disc in the local XY plane (facing +Z) onto the cone.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(SPEAKER_CONE_RADIUS, SPEAKER_CONE_RADIUS, 1.0),
            Quat::from_rotation_y(self.yaw),
            self.center,
        )
    }
}

/// One cone per cabinet, on the front face at cabinet centre height.
pub fn speaker_cones() -> Vec<SpeakerCone> {
    let mut cones = Vec::with_capacity(4);
    for x in [-SPEAKER_STACK_X, SPEAKER_STACK_X] {
        let yaw = stack_yaw(x);
        let rot = Quat::from_rotation_y(yaw);
        for level in [0.5, 1.5] {
            let local = Vec3::new(0.0, SPEAKER_CABINET_SIZE * level, SPEAKER_CONE_INSET);
            cones.push(SpeakerCone {
                center: Vec3::new(x, 0.0, DJ_BOOTH_Z) + rot * local,
                yaw,
            });
        }
    }
    cones
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: [f32; 3],
}

/// Square line grid twice the platform size, just above the platform top.
/// The two centre lines are highlighted.
pub fn floor_grid(config: &ClubConfig) -> Vec<GridLine> {
    let size = config.platform_size * 2.0;
    let half = size * 0.5;
    let step = size / GRID_DIVISIONS as f32;
    let mut lines = Vec::with_capacity((GRID_DIVISIONS + 1) * 2);
    for i in 0..=GRID_DIVISIONS {
        let k = -half + i as f32 * step;
        let color = if i == GRID_DIVISIONS / 2 {
            GRID_CENTER_COLOR
        } else {
            GRID_LINE_COLOR
        };
        lines.push(GridLine {
            from: Vec3::new(-half, GRID_HEIGHT, k),
            to: Vec3::new(half, GRID_HEIGHT, k),
            color,
        });
        lines.push(GridLine {
            from: Vec3::new(k, GRID_HEIGHT, -half),
            to: Vec3::new(k, GRID_HEIGHT, half),
            color,
        });
    }
    lines
}
