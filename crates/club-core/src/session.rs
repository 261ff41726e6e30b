//! Composition root: owns every core component and runs one tick per frame.

use crate::audio::{AmplitudeSource, AudioAnalysisSource, AudioStream};
use crate::config::ClubConfig;
use crate::effects::VisualEffectsDirector;
use crate::error::ClubError;
use crate::locomotion::{ControllerEvent, LocomotionController};
use crate::scene::{club_environment, SceneGraph};
use crate::state::{Camera, Lighting, OrbitView};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceState {
    #[default]
    Active,
    Lost,
}

pub struct ClubSession<S: AudioStream> {
    config: ClubConfig,
    lighting: Lighting,
    pub audio: AudioAnalysisSource<S>,
    pub effects: VisualEffectsDirector,
    pub locomotion: LocomotionController,
    /// Desktop camera orbit; unused while an XR session owns the view.
    pub view: OrbitView,
    scene: SceneGraph,
    surface: SurfaceState,
    frames: u64,
}

impl<S: AudioStream> ClubSession<S> {
    pub fn new(config: ClubConfig, stream: S) -> Result<Self, ClubError> {
        config.validate()?;
        let mut scene = club_environment(&config);
        let mut effects = VisualEffectsDirector::new(&config);
        effects.setup(&mut scene);
        log::info!(
            "[session] ready: platform={:.1} fft={} colliders={}",
            config.platform_size,
            config.fft_size,
            scene.len()
        );
        Ok(Self {
            lighting: Lighting::from_config(&config),
            audio: AudioAnalysisSource::new(stream, config.fft_size),
            effects,
            locomotion: LocomotionController::new(),
            view: OrbitView::default(),
            scene,
            surface: SurfaceState::Active,
            frames: 0,
            config,
        })
    }

    pub fn config(&self) -> &ClubConfig {
        &self.config
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Non-XR camera: the orbit view anchored to the rig.
    pub fn desktop_camera(&self, aspect: f32) -> Camera {
        Camera::orbit(self.locomotion.rig().position, &self.view, aspect)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start_audio(&mut self) {
        self.audio.start();
    }

    pub fn stop_audio(&mut self) {
        self.audio.stop();
    }

    pub fn controller_event(&mut self, slot: usize, event: ControllerEvent) -> Option<Vec3> {
        self.locomotion.handle(slot, event)
    }

    pub fn set_controller_pose(&mut self, slot: usize, world: Mat4) {
        self.locomotion.set_pose(slot, world);
    }

    pub fn set_controller_tracked_pose(&mut self, slot: usize, local: Mat4) {
        self.locomotion.set_tracked_pose(slot, local);
    }

    pub fn surface_state(&self) -> SurfaceState {
        self.surface
    }

    /// Per-frame mutation is suspended while the render surface is lost.
    pub fn is_suspended(&self) -> bool {
        self.surface == SurfaceState::Lost
    }

    pub fn on_surface_lost(&mut self) {
        if self.surface != SurfaceState::Lost {
            log::error!("[session] {}; suspending frame updates", ClubError::RenderSurfaceLost);
            self.surface = SurfaceState::Lost;
        }
    }

    pub fn on_surface_restored(&mut self) {
        if self.surface == SurfaceState::Lost {
            log::info!("[session] render surface restored; resuming");
            self.surface = SurfaceState::Active;
        }
    }

    /// One tick. `elapsed_sec` is wall-clock time since the session started.
    /// Returns `false` when the tick was skipped.
    pub fn frame(&mut self, elapsed_sec: f32) -> bool {
        if self.is_suspended() {
            return false;
        }
        self.audio.poll_playback();
        self.locomotion.update(&self.scene);
        let audio: &mut dyn AmplitudeSource = &mut self.audio;
        self.effects.update(Some(audio), elapsed_sec);
        self.frames += 1;
        true
    }
}
