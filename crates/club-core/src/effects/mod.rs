//! Audio-reactive visual effects and the director that drives them.

mod floor;
mod lasers;
mod particles;

pub use floor::*;
pub use lasers::*;
pub use particles::*;

use crate::audio::AmplitudeSource;
use crate::config::ClubConfig;
use crate::constants::PARTICLE_SEED;
use crate::mapper::{map_signals, ControlSignals};
use crate::scene::SceneGraph;

/// A visual effect: set up once, then mutated every frame.
pub trait Effect {
    /// Attach to the scene (colliders, generated geometry). Called once.
    fn setup(&mut self, scene: &mut SceneGraph);
    fn update(&mut self, time_sec: f32, signals: &ControlSignals);
}

pub struct VisualEffectsDirector {
    pub floor: FloorPulse,
    pub particles: ParticleField,
    pub lasers: LaserArray,
    signals: ControlSignals,
    is_setup: bool,
}

impl VisualEffectsDirector {
    pub fn new(config: &ClubConfig) -> Self {
        Self {
            floor: FloorPulse::new(config.platform_size),
            particles: ParticleField::new(config.platform_size, PARTICLE_SEED),
            lasers: LaserArray::new(),
            signals: ControlSignals::default(),
            is_setup: false,
        }
    }

    fn effects_mut(&mut self) -> [&mut dyn Effect; 3] {
        [&mut self.floor, &mut self.particles, &mut self.lasers]
    }

    /// One-time scene setup; later calls are ignored.
    pub fn setup(&mut self, scene: &mut SceneGraph) {
        if self.is_setup {
            return;
        }
        for effect in self.effects_mut() {
            effect.setup(scene);
        }
        self.is_setup = true;
    }

    /// Signals applied on the most recent update.
    pub fn signals(&self) -> ControlSignals {
        self.signals
    }

    /// Advance every effect. Without an audio source the frame is skipped and
    /// effects keep their last state. Returns whether anything was updated.
    pub fn update(&mut self, audio: Option<&mut dyn AmplitudeSource>, time_sec: f32) -> bool {
        let Some(audio) = audio else {
            return false;
        };
        let signals = map_signals(audio);
        self.signals = signals;
        for effect in self.effects_mut() {
            effect.update(time_sec, &signals);
        }
        true
    }
}
