use super::Effect;
use crate::constants::*;
use crate::mapper::ControlSignals;
use crate::scene::SceneGraph;
use glam::{Mat4, Vec3};
use rand::prelude::*;

/// Slowly spinning cloud of motes above the floor. Not audio-coupled.
pub struct ParticleField {
    positions: Vec<Vec3>,
    scales: Vec<f32>,
    rotation_y: f32,
    radius: f32,
    seed: u64,
}

impl ParticleField {
    pub fn new(platform_size: f32, seed: u64) -> Self {
        Self {
            positions: Vec::new(),
            scales: Vec::new(),
            rotation_y: 0.0,
            radius: platform_size * 0.5,
            seed,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Accumulated spin in radians; grows without bound.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

impl Effect for ParticleField {
    fn setup(&mut self, _scene: &mut SceneGraph) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.positions.clear();
        self.scales.clear();
        for _ in 0..PARTICLE_COUNT {
            let r = rng.gen::<f32>() * self.radius;
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            self.positions.push(Vec3::new(
                r * theta.cos(),
                rng.gen::<f32>() * PARTICLE_MAX_HEIGHT,
                r * theta.sin(),
            ));
            self.scales.push(rng.gen::<f32>());
        }
    }

    fn update(&mut self, _time_sec: f32, _signals: &ControlSignals) {
        self.rotation_y += PARTICLE_SPIN_PER_FRAME;
    }
}
