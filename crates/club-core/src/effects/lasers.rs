use super::Effect;
use crate::constants::*;
use crate::mapper::ControlSignals;
use crate::scene::SceneGraph;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserBeam {
    pub index: usize,
    pub phase_offset: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub opacity: f32,
}

impl LaserBeam {
    fn new(index: usize) -> Self {
        Self {
            index,
            phase_offset: phase_offset(index),
            rotation_y: 0.0,
            rotation_z: 0.0,
            opacity: LASER_OPACITY_HIGH,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, 0.0, self.rotation_y, self.rotation_z)
    }

    /// Emitter transform. The beam pivots here and extends along local +Z.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), LASER_EMITTER)
    }

    /// Maps the unit segment `z ∈ [0, 1]` onto the beam: local origin lands
    /// on the emitter, `(0, 0, 1)` on the far end `LASER_LENGTH` away.
    pub fn beam_matrix(&self) -> Mat4 {
        self.model_matrix() * Mat4::from_scale(Vec3::new(1.0, 1.0, LASER_LENGTH))
    }

    pub fn direction(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }
}

#[inline]
pub fn phase_offset(index: usize) -> f32 {
    index as f32 * std::f32::consts::FRAC_PI_2
}

/// Beam pose and opacity at time `t` for beam `index`.
///
/// Opacity is a hard flicker: high while `sin(10t + i) > 0`, low otherwise
/// (exactly zero falls on the low side).
pub fn beam_state(index: usize, t: f32) -> (f32, f32, f32) {
    let offset = phase_offset(index);
    let rotation_y = (t + offset).sin() * LASER_SWEEP_YAW;
    let rotation_z = (2.0 * t + offset).cos() * LASER_SWEEP_ROLL;
    let opacity = if (t * LASER_FLICKER_RATE + index as f32).sin() > 0.0 {
        LASER_OPACITY_HIGH
    } else {
        LASER_OPACITY_LOW
    };
    (rotation_y, rotation_z, opacity)
}

pub struct LaserArray {
    beams: Vec<LaserBeam>,
}

impl Default for LaserArray {
    fn default() -> Self {
        Self::new()
    }
}

impl LaserArray {
    pub fn new() -> Self {
        Self { beams: Vec::new() }
    }

    pub fn beams(&self) -> &[LaserBeam] {
        &self.beams
    }
}

impl Effect for LaserArray {
    fn setup(&mut self, _scene: &mut SceneGraph) {
        self.beams = (0..LASER_COUNT).map(LaserBeam::new).collect();
    }

    fn update(&mut self, time_sec: f32, _signals: &ControlSignals) {
        for beam in &mut self.beams {
            let (ry, rz, opacity) = beam_state(beam.index, time_sec);
            beam.rotation_y = ry;
            beam.rotation_z = rz;
            beam.opacity = opacity;
        }
    }
}
