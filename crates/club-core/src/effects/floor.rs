//! Pulsing grid overlay on the dance floor.
//!
//! The pulse itself is evaluated per pixel in `floor.wgsl`; per frame the
//! effect only pushes `time` and `audio_level`. The functions below mirror the
//! shader so its output can be reasoned about (and tested) on the CPU.

use super::Effect;
use crate::constants::*;
use crate::mapper::ControlSignals;
use crate::scene::{SceneGraph, Shape};
use glam::{Vec2, Vec3};

/// Uniform block shared with `floor.wgsl` (32 bytes, std140-compatible).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorUniforms {
    pub color: [f32; 3],
    pub time: f32,
    pub audio_level: f32,
    pub half_size: f32,
    pub height: f32,
    pub _pad: f32,
}

pub struct FloorPulse {
    uniforms: FloorUniforms,
    size: f32,
}

impl FloorPulse {
    pub fn new(platform_size: f32) -> Self {
        Self {
            uniforms: FloorUniforms {
                color: FLOOR_COLOR,
                time: 0.0,
                audio_level: 0.0,
                half_size: platform_size * 0.5,
                height: FLOOR_OVERLAY_HEIGHT,
                _pad: 0.0,
            },
            size: platform_size,
        }
    }

    pub fn uniforms(&self) -> &FloorUniforms {
        &self.uniforms
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Effect for FloorPulse {
    fn setup(&mut self, scene: &mut SceneGraph) {
        scene.add(
            "floor-overlay",
            Shape::rect(
                Vec3::new(0.0, FLOOR_OVERLAY_HEIGHT, 0.0),
                self.size,
                self.size,
            ),
        );
    }

    fn update(&mut self, time_sec: f32, signals: &ControlSignals) {
        self.uniforms.time = time_sec;
        self.uniforms.audio_level = signals.audio_level;
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// 1 on grid lines, 0 between them.
pub fn grid_mask(uv: Vec2) -> f32 {
    let gx = step(FLOOR_GRID_LINE_EDGE, (uv.x * FLOOR_GRID_DIVISIONS).fract());
    let gy = step(FLOOR_GRID_LINE_EDGE, (uv.y * FLOOR_GRID_DIVISIONS).fract());
    gx.max(gy)
}

/// Ring wave travelling outwards from the centre, in [0, 1].
pub fn pulse(time: f32, dist: f32) -> f32 {
    (time * FLOOR_PULSE_SPEED - dist * FLOOR_PULSE_WAVENUMBER).sin() * 0.5 + 0.5
}

pub fn edge_fade(dist: f32) -> f32 {
    1.0 - smoothstep(FLOOR_FADE_START, FLOOR_FADE_END, dist)
}

/// Overlay alpha for a given grid mask and distance from the centre (uv
/// units).
pub fn floor_alpha(time: f32, dist: f32, grid: f32, audio_level: f32) -> f32 {
    let a = grid
        * (FLOOR_ALPHA_BASE + FLOOR_ALPHA_PULSE * pulse(time, dist) + FLOOR_ALPHA_AUDIO * audio_level);
    a * edge_fade(dist)
}

pub fn floor_alpha_at_uv(uv: Vec2, time: f32, audio_level: f32) -> f32 {
    let dist = uv.distance(Vec2::splat(0.5));
    floor_alpha(time, dist, grid_mask(uv), audio_level)
}
