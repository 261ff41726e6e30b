//! Visual-side state types shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The web frontend consumes them
//! to build camera matrices, light the environment and turn pointer positions
//! into controller rays for the desktop fallback.

use crate::config::ClubConfig;
use crate::constants::*;
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Non-XR view around the rig, framed by an orbit.
    pub fn orbit(rig_position: Vec3, view: &OrbitView, aspect: f32) -> Self {
        let target = rig_position + view.target;
        Self {
            eye: target + view.offset(),
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]). Returns `(origin, direction)`.
    pub fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize())
    }

    /// World pose whose forward (-Z) axis follows the ray through `ndc`.
    /// Used to drive a controller slot from the mouse.
    pub fn pointer_pose(&self, ndc_x: f32, ndc_y: f32) -> Mat4 {
        let (origin, dir) = self.ndc_ray(ndc_x, ndc_y);
        let up = if dir.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
        Mat4::look_to_rh(origin, dir, up).inverse()
    }
}

/// Orbit around a point at head height, relative to the rig. Yaw 0 puts
/// the eye on +Z of the target; positive pitch lifts it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitView {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitView {
    fn default() -> Self {
        let offset = DESKTOP_EYE_OFFSET - DESKTOP_LOOK_OFFSET;
        let distance = offset.length();
        Self {
            target: DESKTOP_LOOK_OFFSET,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }
}

impl OrbitView {
    /// Eye position relative to the orbit target.
    pub fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Drag by `(dx, dy)` CSS pixels: the scene follows the cursor.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw - dx * ORBIT_ROTATE_SPEED).rem_euclid(std::f32::consts::TAU);
        self.pitch =
            (self.pitch + dy * ORBIT_ROTATE_SPEED).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Wheel zoom; positive `delta` moves the eye away.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 + delta * ORBIT_ZOOM_SPEED).max(0.1);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

/// Light rig for environment shading; intensities come from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: Vec3,
    pub key_color: Vec3,
    pub key_position: Vec3,
    pub spot_color: Vec3,
    pub spot_position: Vec3,
    pub spot_cos_angle: f32,
}

impl Lighting {
    pub fn from_config(config: &ClubConfig) -> Self {
        Self {
            ambient: Vec3::from(AMBIENT_COLOR) * config.ambient_intensity,
            key_color: Vec3::from(KEY_LIGHT_COLOR),
            key_position: KEY_LIGHT_POSITION,
            spot_color: Vec3::from(STAGE_SPOT_COLOR) * config.spotlight_intensity,
            spot_position: STAGE_SPOT_POSITION,
            spot_cos_angle: STAGE_SPOT_ANGLE.cos(),
        }
    }
}
