use super::RayHit;
use glam::{Quat, Vec2, Vec3};

const EPS: f32 = 1e-6;

/// Collider primitives. Only surfaces facing the ray are reported, so a ray
/// starting inside a solid passes out of it without a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Upright cylinder (axis along +Y) with flat caps.
    Cylinder {
        center: Vec3,
        radius: f32,
        half_height: f32,
    },
    /// Box with arbitrary orientation.
    Cuboid {
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
    },
    /// Horizontal rectangle; either side reports the +Y normal.
    Rect { center: Vec3, half_extents: Vec2 },
}

impl Shape {
    pub fn cylinder(center: Vec3, radius: f32, height: f32) -> Self {
        Shape::Cylinder {
            center,
            radius,
            half_height: height * 0.5,
        }
    }

    pub fn cuboid(center: Vec3, size: Vec3, yaw: f32) -> Self {
        Shape::Cuboid {
            center,
            half_extents: size * 0.5,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    pub fn rect(center: Vec3, width: f32, depth: f32) -> Self {
        Shape::Rect {
            center,
            half_extents: Vec2::new(width * 0.5, depth * 0.5),
        }
    }

    /// Nearest front-facing hit, if any.
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<RayHit> {
        match *self {
            Shape::Cylinder {
                center,
                radius,
                half_height,
            } => ray_cylinder(origin, dir, center, radius, half_height),
            Shape::Cuboid {
                center,
                half_extents,
                rotation,
            } => ray_cuboid(origin, dir, center, half_extents, rotation),
            Shape::Rect {
                center,
                half_extents,
            } => ray_rect(origin, dir, center, half_extents),
        }
    }
}

#[inline]
fn hit(origin: Vec3, dir: Vec3, t: f32, normal: Vec3) -> RayHit {
    RayHit {
        point: origin + dir * t,
        normal,
        distance: t,
    }
}

fn ray_rect(origin: Vec3, dir: Vec3, center: Vec3, half: Vec2) -> Option<RayHit> {
    if dir.y.abs() < EPS {
        return None;
    }
    let t = (center.y - origin.y) / dir.y;
    if t < 0.0 {
        return None;
    }
    let p = origin + dir * t;
    let inside = (p.x - center.x).abs() <= half.x && (p.z - center.z).abs() <= half.y;
    inside.then(|| hit(origin, dir, t, Vec3::Y))
}

fn ray_cuboid(
    origin: Vec3,
    dir: Vec3,
    center: Vec3,
    half: Vec3,
    rotation: Quat,
) -> Option<RayHit> {
    // Slab test in box space.
    let inv = rotation.inverse();
    let o = inv * (origin - center);
    let d = inv * dir;
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_axis = 0usize;
    for axis in 0..3 {
        if d[axis].abs() < EPS {
            if o[axis].abs() > half[axis] {
                return None;
            }
            continue;
        }
        let inv_d = 1.0 / d[axis];
        let mut t0 = (-half[axis] - o[axis]) * inv_d;
        let mut t1 = (half[axis] - o[axis]) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_near {
            t_near = t0;
            near_axis = axis;
        }
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    if t_near < 0.0 || !t_near.is_finite() {
        return None;
    }
    let mut n_local = Vec3::ZERO;
    n_local[near_axis] = -d[near_axis].signum();
    Some(hit(origin, dir, t_near, rotation * n_local))
}

fn ray_cylinder(
    origin: Vec3,
    dir: Vec3,
    center: Vec3,
    radius: f32,
    half_height: f32,
) -> Option<RayHit> {
    let top = center.y + half_height;
    let bottom = center.y - half_height;
    let r2 = radius * radius;
    let mut best: Option<RayHit> = None;
    let mut consider = |candidate: RayHit| match best {
        Some(b) if b.distance <= candidate.distance => {}
        _ => best = Some(candidate),
    };

    // Caps
    if dir.y.abs() > EPS {
        for (plane_y, normal, facing) in [
            (top, Vec3::Y, origin.y >= top && dir.y < 0.0),
            (bottom, Vec3::NEG_Y, origin.y <= bottom && dir.y > 0.0),
        ] {
            if !facing {
                continue;
            }
            let t = (plane_y - origin.y) / dir.y;
            let p = origin + dir * t;
            let dx = p.x - center.x;
            let dz = p.z - center.z;
            if t >= 0.0 && dx * dx + dz * dz <= r2 {
                consider(hit(origin, dir, t, normal));
            }
        }
    }

    // Side wall
    let ox = origin.x - center.x;
    let oz = origin.z - center.z;
    let a = dir.x * dir.x + dir.z * dir.z;
    let c = ox * ox + oz * oz - r2;
    if a > EPS && c > 0.0 {
        let b = ox * dir.x + oz * dir.z;
        let disc = b * b - a * c;
        if disc >= 0.0 {
            let t = (-b - disc.sqrt()) / a;
            let p = origin + dir * t;
            if t >= 0.0 && p.y >= bottom && p.y <= top {
                let n = Vec3::new(p.x - center.x, 0.0, p.z - center.z) / radius;
                consider(hit(origin, dir, t, n));
            }
        }
    }

    best
}
