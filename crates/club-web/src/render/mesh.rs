use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn vertex(p: Vec3, n: Vec3) -> MeshVertex {
    MeshVertex {
        position: p.to_array(),
        normal: n.to_array(),
    }
}

fn quad(out: &mut Vec<MeshVertex>, corners: [Vec3; 4], n: Vec3) {
    for i in [0, 1, 2, 0, 2, 3] {
        out.push(vertex(corners[i], n));
    }
}

/// Unit cube centred on the origin (side 1).
pub fn cube() -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(36);
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for sign in [1.0f32, -1.0] {
            let n = axis * sign;
            let (u, v) = if axis == Vec3::Y {
                (Vec3::Z, Vec3::X)
            } else {
                (Vec3::Y, axis.cross(Vec3::Y).normalize())
            };
            let c = n * 0.5;
            quad(
                &mut out,
                [
                    c - u * 0.5 - v * 0.5,
                    c + u * 0.5 - v * 0.5,
                    c + u * 0.5 + v * 0.5,
                    c - u * 0.5 + v * 0.5,
                ],
                n,
            );
        }
    }
    out
}

/// Capped cylinder around +Y: radius 1, height 1, centred on the origin.
pub fn cylinder(segments: u32) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(segments as usize * 12);
    let ring = |i: u32| {
        let a = i as f32 / segments as f32 * std::f32::consts::TAU;
        Vec3::new(a.cos(), 0.0, a.sin())
    };
    let top = Vec3::Y * 0.5;
    let bottom = -top;
    for i in 0..segments {
        let d0 = ring(i);
        let d1 = ring(i + 1);
        // side
        out.push(vertex(d0 + bottom, d0));
        out.push(vertex(d1 + top, d1));
        out.push(vertex(d1 + bottom, d1));
        out.push(vertex(d0 + bottom, d0));
        out.push(vertex(d0 + top, d0));
        out.push(vertex(d1 + top, d1));
        // caps
        out.push(vertex(top, Vec3::Y));
        out.push(vertex(d1 + top, Vec3::Y));
        out.push(vertex(d0 + top, Vec3::Y));
        out.push(vertex(bottom, Vec3::NEG_Y));
        out.push(vertex(d0 + bottom, Vec3::NEG_Y));
        out.push(vertex(d1 + bottom, Vec3::NEG_Y));
    }
    out
}

/// Flat annulus in the XZ plane facing +Y.
pub fn ring(inner: f32, outer: f32, segments: u32) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
        let d0 = Vec3::new(a0.cos(), 0.0, a0.sin());
        let d1 = Vec3::new(a1.cos(), 0.0, a1.sin());
        quad(
            &mut out,
            [d0 * inner, d0 * outer, d1 * outer, d1 * inner],
            Vec3::Y,
        );
    }
    out
}

/// Unit disc in the XY plane facing +Z.
pub fn disc(segments: u32) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
        out.push(vertex(Vec3::ZERO, Vec3::Z));
        out.push(vertex(Vec3::new(a0.cos(), a0.sin(), 0.0), Vec3::Z));
        out.push(vertex(Vec3::new(a1.cos(), a1.sin(), 0.0), Vec3::Z));
    }
    out
}

/// Line-list segment from the origin to `(0, 0, 1)`.
pub fn unit_line() -> Vec<MeshVertex> {
    vec![vertex(Vec3::ZERO, Vec3::Y), vertex(Vec3::Z, Vec3::Y)]
}
