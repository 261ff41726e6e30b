use super::helpers::*;
use super::mesh::MeshVertex;
use crate::constants::*;
use club_core::{
    GridLine, LaserBeam, LocomotionController, SceneGraph, Shape, SpeakerCone, BEAM_LENGTH,
    LASER_COLOR, LASER_RADIUS, MARKER_COLOR,
};
use glam::{Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];

    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One mesh drawn with a per-instance transform and colour.
pub struct MeshBatch {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    instances: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl MeshBatch {
    pub fn new(device: &wgpu::Device, label: &str, mesh: &[MeshVertex], capacity: usize) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(mesh),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<InstanceData>() * capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            vertices,
            vertex_count: mesh.len() as u32,
            instances,
            capacity: capacity.max(1),
            count: 0,
        }
    }

    /// Replace the instance list; anything past capacity is dropped.
    pub fn write(&mut self, queue: &wgpu::Queue, data: &[InstanceData]) {
        let n = data.len().min(self.capacity);
        if n < data.len() {
            log::warn!("[render] instance overflow: {} > {}", data.len(), self.capacity);
        }
        if n > 0 {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&data[..n]));
        }
        self.count = n as u32;
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.set_vertex_buffer(1, self.instances.slice(..));
        rpass.draw(0..self.vertex_count, 0..self.count);
    }
}

/// Lit opaque pipeline for the club geometry, an unlit line pipeline for the
/// floor grid and an additive one for lasers, pointer beams and the marker.
pub struct MeshPipelines {
    pub lit: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub glow: wgpu::RenderPipeline,
}

impl MeshPipelines {
    pub fn new(
        device: &wgpu::Device,
        globals_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("instanced_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::shaders::INSTANCED_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("instanced_pl"),
            bind_group_layouts: &[globals_layout],
            push_constant_ranges: &[],
        });
        let buffers = [MeshVertex::layout(), InstanceData::layout()];
        let lit = make_pipeline(
            device,
            &PipelineDesc {
                label: "lit_pipeline",
                layout: &layout,
                shader: &shader,
                vs_entry: "vs_main",
                fs_entry: "fs_lit",
                buffers: &buffers,
                color_format,
                blend: None,
                depth_write: true,
                cull_mode: None,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        let lines = make_pipeline(
            device,
            &PipelineDesc {
                label: "grid_pipeline",
                layout: &layout,
                shader: &shader,
                vs_entry: "vs_main",
                fs_entry: "fs_flat",
                buffers: &buffers,
                color_format,
                blend: None,
                depth_write: true,
                cull_mode: None,
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );
        let glow = make_pipeline(
            device,
            &PipelineDesc {
                label: "glow_pipeline",
                layout: &layout,
                shader: &shader,
                vs_entry: "vs_main",
                fs_entry: "fs_glow",
                buffers: &buffers,
                color_format,
                blend: Some(ADDITIVE),
                depth_write: false,
                cull_mode: None,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        Self { lit, lines, glow }
    }
}

fn material_for(name: &str) -> [f32; 3] {
    if name.contains("deck") || name.contains("pillar") {
        MATERIAL_METAL
    } else {
        MATERIAL_BLACK
    }
}

/// Static club geometry from the collider set, split by mesh:
/// `(boxes, cylinders)`. Floor-level rectangles are drawn by the floor pass.
pub fn environment_instances(scene: &SceneGraph) -> (Vec<InstanceData>, Vec<InstanceData>) {
    let mut boxes = Vec::new();
    let mut cylinders = Vec::new();
    for collider in scene.colliders() {
        let color = linear_rgba(material_for(collider.name), 1.0);
        match collider.shape {
            Shape::Cuboid {
                center,
                half_extents,
                rotation,
            } => boxes.push(InstanceData::new(
                Mat4::from_scale_rotation_translation(half_extents * 2.0, rotation, center),
                color,
            )),
            Shape::Cylinder {
                center,
                radius,
                half_height,
            } => cylinders.push(InstanceData::new(
                Mat4::from_scale_rotation_translation(
                    Vec3::new(radius, half_height * 2.0, radius),
                    Quat::IDENTITY,
                    center,
                ),
                color,
            )),
            Shape::Rect { .. } => {}
        }
    }
    (boxes, cylinders)
}

pub fn cone_instances(cones: &[SpeakerCone]) -> Vec<InstanceData> {
    let color = linear_rgba(MATERIAL_METAL, 1.0);
    cones
        .iter()
        .map(|cone| InstanceData::new(cone.model_matrix(), color))
        .collect()
}

/// Each line stretches the unit segment from `from` to `to`.
pub fn grid_instances(lines: &[GridLine]) -> Vec<InstanceData> {
    lines
        .iter()
        .map(|line| {
            let span = line.to - line.from;
            let model = Mat4::from_scale_rotation_translation(
                Vec3::new(1.0, 1.0, span.length()),
                Quat::from_rotation_arc(Vec3::Z, span.normalize_or_zero()),
                line.from,
            );
            InstanceData::new(model, linear_rgba(line.color, 1.0))
        })
        .collect()
}

/// Y-up unit cylinder laid along Z and stretched to `length`.
fn along_z(radius: f32, length: f32) -> Mat4 {
    Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
        * Mat4::from_scale(Vec3::new(radius, length, radius))
}

/// Cylinder covering `z ∈ [0, 1]`, ready for `LaserBeam::beam_matrix`.
fn unit_segment(radius: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5)) * along_z(radius, 1.0)
}

pub fn laser_instances(beams: &[LaserBeam], out: &mut Vec<InstanceData>) {
    for beam in beams {
        out.push(InstanceData::new(
            beam.beam_matrix() * unit_segment(LASER_RADIUS),
            linear_rgba(LASER_COLOR, beam.opacity),
        ));
    }
}

/// Pointer beams for slots whose beam is attached, running `BEAM_LENGTH`
/// along the controller's -Z.
pub fn beam_instances(locomotion: &LocomotionController, out: &mut Vec<InstanceData>) {
    for c in locomotion.controllers().iter().filter(|c| c.beam_attached) {
        let offset = Mat4::from_translation(Vec3::new(0.0, 0.0, -BEAM_LENGTH * 0.5));
        out.push(InstanceData::new(
            c.pose * offset * along_z(BEAM_RADIUS, BEAM_LENGTH),
            linear_rgba(MARKER_COLOR, BEAM_OPACITY),
        ));
    }
}

pub fn marker_instance(locomotion: &LocomotionController) -> Option<InstanceData> {
    locomotion.marker().position().map(|p| {
        InstanceData::new(
            Mat4::from_translation(p + Vec3::Y * MARKER_LIFT),
            linear_rgba(MARKER_COLOR, 1.0),
        )
    })
}
