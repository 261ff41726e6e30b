use super::helpers::*;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub pos: [f32; 3],
    pub scale: f32,
}

impl PointInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub size: f32,
    pub _pad: [f32; 3],
}

pub fn points_pipeline(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    cloud_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::shaders::POINTS_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[globals_layout, cloud_layout],
        push_constant_ranges: &[],
    });
    make_pipeline(
        device,
        &PipelineDesc {
            label: "points_pipeline",
            layout: &layout,
            shader: &shader,
            vs_entry: "vs_points",
            fs_entry: "fs_points",
            buffers: &[PointInstance::layout()],
            color_format,
            blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
            depth_write: false,
            cull_mode: None,
            topology: wgpu::PrimitiveTopology::TriangleList,
        },
    )
}

/// A fixed set of sprites sharing one model transform, colour and size.
pub struct PointCloud {
    instances: wgpu::Buffer,
    count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniforms: CloudUniforms,
}

impl PointCloud {
    pub fn new(
        device: &wgpu::Device,
        cloud_layout: &wgpu::BindGroupLayout,
        label: &str,
        positions: &[Vec3],
        scales: &[f32],
        color: [f32; 4],
        size: f32,
    ) -> Self {
        let data: Vec<PointInstance> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| PointInstance {
                pos: p.to_array(),
                scale: scales.get(i).copied().unwrap_or(1.0),
            })
            .collect();
        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let (uniform_buffer, bind_group) =
            uniform_binding::<CloudUniforms>(device, cloud_layout, label);
        Self {
            instances,
            count: data.len() as u32,
            uniform_buffer,
            bind_group,
            uniforms: CloudUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color,
                size,
                _pad: [0.0; 3],
            },
        }
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.uniforms.model = model.to_cols_array_2d();
    }

    pub fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instances.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
