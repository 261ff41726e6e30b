use super::helpers::*;
use club_core::FloorUniforms;

/// Overlay quad whose pulse is evaluated per pixel; the CPU only pushes the
/// effect's uniform block.
pub struct FloorPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl FloorPass {
    pub fn new(
        device: &wgpu::Device,
        globals_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("floor_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::shaders::FLOOR_WGSL.into()),
        });
        let bgl = uniform_layout(device, "floor_bgl");
        let (uniform_buffer, bind_group) =
            uniform_binding::<FloorUniforms>(device, &bgl, "floor_uniforms");
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("floor_pl"),
            bind_group_layouts: &[globals_layout, &bgl],
            push_constant_ranges: &[],
        });
        let pipeline = make_pipeline(
            device,
            &PipelineDesc {
                label: "floor_pipeline",
                layout: &layout,
                shader: &shader,
                vs_entry: "vs_floor",
                fs_entry: "fs_floor",
                buffers: &[],
                color_format,
                blend: Some(ADDITIVE),
                depth_write: false,
                cull_mode: None,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniforms: &FloorUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.draw(0..6, 0..1);
    }
}
