mod floor;
mod helpers;
mod instanced;
mod mesh;
mod points;

use crate::constants::*;
use club_core::{
    speaker_cones, AudioStream, Camera, ClubSession, GridLine, Lighting, SceneGraph,
    BACKGROUND_COLOR, MARKER_INNER_RADIUS,
    MARKER_OUTER_RADIUS, MARKER_SEGMENTS, PARTICLE_COLOR, PARTICLE_OPACITY, PARTICLE_SIZE,
};
use floor::FloorPass;
use glam::Vec3;
use helpers::*;
use instanced::{InstanceData, MeshBatch, MeshPipelines};
use points::PointCloud;
use rand::prelude::*;
use web_sys as web;

/// Per-frame camera and light block shared by every pipeline (group 0).
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    ambient: [f32; 4],
    key_color: [f32; 4],
    key_position: [f32; 4],
    spot_color: [f32; 4],
    spot_position: [f32; 4],
    fog: [f32; 4],
}

impl Globals {
    fn new(camera: &Camera, lighting: &Lighting) -> Self {
        let view = camera.view_matrix();
        let fog = linear_rgba(BACKGROUND_COLOR, FOG_DENSITY);
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            camera_right: view.row(0).truncate().extend(0.0).to_array(),
            camera_up: view.row(1).truncate().extend(0.0).to_array(),
            ambient: lighting.ambient.extend(1.0).to_array(),
            key_color: linear_rgba(lighting.key_color.to_array(), 1.0),
            key_position: lighting.key_position.extend(1.0).to_array(),
            spot_color: lighting.spot_color.extend(1.0).to_array(),
            spot_position: lighting.spot_position.extend(lighting.spot_cos_angle).to_array(),
            fog,
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    floor: FloorPass,
    meshes: MeshPipelines,
    env_boxes: MeshBatch,
    env_cylinders: MeshBatch,
    env_cones: MeshBatch,
    grid: MeshBatch,
    glow_cylinders: MeshBatch,
    marker: MeshBatch,
    glow_scratch: Vec<InstanceData>,

    points_pipeline: wgpu::RenderPipeline,
    stars: PointCloud,
    particles: PointCloud,

    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl GpuState {
    /// `scene` and `grid` supply the static club geometry;
    /// `particle_positions` and `particle_scales` the generated motes (spun by
    /// a per-frame model matrix).
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &SceneGraph,
        grid: &[GridLine],
        particle_positions: &[Vec3],
        particle_scales: &[f32],
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 fallback cannot satisfy the full default limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // render through an sRGB view so linear shader output is encoded
        let view_format = format.add_srgb_suffix();
        let view_formats = if view_format != format {
            vec![view_format]
        } else {
            vec![]
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats,
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = create_depth_texture(&device, width, height);

        let globals_layout = uniform_layout(&device, "globals_bgl");
        let (globals_buffer, globals_bind_group) =
            uniform_binding::<Globals>(&device, &globals_layout, "globals");

        let floor = FloorPass::new(&device, &globals_layout, view_format);
        let meshes = MeshPipelines::new(&device, &globals_layout, view_format);

        let cube = mesh::cube();
        let cylinder = mesh::cylinder(CYLINDER_SEGMENTS);
        let (boxes, cylinders) = instanced::environment_instances(scene);
        let mut env_boxes = MeshBatch::new(&device, "env_boxes", &cube, boxes.len());
        let mut env_cylinders = MeshBatch::new(&device, "env_cylinders", &cylinder, cylinders.len());
        env_boxes.write(&queue, &boxes);
        env_cylinders.write(&queue, &cylinders);
        let cones = instanced::cone_instances(&speaker_cones());
        let mut env_cones =
            MeshBatch::new(&device, "env_cones", &mesh::disc(CYLINDER_SEGMENTS), cones.len());
        env_cones.write(&queue, &cones);
        let grid_lines = instanced::grid_instances(grid);
        let mut grid = MeshBatch::new(&device, "grid", &mesh::unit_line(), grid_lines.len());
        grid.write(&queue, &grid_lines);
        let glow_cylinders = MeshBatch::new(&device, "glow_cylinders", &cylinder, MAX_GLOW_INSTANCES);
        let marker = MeshBatch::new(
            &device,
            "marker",
            &mesh::ring(MARKER_INNER_RADIUS, MARKER_OUTER_RADIUS, MARKER_SEGMENTS),
            1,
        );

        let cloud_layout = uniform_layout(&device, "cloud_bgl");
        let points_pipeline =
            points::points_pipeline(&device, &globals_layout, &cloud_layout, view_format);
        let star_positions = starfield(STAR_COUNT, STAR_SPREAD, STAR_SEED);
        let stars = PointCloud::new(
            &device,
            &cloud_layout,
            "stars",
            &star_positions,
            &[],
            linear_rgba(STAR_COLOR, STAR_OPACITY),
            STAR_SIZE,
        );
        let particles = PointCloud::new(
            &device,
            &cloud_layout,
            "particles",
            particle_positions,
            particle_scales,
            linear_rgba(PARTICLE_COLOR, PARTICLE_OPACITY),
            PARTICLE_SIZE,
        );

        let bg = linear_rgba(BACKGROUND_COLOR, 1.0);
        log::info!(
            "[render] gpu ready: {}x{} format={:?} view={:?}",
            width,
            height,
            format,
            view_format
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth_view,
            globals_buffer,
            globals_bind_group,
            floor,
            meshes,
            env_boxes,
            env_cylinders,
            env_cones,
            grid,
            glow_cylinders,
            marker,
            glow_scratch: Vec::with_capacity(MAX_GLOW_INSTANCES),
            points_pipeline,
            stars,
            particles,
            clear_color: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: 1.0,
            },
            width,
            height,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        let (_, depth_view) = create_depth_texture(&self.device, self.width, self.height);
        self.depth_view = depth_view;
    }

    /// Upload this frame's effect state and draw it.
    pub fn render<S: AudioStream>(
        &mut self,
        session: &ClubSession<S>,
    ) -> Result<(), wgpu::SurfaceError> {
        let camera = session.desktop_camera(self.aspect());
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::new(&camera, session.lighting())),
        );
        self.floor.write(&self.queue, session.effects.floor.uniforms());
        self.particles
            .set_model(session.effects.particles.model_matrix());
        self.particles.write(&self.queue);
        self.stars.write(&self.queue);

        self.glow_scratch.clear();
        instanced::laser_instances(session.effects.lasers.beams(), &mut self.glow_scratch);
        instanced::beam_instances(&session.locomotion, &mut self.glow_scratch);
        self.glow_cylinders.write(&self.queue, &self.glow_scratch);
        let marker: Vec<InstanceData> =
            instanced::marker_instance(&session.locomotion).into_iter().collect();
        self.marker.write(&self.queue, &marker);

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("club_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            rpass.set_pipeline(&self.meshes.lit);
            self.env_boxes.draw(&mut rpass);
            self.env_cylinders.draw(&mut rpass);
            self.env_cones.draw(&mut rpass);

            rpass.set_pipeline(&self.meshes.lines);
            self.grid.draw(&mut rpass);

            rpass.set_pipeline(&self.points_pipeline);
            self.stars.draw(&mut rpass);

            self.floor.draw(&mut rpass);

            rpass.set_pipeline(&self.points_pipeline);
            self.particles.draw(&mut rpass);

            rpass.set_pipeline(&self.meshes.glow);
            self.glow_cylinders.draw(&mut rpass);
            self.marker.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Points scattered uniformly through a cube of side `spread` around the
/// origin.
fn starfield(count: usize, spread: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
            )
        })
        .collect()
}
