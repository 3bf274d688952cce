//! WebGPU renderer: scene into an HDR target, then bloom and composite.
//!
//! Three scene pipelines share one uniform layout: instanced lit solids
//! (ornaments, panel frames, floor), textured panel faces and the additive
//! foliage billboards. The post chain lives in `render/post.rs`; offscreen
//! targets in `render/targets.rs`.

use glam::Mat4;
use pine_core::{
    disc, linear_rgb, panel_quad, quad, unit_cube, uv_sphere, Camera, FoliagePoint, FoliageRaw,
    InstanceRaw, MeshVertex, PanelVertex, SceneUniforms, BACKGROUND, FLOOR_RADIUS, FLOOR_TINT,
    FLOOR_Y, ORNAMENT_COUNT, PANEL_COUNT, PANEL_FACE_HEIGHT, PANEL_FACE_WIDTH, PANEL_FRAME_HEIGHT,
    PANEL_FRAME_SETBACK, PANEL_FRAME_WIDTH, PARTICLE_PIXEL_SIZE,
};
use wgpu::util::DeviceExt;
use web_sys as web;

use crate::texture::PanelTexture;

mod helpers;
mod post;
mod targets;

use helpers::{GpuMesh, ScenePipelineDesc};
use targets::RenderTargets;

/// Per-frame instance vectors, grouped the way the draw calls want them.
/// Built by the frame loop from the blended scene; the floor never moves and
/// stays out of here.
pub struct SceneBatches {
    pub balls: Vec<InstanceRaw>,
    pub boxes: Vec<InstanceRaw>,
    pub lights: Vec<InstanceRaw>,
    pub frames: Vec<InstanceRaw>,
    pub panels: Vec<InstanceRaw>,
}

const MESH_VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
];

const PANEL_VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 12,
        shader_location: 1,
    },
];

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 4] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 2,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32,
        offset: 12,
        shader_location: 3,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 16,
        shader_location: 4,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 32,
        shader_location: 5,
    },
];

const FOLIAGE_ATTRS: [wgpu::VertexAttribute; 3] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 24,
        shader_location: 2,
    },
];

fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_VERTEX_ATTRS,
    }
}

fn panel_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PanelVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &PANEL_VERTEX_ATTRS,
    }
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }
}

fn foliage_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<FoliageRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &FOLIAGE_ATTRS,
    }
}

fn draw_solid(
    rpass: &mut wgpu::RenderPass<'_>,
    mesh: &GpuMesh,
    instances: &wgpu::Buffer,
    count: usize,
) {
    if count == 0 {
        return;
    }
    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    rpass.set_vertex_buffer(1, instances.slice(..));
    rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    rpass.draw_indexed(0..mesh.index_count, 0, 0..count as u32);
}

// src * srcAlpha + dst, the classic additive glow
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,

    // One uniform buffer for everything inside the drifting, spinning group
    // and one with an identity model for the fixed floor.
    group_uniforms: wgpu::Buffer,
    static_uniforms: wgpu::Buffer,
    group_bg: wgpu::BindGroup,
    static_bg: wgpu::BindGroup,
    panel_bgl: wgpu::BindGroupLayout,

    foliage_pipeline: wgpu::RenderPipeline,
    foliage_vb: wgpu::Buffer,
    foliage_count: u32,

    solids_pipeline: wgpu::RenderPipeline,
    ball_mesh: GpuMesh,
    box_mesh: GpuMesh,
    light_mesh: GpuMesh,
    frame_mesh: GpuMesh,
    floor_mesh: GpuMesh,
    ball_instances: wgpu::Buffer,
    box_instances: wgpu::Buffer,
    light_instances: wgpu::Buffer,
    frame_instances: wgpu::Buffer,
    floor_instance: wgpu::Buffer,

    panels_pipeline: wgpu::RenderPipeline,
    panel_mesh: GpuMesh,
    panel_instances: wgpu::Buffer,

    post: post::PostResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        foliage: &[FoliagePoint],
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits travel furthest across browser WebGPU builds
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::create(&device, width, height);

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Shared scene uniform layout (group 0 of every scene pipeline)
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let panel_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("panel_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let scene_uniform = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<SceneUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let group_uniforms = scene_uniform("group_uniforms");
        let static_uniforms = scene_uniform("static_uniforms");
        let scene_group = |label: &str, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &scene_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };
        let group_bg = scene_group("group_bg", &group_uniforms);
        let static_bg = scene_group("static_bg", &static_uniforms);

        let pl_scene = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let pl_panels = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_panels"),
            bind_group_layouts: &[&scene_bgl, &panel_bgl],
            push_constant_ranges: &[],
        });

        let foliage_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("foliage_shader"),
            source: wgpu::ShaderSource::Wgsl(pine_core::FOLIAGE_WGSL.into()),
        });
        let ornaments_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ornaments_shader"),
            source: wgpu::ShaderSource::Wgsl(pine_core::ORNAMENTS_WGSL.into()),
        });
        let panels_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("panels_shader"),
            source: wgpu::ShaderSource::Wgsl(pine_core::PANELS_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(pine_core::POST_WGSL.into()),
        });

        // Each particle is a camera-facing strip of four corners; the blend
        // and wave run in the vertex shader, so the buffer is written once.
        let foliage_pipeline = helpers::make_scene_pipeline(
            &device,
            &ScenePipelineDesc {
                label: "foliage_pipeline",
                layout: &pl_scene,
                shader: &foliage_shader,
                buffers: &[foliage_layout()],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull: None,
                blend: Some(ADDITIVE),
                depth_write: false,
            },
        );
        let solids_pipeline = helpers::make_scene_pipeline(
            &device,
            &ScenePipelineDesc {
                label: "solids_pipeline",
                layout: &pl_scene,
                shader: &ornaments_shader,
                buffers: &[mesh_vertex_layout(), instance_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull: Some(wgpu::Face::Back),
                blend: Some(wgpu::BlendState::REPLACE),
                depth_write: true,
            },
        );
        let panels_pipeline = helpers::make_scene_pipeline(
            &device,
            &ScenePipelineDesc {
                label: "panels_pipeline",
                layout: &pl_panels,
                shader: &panels_shader,
                buffers: &[panel_vertex_layout(), instance_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull: Some(wgpu::Face::Back),
                blend: Some(wgpu::BlendState::REPLACE),
                depth_write: true,
            },
        );

        let raw: Vec<FoliageRaw> = foliage.iter().map(FoliageRaw::from_point).collect();
        let foliage_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("foliage_vb"),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ball_mesh = helpers::upload_mesh(&device, "ball", &uv_sphere(16, 16));
        let box_mesh = helpers::upload_mesh(&device, "box", &unit_cube());
        let light_mesh = helpers::upload_mesh(&device, "light", &uv_sphere(8, 8));
        let frame_mesh = helpers::upload_mesh(
            &device,
            "frame",
            &quad(PANEL_FRAME_WIDTH, PANEL_FRAME_HEIGHT, -PANEL_FRAME_SETBACK),
        );
        let floor_mesh = helpers::upload_mesh(&device, "floor", &disc(64));
        let (panel_vertices, panel_indices) = panel_quad(PANEL_FACE_WIDTH, PANEL_FACE_HEIGHT);
        let panel_mesh =
            helpers::upload_panel_mesh(&device, "panel", &panel_vertices, &panel_indices);

        let instance_buffer = |label: &str, capacity: usize| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (std::mem::size_of::<InstanceRaw>() * capacity) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        // Kind counts depend on the seed, so every kind gets the full budget.
        let ball_instances = instance_buffer("ball_instances", ORNAMENT_COUNT);
        let box_instances = instance_buffer("box_instances", ORNAMENT_COUNT);
        let light_instances = instance_buffer("light_instances", ORNAMENT_COUNT);
        let frame_instances = instance_buffer("frame_instances", PANEL_COUNT);
        let panel_instances = instance_buffer("panel_instances", PANEL_COUNT);
        let floor = InstanceRaw::from_parts(
            glam::Vec3::new(0.0, FLOOR_Y, 0.0),
            FLOOR_RADIUS,
            glam::Quat::IDENTITY,
            linear_rgb(FLOOR_TINT),
            false,
        );
        let floor_instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_instance"),
            contents: bytemuck::bytes_of(&floor),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let post = post::PostResources::new(&device, &post_shader, format, &targets, &linear_sampler);
        post.write_static_uniforms(&queue, width, height);

        let bg = linear_rgb(BACKGROUND);
        let clear_color = wgpu::Color {
            r: bg.x as f64,
            g: bg.y as f64,
            b: bg.z as f64,
            a: 1.0,
        };

        log::info!("WebGPU up: {width}x{height}, surface format {format:?}");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            group_uniforms,
            static_uniforms,
            group_bg,
            static_bg,
            panel_bgl,
            foliage_pipeline,
            foliage_vb,
            foliage_count: foliage.len() as u32,
            solids_pipeline,
            ball_mesh,
            box_mesh,
            light_mesh,
            frame_mesh,
            floor_mesh,
            ball_instances,
            box_instances,
            light_instances,
            frame_instances,
            floor_instance,
            panels_pipeline,
            panel_mesh,
            panel_instances,
            post,
            width,
            height,
            clear_color,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Layout the per-panel face bind groups are built against.
    pub fn panel_bgl(&self) -> &wgpu::BindGroupLayout {
        &self.panel_bgl
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.linear_sampler
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.post
            .rebuild_bind_groups(&self.device, &self.targets, &self.linear_sampler);
        self.post.write_static_uniforms(&self.queue, width, height);
    }

    /// Draw one frame: scene into HDR, bright pass, separable blur, then the
    /// composite onto the swapchain.
    pub fn render(
        &mut self,
        model: Mat4,
        time: f32,
        progress: f32,
        batches: &SceneBatches,
        faces: &[PanelTexture],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = Camera::showcase(self.width as f32 / self.height.max(1) as f32);
        // Pixels at unit view depth -> view units; projection divides by
        // depth, which is exactly the attenuation the page version had.
        let point_size = PARTICLE_PIXEL_SIZE * 2.0 * (camera.fovy_radians * 0.5).tan()
            / self.height.max(1) as f32;
        let view_m = camera.view_matrix();
        let proj_m = camera.projection_matrix();
        self.queue.write_buffer(
            &self.group_uniforms,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(
                model, view_m, proj_m, time, progress, point_size,
            )),
        );
        self.queue.write_buffer(
            &self.static_uniforms,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(
                Mat4::IDENTITY,
                view_m,
                proj_m,
                time,
                progress,
                point_size,
            )),
        );
        self.post
            .write_frame_uniforms(&self.queue, self.width, self.height, time);

        self.queue
            .write_buffer(&self.ball_instances, 0, bytemuck::cast_slice(&batches.balls));
        self.queue
            .write_buffer(&self.box_instances, 0, bytemuck::cast_slice(&batches.boxes));
        self.queue.write_buffer(
            &self.light_instances,
            0,
            bytemuck::cast_slice(&batches.lights),
        );
        self.queue.write_buffer(
            &self.frame_instances,
            0,
            bytemuck::cast_slice(&batches.frames),
        );
        self.queue.write_buffer(
            &self.panel_instances,
            0,
            bytemuck::cast_slice(&batches.panels),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.solids_pipeline);
            rpass.set_bind_group(0, &self.group_bg, &[]);
            draw_solid(&mut rpass, &self.ball_mesh, &self.ball_instances, batches.balls.len());
            draw_solid(&mut rpass, &self.box_mesh, &self.box_instances, batches.boxes.len());
            draw_solid(
                &mut rpass,
                &self.light_mesh,
                &self.light_instances,
                batches.lights.len(),
            );
            draw_solid(
                &mut rpass,
                &self.frame_mesh,
                &self.frame_instances,
                batches.frames.len(),
            );
            // The floor sits outside the drifting group.
            rpass.set_bind_group(0, &self.static_bg, &[]);
            draw_solid(&mut rpass, &self.floor_mesh, &self.floor_instance, 1);

            rpass.set_pipeline(&self.panels_pipeline);
            rpass.set_bind_group(0, &self.group_bg, &[]);
            rpass.set_vertex_buffer(0, self.panel_mesh.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.panel_instances.slice(..));
            rpass.set_index_buffer(
                self.panel_mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            for (i, face) in faces.iter().enumerate().take(batches.panels.len()) {
                rpass.set_bind_group(1, &face.bind_group, &[]);
                let i = i as u32;
                rpass.draw_indexed(0..self.panel_mesh.index_count, 0, i..i + 1);
            }

            rpass.set_pipeline(&self.foliage_pipeline);
            rpass.set_bind_group(0, &self.group_bg, &[]);
            rpass.set_vertex_buffer(0, self.foliage_vb.slice(..));
            rpass.draw(0..4, 0..self.foliage_count);
        }

        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post.bg_bright,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post.bg_blur_h,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post.bg_blur_v,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            wgpu::Color::BLACK,
            &self.post.composite_pipeline,
            &self.post.bg_composite,
            Some(&self.post.bg_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
