//! Desktop viewer: the same scene on winit + wgpu, rendered straight to the
//! surface. There is no webcam on this path; the mouse stands in for the
//! gesture centroid and Space flips the mode. Photo panels and the bloom
//! chain stay web-only.

use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use glam::Vec2;
use pine_core::{
    linear_rgb, unit_cube, uv_sphere, Camera, FoliageRaw, InstanceRaw, MeshData, MeshVertex,
    OrnamentKind, SceneUniforms, TreeScene, BACKGROUND, ORNAMENT_COUNT, PARTICLE_PIXEL_SIZE,
};

const SCENE_SEED: u64 = 42;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

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

struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Mesh {
    Mesh {
        vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vb")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }),
        index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_ib")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        }),
        index_count: mesh.indices.len() as u32,
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_tex"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

#[allow(clippy::too_many_arguments)]
fn make_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    cull: Option<wgpu::Face>,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: cull,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

// src * srcAlpha + dst, matching the web foliage layer
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

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    foliage_pipeline: wgpu::RenderPipeline,
    foliage_vb: wgpu::Buffer,
    foliage_count: u32,

    solids_pipeline: wgpu::RenderPipeline,
    ball_mesh: Mesh,
    box_mesh: Mesh,
    light_mesh: Mesh,
    ball_instances: wgpu::Buffer,
    box_instances: wgpu::Buffer,
    light_instances: wgpu::Buffer,

    scene: TreeScene,
    width: u32,
    height: u32,
    last_frame: Instant,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let foliage_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("foliage_shader"),
            source: wgpu::ShaderSource::Wgsl(pine_core::FOLIAGE_WGSL.into()),
        });
        let ornaments_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ornaments_shader"),
            source: wgpu::ShaderSource::Wgsl(pine_core::ORNAMENTS_WGSL.into()),
        });

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let scene = TreeScene::new(SCENE_SEED);

        let raw: Vec<FoliageRaw> = scene
            .layout()
            .foliage
            .iter()
            .map(FoliageRaw::from_point)
            .collect();
        let foliage_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("foliage_vb"),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let foliage_pipeline = make_pipeline(
            &device,
            "foliage_pipeline",
            &pipeline_layout,
            &foliage_shader,
            &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<FoliageRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &FOLIAGE_ATTRS,
            }],
            wgpu::PrimitiveTopology::TriangleStrip,
            None,
            Some(ADDITIVE),
            false,
            format,
        );
        let solids_pipeline = make_pipeline(
            &device,
            "solids_pipeline",
            &pipeline_layout,
            &ornaments_shader,
            &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &MESH_VERTEX_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRS,
                },
            ],
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
            Some(wgpu::BlendState::REPLACE),
            true,
            format,
        );

        let ball_mesh = upload_mesh(&device, "ball", &uv_sphere(16, 16));
        let box_mesh = upload_mesh(&device, "box", &unit_cube());
        let light_mesh = upload_mesh(&device, "light", &uv_sphere(8, 8));
        let instance_buffer = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (std::mem::size_of::<InstanceRaw>() * ORNAMENT_COUNT) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let ball_instances = instance_buffer("ball_instances");
        let box_instances = instance_buffer("box_instances");
        let light_instances = instance_buffer("light_instances");

        log::info!(
            "GPU up: {}x{}, surface format {format:?}",
            config.width,
            config.height
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config: config.clone(),
            depth_view,
            uniforms,
            bind_group,
            foliage_pipeline,
            foliage_vb,
            foliage_count: raw.len() as u32,
            solids_pipeline,
            ball_mesh,
            box_mesh,
            light_mesh,
            ball_instances,
            box_instances,
            light_instances,
            scene,
            width: config.width,
            height: config.height,
            last_frame: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.width, self.height);
    }

    /// Mouse position in surface pixels to the [-1, 1] pointer space, y up,
    /// the same space the web gesture centroid lives in.
    fn pointer_moved(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        let x = (position.x / self.width.max(1) as f64) * 2.0 - 1.0;
        let y = 1.0 - (position.y / self.height.max(1) as f64) * 2.0;
        self.scene.set_pointer(Vec2::new(x as f32, y as f32));
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.scene.tick(dt);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = Camera::showcase(self.width as f32 / self.height.max(1) as f32);
        let point_size = PARTICLE_PIXEL_SIZE * 2.0 * (camera.fovy_radians * 0.5).tan()
            / self.height.max(1) as f32;
        self.queue.write_buffer(
            &self.uniforms,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(
                self.scene.group_transform(),
                camera.view_matrix(),
                camera.projection_matrix(),
                self.scene.elapsed(),
                self.scene.progress(),
                point_size,
            )),
        );

        let mut balls = Vec::with_capacity(ORNAMENT_COUNT);
        let mut boxes = Vec::with_capacity(ORNAMENT_COUNT);
        let mut lights = Vec::with_capacity(ORNAMENT_COUNT);
        for (i, spec) in self.scene.layout().ornaments.iter().enumerate() {
            let raw = self.scene.ornament_instance(i).raw();
            match spec.kind {
                OrnamentKind::Ball => balls.push(raw),
                OrnamentKind::Box => boxes.push(raw),
                OrnamentKind::Light => lights.push(raw),
            }
        }
        self.queue
            .write_buffer(&self.ball_instances, 0, bytemuck::cast_slice(&balls));
        self.queue
            .write_buffer(&self.box_instances, 0, bytemuck::cast_slice(&boxes));
        self.queue
            .write_buffer(&self.light_instances, 0, bytemuck::cast_slice(&lights));

        let bg = linear_rgb(BACKGROUND);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.x as f64,
                            g: bg.y as f64,
                            b: bg.z as f64,
                            a: 1.0,
                        }),
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

            rpass.set_pipeline(&self.solids_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            draw_solid(&mut rpass, &self.ball_mesh, &self.ball_instances, balls.len());
            draw_solid(&mut rpass, &self.box_mesh, &self.box_instances, boxes.len());
            draw_solid(
                &mut rpass,
                &self.light_mesh,
                &self.light_instances,
                lights.len(),
            );

            rpass.set_pipeline(&self.foliage_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.foliage_vb.slice(..));
            rpass.draw(0..4, 0..self.foliage_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn draw_solid(
    rpass: &mut wgpu::RenderPass<'_>,
    mesh: &Mesh,
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

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Magnificent Golden Pine (native)")
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");
    log::info!("no webcam on this path: Space flips the scene, the mouse drifts it, Escape quits");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => state.pointer_moved(position),
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key, .. },
                ..
            } => {
                if key.state == ElementState::Pressed && !key.repeat {
                    match key.logical_key {
                        Key::Named(NamedKey::Space) => state.scene.toggle_mode(),
                        Key::Named(NamedKey::Escape) => elwt.exit(),
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            },
            _ => {}
        })
        .unwrap();
}
