//! Bloom and composite chain: bright pass into bloom_a, separable blur
//! bloom_a -> bloom_b -> bloom_a, then composite onto the swapchain.
//!
//! Every stage owns its uniform buffer. Blur direction and resolution only
//! change on resize, so those buffers are written then; the composite buffer
//! is the only per-frame write (the grain needs the time).

use pine_core::{PostUniforms, BLOOM_STRENGTH, BLOOM_THRESHOLD, GRAIN_AMOUNT};

use super::helpers;
use super::targets::{bloom_size, RenderTargets, HDR_FORMAT};

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // uniforms + source texture + sampler
    pub(crate) bgl1: wgpu::BindGroupLayout, // bloom texture for the composite
    pub(crate) bright_uniforms: wgpu::Buffer,
    pub(crate) blur_h_uniforms: wgpu::Buffer,
    pub(crate) blur_v_uniforms: wgpu::Buffer,
    pub(crate) composite_uniforms: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
    pub(crate) bg_bright: wgpu::BindGroup,    // hdr -> bloom_a
    pub(crate) bg_blur_h: wgpu::BindGroup,    // bloom_a -> bloom_b
    pub(crate) bg_blur_v: wgpu::BindGroup,    // bloom_b -> bloom_a
    pub(crate) bg_composite: wgpu::BindGroup, // hdr -> swapchain
    pub(crate) bg_bloom: wgpu::BindGroup,     // group 1: blurred bloom_a
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        swap_format: wgpu::TextureFormat,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            }],
        });

        let bright_uniforms = uniform_buffer(device, "bright_uniforms");
        let blur_h_uniforms = uniform_buffer(device, "blur_h_uniforms");
        let blur_v_uniforms = uniform_buffer(device, "blur_v_uniforms");
        let composite_uniforms = uniform_buffer(device, "composite_uniforms");

        let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline =
            helpers::make_post_pipeline(device, &pl_bright_blur, shader, "fs_bright", HDR_FORMAT, None);
        let blur_pipeline =
            helpers::make_post_pipeline(device, &pl_bright_blur, shader, "fs_blur", HDR_FORMAT, None);
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            &pl_composite,
            shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );

        let [bg_bright, bg_blur_h, bg_blur_v, bg_composite, bg_bloom] = stage_groups(
            device,
            &bgl0,
            &bgl1,
            &bright_uniforms,
            &blur_h_uniforms,
            &blur_v_uniforms,
            &composite_uniforms,
            targets,
            sampler,
        );

        Self {
            bgl0,
            bgl1,
            bright_uniforms,
            blur_h_uniforms,
            blur_v_uniforms,
            composite_uniforms,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            bg_bright,
            bg_blur_h,
            bg_blur_v,
            bg_composite,
            bg_bloom,
        }
    }

    /// The targets were recreated; point the bind groups at the new views.
    pub(crate) fn rebuild_bind_groups(
        &mut self,
        device: &wgpu::Device,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) {
        let [bg_bright, bg_blur_h, bg_blur_v, bg_composite, bg_bloom] = stage_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.bright_uniforms,
            &self.blur_h_uniforms,
            &self.blur_v_uniforms,
            &self.composite_uniforms,
            targets,
            sampler,
        );
        self.bg_bright = bg_bright;
        self.bg_blur_h = bg_blur_h;
        self.bg_blur_v = bg_blur_v;
        self.bg_composite = bg_composite;
        self.bg_bloom = bg_bloom;
    }

    /// Write the resize-dependent uniforms for the bright and blur stages.
    pub(crate) fn write_static_uniforms(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let (bw, bh) = bloom_size(width, height);
        let base = PostUniforms {
            resolution: [bw as f32, bh as f32],
            time: 0.0,
            grain: 0.0,
            blur_dir: [0.0, 0.0],
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        };
        queue.write_buffer(&self.bright_uniforms, 0, bytemuck::bytes_of(&base));
        queue.write_buffer(
            &self.blur_h_uniforms,
            0,
            bytemuck::bytes_of(&PostUniforms {
                blur_dir: [1.0, 0.0],
                ..base
            }),
        );
        queue.write_buffer(
            &self.blur_v_uniforms,
            0,
            bytemuck::bytes_of(&PostUniforms {
                blur_dir: [0.0, 1.0],
                ..base
            }),
        );
    }

    /// Per-frame composite uniforms; the grain hash wants wall-clock time.
    pub(crate) fn write_frame_uniforms(
        &self,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        time: f32,
    ) {
        let u = PostUniforms {
            resolution: [width as f32, height as f32],
            time,
            grain: GRAIN_AMOUNT,
            blur_dir: [0.0, 0.0],
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        };
        queue.write_buffer(&self.composite_uniforms, 0, bytemuck::bytes_of(&u));
    }
}

fn uniform_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[allow(clippy::too_many_arguments)]
fn stage_groups(
    device: &wgpu::Device,
    bgl0: &wgpu::BindGroupLayout,
    bgl1: &wgpu::BindGroupLayout,
    bright_uniforms: &wgpu::Buffer,
    blur_h_uniforms: &wgpu::Buffer,
    blur_v_uniforms: &wgpu::Buffer,
    composite_uniforms: &wgpu::Buffer,
    targets: &RenderTargets,
    sampler: &wgpu::Sampler,
) -> [wgpu::BindGroup; 5] {
    let stage = |label: &str, uniforms: &wgpu::Buffer, view: &wgpu::TextureView| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    };
    let bg_bloom = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom"),
        layout: bgl1,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
        }],
    });
    [
        stage("bg_bright", bright_uniforms, &targets.hdr_view),
        stage("bg_blur_h", blur_h_uniforms, &targets.bloom_a_view),
        stage("bg_blur_v", blur_v_uniforms, &targets.bloom_b_view),
        stage("bg_composite", composite_uniforms, &targets.hdr_view),
        bg_bloom,
    ]
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
