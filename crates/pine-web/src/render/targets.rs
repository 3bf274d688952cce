use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen targets: full-resolution HDR colour and depth for the scene,
/// plus two half-resolution bloom ping-pong textures. Views keep the
/// underlying textures alive, so only the views are retained.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (bw, bh) = bloom_size(width, height);
        Self {
            hdr_view: helpers::create_color_target(device, "hdr_tex", width, height, HDR_FORMAT),
            depth_view: helpers::create_depth_target(device, "depth_tex", width, height),
            bloom_a_view: helpers::create_color_target(device, "bloom_a", bw, bh, HDR_FORMAT),
            bloom_b_view: helpers::create_color_target(device, "bloom_b", bw, bh, HDR_FORMAT),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::create(device, width, height);
    }
}

/// Bloom runs at half resolution, clamped so zero-sized surfaces never
/// produce zero-sized textures.
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}
