//! Photo panel face textures.
//!
//! Each panel carries one face texture composed on an offscreen 2D canvas:
//! white card, photo and caption. Until the remote photo arrives the photo
//! area is a deep emerald block, so panels render sensibly offline. When a
//! photo lands the face is recomposed and re-uploaded in place; bind groups
//! never change after startup.

use anyhow::{anyhow, Result};
use pine_core::{
    PanelSpec, CAPTION_INK, EMERALD_DEEP, PANEL_CAPTION_SIZE, PANEL_CAPTION_Y, PANEL_FACE_WIDTH,
    PANEL_PHOTO_CENTER_Y, PANEL_PHOTO_SIZE, PANEL_TEXTURE_HEIGHT, PANEL_TEXTURE_WIDTH, WHITE_GLOW,
};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct PanelTexture {
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
}

/// Compose the placeholder faces and wrap them in bind groups, one per panel.
pub fn create_panel_set(
    document: &web::Document,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    panel_bgl: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    panels: &[PanelSpec],
) -> Result<Vec<PanelTexture>> {
    let composer = Composer::new(document)?;
    panels
        .iter()
        .map(|spec| {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(&format!("panel_face_{}", spec.id)),
                size: wgpu::Extent3d {
                    width: PANEL_TEXTURE_WIDTH,
                    height: PANEL_TEXTURE_HEIGHT,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            let rgba = composer.face_rgba(&spec.caption, None)?;
            upload_face(queue, &texture, &rgba);
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("panel_face_bg_{}", spec.id)),
                layout: panel_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            });
            Ok(PanelTexture {
                texture,
                bind_group,
            })
        })
        .collect()
}

/// Kick off the remote photo loads. Each arrival recomposes its face texture
/// in place; failures are logged and the placeholder stays.
pub fn begin_photo_fetch(
    document: &web::Document,
    queue: &wgpu::Queue,
    panels: &[PanelSpec],
    faces: &[PanelTexture],
) -> Result<()> {
    let composer = Rc::new(Composer::new(document)?);
    for (spec, face) in panels.iter().zip(faces) {
        let img = web::HtmlImageElement::new()
            .map_err(|e| anyhow!("could not create an image element: {e:?}"))?;
        img.set_cross_origin(Some("anonymous"));

        let onload = {
            let composer = composer.clone();
            let img = img.clone();
            let queue = queue.clone();
            let texture = face.texture.clone();
            let caption = spec.caption.clone();
            let id = spec.id;
            Closure::wrap(Box::new(move || {
                match composer.face_rgba(&caption, Some(&img)) {
                    Ok(rgba) => upload_face(&queue, &texture, &rgba),
                    Err(e) => log::warn!("panel {id}: photo readback failed: {e}"),
                }
            }) as Box<dyn FnMut()>)
        };
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = {
            let id = spec.id;
            let url = spec.photo_url.clone();
            Closure::wrap(Box::new(move || {
                log::warn!("panel {id}: photo did not load from {url}, keeping placeholder");
            }) as Box<dyn FnMut()>)
        };
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        img.set_src(&spec.photo_url);
    }
    Ok(())
}

fn upload_face(queue: &wgpu::Queue, texture: &wgpu::Texture, rgba: &[u8]) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * PANEL_TEXTURE_WIDTH),
            rows_per_image: Some(PANEL_TEXTURE_HEIGHT),
        },
        wgpu::Extent3d {
            width: PANEL_TEXTURE_WIDTH,
            height: PANEL_TEXTURE_HEIGHT,
            depth_or_array_layers: 1,
        },
    );
}

/// Offscreen canvas the faces are drawn on. One instance serves every panel;
/// composition happens synchronously on the main thread.
struct Composer {
    ctx: web::CanvasRenderingContext2d,
}

impl Composer {
    fn new(document: &web::Document) -> Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow!("could not create the compose canvas: {e:?}"))?
            .dyn_into()
            .map_err(|_| anyhow!("compose canvas has the wrong element type"))?;
        canvas.set_width(PANEL_TEXTURE_WIDTH);
        canvas.set_height(PANEL_TEXTURE_HEIGHT);
        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &"willReadFrequently".into(), &JsValue::TRUE);
        let ctx = canvas
            .get_context_with_context_options("2d", &options)
            .map_err(|e| anyhow!("2d context failed: {e:?}"))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("unexpected 2d context type"))?;
        Ok(Composer { ctx })
    }

    /// Draw the face and read it back as tightly packed RGBA rows.
    fn face_rgba(&self, caption: &str, photo: Option<&web::HtmlImageElement>) -> Result<Vec<u8>> {
        let w = PANEL_TEXTURE_WIDTH as f64;
        let h = PANEL_TEXTURE_HEIGHT as f64;
        // Texture space is the panel face at 200 px per local unit, y down.
        let px = w / PANEL_FACE_WIDTH as f64;
        let photo_size = PANEL_PHOTO_SIZE as f64 * px;
        let photo_x = (w - photo_size) / 2.0;
        let photo_y = h / 2.0 - PANEL_PHOTO_CENTER_Y as f64 * px - photo_size / 2.0;
        let caption_y = h / 2.0 - PANEL_CAPTION_Y as f64 * px;
        let caption_px = PANEL_CAPTION_SIZE as f64 * px;

        self.ctx.set_fill_style_str(&hex(WHITE_GLOW));
        self.ctx.fill_rect(0.0, 0.0, w, h);
        match photo {
            Some(img) => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        img, photo_x, photo_y, photo_size, photo_size,
                    )
                    .map_err(|e| anyhow!("photo draw failed: {e:?}"))?;
            }
            None => {
                self.ctx.set_fill_style_str(&hex(EMERALD_DEEP));
                self.ctx.fill_rect(photo_x, photo_y, photo_size, photo_size);
            }
        }
        self.ctx.set_fill_style_str(&hex(CAPTION_INK));
        self.ctx.set_font(&format!("{caption_px:.0}px serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx
            .fill_text(caption, w / 2.0, caption_y)
            .map_err(|e| anyhow!("caption draw failed: {e:?}"))?;

        let image = self
            .ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| anyhow!("face readback failed: {e:?}"))?;
        Ok(image.data().0)
    }
}

fn hex(c: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}
