//! Webcam capture and the gesture classification loop.
//!
//! Runs on its own requestAnimationFrame loop, independent of the render
//! loop: each frame is downscaled into a small offscreen canvas, classified
//! by `pine_core::classify_frame`, and the result handed to the hooks. The
//! render loop only ever sees the single-slot cells the hooks write into.

use pine_core::{classify_frame, CaptureError, GestureSample, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct GestureHooks {
    /// Fired once, on the first frame read back from the camera.
    pub on_ready: Box<dyn Fn()>,
    /// Fired for every frame with at least one bright pixel.
    pub on_sample: Box<dyn Fn(GestureSample)>,
}

/// Keeps the capture loop stoppable; dropping it does not stop anything,
/// call [`CaptureHandle::stop`].
pub struct CaptureHandle {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
    raf_id: Rc<Cell<i32>>,
    active: Rc<Cell<bool>>,
}

impl CaptureHandle {
    /// Halt classification, release the camera and drop the hidden video.
    pub fn stop(&self) {
        self.active.set(false);
        if let Some(w) = web::window() {
            let _ = w.cancel_animation_frame(self.raf_id.get());
        }
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.remove();
        log::info!("camera capture stopped");
    }
}

/// Ask for the webcam and start the classification loop.
///
/// The stream is requested at the capture resolution; browsers are free to
/// hand back something larger, the draw into the fixed-size canvas rescales
/// either way.
pub async fn start_capture(
    document: &web::Document,
    hooks: GestureHooks,
) -> Result<CaptureHandle, CaptureError> {
    let window = web::window().ok_or_else(|| CaptureError::Unsupported("no window".into()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| classify_js(&e))?;

    let track = web::MediaTrackConstraints::new();
    track.set_width(&JsValue::from_f64(CAPTURE_WIDTH as f64));
    track.set_height(&JsValue::from_f64(CAPTURE_HEIGHT as f64));
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::from(track));
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| classify_js(&e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| classify_js(&e))?
        .dyn_into()
        .map_err(|_| CaptureError::Failed("getUserMedia returned a non-stream".into()))?;

    let video: web::HtmlVideoElement = document
        .create_element("video")
        .map_err(|e| classify_js(&e))?
        .dyn_into()
        .map_err(|_| CaptureError::Failed("could not create a video element".into()))?;
    video.set_autoplay(true);
    video.set_muted(true);
    let _ = video.set_attribute("playsinline", "true");
    let _ = video.set_attribute("style", "display:none");
    video.set_src_object(Some(&stream));
    if let Some(body) = document.body() {
        let _ = body.append_child(&video);
    }
    let _ = video.play();

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| classify_js(&e))?
        .dyn_into()
        .map_err(|_| CaptureError::Failed("could not create a capture canvas".into()))?;
    canvas.set_width(CAPTURE_WIDTH);
    canvas.set_height(CAPTURE_HEIGHT);
    let ctx_options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&ctx_options, &"willReadFrequently".into(), &JsValue::TRUE);
    let ctx = canvas
        .get_context_with_context_options("2d", &ctx_options)
        .map_err(|e| classify_js(&e))?
        .ok_or_else(|| CaptureError::Unsupported("no 2d context".into()))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| CaptureError::Unsupported("unexpected 2d context type".into()))?;

    let active = Rc::new(Cell::new(true));
    let raf_id = Rc::new(Cell::new(0));

    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let active_tick = active.clone();
    let raf_tick = raf_id.clone();
    let video_tick = video.clone();
    let mut announced = false;
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !active_tick.get() {
            return;
        }
        // HAVE_CURRENT_DATA and later expose pixels for readback
        if video_tick.ready_state() >= 2 {
            let _ = ctx.draw_image_with_html_video_element_and_dw_and_dh(
                &video_tick,
                0.0,
                0.0,
                CAPTURE_WIDTH as f64,
                CAPTURE_HEIGHT as f64,
            );
            if let Ok(image) =
                ctx.get_image_data(0.0, 0.0, CAPTURE_WIDTH as f64, CAPTURE_HEIGHT as f64)
            {
                if !announced {
                    announced = true;
                    (hooks.on_ready)();
                }
                let data = image.data();
                if let Some(sample) = classify_frame(&data, CAPTURE_WIDTH, CAPTURE_HEIGHT) {
                    (hooks.on_sample)(sample);
                }
            }
        }
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            ) {
                raf_tick.set(id);
            }
        }
    }) as Box<dyn FnMut()>));
    if let Ok(id) =
        window.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
    {
        raf_id.set(id);
    }

    log::info!("camera capture running at {CAPTURE_WIDTH}x{CAPTURE_HEIGHT}");
    Ok(CaptureHandle {
        stream,
        video,
        raf_id,
        active,
    })
}

/// Map a DOM exception to the capture error taxonomy.
fn classify_js(err: &JsValue) -> CaptureError {
    let name = js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    let message = js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    CaptureError::from_dom_name(&name, &message)
}
