#![cfg(target_arch = "wasm32")]
//! Browser front-end: DOM and input wiring, webcam gesture capture and the
//! WebGPU renderer, all around the platform-free core crate.

mod camera;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod texture;

use instant::Instant;
use pine_core::TreeScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CANVAS_ID: &str = "app-canvas";
const SCENE_SEED: u64 = 42;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pine-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    dom::sync_canvas_backing_size(&canvas);
    dom::wire_resize_sync(&canvas);

    let scene = TreeScene::new(SCENE_SEED);

    let mode_slot: events::ModeSlot = Rc::new(RefCell::new(None));
    let gesture_slot: events::GestureSlot = Rc::new(RefCell::new(None));
    events::wire_global_keydown(mode_slot.clone(), canvas.clone());
    events::wire_toggle_button(&document, mode_slot.clone());

    let gpu = frame::init_gpu(&canvas, &scene.layout().foliage).await?;
    let faces = texture::create_panel_set(
        &document,
        gpu.device(),
        gpu.queue(),
        gpu.panel_bgl(),
        gpu.sampler(),
        &scene.layout().panels,
    )?;
    texture::begin_photo_fetch(&document, gpu.queue(), &scene.layout().panels, &faces)?;

    // The scene animates from here on; the camera permission prompt below
    // must not hold the first frame back.
    let button_mode = scene.mode();
    let ctx = frame::FrameContext {
        scene,
        mode_slot,
        gesture_slot: gesture_slot.clone(),
        gpu,
        canvas,
        faces,
        document: document.clone(),
        button_mode,
        last_instant: Instant::now(),
    };
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    log::info!("scene loop running");

    // Gesture capture is best-effort: without a camera the scene stays on
    // keyboard and button control.
    let status_document = document.clone();
    let hooks = camera::GestureHooks {
        on_ready: Box::new(move || {
            dom::set_text(&status_document, "status", "Live Tracking");
            if let Some(el) = status_document.get_element_by_id("status") {
                el.set_class_name("live");
            }
        }),
        on_sample: Box::new(move |sample| {
            *gesture_slot.borrow_mut() = Some(sample);
        }),
    };
    match camera::start_capture(&document, hooks).await {
        Ok(capture) => {
            let stopper = Closure::wrap(Box::new(move || capture.stop()) as Box<dyn FnMut()>);
            let _ = window
                .add_event_listener_with_callback("pagehide", stopper.as_ref().unchecked_ref());
            stopper.forget();
        }
        Err(e) => log::warn!("camera unavailable ({e}); keyboard and button control only"),
    }
    Ok(())
}
