//! The render loop: drain the input cells, advance the scene, hand the
//! instance batches to the GPU. One mutable context owns everything; input
//! handlers and the capture loop only ever touch the cells.

use instant::Instant;
use pine_core::{
    linear_rgb, FoliagePoint, InstanceRaw, OrnamentKind, SceneMode, TreeScene, FRAME_GOLD,
    ORNAMENT_COUNT, PANEL_COUNT,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::events::{self, GestureSlot, ModeSlot};
use crate::render;
use crate::texture::PanelTexture;

pub struct FrameContext {
    pub scene: TreeScene,
    pub mode_slot: ModeSlot,
    pub gesture_slot: GestureSlot,

    pub gpu: render::GpuState<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub faces: Vec<PanelTexture>,

    pub document: web::Document,
    pub button_mode: SceneMode,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Keyboard and button first; an active gesture re-asserts its mode
        // right after, so live tracking wins the frame.
        if let Some(request) = self.mode_slot.borrow_mut().take() {
            self.scene.apply_request(request);
        }
        if let Some(sample) = self.gesture_slot.borrow_mut().take() {
            self.scene.apply_gesture(sample);
        }
        self.scene.tick(dt);

        if self.scene.mode() != self.button_mode {
            self.button_mode = self.scene.mode();
            dom::set_text(
                &self.document,
                "toggle-btn",
                events::toggle_button_label(self.button_mode),
            );
        }

        let batches = build_batches(&self.scene);
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        if let Err(e) = self.gpu.render(
            self.scene.group_transform(),
            self.scene.elapsed(),
            self.scene.progress(),
            &batches,
            &self.faces,
        ) {
            log::error!("render error: {:?}", e);
        }
    }
}

fn build_batches(scene: &TreeScene) -> render::SceneBatches {
    let mut batches = render::SceneBatches {
        balls: Vec::with_capacity(ORNAMENT_COUNT),
        boxes: Vec::with_capacity(ORNAMENT_COUNT),
        lights: Vec::with_capacity(ORNAMENT_COUNT),
        frames: Vec::with_capacity(PANEL_COUNT),
        panels: Vec::with_capacity(PANEL_COUNT),
    };
    for (i, spec) in scene.layout().ornaments.iter().enumerate() {
        let raw = scene.ornament_instance(i).raw();
        match spec.kind {
            OrnamentKind::Ball => batches.balls.push(raw),
            OrnamentKind::Box => batches.boxes.push(raw),
            OrnamentKind::Light => batches.lights.push(raw),
        }
    }
    let gold = linear_rgb(FRAME_GOLD);
    for i in 0..scene.layout().panels.len() {
        let pose = scene.panel_pose(i);
        // Frame and face share the pose; the face shader ignores the colour.
        let raw = InstanceRaw::from_parts(pose.position, 1.0, pose.rotation, gold, false);
        batches.frames.push(raw);
        batches.panels.push(raw);
    }
    batches
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    foliage: &[FoliagePoint],
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, foliage).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
