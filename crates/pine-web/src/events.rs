//! Keyboard and button wiring. Input handlers never touch the scene; they
//! leave requests in single-slot cells that the render loop drains once per
//! frame, so the last write between two frames wins.

use pine_core::{ui_action_for_key, GestureSample, ModeRequest, SceneMode, UiAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::overlay;

/// Last mode change requested by the keyboard or the toggle button.
pub type ModeSlot = Rc<RefCell<Option<ModeRequest>>>;
/// Last sample classified by the webcam loop.
pub type GestureSlot = Rc<RefCell<Option<GestureSample>>>;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    mode_slot: &ModeSlot,
    canvas: &web::HtmlCanvasElement,
) {
    let key = ev.key();
    match ui_action_for_key(&key) {
        Some(UiAction::ToggleMode) => {
            *mode_slot.borrow_mut() = Some(ModeRequest::Toggle);
            ev.prevent_default();
        }
        Some(UiAction::ToggleHud) => {
            if let Some(doc) = dom::window_document() {
                overlay::toggle(&doc);
            }
            ev.prevent_default();
        }
        Some(UiAction::Fullscreen) => {
            if let Some(win) = web::window() {
                if let Some(doc) = win.document() {
                    if doc.fullscreen_element().is_some() {
                        let _ = doc.exit_fullscreen();
                    } else {
                        let _ = canvas.request_fullscreen();
                    }
                }
            }
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(mode_slot: ModeSlot, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &mode_slot, &canvas);
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_toggle_button(document: &web::Document, mode_slot: ModeSlot) {
    dom::add_click_listener(document, "toggle-btn", move || {
        *mode_slot.borrow_mut() = Some(ModeRequest::Toggle);
    });
}

/// The button advertises the mode it would switch to.
pub fn toggle_button_label(mode: SceneMode) -> &'static str {
    if mode.is_formed() {
        "Unleash Chaos"
    } else {
        "Form Magnificence"
    }
}
