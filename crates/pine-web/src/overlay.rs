//! The HUD panel with the gesture hints and toggle button. Hidden and shown
//! by flipping the style attribute so no CSS classes are involved.

use web_sys as web;

const HUD_ID: &str = "hud";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HUD_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(HUD_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}
