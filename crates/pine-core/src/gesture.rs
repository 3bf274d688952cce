//! Brightness-heuristic hand tracking over raw RGBA capture frames.
//!
//! The webcam loop downscales to a small frame, then this classifier finds
//! the centroid of bright pixels and calls the hand "open" when enough of
//! them light up. Crude, but it needs no model and runs in well under a
//! millisecond at 160x120.

use glam::Vec2;

use crate::constants::{BRIGHTNESS_THRESHOLD, OPEN_COUNT_THRESHOLD};
use crate::state::GestureSample;

/// Classify one tightly-packed RGBA frame.
///
/// Returns `None` when no pixel clears the brightness threshold; the caller
/// emits no gesture event for that frame. The centroid is normalized to
/// [-1,1] per axis with y inverted so it maps directly onto world axes.
pub fn classify_frame(rgba: &[u8], width: u32, height: u32) -> Option<GestureSample> {
    debug_assert_eq!(rgba.len(), (width * height * 4) as usize);

    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut count = 0usize;

    for (i, px) in rgba.chunks_exact(4).enumerate() {
        let brightness = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
        if brightness > BRIGHTNESS_THRESHOLD {
            sum_x += (i as u32 % width) as f64;
            sum_y += (i as u32 / width) as f64;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }

    let cx = (sum_x / count as f64 / width as f64) * 2.0 - 1.0;
    let cy = (sum_y / count as f64 / height as f64) * 2.0 - 1.0;
    Some(GestureSample {
        centroid: Vec2::new(cx as f32, -cy as f32),
        open: count > OPEN_COUNT_THRESHOLD,
    })
}
