//! Pure per-frame interpolation and oscillation formulas.
//!
//! Everything here is a plain function of its arguments; the scene feeds in
//! its clock and progress scalar each frame. The foliage wave is mirrored in
//! shaders/foliage.wgsl, which evaluates it on the GPU; keep the two in step.

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::constants::*;

/// Fraction of the remaining distance covered after `dt` seconds at `rate`
/// per second. Frame-rate independent: two half-steps equal one full step.
pub fn smoothing_alpha(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Exponential approach of `current` toward `target`.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * smoothing_alpha(rate, dt)
}

/// Advance the morph progress toward `target` (0.0 or 1.0). The result stays
/// inside [0,1] and is a fixed point once the target is reached.
pub fn morph_step(progress: f32, target: f32, dt: f32) -> f32 {
    approach(progress, target, MORPH_RATE, dt).clamp(0.0, 1.0)
}

/// Two-product lerp, exact at both endpoints: progress 0 returns `chaos`
/// bit for bit, progress 1 returns `rest`.
pub fn lerp_exact(chaos: Vec3, rest: Vec3, progress: f32) -> Vec3 {
    chaos * (1.0 - progress) + rest * progress
}

/// Blended position of an entity between its two stored homes.
pub fn blend_position(chaos: Vec3, rest: Vec3, progress: f32) -> Vec3 {
    lerp_exact(chaos, rest, progress)
}

/// Floating drift for a foliage point. The z term reads the already-offset x
/// on purpose; the resulting cross-talk is part of the look. Vanishes
/// entirely at progress 1.
pub fn foliage_wave(position: Vec3, time: f32, progress: f32) -> Vec3 {
    let fade = (1.0 - progress) * FOLIAGE_WAVE_AMPLITUDE;
    let mut out = position;
    out.x += (time * FOLIAGE_WAVE_FREQ + out.y).sin() * fade;
    out.z += (time * FOLIAGE_WAVE_FREQ + out.x).cos() * fade;
    out
}

/// Vertical sway for an ornament, phase-shifted by its id and scaled by its
/// weight. Fades out as the tree forms.
pub fn ornament_sway(id: u32, weight: f32, time: f32, progress: f32) -> f32 {
    (time + id as f32).sin()
        * (1.0 - progress)
        * ORNAMENT_SWAY_AMPLITUDE
        * weight
        * ORNAMENT_SWAY_WEIGHT_SCALE
}

/// Pulsing render scale; the pulse only appears as the tree forms.
pub fn ornament_scale(base: f32, id: u32, time: f32, progress: f32) -> f32 {
    base * (ORNAMENT_PULSE_BASE
        + (time * ORNAMENT_PULSE_FREQ + id as f32).sin() * ORNAMENT_PULSE_AMPLITUDE * progress)
}

/// Slow tumble; higher ids spin faster around x.
pub fn ornament_rotation(id: u32, time: f32) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        time * ORNAMENT_TUMBLE_X_RATE * id as f32,
        time * ORNAMENT_TUMBLE_Y_RATE,
        0.0,
    )
}

/// Panel orientation: component-wise euler lerp from an id-derived chaotic
/// tilt to the stored rest rotation, plus a gentle roll once the tree is
/// nearly formed.
pub fn panel_rotation(id: u32, rest: Vec3, time: f32, progress: f32) -> Vec3 {
    let chaotic = Vec3::new((id as f32).sin(), (id as f32).cos(), 0.0);
    let mut euler = lerp_exact(chaotic, rest, progress);
    if progress > PANEL_SWAY_THRESHOLD {
        euler.z += (time + id as f32).sin() * PANEL_SWAY_AMPLITUDE;
    }
    euler
}

/// World-space offset the group eases toward for a given pointer position.
pub fn drift_target(pointer: Vec2) -> Vec2 {
    pointer * DRIFT_SCALE
}
