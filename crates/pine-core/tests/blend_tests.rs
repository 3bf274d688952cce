// Host-side tests for the blend formulas: endpoint exactness, fading
// decorations, and frame-rate independent smoothing.

use glam::{Quat, Vec2, Vec3};
use pine_core::{
    approach, blend_position, drift_target, foliage_wave, morph_step, ornament_rotation,
    ornament_scale, ornament_sway, panel_rotation, smoothing_alpha, TreeLayout, DRIFT_SCALE,
    FOLIAGE_WAVE_AMPLITUDE, MORPH_RATE, ORNAMENT_PULSE_BASE, PANEL_SWAY_AMPLITUDE,
};

#[test]
fn blend_position_hits_both_endpoints_exactly() {
    let layout = TreeLayout::generate(11);
    for point in layout.foliage.iter().step_by(97) {
        assert_eq!(blend_position(point.chaos, point.rest, 0.0), point.chaos);
        assert_eq!(blend_position(point.chaos, point.rest, 1.0), point.rest);
    }
    for spec in &layout.ornaments {
        assert_eq!(blend_position(spec.chaos, spec.rest, 0.0), spec.chaos);
        assert_eq!(blend_position(spec.chaos, spec.rest, 1.0), spec.rest);
    }
    for spec in &layout.panels {
        assert_eq!(blend_position(spec.chaos, spec.rest, 0.0), spec.chaos);
        assert_eq!(blend_position(spec.chaos, spec.rest, 1.0), spec.rest);
    }
}

#[test]
fn blend_position_midpoint_sits_between_homes() {
    let chaos = Vec3::new(-10.0, 4.0, 8.0);
    let rest = Vec3::new(2.0, -1.0, 0.0);
    let mid = blend_position(chaos, rest, 0.5);
    for axis in 0..3 {
        let (a, b) = (chaos[axis].min(rest[axis]), chaos[axis].max(rest[axis]));
        assert!(
            (a..=b).contains(&mid[axis]),
            "midpoint escaped the segment on axis {axis}: {mid}"
        );
    }
}

#[test]
fn foliage_wave_vanishes_when_formed() {
    let pos = Vec3::new(1.5, -2.0, 3.25);
    for step in 0..50 {
        let time = step as f32 * 0.37;
        assert_eq!(
            foliage_wave(pos, time, 1.0),
            pos,
            "wave must vanish at progress 1 (t={time})"
        );
    }
}

#[test]
fn foliage_wave_moves_only_x_and_z_within_amplitude() {
    let pos = Vec3::new(0.4, 2.0, -1.0);
    let waved = foliage_wave(pos, 1.3, 0.0);
    assert_eq!(waved.y, pos.y, "the wave never touches y");
    assert!(
        waved.x != pos.x || waved.z != pos.z,
        "expected some drift at progress 0"
    );
    assert!((waved.x - pos.x).abs() <= FOLIAGE_WAVE_AMPLITUDE + 1e-6);
    assert!((waved.z - pos.z).abs() <= FOLIAGE_WAVE_AMPLITUDE + 1e-6);
}

#[test]
fn ornament_sway_fades_out_and_scales_with_weight() {
    assert_eq!(ornament_sway(3, 0.05, 1.7, 1.0), 0.0);
    let light = ornament_sway(3, 0.01, 0.9, 0.0);
    let heavy = ornament_sway(3, 0.05, 0.9, 0.0);
    assert!(light.abs() > 0.0, "phase landed on a zero crossing");
    assert!(
        (heavy - 5.0 * light).abs() < 1e-5,
        "sway should scale linearly with weight: {heavy} vs {light}"
    );
}

#[test]
fn ornament_scale_pulse_grows_with_progress() {
    let base = 0.2;
    assert_eq!(ornament_scale(base, 7, 1.23, 0.0), base * ORNAMENT_PULSE_BASE);
    for step in 0..100 {
        let t = step as f32 * 0.11;
        let s = ornament_scale(base, 7, t, 1.0);
        assert!(
            s >= base * 0.7 - 1e-6 && s <= base * 0.9 + 1e-6,
            "pulse out of range at t={t}: {s}"
        );
    }
}

#[test]
fn ornament_rotation_is_a_unit_quaternion() {
    assert_eq!(ornament_rotation(0, 0.0), Quat::IDENTITY);
    for id in [0u32, 3, 77, 149] {
        for step in 0..20 {
            let q = ornament_rotation(id, step as f32 * 0.41);
            assert!(
                (q.length() - 1.0).abs() < 1e-4,
                "rotation drifted off unit length for id {id}"
            );
        }
    }
}

#[test]
fn morph_step_is_monotonic_and_bounded() {
    let mut p = 0.0f32;
    let mut prev = p;
    for i in 0..600 {
        p = morph_step(p, 1.0, 1.0 / 60.0);
        assert!(p >= prev, "progress regressed at step {i}");
        assert!(p <= 1.0, "progress overshot at step {i}");
        prev = p;
    }
    assert!(p > 0.999, "ten seconds at 60fps should converge, got {p}");
}

#[test]
fn morph_step_is_idempotent_at_its_target() {
    assert_eq!(morph_step(1.0, 1.0, 0.016), 1.0);
    assert_eq!(morph_step(0.0, 0.0, 0.016), 0.0);
    assert_eq!(morph_step(1.0, 1.0, 3.0), 1.0);
}

#[test]
fn approach_is_frame_rate_independent() {
    let coarse = approach(0.0, 1.0, MORPH_RATE, 0.5);
    let mut fine = 0.0;
    for _ in 0..5 {
        fine = approach(fine, 1.0, MORPH_RATE, 0.1);
    }
    assert!(
        (coarse - fine).abs() < 1e-4,
        "one 0.5s step ({coarse}) must match five 0.1s steps ({fine})"
    );
}

#[test]
fn smoothing_alpha_limits() {
    assert_eq!(smoothing_alpha(MORPH_RATE, 0.0), 0.0);
    assert!(smoothing_alpha(MORPH_RATE, 60.0) > 0.999_999);
    let a = smoothing_alpha(MORPH_RATE, 1.0 / 60.0);
    assert!(a > 0.0 && a < 1.0);
}

#[test]
fn panel_rotation_blends_and_sways() {
    let rest = Vec3::new(0.0, -1.2, 0.0);
    // below the sway threshold the euler lerp is pure
    let half = panel_rotation(4, rest, 2.0, 0.5);
    assert!((half.x - (4.0f32).sin() * 0.5).abs() < 1e-6);
    assert!((half.y - ((4.0f32).cos() * 0.5 + rest.y * 0.5)).abs() < 1e-6);
    assert_eq!(half.z, 0.0);
    // fully formed: x/y sit exactly at rest, z carries only the sway roll
    let formed = panel_rotation(4, rest, 2.0, 1.0);
    assert_eq!(formed.x, rest.x);
    assert_eq!(formed.y, rest.y);
    assert!(formed.z.abs() <= PANEL_SWAY_AMPLITUDE + 1e-6);
    assert!(formed.z != 0.0, "sway should be active once formed");
}

#[test]
fn drift_target_scales_the_pointer() {
    let pointer = Vec2::new(0.5, -1.0);
    assert_eq!(drift_target(pointer), pointer * DRIFT_SCALE);
    assert_eq!(drift_target(Vec2::ZERO), Vec2::ZERO);
}
