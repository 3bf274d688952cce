// Host-side tests for scene state: mode transitions, progress convergence,
// the group transform and the blended entity transforms.

use glam::{Vec2, Vec3};
use pine_core::{
    blend_position, ui_action_for_key, GestureSample, ModeRequest, SceneMode, TreeScene, UiAction,
    DRIFT_SCALE, ORNAMENT_COUNT, PANEL_COUNT, PARTICLE_COUNT, SPIN_RATE,
};
use std::time::Duration;

fn make_scene() -> TreeScene {
    TreeScene::new(7)
}

fn step(scene: &mut TreeScene, seconds: f32, steps: u32) {
    let dt = Duration::from_secs_f32(seconds / steps as f32);
    for _ in 0..steps {
        scene.tick(dt);
    }
}

#[test]
fn scene_starts_formed_at_full_progress() {
    let scene = make_scene();
    assert_eq!(scene.mode(), SceneMode::Formed);
    assert_eq!(scene.progress(), 1.0);
    assert_eq!(scene.elapsed(), 0.0);
}

#[test]
fn mode_toggle_is_involutive() {
    for mode in [SceneMode::Chaos, SceneMode::Formed] {
        assert_eq!(mode.toggled().toggled(), mode);
        assert_ne!(mode.toggled(), mode);
    }
    let mut scene = make_scene();
    scene.toggle_mode();
    scene.toggle_mode();
    assert_eq!(scene.mode(), SceneMode::Formed);
}

#[test]
fn mode_requests_set_and_flip() {
    assert_eq!(SceneMode::Formed.apply(ModeRequest::Toggle), SceneMode::Chaos);
    assert_eq!(SceneMode::Chaos.apply(ModeRequest::Toggle), SceneMode::Formed);
    assert_eq!(
        SceneMode::Chaos.apply(ModeRequest::Set(SceneMode::Chaos)),
        SceneMode::Chaos
    );
    let mut scene = make_scene();
    scene.apply_request(ModeRequest::Toggle);
    assert_eq!(scene.mode(), SceneMode::Chaos);
    scene.apply_request(ModeRequest::Set(SceneMode::Formed));
    assert_eq!(scene.mode(), SceneMode::Formed);
}

#[test]
fn gestures_assert_mode_and_move_the_pointer() {
    let mut scene = make_scene();
    scene.apply_gesture(GestureSample {
        centroid: Vec2::new(0.25, -0.5),
        open: true,
    });
    assert_eq!(scene.mode(), SceneMode::Chaos);

    // the pointer feeds the drift target; converge and check the offset
    step(&mut scene, 5.0, 300);
    let translation = scene.group_transform().w_axis.truncate();
    assert!(
        (translation.x - 0.25 * DRIFT_SCALE).abs() < 1e-2,
        "drift x did not settle: {translation}"
    );
    assert!((translation.y + 0.5 * DRIFT_SCALE).abs() < 1e-2);
    assert_eq!(translation.z, 0.0);

    // a closed fist re-forms, same sample shape
    scene.apply_gesture(GestureSample {
        centroid: Vec2::ZERO,
        open: false,
    });
    assert_eq!(scene.mode(), SceneMode::Formed);
}

#[test]
fn progress_falls_to_chaos_within_a_few_seconds() {
    let mut scene = make_scene();
    scene.set_mode(SceneMode::Chaos);
    let mut prev = scene.progress();
    let dt = Duration::from_millis(16);
    for i in 0..300 {
        scene.tick(dt);
        let p = scene.progress();
        assert!(p <= prev, "progress must fall monotonically, rose at step {i}");
        assert!((0.0..=1.0).contains(&p), "progress escaped [0,1] at step {i}: {p}");
        prev = p;
    }
    assert!(
        scene.progress() < 1e-3,
        "4.8s at 60fps should all but reach chaos, got {}",
        scene.progress()
    );
}

#[test]
fn long_tick_pins_progress_to_the_exact_endpoint() {
    let mut scene = make_scene();
    scene.set_mode(SceneMode::Chaos);
    scene.tick(Duration::from_secs(60));
    assert_eq!(scene.progress(), 0.0);
    scene.set_mode(SceneMode::Formed);
    scene.tick(Duration::from_secs(60));
    assert_eq!(scene.progress(), 1.0);
}

#[test]
fn full_round_trip_reforms_the_tree() {
    let mut scene = make_scene();
    scene.set_mode(SceneMode::Chaos);
    step(&mut scene, 6.0, 360);
    assert!(scene.progress() < 1e-3);
    scene.toggle_mode();
    assert_eq!(scene.mode(), SceneMode::Formed);
    step(&mut scene, 6.0, 360);
    assert!(
        scene.progress() > 1.0 - 1e-3,
        "tree should re-form, progress {}",
        scene.progress()
    );
}

#[test]
fn formed_scene_rests_exactly_on_the_tree() {
    let scene = make_scene(); // progress 1.0, clock at zero
    let layout = scene.layout();
    for i in (0..PARTICLE_COUNT).step_by(997) {
        assert_eq!(scene.particle_position(i), layout.foliage[i].rest);
    }
    for i in 0..ORNAMENT_COUNT {
        assert_eq!(
            scene.ornament_instance(i).position,
            layout.ornaments[i].rest,
            "ornament {i} off its rest position"
        );
    }
    for i in 0..PANEL_COUNT {
        assert_eq!(scene.panel_pose(i).position, layout.panels[i].rest);
    }
}

#[test]
fn ornament_instances_carry_their_kind_attributes() {
    let scene = make_scene();
    let layout = scene.layout();
    for (i, spec) in layout.ornaments.iter().enumerate() {
        let inst = scene.ornament_instance(i);
        assert_eq!(inst.emissive, spec.kind.emissive());
        assert_eq!(inst.color, spec.color);
        let base = spec.kind.size();
        assert!(
            inst.scale >= base * 0.7 - 1e-6 && inst.scale <= base * 0.9 + 1e-6,
            "ornament {i} scale outside the pulse band: {}",
            inst.scale
        );
        assert!((inst.rotation.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn panel_poses_track_the_blend() {
    let mut scene = make_scene();
    scene.set_mode(SceneMode::Chaos);
    step(&mut scene, 0.8, 48);
    let p = scene.progress();
    assert!(p > 0.0 && p < 1.0, "expected a mid-morph progress, got {p}");
    let layout = scene.layout();
    for (i, spec) in layout.panels.iter().enumerate() {
        let pose = scene.panel_pose(i);
        assert_eq!(pose.position, blend_position(spec.chaos, spec.rest, p));
        assert!(
            (pose.rotation.length() - 1.0).abs() < 1e-4,
            "panel {i} rotation not normalized"
        );
    }
}

#[test]
fn group_spins_but_does_not_drift_without_a_pointer() {
    let mut scene = make_scene();
    step(&mut scene, 2.0, 120);
    let m = scene.group_transform();
    let translation = m.w_axis.truncate();
    assert!(
        translation.length() < 1e-4,
        "no pointer input should mean no drift, got {translation}"
    );

    let spun = m.transform_vector3(Vec3::X);
    assert!((spun.length() - 1.0).abs() < 1e-5, "spin must not scale");
    assert!(spun.y.abs() < 1e-6, "spin is about y only");
    // rotation_y maps +x toward -z; recover the accumulated angle
    let angle = -spun.z.atan2(spun.x);
    assert!(
        (angle - SPIN_RATE * 2.0).abs() < 1e-3,
        "expected ~{} rad of spin, got {angle}",
        SPIN_RATE * 2.0
    );
}

#[test]
fn set_pointer_feeds_the_drift() {
    let mut scene = make_scene();
    scene.set_pointer(Vec2::new(-1.0, 1.0));
    step(&mut scene, 5.0, 300);
    let translation = scene.group_transform().w_axis.truncate();
    assert!((translation.x + DRIFT_SCALE).abs() < 1e-2);
    assert!((translation.y - DRIFT_SCALE).abs() < 1e-2);
}

#[test]
fn keys_map_to_ui_actions() {
    assert_eq!(ui_action_for_key(" "), Some(UiAction::ToggleMode));
    assert_eq!(ui_action_for_key("Spacebar"), Some(UiAction::ToggleMode));
    assert_eq!(ui_action_for_key("h"), Some(UiAction::ToggleHud));
    assert_eq!(ui_action_for_key("H"), Some(UiAction::ToggleHud));
    assert_eq!(ui_action_for_key("Enter"), Some(UiAction::Fullscreen));
    assert_eq!(ui_action_for_key("Escape"), None);
    assert_eq!(ui_action_for_key("x"), None);
}
