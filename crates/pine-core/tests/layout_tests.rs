// Host-side tests for the seeded layout generator: determinism, counts,
// geometric bounds and the photo panel spiral.

use glam::Vec3;
use pine_core::{
    caption, linear_rgb, photo_url, OrnamentKind, TreeLayout, CHAOS_RADIUS, EMERALD_DEEP,
    FOLIAGE_JITTER, GOLD_BRIGHT, LUXURY_RED, ORNAMENT_COUNT, PANEL_BASE_Y, PANEL_CHAOS_SPREAD,
    PANEL_COUNT, PANEL_HEIGHT_FRAC, PANEL_RADIUS_SCALE, PARTICLE_COUNT, TREE_HEIGHT, TREE_RADIUS,
    TREE_Y_OFFSET,
};
use std::f32::consts::TAU;

#[test]
fn generate_is_deterministic_per_seed() {
    let a = TreeLayout::generate(1234);
    let b = TreeLayout::generate(1234);
    assert_eq!(a, b, "same seed must reproduce the layout bit for bit");
    let c = TreeLayout::generate(1235);
    assert_ne!(
        a.foliage[0], c.foliage[0],
        "a different seed should move the foliage"
    );
}

#[test]
fn entity_counts_match_configuration() {
    let layout = TreeLayout::generate(5);
    assert_eq!(layout.foliage.len(), PARTICLE_COUNT);
    assert_eq!(layout.ornaments.len(), ORNAMENT_COUNT);
    assert_eq!(layout.panels.len(), PANEL_COUNT);
}

#[test]
fn chaos_positions_stay_inside_their_volumes() {
    let layout = TreeLayout::generate(99);
    for p in &layout.foliage {
        assert!(
            p.chaos.length() <= CHAOS_RADIUS + 1e-3,
            "foliage left the chaos sphere: {}",
            p.chaos
        );
    }
    for o in &layout.ornaments {
        assert!(o.chaos.length() <= CHAOS_RADIUS + 1e-3);
    }
    let half = CHAOS_RADIUS * PANEL_CHAOS_SPREAD * 0.5;
    for panel in &layout.panels {
        for axis in 0..3 {
            assert!(
                panel.chaos[axis].abs() <= half + 1e-3,
                "panel {} outside the chaos box: {}",
                panel.id,
                panel.chaos
            );
        }
    }
}

#[test]
fn rest_positions_sit_on_the_cone_shell() {
    let layout = TreeLayout::generate(7);
    let jitter_slack = FOLIAGE_JITTER * 2f32.sqrt() + 1e-3;
    for p in &layout.foliage {
        let raw_y = p.rest.y - TREE_Y_OFFSET;
        assert!(
            (-1e-5..=TREE_HEIGHT + 1e-5).contains(&raw_y),
            "foliage height out of range: {raw_y}"
        );
        let shell = (TREE_HEIGHT - raw_y) / TREE_HEIGHT * TREE_RADIUS;
        let r = (p.rest.x * p.rest.x + p.rest.z * p.rest.z).sqrt();
        assert!(
            (r - shell).abs() <= jitter_slack,
            "foliage strayed from the shell: r={r} shell={shell}"
        );
    }
    for o in &layout.ornaments {
        let raw_y = o.rest.y - TREE_Y_OFFSET;
        let shell = (TREE_HEIGHT - raw_y) / TREE_HEIGHT * TREE_RADIUS;
        let r = (o.rest.x * o.rest.x + o.rest.z * o.rest.z).sqrt();
        assert!(
            (r - shell).abs() <= 1e-3,
            "ornament {} off the shell: r={r} shell={shell}",
            o.id
        );
    }
}

#[test]
fn panels_climb_an_even_spiral() {
    let layout = TreeLayout::generate(3);
    for (i, panel) in layout.panels.iter().enumerate() {
        assert_eq!(panel.id, i as u32);
        let frac = i as f32 / PANEL_COUNT as f32;
        let angle = frac * TAU;
        assert_eq!(
            panel.rest_rotation,
            Vec3::new(0.0, -angle, 0.0),
            "panel {i} faces the wrong way"
        );
        let y = PANEL_BASE_Y + frac * TREE_HEIGHT * PANEL_HEIGHT_FRAC;
        assert!((panel.rest.y - (y + TREE_Y_OFFSET)).abs() < 1e-5);
        let radius = (TREE_HEIGHT - y) / TREE_HEIGHT * TREE_RADIUS * PANEL_RADIUS_SCALE;
        let r = (panel.rest.x * panel.rest.x + panel.rest.z * panel.rest.z).sqrt();
        assert!(
            (r - radius).abs() < 1e-4,
            "panel {i} off the spiral: r={r} expected={radius}"
        );
    }
}

#[test]
fn photo_urls_and_captions_are_stable() {
    let layout = TreeLayout::generate(8);
    assert_eq!(layout.panels[0].photo_url, "https://picsum.photos/seed/42/400/500");
    assert_eq!(layout.panels[11].photo_url, "https://picsum.photos/seed/53/400/500");
    assert_eq!(layout.panels[0].caption, "Luxury Memories '2020");
    assert_eq!(layout.panels[11].caption, "Luxury Memories '2031");
    assert_eq!(photo_url(3), "https://picsum.photos/seed/45/400/500");
    assert_eq!(caption(5), "Luxury Memories '2025");
}

#[test]
fn ornaments_cover_all_kinds_with_matching_attributes() {
    let layout = TreeLayout::generate(21);
    let gold = linear_rgb(GOLD_BRIGHT);
    let red = linear_rgb(LUXURY_RED);
    let mut seen = [false; 3];
    for (i, o) in layout.ornaments.iter().enumerate() {
        assert_eq!(o.weight, o.kind.weight());
        match o.kind {
            OrnamentKind::Box => {
                seen[0] = true;
                assert_eq!(o.weight, 0.05);
                assert_eq!(o.kind.size(), 0.15);
                assert!(!o.kind.emissive());
            }
            OrnamentKind::Ball => {
                seen[1] = true;
                assert_eq!(o.weight, 0.02);
                assert_eq!(o.kind.size(), 0.2);
                assert!(!o.kind.emissive());
            }
            OrnamentKind::Light => {
                seen[2] = true;
                assert_eq!(o.weight, 0.01);
                assert_eq!(o.kind.size(), 0.1);
                assert!(o.kind.emissive());
            }
        }
        let expect = if i % 2 == 0 { gold } else { red };
        assert_eq!(o.color, expect, "ornament {i} colour should alternate");
    }
    assert!(
        seen.iter().all(|s| *s),
        "all three kinds should appear across {ORNAMENT_COUNT} draws"
    );
}

#[test]
fn foliage_mixes_gold_into_emerald() {
    let layout = TreeLayout::generate(13);
    let gold = linear_rgb(GOLD_BRIGHT);
    let emerald = linear_rgb(EMERALD_DEEP);
    let gold_count = layout.foliage.iter().filter(|p| p.color == gold).count();
    let emerald_count = layout.foliage.iter().filter(|p| p.color == emerald).count();
    assert_eq!(
        gold_count + emerald_count,
        PARTICLE_COUNT,
        "unexpected third foliage colour"
    );
    let share = gold_count as f32 / PARTICLE_COUNT as f32;
    assert!(
        (0.1..=0.3).contains(&share),
        "gold share drifted well off one in five: {share}"
    );
}

#[test]
fn linear_rgb_maps_the_endpoints() {
    assert_eq!(linear_rgb([0, 0, 0]), Vec3::ZERO);
    assert_eq!(linear_rgb([255, 255, 255]), Vec3::ONE);
    let mid = linear_rgb([128, 128, 128]);
    assert!(mid.x > 0.0 && mid.x < 1.0);
    assert!((mid.x - 0.2158).abs() < 1e-3, "mid grey off the curve: {}", mid.x);
    assert_eq!(mid.x, mid.y);
    assert_eq!(mid.y, mid.z);
}
