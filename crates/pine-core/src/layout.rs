//! Seeded procedural layout: where every entity sits in the chaos cloud and
//! on the formed tree.
//!
//! Generated exactly once at startup. Both position sets per entity are
//! immutable for the process lifetime; regenerating would destroy the stable
//! tree silhouette the morph animation relies on.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::constants::*;

/// Ornament shape families. Each family is drawn as one instanced batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentKind {
    Box,
    Ball,
    Light,
}

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 3] = [OrnamentKind::Box, OrnamentKind::Ball, OrnamentKind::Light];

    /// Sway mass; heavier ornaments swing wider while the tree is in chaos.
    pub fn weight(self) -> f32 {
        match self {
            OrnamentKind::Box => 0.05,
            OrnamentKind::Ball => 0.02,
            OrnamentKind::Light => 0.01,
        }
    }

    /// Base render scale in world units.
    pub fn size(self) -> f32 {
        match self {
            OrnamentKind::Box => 0.15,
            OrnamentKind::Ball => 0.2,
            OrnamentKind::Light => 0.1,
        }
    }

    /// Lights render full-bright; the other kinds are lit.
    pub fn emissive(self) -> bool {
        matches!(self, OrnamentKind::Light)
    }
}

/// One foliage particle: its two homes and a fixed colour.
#[derive(Debug, Clone, PartialEq)]
pub struct FoliagePoint {
    pub chaos: Vec3,
    pub rest: Vec3,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrnamentSpec {
    pub id: u32,
    pub kind: OrnamentKind,
    pub chaos: Vec3,
    pub rest: Vec3,
    pub weight: f32,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub id: u32,
    pub chaos: Vec3,
    pub rest: Vec3,
    /// XYZ euler, radians. The chaotic orientation is derived from the id at
    /// blend time rather than stored.
    pub rest_rotation: Vec3,
    pub photo_url: String,
    pub caption: String,
}

/// The full fixed layout, one record per entity.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    pub foliage: Vec<FoliagePoint>,
    pub ornaments: Vec<OrnamentSpec>,
    pub panels: Vec<PanelSpec>,
}

impl TreeLayout {
    /// Generate the layout for `seed`. Same seed, same layout, bit for bit.
    pub fn generate(seed: u64) -> Self {
        let gold = linear_rgb(GOLD_BRIGHT);
        let emerald = linear_rgb(EMERALD_DEEP);
        let red = linear_rgb(LUXURY_RED);

        let mut rng = stream_rng(seed, 0);
        let foliage = (0..PARTICLE_COUNT)
            .map(|_| {
                let chaos = chaos_point(&mut rng);
                let rest = cone_point(&mut rng, FOLIAGE_JITTER);
                let color = if rng.gen::<f32>() > 1.0 - FOLIAGE_GOLD_CHANCE {
                    gold
                } else {
                    emerald
                };
                FoliagePoint { chaos, rest, color }
            })
            .collect();

        let mut rng = stream_rng(seed, 1);
        let ornaments = (0..ORNAMENT_COUNT)
            .map(|i| {
                let chaos = chaos_point(&mut rng);
                let rest = cone_point(&mut rng, 0.0);
                let kind = OrnamentKind::ALL[rng.gen_range(0..OrnamentKind::ALL.len())];
                OrnamentSpec {
                    id: i as u32,
                    kind,
                    chaos,
                    rest,
                    weight: kind.weight(),
                    color: if i % 2 == 0 { gold } else { red },
                }
            })
            .collect();

        let mut rng = stream_rng(seed, 2);
        let spread = CHAOS_RADIUS * PANEL_CHAOS_SPREAD;
        let panels = (0..PANEL_COUNT)
            .map(|i| {
                let chaos = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                );
                let frac = i as f32 / PANEL_COUNT as f32;
                let angle = frac * TAU;
                let y = PANEL_BASE_Y + frac * TREE_HEIGHT * PANEL_HEIGHT_FRAC;
                let radius = (TREE_HEIGHT - y) / TREE_HEIGHT * TREE_RADIUS * PANEL_RADIUS_SCALE;
                PanelSpec {
                    id: i as u32,
                    chaos,
                    rest: Vec3::new(angle.cos() * radius, y + TREE_Y_OFFSET, angle.sin() * radius),
                    rest_rotation: Vec3::new(0.0, -angle, 0.0),
                    photo_url: photo_url(i as u32),
                    caption: caption(i as u32),
                }
            })
            .collect();

        log::debug!(
            "tree layout ready: {} foliage / {} ornaments / {} panels (seed {seed})",
            PARTICLE_COUNT,
            ORNAMENT_COUNT,
            PANEL_COUNT
        );
        TreeLayout {
            foliage,
            ornaments,
            panels,
        }
    }
}

/// Remote photo for a panel; the renderer fetches it, the core only names it.
pub fn photo_url(id: u32) -> String {
    format!("https://picsum.photos/seed/{}/400/500", PHOTO_SEED_BASE + id)
}

pub fn caption(id: u32) -> String {
    format!("Luxury Memories '{}", CAPTION_BASE_YEAR + id)
}

/// Independent generator per layout section, so adding entities to one
/// section never reshuffles another.
fn stream_rng(seed: u64, stream: u64) -> StdRng {
    let mix = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

/// Random point inside the chaos sphere. The radius is sampled linearly, so
/// density concentrates toward the centre; uniform volume density would take
/// `CHAOS_RADIUS * u.cbrt()` instead.
fn chaos_point(rng: &mut StdRng) -> Vec3 {
    let r = rng.gen::<f32>() * CHAOS_RADIUS;
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Random point on the cone shell, jittered in x/z, shifted down so the cone
/// is centred near the origin.
fn cone_point(rng: &mut StdRng, jitter: f32) -> Vec3 {
    let y = rng.gen::<f32>() * TREE_HEIGHT;
    let radius = (TREE_HEIGHT - y) / TREE_HEIGHT * TREE_RADIUS;
    let angle = rng.gen::<f32>() * TAU;
    let jx = (rng.gen::<f32>() - 0.5) * 2.0 * jitter;
    let jz = (rng.gen::<f32>() - 0.5) * 2.0 * jitter;
    Vec3::new(
        angle.cos() * radius + jx,
        y + TREE_Y_OFFSET,
        angle.sin() * radius + jz,
    )
}

/// sRGB bytes to linear RGB, the space all shading happens in.
pub fn linear_rgb(srgb: [u8; 3]) -> Vec3 {
    fn channel(c: u8) -> f32 {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec3::new(channel(srgb[0]), channel(srgb[1]), channel(srgb[2]))
}
