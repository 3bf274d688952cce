//! Core logic for golden-pine: scene state, seeded layout, blend math,
//! gesture classification and the shared GPU-facing data layouts.
//!
//! This crate has no platform dependencies and is fully host-testable; the
//! wasm and native front-ends layer capture, windowing and rendering on top.

pub mod blend;
pub mod constants;
pub mod gesture;
pub mod layout;
pub mod mesh;
pub mod scene;
pub mod state;

pub static FOLIAGE_WGSL: &str = include_str!("../shaders/foliage.wgsl");
pub static ORNAMENTS_WGSL: &str = include_str!("../shaders/ornaments.wgsl");
pub static PANELS_WGSL: &str = include_str!("../shaders/panels.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use blend::*;
pub use constants::*;
pub use gesture::*;
pub use layout::*;
pub use mesh::*;
pub use scene::*;
pub use state::*;
