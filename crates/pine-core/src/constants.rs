//! Tuning constants for the golden-pine scene.
//!
//! Everything deliberately hand-tuned lives here: entity counts, the tree and
//! chaos-cloud dimensions, animation rates, gesture thresholds and the palette.
//! The layout generator and blender read these; the front-ends only pull out
//! the handful they need for capture and camera setup.

// --- Entity counts ---
pub const PARTICLE_COUNT: usize = 8000; // foliage point cloud
pub const ORNAMENT_COUNT: usize = 150;
pub const PANEL_COUNT: usize = 12; // framed photo panels

// --- Tree and chaos geometry (world units) ---
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_RADIUS: f32 = 5.0; // cone radius at the base
pub const CHAOS_RADIUS: f32 = 15.0; // chaos cloud sphere
pub const TREE_Y_OFFSET: f32 = -(TREE_HEIGHT / 4.0); // recentres the cone on the origin
pub const FOLIAGE_JITTER: f32 = 0.1; // +/- applied to x/z of each foliage point

// --- Photo panel placement ---
pub const PANEL_CHAOS_SPREAD: f32 = 1.5; // chaos box extent as a multiple of CHAOS_RADIUS
pub const PANEL_BASE_Y: f32 = 1.0; // spiral starts this far up the trunk
pub const PANEL_HEIGHT_FRAC: f32 = 0.7; // spiral climbs this fraction of the tree
pub const PANEL_RADIUS_SCALE: f32 = 1.1; // pushed slightly off the cone surface

// --- Animation rates ---
pub const MORPH_RATE: f32 = 2.5; // 1/s, exponential approach of the progress scalar
pub const SPIN_RATE: f32 = 0.1; // rad/s, constant group spin
pub const DRIFT_RATE: f32 = 3.0; // 1/s, pointer-follow smoothing
pub const DRIFT_SCALE: f32 = 3.0; // world units per unit of pointer deflection

// --- Decorative oscillations ---
pub const FOLIAGE_WAVE_FREQ: f32 = 0.5;
pub const FOLIAGE_WAVE_AMPLITUDE: f32 = 0.5; // fades with (1 - progress)
pub const ORNAMENT_SWAY_AMPLITUDE: f32 = 2.0; // fades with (1 - progress)
pub const ORNAMENT_SWAY_WEIGHT_SCALE: f32 = 10.0;
pub const ORNAMENT_PULSE_BASE: f32 = 0.8;
pub const ORNAMENT_PULSE_AMPLITUDE: f32 = 0.1; // grows with progress
pub const ORNAMENT_PULSE_FREQ: f32 = 2.0;
pub const ORNAMENT_TUMBLE_X_RATE: f32 = 0.2; // rad/s, scaled by entity id
pub const ORNAMENT_TUMBLE_Y_RATE: f32 = 0.1; // rad/s
pub const PANEL_SWAY_THRESHOLD: f32 = 0.9; // progress above which panels roll gently
pub const PANEL_SWAY_AMPLITUDE: f32 = 0.05; // rad

// --- Gesture capture ---
pub const CAPTURE_WIDTH: u32 = 160;
pub const CAPTURE_HEIGHT: u32 = 120;
pub const BRIGHTNESS_THRESHOLD: f32 = 180.0; // mean of r,g,b in 0..255
pub const OPEN_COUNT_THRESHOLD: usize = 800; // more bright pixels than this reads as an open hand

// --- Camera ---
pub const CAMERA_EYE: [f32; 3] = [0.0, 4.0, 20.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// --- Palette (sRGB bytes) ---
pub const EMERALD_DEEP: [u8; 3] = [0x01, 0x32, 0x20];
pub const GOLD_BRIGHT: [u8; 3] = [0xFF, 0xD7, 0x00];
pub const GOLD_ROSE: [u8; 3] = [0xB7, 0x6E, 0x79]; // brand palette, currently unused by any batch
pub const LUXURY_RED: [u8; 3] = [0x8B, 0x00, 0x00];
pub const FRAME_GOLD: [u8; 3] = [0xD4, 0xAF, 0x37];
pub const WHITE_GLOW: [u8; 3] = [0xFF, 0xFF, 0xFF];
pub const CAPTION_INK: [u8; 3] = [0x33, 0x33, 0x33];
pub const BACKGROUND: [u8; 3] = [0x01, 0x10, 0x0B];
pub const FLOOR_TINT: [u8; 3] = [0x0A, 0x0A, 0x0A];

// --- Foliage colour mix ---
pub const FOLIAGE_GOLD_CHANCE: f32 = 0.2; // the rest stays deep emerald

// --- Renderer ---
pub const PARTICLE_PIXEL_SIZE: f32 = 20.0; // on-screen pixels at unit view depth
pub const BLOOM_THRESHOLD: f32 = 0.8;
pub const BLOOM_STRENGTH: f32 = 1.2;
pub const GRAIN_AMOUNT: f32 = 0.05;
pub const FLOOR_RADIUS: f32 = 20.0;
pub const FLOOR_Y: f32 = -2.0;

// --- Photo panels (local units; the face is the white bordered card) ---
pub const PANEL_FACE_WIDTH: f32 = 1.5;
pub const PANEL_FACE_HEIGHT: f32 = 1.9;
pub const PANEL_FRAME_WIDTH: f32 = 1.6;
pub const PANEL_FRAME_HEIGHT: f32 = 2.0;
pub const PANEL_FRAME_SETBACK: f32 = 0.01; // frame sits just behind the face
pub const PANEL_PHOTO_SIZE: f32 = 1.3;
pub const PANEL_PHOTO_CENTER_Y: f32 = 0.2;
pub const PANEL_CAPTION_Y: f32 = -0.7;
pub const PANEL_CAPTION_SIZE: f32 = 0.12;
pub const PANEL_TEXTURE_WIDTH: u32 = 300; // face texture, 200 px per local unit
pub const PANEL_TEXTURE_HEIGHT: u32 = 380;

// --- Photos ---
pub const PHOTO_SEED_BASE: u32 = 42; // offset into the picsum seed space
pub const CAPTION_BASE_YEAR: u32 = 2020;
