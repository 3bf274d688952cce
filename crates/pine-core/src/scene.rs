//! The per-frame scene: one mutable object owned by the render loop.
//!
//! All animation state lives here and is passed explicitly to whoever needs
//! it; there are no module-level mutable cells. The gesture loop never
//! touches this directly, it only leaves samples in the front-end's
//! single-slot cells for the render loop to drain.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use instant::Duration;

use crate::blend;
use crate::constants::{DRIFT_RATE, SPIN_RATE};
use crate::layout::TreeLayout;
use crate::mesh::InstanceRaw;
use crate::state::{GestureSample, ModeRequest, SceneMode};

/// Blended transform for one ornament, ready to become an instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentInstance {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: Quat,
    pub color: Vec3,
    pub emissive: bool,
}

impl OrnamentInstance {
    pub fn raw(&self) -> InstanceRaw {
        InstanceRaw::from_parts(self.position, self.scale, self.rotation, self.color, self.emissive)
    }
}

/// Blended transform for one photo panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPose {
    pub position: Vec3,
    pub rotation: Quat,
}

pub struct TreeScene {
    layout: TreeLayout,
    mode: SceneMode,
    progress: f32,
    elapsed: f32,
    spin: f32,
    pointer: Vec2,
    drift: Vec2,
}

impl TreeScene {
    /// Build the scene fully formed; the first mode change animates from
    /// there.
    pub fn new(seed: u64) -> Self {
        Self {
            layout: TreeLayout::generate(seed),
            mode: SceneMode::Formed,
            progress: 1.0,
            elapsed: 0.0,
            spin: 0.0,
            pointer: Vec2::ZERO,
            drift: Vec2::ZERO,
        }
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn set_mode(&mut self, mode: SceneMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn apply_request(&mut self, request: ModeRequest) {
        self.mode = self.mode.apply(request);
    }

    /// Level-triggered: every classified frame re-asserts its mode and moves
    /// the pointer, whether or not anything changed.
    pub fn apply_gesture(&mut self, sample: GestureSample) {
        self.pointer = sample.centroid;
        self.mode = sample.mode();
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Advance the clock: morph progress, group spin and pointer drift.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        self.elapsed += dt;
        self.progress = blend::morph_step(self.progress, self.mode.target_progress(), dt);
        self.spin += SPIN_RATE * dt;
        let target = blend::drift_target(self.pointer);
        self.drift.x = blend::approach(self.drift.x, target.x, DRIFT_RATE, dt);
        self.drift.y = blend::approach(self.drift.y, target.y, DRIFT_RATE, dt);
    }

    /// Whole-group transform: pointer drift, then the constant spin.
    pub fn group_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.drift.x, self.drift.y, 0.0))
            * Mat4::from_rotation_y(self.spin)
    }

    /// Blended foliage position including the fading float offsets. The GPU
    /// evaluates the same formula in the foliage shader; this form exists for
    /// anything host-side that needs it.
    pub fn particle_position(&self, index: usize) -> Vec3 {
        let point = &self.layout.foliage[index];
        let blended = blend::blend_position(point.chaos, point.rest, self.progress);
        blend::foliage_wave(blended, self.elapsed, self.progress)
    }

    pub fn ornament_instance(&self, index: usize) -> OrnamentInstance {
        let spec = &self.layout.ornaments[index];
        let mut position = blend::blend_position(spec.chaos, spec.rest, self.progress);
        position.y += blend::ornament_sway(spec.id, spec.weight, self.elapsed, self.progress);
        OrnamentInstance {
            position,
            scale: blend::ornament_scale(spec.kind.size(), spec.id, self.elapsed, self.progress),
            rotation: blend::ornament_rotation(spec.id, self.elapsed),
            color: spec.color,
            emissive: spec.kind.emissive(),
        }
    }

    pub fn panel_pose(&self, index: usize) -> PanelPose {
        let spec = &self.layout.panels[index];
        let euler =
            blend::panel_rotation(spec.id, spec.rest_rotation, self.elapsed, self.progress);
        PanelPose {
            position: blend::blend_position(spec.chaos, spec.rest, self.progress),
            rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
        }
    }
}
