//! Shared scene state types: the binary mode, gesture samples, input actions
//! and the showcase camera.

use glam::{Mat4, Vec2, Vec3};
use thiserror::Error;

use crate::constants::{CAMERA_EYE, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};

/// The two poses the scene morphs between. There are no intermediate modes;
/// the blend is carried entirely by the progress scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    Chaos,
    Formed,
}

impl SceneMode {
    pub fn toggled(self) -> Self {
        match self {
            SceneMode::Chaos => SceneMode::Formed,
            SceneMode::Formed => SceneMode::Chaos,
        }
    }

    /// Where the progress scalar is heading under this mode.
    pub fn target_progress(self) -> f32 {
        match self {
            SceneMode::Chaos => 0.0,
            SceneMode::Formed => 1.0,
        }
    }

    pub fn is_formed(self) -> bool {
        self == SceneMode::Formed
    }

    pub fn apply(self, request: ModeRequest) -> Self {
        match request {
            ModeRequest::Set(mode) => mode,
            ModeRequest::Toggle => self.toggled(),
        }
    }
}

/// A mode change asked for by an input surface. Gestures assert an absolute
/// mode every frame they classify; keyboard and button flip whatever is
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRequest {
    Set(SceneMode),
    Toggle,
}

/// One classification result from the webcam loop: the normalized centroid of
/// bright pixels ([-1,1] per axis, y up) and the open/closed reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub centroid: Vec2,
    pub open: bool,
}

impl GestureSample {
    /// An open hand scatters the tree, a closed fist forms it.
    pub fn mode(&self) -> SceneMode {
        if self.open {
            SceneMode::Chaos
        } else {
            SceneMode::Formed
        }
    }
}

/// Keyboard actions understood by both front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleMode,
    ToggleHud,
    Fullscreen,
}

/// Map a DOM `KeyboardEvent::key` value (or its native equivalent) to an
/// action. Unknown keys are ignored.
pub fn ui_action_for_key(key: &str) -> Option<UiAction> {
    match key {
        " " | "Spacebar" => Some(UiAction::ToggleMode),
        "h" | "H" => Some(UiAction::ToggleHud),
        "Enter" => Some(UiAction::Fullscreen),
        _ => None,
    }
}

/// Fixed perspective camera looking at the tree.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn showcase(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
}

/// Why webcam capture could not start. Capture failure is the only error the
/// system recovers from: gesture input stays off, everything else keeps going.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device available")]
    NoDevice,
    #[error("camera capture unsupported: {0}")]
    Unsupported(String),
    #[error("camera capture failed: {0}")]
    Failed(String),
}

impl CaptureError {
    /// Classify a DOM exception by name, as reported by `getUserMedia`.
    pub fn from_dom_name(name: &str, detail: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => {
                CaptureError::PermissionDenied
            }
            "NotFoundError" | "DevicesNotFoundError" | "OverconstrainedError" => {
                CaptureError::NoDevice
            }
            "NotSupportedError" | "TypeError" => CaptureError::Unsupported(detail.to_string()),
            _ => CaptureError::Failed(format!("{name}: {detail}")),
        }
    }
}
