use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gauge_types::Point3;

/// A 2D touch location in screen space (pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Result of a plane-within-polygon hit test: the screen ray intersected a
/// tracked surface at `position`, anchored by the platform's anchor id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    pub anchor_id: Uuid,
    pub position: Point3,
}

/// Device capability report, sent to the host on request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArSupport {
    pub is_supported: bool,
    pub platform: String,
    pub device_model: String,
}

/// Errors from the AR tracking subsystem.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArError {
    #[error("AR subsystem not initialized")]
    NotInitialized,

    #[error("no tracked surface under screen point ({x}, {y})")]
    NoSurfaceHit { x: f64, y: f64 },

    #[error("AR session lost tracking")]
    SessionLost,
}
