//! MockPlaneRaycaster — deterministic test double implementing PlaneRaycaster.
//!
//! Models a single horizontal tracked plane with a fixed screen-to-world
//! mapping, so tests get predictable hit positions without a device.

use uuid::Uuid;

use gauge_types::Point3;

use crate::traits::PlaneRaycaster;
use crate::types::{ArError, ArSupport, RaycastHit, ScreenPoint};

/// Screen pixels per world meter in the mock projection.
const PIXELS_PER_METER: f64 = 100.0;

/// Deterministic test double for the AR tracking subsystem.
///
/// Screen (x, y) maps to world (x / 100, plane_height, y / 100); every hit
/// lands on one horizontal plane. Tracking loss can be toggled to exercise
/// the miss path.
pub struct MockPlaneRaycaster {
    initialized: bool,
    plane_height: f64,
    tracking_lost: bool,
    hit_count: usize,
}

impl MockPlaneRaycaster {
    pub fn new() -> Self {
        Self {
            initialized: false,
            plane_height: 0.0,
            tracking_lost: false,
            hit_count: 0,
        }
    }

    /// Place the mock plane at the given world-frame height.
    pub fn with_plane_height(height: f64) -> Self {
        Self {
            plane_height: height,
            ..Self::new()
        }
    }

    /// Force subsequent raycasts to miss, as if tracking was lost.
    pub fn set_tracking_lost(&mut self, lost: bool) {
        self.tracking_lost = lost;
    }

    /// Number of successful hits so far.
    pub fn hit_count(&self) -> usize {
        self.hit_count
    }
}

impl Default for MockPlaneRaycaster {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaneRaycaster for MockPlaneRaycaster {
    fn initialize(&mut self) -> Result<(), ArError> {
        self.initialized = true;
        Ok(())
    }

    fn raycast(&mut self, screen: ScreenPoint) -> Result<RaycastHit, ArError> {
        if !self.initialized {
            return Err(ArError::NotInitialized);
        }
        if self.tracking_lost {
            return Err(ArError::NoSurfaceHit {
                x: screen.x,
                y: screen.y,
            });
        }

        self.hit_count += 1;
        Ok(RaycastHit {
            anchor_id: Uuid::new_v4(),
            position: Point3::new(
                screen.x / PIXELS_PER_METER,
                self.plane_height,
                screen.y / PIXELS_PER_METER,
            ),
        })
    }

    fn support(&self) -> ArSupport {
        ArSupport {
            is_supported: true,
            platform: "mock".to_string(),
            device_model: "MockPlaneRaycaster".to_string(),
        }
    }
}
