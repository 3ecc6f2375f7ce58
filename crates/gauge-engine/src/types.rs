use serde::{Deserialize, Serialize};

use gauge_types::{Point3, Unit};

/// A successfully placed corner point: the 0-based slot it filled and its
/// world-frame position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedPoint {
    pub index: usize,
    pub position: Point3,
}

/// A completed rectangle measurement. Derived from the session's points and
/// unit on demand; never cached, so it cannot go stale across a unit change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Distance between corners 0 and 1 (bottom edge), in `unit`.
    pub width: f64,
    /// Distance between corners 0 and 3 (left edge), in `unit`.
    pub height: f64,
    pub unit: Unit,
    /// Distance-based confidence proxy, not a calibrated error bound.
    pub accuracy: f64,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionState {
    /// No points placed.
    Empty,
    /// 1 to 3 points placed.
    Partial { placed: usize },
    /// All 4 corners placed; a measurement is available.
    Complete,
}

/// Errors from the measurement session. These are ordinary control-flow
/// results on the per-frame path, never panics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session already has 4 points; reset before placing more")]
    Full,

    #[error("measurement incomplete: {have} of 4 points placed")]
    Incomplete { have: usize },
}
