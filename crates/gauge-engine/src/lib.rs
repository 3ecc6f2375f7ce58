pub mod types;

use gauge_types::{Point3, Unit};

use crate::types::{Measurement, PlacedPoint, SessionError, SessionState};

/// Corner count for a rectangle measurement.
pub const MAX_POINTS: usize = 4;

/// Expected tracking error per meter of distance from the sensor origin.
const ACCURACY_PER_METER: f64 = 0.01;

/// The four-point rectangle measurement session.
///
/// Owns the ordered corner list (bottom-left, bottom-right, top-right,
/// top-left) and the active display unit. The 4-point cap is enforced here,
/// not at the input layer, so the invariant holds regardless of caller
/// discipline. All operations are synchronous and complete immediately;
/// callers driving this from multiple threads must serialize externally.
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    points: Vec<Point3>,
    unit: Unit,
}

impl MeasurementSession {
    /// Create an empty session measuring in meters.
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(MAX_POINTS),
            unit: Unit::Meters,
        }
    }

    /// Append the next corner point.
    ///
    /// Fails with `SessionError::Full` once 4 points are placed; the session
    /// is left unchanged and the caller must `reset` first. The returned
    /// `PlacedPoint` carries the 0-based slot the point filled; when it is
    /// the 4th, `is_complete` flips true and `measure` becomes available.
    pub fn add_point(&mut self, position: Point3) -> Result<PlacedPoint, SessionError> {
        if self.points.len() >= MAX_POINTS {
            return Err(SessionError::Full);
        }
        let index = self.points.len();
        self.points.push(position);
        Ok(PlacedPoint { index, position })
    }

    /// Compute the rectangle measurement from the four placed corners.
    ///
    /// Pure and idempotent: repeated calls with unchanged state return
    /// identical results. Fails with `Incomplete` until all 4 corners exist.
    pub fn measure(&self) -> Result<Measurement, SessionError> {
        if self.points.len() != MAX_POINTS {
            return Err(SessionError::Incomplete {
                have: self.points.len(),
            });
        }

        let bottom_left = &self.points[0];
        let bottom_right = &self.points[1];
        let top_left = &self.points[3];

        let width_meters = bottom_left.distance_to(bottom_right);
        let height_meters = bottom_left.distance_to(top_left);

        Ok(Measurement {
            width: self.unit.round(self.unit.convert(width_meters)),
            height: self.unit.round(self.unit.convert(height_meters)),
            unit: self.unit,
            accuracy: self.accuracy(),
        })
    }

    /// Distance-based confidence heuristic: mean distance of the placed
    /// points from the world origin, scaled as 1 cm of expected error per
    /// meter from the sensor. Returns 0 when no points are placed.
    pub fn accuracy(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .points
            .iter()
            .map(|p| p.distance_from_origin())
            .sum();
        (total / self.points.len() as f64) * ACCURACY_PER_METER
    }

    /// Switch the display unit. Does not touch the points; when the session
    /// is complete the caller re-runs `measure` so results are never stale.
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Clear all points, keeping the unit. Idempotent; always succeeds.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() == MAX_POINTS
    }

    pub fn state(&self) -> SessionState {
        match self.points.len() {
            0 => SessionState::Empty,
            n if n < MAX_POINTS => SessionState::Partial { placed: n },
            _ => SessionState::Complete,
        }
    }
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new()
    }
}
