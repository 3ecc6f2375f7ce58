use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conversion factor from meters to inches.
pub const METERS_TO_INCHES: f64 = 39.3701;

/// Display unit for measurement results. Stored distances are always meters;
/// conversion happens only when a result is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Meters,
    Inches,
}

impl Unit {
    /// Convert a distance in meters to this unit.
    pub fn convert(&self, meters: f64) -> f64 {
        match self {
            Unit::Meters => meters,
            Unit::Inches => meters * METERS_TO_INCHES,
        }
    }

    /// Round a converted value to the display precision for this unit:
    /// 2 decimals for meters, 1 decimal for inches.
    pub fn round(&self, value: f64) -> f64 {
        match self {
            Unit::Meters => (value * 100.0).round() / 100.0,
            Unit::Inches => (value * 10.0).round() / 10.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Meters => "meters",
            Unit::Inches => "inches",
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Meters
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit string outside {meters, inches}. Unknown units are rejected rather
/// than silently treated as inches.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown unit: {value:?} (expected \"meters\" or \"inches\")")]
pub struct UnknownUnit {
    pub value: String,
}

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meters" => Ok(Unit::Meters),
            "inches" => Ok(Unit::Inches),
            _ => Err(UnknownUnit {
                value: s.to_string(),
            }),
        }
    }
}
