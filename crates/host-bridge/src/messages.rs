//! Typed command and event messages behind the wire frames.
//!
//! Command names and payload field names are fixed by the host shell's
//! protocol; payload structs use camelCase renames to match it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ar_session::ArSupport;
use gauge_engine::types::{Measurement, PlacedPoint};

use crate::bridge::BridgeError;
use crate::envelope::{CommandFrame, EventEnvelope};

// ── Inbound commands ─────────────────────────────────────────────────────

/// Payload of `PlacePoint`: the 2D touch location to hit-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePointData {
    pub screen_x: f64,
    pub screen_y: f64,
}

/// Payload of `SetUnit`. The unit arrives as a free-form string and is
/// validated during dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetUnitData {
    pub unit: String,
}

/// A decoded inbound command.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    InitializeAr,
    PlacePoint(PlacePointData),
    ClearPoints,
    SetUnit(SetUnitData),
    CheckArSupport,
}

impl HostCommand {
    /// Decode a wire frame into a typed command.
    ///
    /// Unknown command names and undecodable payloads are boundary errors;
    /// they surface as `onARError` and never touch the session.
    pub fn from_frame(frame: &CommandFrame) -> Result<Self, BridgeError> {
        match frame.command.as_str() {
            "InitializeAR" => Ok(HostCommand::InitializeAr),
            "PlacePoint" => Ok(HostCommand::PlacePoint(decode_payload(frame)?)),
            "ClearPoints" => Ok(HostCommand::ClearPoints),
            "SetUnit" => Ok(HostCommand::SetUnit(decode_payload(frame)?)),
            "CheckARSupport" => Ok(HostCommand::CheckArSupport),
            other => Err(BridgeError::UnknownCommand {
                name: other.to_string(),
            }),
        }
    }
}

fn decode_payload<T: for<'de> Deserialize<'de>>(frame: &CommandFrame) -> Result<T, BridgeError> {
    serde_json::from_str(&frame.data).map_err(|e| BridgeError::Malformed {
        reason: format!("{} payload: {}", frame.command, e),
    })
}

// ── Outbound events ──────────────────────────────────────────────────────

/// Payload of `onARInitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArInitializedData {
    pub success: bool,
}

/// Payload of `onPointPlaced`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPlacedData {
    /// Slot-derived id, `point_0` through `point_3`.
    pub id: String,
    pub position: [f64; 3],
    /// ISO 8601 placement time.
    pub timestamp: String,
}

impl PointPlacedData {
    pub fn new(placed: &PlacedPoint, at: DateTime<Utc>) -> Self {
        Self {
            id: format!("point_{}", placed.index),
            position: placed.position.to_array(),
            timestamp: at.to_rfc3339(),
        }
    }
}

/// Payload of `onPointsCleared`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointsClearedData {
    pub success: bool,
}

/// Payload of `onUnitySceneLoaded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLoadedData {
    pub scene_name: String,
}

/// Payload of `onARError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArErrorData {
    pub message: String,
}

/// An outbound event, one per wire method name.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    ArInitialized(ArInitializedData),
    PointPlaced(PointPlacedData),
    MeasurementComplete(Measurement),
    PointsCleared(PointsClearedData),
    ArSupportChecked(ArSupport),
    SceneLoaded(SceneLoadedData),
    ArError(ArErrorData),
}

impl HostEvent {
    /// The wire method name the host shell dispatches on.
    pub fn method(&self) -> &'static str {
        match self {
            HostEvent::ArInitialized(_) => "onARInitialized",
            HostEvent::PointPlaced(_) => "onPointPlaced",
            HostEvent::MeasurementComplete(_) => "onMeasurementComplete",
            HostEvent::PointsCleared(_) => "onPointsCleared",
            HostEvent::ArSupportChecked(_) => "onARSupportChecked",
            HostEvent::SceneLoaded(_) => "onUnitySceneLoaded",
            HostEvent::ArError(_) => "onARError",
        }
    }

    /// Wrap the event in the double-encoded wire envelope.
    pub fn to_envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        match self {
            HostEvent::ArInitialized(data) => EventEnvelope::encode(self.method(), data),
            HostEvent::PointPlaced(data) => EventEnvelope::encode(self.method(), data),
            HostEvent::MeasurementComplete(data) => EventEnvelope::encode(self.method(), data),
            HostEvent::PointsCleared(data) => EventEnvelope::encode(self.method(), data),
            HostEvent::ArSupportChecked(data) => EventEnvelope::encode(self.method(), data),
            HostEvent::SceneLoaded(data) => EventEnvelope::encode(self.method(), data),
            HostEvent::ArError(data) => EventEnvelope::encode(self.method(), data),
        }
    }
}
