//! Wire frames for the host message channel.
//!
//! The host shell exchanges flat JSON strings. Both directions use a
//! two-field frame whose `data` field is itself a JSON document encoded as a
//! string (double-encoded). The existing host decodes exactly this shape, so
//! the double encoding is preserved as-is.

use serde::{Deserialize, Serialize};

/// Inbound frame: `{"command": "...", "data": "<json>"}`.
///
/// `data` is empty for commands that carry no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandFrame {
    pub command: String,
    #[serde(default)]
    pub data: String,
}

/// Outbound envelope: `{"method": "...", "data": "<json>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub method: String,
    pub data: String,
}

impl EventEnvelope {
    /// Build an envelope, JSON-encoding the payload into `data`.
    pub fn encode<T: Serialize>(method: &str, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: method.to_string(),
            data: serde_json::to_string(payload)?,
        })
    }

    /// Serialize the whole envelope to the flat wire string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
