//! JSON command/event boundary between the measurement engine and the host
//! application shell.
//!
//! The host drives the bridge with `{"command", "data"}` frames and receives
//! `{"method", "data"}` envelopes back; both directions keep the host
//! protocol's double-encoded `data` field. The AR tracking subsystem and the
//! outbound channel are trait objects supplied by the embedder.

pub mod bridge;
pub mod dispatch;
pub mod envelope;
pub mod messages;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use bridge::{BridgeError, BufferSink, HostSink, MeasureBridge, TransportError};
pub use dispatch::{dispatch, handle_message, notify_scene_loaded};
pub use envelope::{CommandFrame, EventEnvelope};
pub use messages::{HostCommand, HostEvent};
