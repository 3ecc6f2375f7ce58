use ar_session::ArError;
use gauge_engine::types::SessionError;
use gauge_engine::MeasurementSession;
use gauge_types::UnknownUnit;

/// Bridge-side state: the measurement session plus the AR readiness flag.
///
/// The AR subsystem and the outbound channel are NOT owned here; both are
/// passed into dispatch as trait objects, so hosts and tests control them.
pub struct MeasureBridge {
    /// The four-point measurement session.
    pub session: MeasurementSession,
    /// Set once `InitializeAR` has resolved the tracking subsystem.
    pub ar_ready: bool,
}

impl MeasureBridge {
    pub fn new() -> Self {
        Self {
            session: MeasurementSession::new(),
            ar_ready: false,
        }
    }
}

impl Default for MeasureBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// The outbound string-message channel to the host shell.
///
/// An explicit collaborator rather than a process-wide singleton; the bridge
/// only ever talks to the host through whatever sink the embedder hands in.
pub trait HostSink {
    fn send(&mut self, message: &str) -> Result<(), TransportError>;
}

/// The outbound channel is unavailable. Non-fatal: dispatch logs the drop
/// and keeps processing.
#[derive(Debug, Clone, thiserror::Error)]
#[error("transport unavailable: {reason}")]
pub struct TransportError {
    pub reason: String,
}

/// Sink double that buffers outbound wire strings. Used by tests and by the
/// WASM shim, which returns the buffered batch to JavaScript.
#[derive(Debug, Default)]
pub struct BufferSink {
    messages: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl HostSink for BufferSink {
    fn send(&mut self, message: &str) -> Result<(), TransportError> {
        self.messages.push(message.to_string());
        Ok(())
    }
}

/// Errors from inbound-command handling. All of these are caught at the
/// dispatch boundary and converted to an `onARError` event; none propagate
/// into the host's frame loop.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed command: {reason}")]
    Malformed { reason: String },

    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Ar(#[from] ArError),

    #[error(transparent)]
    Unit(#[from] UnknownUnit),
}
