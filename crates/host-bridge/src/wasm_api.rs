//! WASM entry points for browser-embedded hosts.
//!
//! Only compiled for the `wasm32` target. Browsers have no AR tracking, so
//! the shim runs against the deterministic mapped-plane raycaster; the host
//! page exchanges the same wire frames a device build would.

use wasm_bindgen::prelude::*;

use ar_session::MockPlaneRaycaster;

use crate::bridge::{BufferSink, MeasureBridge};
use crate::dispatch;

// Single-threaded in the worker; state lives at the FFI edge only.
thread_local! {
    static BRIDGE: std::cell::RefCell<Option<WasmBridge>> = std::cell::RefCell::new(None);
}

struct WasmBridge {
    bridge: MeasureBridge,
    ar: MockPlaneRaycaster,
}

/// Initialize the bridge. Must be called once before any other function.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();

    BRIDGE.with(|cell| {
        *cell.borrow_mut() = Some(WasmBridge {
            bridge: MeasureBridge::new(),
            ar: MockPlaneRaycaster::new(),
        });
    });
}

/// Process one inbound command frame and return the outbound envelopes it
/// produced, as a JSON array of wire strings.
#[wasm_bindgen]
pub fn handle_message(raw: &str) -> String {
    let messages = BRIDGE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot
            .as_mut()
            .expect("Bridge not initialized. Call init() first.");

        let mut sink = BufferSink::new();
        dispatch::handle_message(&mut state.bridge, &mut state.ar, &mut sink, raw);
        sink.drain()
    });

    serde_json::to_string(&messages).unwrap_or_else(|_| "[]".to_string())
}

/// Scene-lifecycle callback from the embedding page.
#[wasm_bindgen]
pub fn notify_scene_loaded(scene_name: &str) -> String {
    let mut sink = BufferSink::new();
    dispatch::notify_scene_loaded(&mut sink, scene_name);
    serde_json::to_string(&sink.drain()).unwrap_or_else(|_| "[]".to_string())
}
