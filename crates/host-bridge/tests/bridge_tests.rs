use ar_session::{ArSupport, MockPlaneRaycaster};
use gauge_engine::types::Measurement;
use gauge_types::Unit;
use host_bridge::messages::{ArErrorData, PointPlacedData, PointsClearedData};
use host_bridge::{handle_message, notify_scene_loaded, BufferSink, EventEnvelope, HostSink,
    MeasureBridge, TransportError};

const EPS: f64 = 1e-9;

// ── Helper functions ─────────────────────────────────────────────────────

fn setup() -> (MeasureBridge, MockPlaneRaycaster, BufferSink) {
    (
        MeasureBridge::new(),
        MockPlaneRaycaster::new(),
        BufferSink::new(),
    )
}

fn initialized() -> (MeasureBridge, MockPlaneRaycaster, BufferSink) {
    let (mut bridge, mut ar, mut sink) = setup();
    handle_message(&mut bridge, &mut ar, &mut sink, r#"{"command":"InitializeAR"}"#);
    sink.drain();
    (bridge, ar, sink)
}

fn place_point(
    bridge: &mut MeasureBridge,
    ar: &mut MockPlaneRaycaster,
    sink: &mut BufferSink,
    x: f64,
    y: f64,
) {
    let raw = format!(
        r#"{{"command":"PlacePoint","data":"{{\"screenX\":{x},\"screenY\":{y}}}"}}"#
    );
    handle_message(bridge, ar, sink, &raw);
}

/// Screen taps that the mock maps onto a 2m × 1.5m ground rectangle.
const RECT_TAPS: [(f64, f64); 4] = [(0.0, 0.0), (200.0, 0.0), (200.0, 150.0), (0.0, 150.0)];

fn decode(wire: &str) -> EventEnvelope {
    serde_json::from_str(wire).unwrap()
}

fn payload<T: serde::de::DeserializeOwned>(wire: &str) -> T {
    serde_json::from_str(&decode(wire).data).unwrap()
}

fn methods(messages: &[String]) -> Vec<String> {
    messages.iter().map(|m| decode(m).method).collect()
}

// ── Initialization ───────────────────────────────────────────────────────

#[test]
fn initialize_emits_success_event() {
    let (mut bridge, mut ar, mut sink) = setup();
    handle_message(&mut bridge, &mut ar, &mut sink, r#"{"command":"InitializeAR"}"#);

    assert_eq!(sink.messages().len(), 1);
    let env = decode(&sink.messages()[0]);
    assert_eq!(env.method, "onARInitialized");
    assert_eq!(env.data, r#"{"success":true}"#);
    assert!(bridge.ar_ready);
}

#[test]
fn place_point_before_initialize_reports_error() {
    let (mut bridge, mut ar, mut sink) = setup();
    place_point(&mut bridge, &mut ar, &mut sink, 100.0, 100.0);

    assert_eq!(methods(sink.messages()), ["onARError"]);
    assert!(bridge.session.points().is_empty());
}

// ── Point placement workflow ─────────────────────────────────────────────

#[test]
fn four_taps_produce_points_then_measurement() {
    let (mut bridge, mut ar, mut sink) = initialized();
    for (x, y) in RECT_TAPS {
        place_point(&mut bridge, &mut ar, &mut sink, x, y);
    }

    assert_eq!(
        methods(sink.messages()),
        [
            "onPointPlaced",
            "onPointPlaced",
            "onPointPlaced",
            "onPointPlaced",
            "onMeasurementComplete",
        ]
    );

    let first: PointPlacedData = payload(&sink.messages()[0]);
    assert_eq!(first.id, "point_0");
    assert_eq!(first.position, [0.0, 0.0, 0.0]);
    // RFC 3339 timestamps carry a date-time separator.
    assert!(first.timestamp.contains('T'));

    let last_point: PointPlacedData = payload(&sink.messages()[3]);
    assert_eq!(last_point.id, "point_3");

    let m: Measurement = payload(&sink.messages()[4]);
    assert!((m.width - 2.0).abs() < EPS);
    assert!((m.height - 1.5).abs() < EPS);
    assert_eq!(m.unit, Unit::Meters);
    // Mean origin distance of the corners is 1.5 m → 0.015 accuracy.
    assert!((m.accuracy - 0.015).abs() < EPS);
}

#[test]
fn fifth_tap_reports_error_and_leaves_session_intact() {
    let (mut bridge, mut ar, mut sink) = initialized();
    for (x, y) in RECT_TAPS {
        place_point(&mut bridge, &mut ar, &mut sink, x, y);
    }
    sink.drain();

    place_point(&mut bridge, &mut ar, &mut sink, 500.0, 500.0);
    assert_eq!(methods(sink.messages()), ["onARError"]);
    assert_eq!(bridge.session.points().len(), 4);
    assert!(bridge.session.measure().is_ok());
}

#[test]
fn raycast_miss_reports_error_without_adding_point() {
    let (mut bridge, mut ar, mut sink) = initialized();
    ar.set_tracking_lost(true);

    place_point(&mut bridge, &mut ar, &mut sink, 100.0, 100.0);
    assert_eq!(methods(sink.messages()), ["onARError"]);
    let err: ArErrorData = payload(&sink.messages()[0]);
    assert!(err.message.contains("no tracked surface"));
    assert!(bridge.session.points().is_empty());
}

// ── Clearing ─────────────────────────────────────────────────────────────

#[test]
fn clear_points_resets_session() {
    let (mut bridge, mut ar, mut sink) = initialized();
    for (x, y) in RECT_TAPS {
        place_point(&mut bridge, &mut ar, &mut sink, x, y);
    }
    sink.drain();

    handle_message(&mut bridge, &mut ar, &mut sink, r#"{"command":"ClearPoints"}"#);
    let cleared: PointsClearedData = payload(&sink.messages()[0]);
    assert!(cleared.success);
    assert!(bridge.session.points().is_empty());

    // A fresh rectangle can be measured after the clear.
    sink.drain();
    for (x, y) in RECT_TAPS {
        place_point(&mut bridge, &mut ar, &mut sink, x, y);
    }
    assert_eq!(methods(sink.messages()).last().unwrap(), "onMeasurementComplete");
}

// ── Unit changes ─────────────────────────────────────────────────────────

#[test]
fn set_unit_on_complete_session_reemits_measurement() {
    let (mut bridge, mut ar, mut sink) = initialized();
    for (x, y) in RECT_TAPS {
        place_point(&mut bridge, &mut ar, &mut sink, x, y);
    }
    sink.drain();

    handle_message(
        &mut bridge,
        &mut ar,
        &mut sink,
        r#"{"command":"SetUnit","data":"{\"unit\":\"inches\"}"}"#,
    );

    assert_eq!(methods(sink.messages()), ["onMeasurementComplete"]);
    let m: Measurement = payload(&sink.messages()[0]);
    assert_eq!(m.unit, Unit::Inches);
    assert!((m.width - 78.7).abs() < EPS);
    assert!((m.height - 59.1).abs() < EPS);
}

#[test]
fn set_unit_is_case_insensitive_and_silent_when_incomplete() {
    let (mut bridge, mut ar, mut sink) = initialized();
    handle_message(
        &mut bridge,
        &mut ar,
        &mut sink,
        r#"{"command":"SetUnit","data":"{\"unit\":\"INCHES\"}"}"#,
    );

    assert!(sink.messages().is_empty());
    assert_eq!(bridge.session.unit(), Unit::Inches);
}

#[test]
fn unknown_unit_is_rejected_and_unit_unchanged() {
    let (mut bridge, mut ar, mut sink) = initialized();
    handle_message(
        &mut bridge,
        &mut ar,
        &mut sink,
        r#"{"command":"SetUnit","data":"{\"unit\":\"furlongs\"}"}"#,
    );

    assert_eq!(methods(sink.messages()), ["onARError"]);
    let err: ArErrorData = payload(&sink.messages()[0]);
    assert!(err.message.contains("furlongs"));
    assert_eq!(bridge.session.unit(), Unit::Meters);
}

// ── Support check and scene lifecycle ────────────────────────────────────

#[test]
fn check_ar_support_reports_capability() {
    let (mut bridge, mut ar, mut sink) = setup();
    handle_message(&mut bridge, &mut ar, &mut sink, r#"{"command":"CheckARSupport"}"#);

    assert_eq!(methods(sink.messages()), ["onARSupportChecked"]);
    let support: ArSupport = payload(&sink.messages()[0]);
    assert!(support.is_supported);
    assert_eq!(support.platform, "mock");
}

#[test]
fn scene_loaded_notification() {
    let mut sink = BufferSink::new();
    notify_scene_loaded(&mut sink, "MeasureScene");

    let env = decode(&sink.messages()[0]);
    // The host shell dispatches on this exact legacy method name.
    assert_eq!(env.method, "onUnitySceneLoaded");
    assert_eq!(env.data, r#"{"sceneName":"MeasureScene"}"#);
}

// ── Boundary errors ──────────────────────────────────────────────────────

#[test]
fn malformed_json_reports_error() {
    let (mut bridge, mut ar, mut sink) = setup();
    handle_message(&mut bridge, &mut ar, &mut sink, "{{{ not json");

    assert_eq!(methods(sink.messages()), ["onARError"]);
    let err: ArErrorData = payload(&sink.messages()[0]);
    assert!(err.message.contains("malformed"));
}

#[test]
fn unknown_command_reports_error() {
    let (mut bridge, mut ar, mut sink) = setup();
    handle_message(&mut bridge, &mut ar, &mut sink, r#"{"command":"LaunchRocket"}"#);

    assert_eq!(methods(sink.messages()), ["onARError"]);
    let err: ArErrorData = payload(&sink.messages()[0]);
    assert!(err.message.contains("LaunchRocket"));
}

// ── Transport failure ────────────────────────────────────────────────────

/// Sink whose channel is permanently down.
struct DeadSink;

impl HostSink for DeadSink {
    fn send(&mut self, _message: &str) -> Result<(), TransportError> {
        Err(TransportError {
            reason: "channel closed".to_string(),
        })
    }
}

#[test]
fn dead_transport_does_not_stop_processing() {
    let mut bridge = MeasureBridge::new();
    let mut ar = MockPlaneRaycaster::new();
    let mut dead = DeadSink;

    handle_message(&mut bridge, &mut ar, &mut dead, r#"{"command":"InitializeAR"}"#);
    assert!(bridge.ar_ready);

    // Events were dropped on the floor, but the session still advanced.
    for (x, y) in RECT_TAPS {
        let raw = format!(
            r#"{{"command":"PlacePoint","data":"{{\"screenX\":{x},\"screenY\":{y}}}"}}"#
        );
        handle_message(&mut bridge, &mut ar, &mut dead, &raw);
    }
    assert!(bridge.session.is_complete());
}

// ── Wire shape ───────────────────────────────────────────────────────────

#[test]
fn outbound_envelopes_are_double_encoded() {
    let (mut bridge, mut ar, mut sink) = setup();
    handle_message(&mut bridge, &mut ar, &mut sink, r#"{"command":"InitializeAR"}"#);

    let wire = &sink.messages()[0];
    // Outer parse yields a string-valued data field, not an object.
    let outer: serde_json::Value = serde_json::from_str(wire).unwrap();
    assert!(outer["data"].is_string());
    // Inner parse of that string yields the payload object.
    let inner: serde_json::Value =
        serde_json::from_str(outer["data"].as_str().unwrap()).unwrap();
    assert_eq!(inner["success"], serde_json::Value::Bool(true));
}
