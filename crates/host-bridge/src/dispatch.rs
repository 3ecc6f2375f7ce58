use chrono::Utc;

use ar_session::{ArError, PlaneRaycaster, ScreenPoint};
use gauge_types::Unit;

use crate::bridge::{BridgeError, HostSink, MeasureBridge};
use crate::envelope::CommandFrame;
use crate::messages::{
    ArErrorData, ArInitializedData, HostCommand, HostEvent, PointPlacedData, PointsClearedData,
    SceneLoadedData,
};

/// Handle one raw inbound message from the host shell.
///
/// This is the main entry point for the host's message channel. The frame is
/// decoded, dispatched, and resulting events are pushed to the sink. Every
/// failure is converted to an `onARError` event here; nothing propagates to
/// the caller's frame loop.
pub fn handle_message(
    bridge: &mut MeasureBridge,
    ar: &mut dyn PlaneRaycaster,
    sink: &mut dyn HostSink,
    raw: &str,
) {
    let result = decode(raw).and_then(|command| dispatch(bridge, ar, sink, command));
    if let Err(e) = result {
        emit(
            sink,
            &HostEvent::ArError(ArErrorData {
                message: e.to_string(),
            }),
        );
    }
}

/// Run one decoded command against the session and emit its events.
pub fn dispatch(
    bridge: &mut MeasureBridge,
    ar: &mut dyn PlaneRaycaster,
    sink: &mut dyn HostSink,
    command: HostCommand,
) -> Result<(), BridgeError> {
    match command {
        HostCommand::InitializeAr => {
            ar.initialize()?;
            bridge.ar_ready = true;
            emit(
                sink,
                &HostEvent::ArInitialized(ArInitializedData { success: true }),
            );
        }

        HostCommand::PlacePoint(data) => {
            if !bridge.ar_ready {
                return Err(ArError::NotInitialized.into());
            }
            let hit = ar.raycast(ScreenPoint::new(data.screen_x, data.screen_y))?;
            let placed = bridge.session.add_point(hit.position)?;
            emit(
                sink,
                &HostEvent::PointPlaced(PointPlacedData::new(&placed, Utc::now())),
            );

            // The 4th point completes the measurement; emit it immediately
            // rather than waiting for the host to ask.
            if bridge.session.is_complete() {
                let measurement = bridge.session.measure()?;
                emit(sink, &HostEvent::MeasurementComplete(measurement));
            }
        }

        HostCommand::ClearPoints => {
            bridge.session.reset();
            emit(
                sink,
                &HostEvent::PointsCleared(PointsClearedData { success: true }),
            );
        }

        HostCommand::SetUnit(data) => {
            let unit: Unit = data.unit.parse()?;
            bridge.session.set_unit(unit);

            // Unit changes are never silently stale: a complete session
            // re-announces its measurement in the new unit.
            if bridge.session.is_complete() {
                let measurement = bridge.session.measure()?;
                emit(sink, &HostEvent::MeasurementComplete(measurement));
            }
        }

        HostCommand::CheckArSupport => {
            emit(sink, &HostEvent::ArSupportChecked(ar.support()));
        }
    }
    Ok(())
}

/// Scene-lifecycle hook, called by the embedder once its scene is up.
pub fn notify_scene_loaded(sink: &mut dyn HostSink, scene_name: &str) {
    emit(
        sink,
        &HostEvent::SceneLoaded(SceneLoadedData {
            scene_name: scene_name.to_string(),
        }),
    );
}

fn decode(raw: &str) -> Result<HostCommand, BridgeError> {
    let frame: CommandFrame = serde_json::from_str(raw).map_err(|e| BridgeError::Malformed {
        reason: e.to_string(),
    })?;
    HostCommand::from_frame(&frame)
}

/// Serialize one event and hand it to the sink. A dead transport is logged
/// and swallowed so command processing continues.
fn emit(sink: &mut dyn HostSink, event: &HostEvent) {
    let wire = match event.to_envelope().and_then(|env| env.to_json()) {
        Ok(wire) => wire,
        Err(e) => {
            log::error!("failed to serialize {} event: {}", event.method(), e);
            return;
        }
    };

    if let Err(e) = sink.send(&wire) {
        log::warn!("dropping {} event: {}", event.method(), e);
    }
}
