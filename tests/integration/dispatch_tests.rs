//! Integration tests for inbound writes → request engine → notification.

use crate::mock_transport::{MockTransport, RecordingSink, TransportCall};

use activehub::app::events::AppEvent;
use activehub::app::service::Peripheral;
use activehub::config::PeripheralConfig;
use activehub::events::{TransportEvent, WriteRequest};
use activehub::gatt::{CHAR_RECEIVE, CHAR_TRANSMIT, SERVICE_UUID};
use activehub::rpc::codec::{decode_frame, encode_frame};
use activehub::rpc::engine::DropReason;
use serde_json::Value;
use uuid::Uuid;

fn make_hub() -> (Peripheral<MockTransport>, RecordingSink) {
    (
        Peripheral::new(&PeripheralConfig::default(), MockTransport::new()),
        RecordingSink::new(),
    )
}

fn write(characteristic: Uuid, json: &str) -> WriteRequest {
    WriteRequest {
        central: 1,
        characteristic,
        value: encode_frame(json.as_bytes()).unwrap().into_bytes(),
    }
}

fn send(hub: &mut Peripheral<MockTransport>, sink: &mut RecordingSink, writes: Vec<WriteRequest>) {
    hub.handle_event(TransportEvent::WriteRequests(writes), sink);
}

fn payload_json(frame: &[u8]) -> Value {
    serde_json::from_slice(decode_frame(frame).unwrap()).unwrap()
}

// ── Known requests ────────────────────────────────────────────

#[test]
fn app_status_is_answered_on_transmit() {
    let (mut hub, mut sink) = make_hub();
    send(
        &mut hub,
        &mut sink,
        vec![write(CHAR_RECEIVE, r#"{"messageType":"BT_APP_STATUS"}"#)],
    );

    let updates: Vec<_> = hub
        .transport()
        .calls
        .iter()
        .filter_map(|c| match c {
            TransportCall::UpdateValue {
                characteristic,
                value,
            } => Some((*characteristic, value.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, CHAR_TRANSMIT);

    let body = payload_json(&updates[0].1);
    assert_eq!(body["messageType"], "BT_APP_STATUS");
    assert_eq!(body["appState"], "INITIALISING");
    assert_eq!(body["errorCode"], "NO_ERROR");
    assert!(sink.events.contains(&AppEvent::ResponseSent {
        len: updates[0].1.len(),
        queued: true,
    }));
}

#[test]
fn wifi_status_fields() {
    let (mut hub, mut sink) = make_hub();
    send(
        &mut hub,
        &mut sink,
        vec![write(CHAR_RECEIVE, r#"{"messageType":"WIFI_INTERFACE_STATUS_REQUEST"}"#)],
    );
    let body = payload_json(hub.transport().notifications()[0]);
    assert_eq!(body["messageType"], "WIFI_INTERFACE_STATUS_RESPONSE");
    assert_eq!(body["interfaceUp"], true);
    assert_eq!(body["hasInternet"], false);
    assert_eq!(body["currentSSID"], "BGCH");
}

#[test]
fn set_active_ssid_keeps_deployed_response_tag() {
    let (mut hub, mut sink) = make_hub();
    send(
        &mut hub,
        &mut sink,
        vec![write(
            CHAR_RECEIVE,
            r#"{"messageType":"SET_ACTIVE_SSID_REQUEST","ssid":"BGCH 1"}"#,
        )],
    );
    let body = payload_json(hub.transport().notifications()[0]);
    assert_eq!(body["messageType"], "WIFI_INTERFACES_AVAILABLE_RESPONSE");
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["statusMessage"], "ALL GOOD");
}

#[test]
fn dispatch_does_not_depend_on_lifecycle_state() {
    let (mut hub, mut sink) = make_hub();
    assert_eq!(hub.state(), activehub::fsm::StateId::Unknown);
    send(
        &mut hub,
        &mut sink,
        vec![write(CHAR_RECEIVE, r#"{"messageType":"BT_APP_STATUS"}"#)],
    );
    assert_eq!(hub.transport().notifications().len(), 1);
}

// ── Drops ─────────────────────────────────────────────────────

#[test]
fn unknown_type_yields_nothing_but_a_drop_event() {
    let (mut hub, mut sink) = make_hub();
    send(&mut hub, &mut sink, vec![write(CHAR_RECEIVE, r#"{"messageType":"FOO"}"#)]);

    assert!(hub.transport().notifications().is_empty());
    assert_eq!(
        sink.drops(),
        vec![&AppEvent::RequestDropped {
            characteristic: CHAR_RECEIVE,
            reason: DropReason::UnknownMessageType("FOO".into()),
        }]
    );
}

#[test]
fn writes_to_other_characteristics_are_ignored() {
    let (mut hub, mut sink) = make_hub();
    for target in [CHAR_TRANSMIT, SERVICE_UUID] {
        send(
            &mut hub,
            &mut sink,
            vec![write(target, r#"{"messageType":"BT_APP_STATUS"}"#)],
        );
    }
    assert!(hub.transport().notifications().is_empty());
    assert!(sink.drops().iter().all(|e| matches!(
        e,
        AppEvent::RequestDropped {
            reason: DropReason::WrongCharacteristic(_),
            ..
        }
    )));
    assert_eq!(sink.drops().len(), 2);
}

#[test]
fn short_frame_is_dropped() {
    let (mut hub, mut sink) = make_hub();
    send(
        &mut hub,
        &mut sink,
        vec![WriteRequest {
            central: 1,
            characteristic: CHAR_RECEIVE,
            value: vec![0xAA, 0x55, 0xAA, 0x00],
        }],
    );
    assert!(hub.transport().notifications().is_empty());
    assert!(matches!(
        sink.drops()[0],
        AppEvent::RequestDropped {
            reason: DropReason::FrameTooShort(4),
            ..
        }
    ));
}

// ── Batches ───────────────────────────────────────────────────

#[test]
fn batch_is_processed_in_order_and_fully_acknowledged() {
    let (mut hub, mut sink) = make_hub();
    send(
        &mut hub,
        &mut sink,
        vec![
            write(CHAR_RECEIVE, r#"{"messageType":"WIFI_INTERFACES_AVAILABLE_REQUEST"}"#),
            write(CHAR_RECEIVE, r#"{"messageType":"FOO"}"#),
            write(CHAR_RECEIVE, r#"{"messageType":"BT_APP_STATUS"}"#),
        ],
    );

    let types: Vec<_> = hub
        .transport()
        .notifications()
        .into_iter()
        .map(|n| payload_json(n)["messageType"].clone())
        .collect();
    assert_eq!(
        types,
        vec![
            Value::from("WIFI_INTERFACES_AVAILABLE_RESPONSE"),
            Value::from("BT_APP_STATUS"),
        ]
    );
    assert_eq!(hub.transport().responds(), 3);

    // Each write is acknowledged right after its own dispatch.
    let kinds: Vec<&str> = hub
        .transport()
        .calls
        .iter()
        .map(|c| match c {
            TransportCall::UpdateValue { .. } => "update",
            TransportCall::Respond { .. } => "respond",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["update", "respond", "respond", "update", "respond"]);
}

#[test]
fn repeated_writes_produce_identical_frames() {
    let (mut hub, mut sink) = make_hub();
    let req = write(CHAR_RECEIVE, r#"{"messageType":"WIFI_INTERFACES_AVAILABLE_REQUEST"}"#);
    send(&mut hub, &mut sink, vec![req.clone(), req.clone(), req]);

    let sent = hub.transport().notifications();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0], sent[1]);
    assert_eq!(sent[1], sent[2]);
}

#[test]
fn full_transmit_queue_drops_frame_but_still_acks() {
    let (mut hub, mut sink) = make_hub();
    hub.transport_mut().queue_full = true;
    send(
        &mut hub,
        &mut sink,
        vec![write(CHAR_RECEIVE, r#"{"messageType":"BT_APP_STATUS"}"#)],
    );
    hub.handle_event(TransportEvent::ReadyToUpdateSubscribers, &mut sink);

    assert_eq!(hub.transport().notifications().len(), 1, "no retry");
    assert_eq!(hub.transport().responds(), 1);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ResponseSent { queued: false, .. })));
}

#[test]
fn subscriptions_are_reported() {
    let (mut hub, mut sink) = make_hub();
    hub.handle_event(
        TransportEvent::Subscribed {
            central: 9,
            characteristic: CHAR_TRANSMIT,
        },
        &mut sink,
    );
    hub.handle_event(
        TransportEvent::Unsubscribed {
            central: 9,
            characteristic: CHAR_TRANSMIT,
        },
        &mut sink,
    );
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Subscription {
                central: 9,
                characteristic: CHAR_TRANSMIT,
                subscribed: true,
            },
            AppEvent::Subscription {
                central: 9,
                characteristic: CHAR_TRANSMIT,
                subscribed: false,
            },
        ]
    );
    assert!(hub.transport().calls.is_empty());
}
