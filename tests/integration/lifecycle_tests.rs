//! Integration tests for the transport event → lifecycle FSM → transport
//! request pipeline.

use crate::mock_transport::{MockTransport, RecordingSink, TransportCall};

use activehub::app::events::AppEvent;
use activehub::app::ports::TransportError;
use activehub::app::service::Peripheral;
use activehub::config::PeripheralConfig;
use activehub::events::{RadioState, TransportEvent};
use activehub::fsm::StateId;
use activehub::fsm::context::TransportRequest;
use activehub::gatt::{LOCAL_NAME, SERVICE_UUID, ServiceDescriptor};

fn make_hub() -> (Peripheral<MockTransport>, RecordingSink) {
    (
        Peripheral::new(&PeripheralConfig::default(), MockTransport::new()),
        RecordingSink::new(),
    )
}

fn ready() -> TransportEvent {
    TransportEvent::ReadinessChanged(RadioState::PoweredOn)
}

fn bring_up(hub: &mut Peripheral<MockTransport>, sink: &mut RecordingSink) {
    hub.handle_event(ready(), sink);
    hub.handle_event(TransportEvent::ServiceAdded(Ok(())), sink);
    hub.handle_event(TransportEvent::AdvertisingStarted(Ok(())), sink);
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn full_bring_up_issues_add_then_advertise() {
    let (mut hub, mut sink) = make_hub();
    bring_up(&mut hub, &mut sink);

    assert_eq!(hub.state(), StateId::Advertising);
    assert_eq!(
        hub.transport().calls,
        vec![
            TransportCall::AddService(ServiceDescriptor::ACTIVE_HUB),
            TransportCall::StartAdvertising(activehub::gatt::Advertisement {
                service_uuid: SERVICE_UUID,
                local_name: LOCAL_NAME.into(),
            }),
        ]
    );
}

#[test]
fn state_changes_are_emitted_in_order() {
    let (mut hub, mut sink) = make_hub();
    bring_up(&mut hub, &mut sink);

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (StateId::Unknown, StateId::PoweredOnNoService),
            (StateId::PoweredOnNoService, StateId::PoweredOnServiceAdded),
            (StateId::PoweredOnServiceAdded, StateId::Advertising),
        ]
    );
}

// ── Ordering guarantees ───────────────────────────────────────

#[test]
fn nothing_requested_before_ready() {
    let (mut hub, mut sink) = make_hub();
    hub.handle_event(TransportEvent::ServiceAdded(Ok(())), &mut sink);
    hub.handle_event(TransportEvent::AdvertisingStarted(Ok(())), &mut sink);
    assert!(hub.transport().calls.is_empty());
    assert_eq!(hub.state(), StateId::Unknown);
}

#[test]
fn advertising_waits_for_service_confirmation() {
    let (mut hub, mut sink) = make_hub();
    hub.handle_event(ready(), &mut sink);
    assert_eq!(hub.transport().adds(), 1);
    assert_eq!(hub.transport().advertises(), 0);

    // A premature advertising confirmation must not skip ahead.
    hub.handle_event(TransportEvent::AdvertisingStarted(Ok(())), &mut sink);
    assert_eq!(hub.state(), StateId::PoweredOnNoService);
    assert_eq!(hub.transport().advertises(), 0);
}

#[test]
fn radio_unavailable_parks_without_requests() {
    for state in [
        RadioState::PoweredOff,
        RadioState::Unauthorized,
        RadioState::Unsupported,
        RadioState::Resetting,
    ] {
        let (mut hub, mut sink) = make_hub();
        hub.handle_event(TransportEvent::ReadinessChanged(state), &mut sink);
        assert_eq!(hub.state(), StateId::PoweredOff, "{state:?}");
        assert!(hub.transport().calls.is_empty());
    }
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn reported_add_failure_is_not_retried() {
    let (mut hub, mut sink) = make_hub();
    hub.handle_event(ready(), &mut sink);
    let err = TransportError::Rejected("attribute table full".into());
    hub.handle_event(TransportEvent::ServiceAdded(Err(err.clone())), &mut sink);

    assert_eq!(hub.state(), StateId::PoweredOnNoService);
    assert_eq!(hub.transport().adds(), 1);
    assert!(sink.events.contains(&AppEvent::TransportRequestFailed {
        request: TransportRequest::AddService,
        error: err,
    }));
}

#[test]
fn refused_advertise_is_reported_and_state_kept() {
    let (mut hub, mut sink) = make_hub();
    hub.transport_mut().advertise_result = Some(TransportError::Busy);
    hub.handle_event(ready(), &mut sink);
    hub.handle_event(TransportEvent::ServiceAdded(Ok(())), &mut sink);

    assert_eq!(hub.state(), StateId::PoweredOnServiceAdded);
    assert!(sink.events.contains(&AppEvent::TransportRequestFailed {
        request: TransportRequest::StartAdvertising,
        error: TransportError::Busy,
    }));
}

#[test]
fn reset_event_retries_after_failure() {
    let (mut hub, mut sink) = make_hub();
    hub.transport_mut().add_service_result = Some(TransportError::NotPoweredOn);
    hub.handle_event(ready(), &mut sink);
    assert_eq!(hub.transport().adds(), 1);

    hub.handle_event(TransportEvent::ReadinessChanged(RadioState::Resetting), &mut sink);
    assert_eq!(hub.transport().adds(), 1, "not-ready only logs");

    hub.handle_event(ready(), &mut sink);
    hub.handle_event(TransportEvent::ServiceAdded(Ok(())), &mut sink);
    hub.handle_event(TransportEvent::AdvertisingStarted(Ok(())), &mut sink);
    assert_eq!(hub.transport().adds(), 2);
    assert_eq!(hub.state(), StateId::Advertising);
}

#[test]
fn ready_while_advertising_republishes() {
    let (mut hub, mut sink) = make_hub();
    bring_up(&mut hub, &mut sink);
    hub.transport_mut().calls.clear();

    hub.handle_event(ready(), &mut sink);
    assert_eq!(
        hub.transport().calls,
        vec![
            TransportCall::StopAdvertising,
            TransportCall::AddService(ServiceDescriptor::ACTIVE_HUB),
        ]
    );
    assert_eq!(hub.state(), StateId::PoweredOnNoService);
}

// ── Custom configuration ─────────────────────────────────────

#[test]
fn configured_name_is_advertised() {
    let config = PeripheralConfig {
        local_name: "Bench Hub".into(),
        ..PeripheralConfig::default()
    };
    let mut hub = Peripheral::new(&config, MockTransport::new());
    let mut sink = RecordingSink::new();
    bring_up(&mut hub, &mut sink);

    assert!(hub.transport().calls.iter().any(|c| matches!(
        c,
        TransportCall::StartAdvertising(ad) if ad.local_name == "Bench Hub"
    )));
}
