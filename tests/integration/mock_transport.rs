//! Mock transport for integration tests.
//!
//! Records every transport call so tests can assert on the full request
//! history. Completions are NOT generated automatically; tests feed
//! `ServiceAdded` / `AdvertisingStarted` themselves to control ordering.

use activehub::app::events::AppEvent;
use activehub::app::ports::{EventSink, PeripheralTransport, TransportError};
use activehub::events::{CentralId, WriteRequest};
use activehub::gatt::{Advertisement, ServiceDescriptor};
use uuid::Uuid;

// ── Transport call record ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    AddService(ServiceDescriptor),
    StartAdvertising(Advertisement),
    StopAdvertising,
    UpdateValue { characteristic: Uuid, value: Vec<u8> },
    Respond { central: CentralId, characteristic: Uuid },
}

// ── MockTransport ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockTransport {
    pub calls: Vec<TransportCall>,
    /// Returned synchronously from the next `add_service`.
    pub add_service_result: Option<TransportError>,
    /// Returned synchronously from the next `start_advertising`.
    pub advertise_result: Option<TransportError>,
    /// When set, `update_value` reports a full queue.
    pub queue_full: bool,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&TransportCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn adds(&self) -> usize {
        self.count(|c| matches!(c, TransportCall::AddService(_)))
    }

    pub fn advertises(&self) -> usize {
        self.count(|c| matches!(c, TransportCall::StartAdvertising(_)))
    }

    pub fn notifications(&self) -> Vec<&[u8]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                TransportCall::UpdateValue { value, .. } => Some(value.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn responds(&self) -> usize {
        self.count(|c| matches!(c, TransportCall::Respond { .. }))
    }
}

impl PeripheralTransport for MockTransport {
    fn add_service(&mut self, service: &ServiceDescriptor) -> Result<(), TransportError> {
        self.calls.push(TransportCall::AddService(*service));
        self.add_service_result.take().map_or(Ok(()), Err)
    }

    fn start_advertising(&mut self, advertisement: &Advertisement) -> Result<(), TransportError> {
        self.calls
            .push(TransportCall::StartAdvertising(advertisement.clone()));
        self.advertise_result.take().map_or(Ok(()), Err)
    }

    fn stop_advertising(&mut self) {
        self.calls.push(TransportCall::StopAdvertising);
    }

    fn update_value(
        &mut self,
        characteristic: Uuid,
        value: &[u8],
        _centrals: Option<&[CentralId]>,
    ) -> bool {
        self.calls.push(TransportCall::UpdateValue {
            characteristic,
            value: value.to_vec(),
        });
        !self.queue_full
    }

    fn respond(&mut self, request: &WriteRequest) {
        self.calls.push(TransportCall::Respond {
            central: request.central,
            characteristic: request.characteristic,
        });
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drops(&self) -> Vec<&AppEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::RequestDropped { .. }))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
