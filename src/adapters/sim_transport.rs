//! In-process radio for host runs.
//!
//! Implements [`PeripheralTransport`] without any hardware. Requests
//! complete immediately: each accepted `add_service` / `start_advertising`
//! queues its confirmation as a [`TransportEvent`], which the caller feeds
//! back with [`run_until_idle`]. Notifications are recorded instead of sent.

use std::collections::VecDeque;

use log::{debug, info};
use uuid::Uuid;

use crate::app::ports::{EventSink, PeripheralTransport, TransportError};
use crate::app::service::Peripheral;
use crate::events::{CentralId, RadioState, TransportEvent, WriteRequest};
use crate::gatt::{Advertisement, ServiceDescriptor};

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub characteristic: Uuid,
    pub value: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct SimTransport {
    radio: Option<RadioState>,
    events: VecDeque<TransportEvent>,
    service: Option<ServiceDescriptor>,
    advertising: Option<Advertisement>,
    notifications: Vec<Notification>,
    acknowledged: usize,
}

impl SimTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a powered-on radio.
    pub fn power_on(&mut self) {
        self.set_radio(RadioState::PoweredOn);
    }

    /// Report a radio state change. Anything but `PoweredOn` drops the
    /// published service and advertising.
    pub fn set_radio(&mut self, state: RadioState) {
        if !state.is_ready() {
            self.service = None;
            self.advertising = None;
        }
        self.radio = Some(state);
        self.events.push_back(TransportEvent::ReadinessChanged(state));
    }

    /// Queue a single write from `central`.
    pub fn deliver_write(&mut self, central: CentralId, characteristic: Uuid, value: Vec<u8>) {
        self.events
            .push_back(TransportEvent::WriteRequests(vec![WriteRequest {
                central,
                characteristic,
                value,
            }]));
    }

    pub fn subscribe(&mut self, central: CentralId, characteristic: Uuid) {
        self.events.push_back(TransportEvent::Subscribed {
            central,
            characteristic,
        });
    }

    pub fn poll_event(&mut self) -> Option<TransportEvent> {
        self.events.pop_front()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.notifications)
    }

    pub fn is_advertising(&self) -> bool {
        self.advertising.is_some()
    }

    pub fn published_service(&self) -> Option<&ServiceDescriptor> {
        self.service.as_ref()
    }

    pub fn acknowledged(&self) -> usize {
        self.acknowledged
    }

    fn powered(&self) -> bool {
        self.radio.is_some_and(RadioState::is_ready)
    }
}

impl PeripheralTransport for SimTransport {
    fn add_service(&mut self, service: &ServiceDescriptor) -> Result<(), TransportError> {
        if !self.powered() {
            return Err(TransportError::NotPoweredOn);
        }
        for c in service.characteristics() {
            debug!("SIM: characteristic {} props=0x{:02x}", c.uuid, c.properties);
        }
        self.service = Some(*service);
        self.events.push_back(TransportEvent::ServiceAdded(Ok(())));
        Ok(())
    }

    fn start_advertising(&mut self, advertisement: &Advertisement) -> Result<(), TransportError> {
        if !self.powered() {
            return Err(TransportError::NotPoweredOn);
        }
        if self.service.is_none() {
            return Err(TransportError::Rejected("no service published".into()));
        }
        info!(
            "SIM: advertising {:?} ({})",
            advertisement.local_name, advertisement.service_uuid
        );
        self.advertising = Some(advertisement.clone());
        self.events
            .push_back(TransportEvent::AdvertisingStarted(Ok(())));
        Ok(())
    }

    fn stop_advertising(&mut self) {
        self.advertising = None;
    }

    fn update_value(
        &mut self,
        characteristic: Uuid,
        value: &[u8],
        _centrals: Option<&[CentralId]>,
    ) -> bool {
        let registered = self
            .service
            .is_some_and(|s| s.transmit_characteristic_id == characteristic);
        if registered {
            self.notifications.push(Notification {
                characteristic,
                value: value.to_vec(),
            });
        }
        registered
    }

    fn respond(&mut self, _request: &WriteRequest) {
        self.acknowledged += 1;
    }
}

/// Feed queued transport events into `peripheral` until none remain.
/// Returns how many were processed.
pub fn run_until_idle(
    peripheral: &mut Peripheral<SimTransport>,
    sink: &mut impl EventSink,
) -> usize {
    let mut n = 0;
    while let Some(event) = peripheral.transport_mut().poll_event() {
        peripheral.handle_event(event, sink);
        n += 1;
    }
    n
}
