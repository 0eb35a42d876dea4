//! Peripheral service: the hexagonal core.
//!
//! [`Peripheral`] owns the lifecycle FSM, the request engine and the
//! injected transport. Transport events go in through
//! [`Peripheral::handle_event`]; everything that happens as a result comes
//! out as transport calls and [`AppEvent`]s.
//!
//! ```text
//!  TransportEvent ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                     │        Peripheral        │
//!   Transport port ◀──│  Lifecycle FSM · Engine  │
//!                     └──────────────────────────┘
//! ```
//!
//! Writes are dispatched whatever the lifecycle state; the FSM only
//! governs publication and advertising.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::config::PeripheralConfig;
use crate::events::{TransportEvent, WriteRequest};
use crate::fsm::context::{FsmContext, TransportRequest};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, LifecycleEvent, StateId};
use crate::gatt::{Advertisement, ServiceDescriptor};
use crate::rpc::engine::RequestEngine;

use super::events::AppEvent;
use super::ports::{EventSink, PeripheralTransport};

// ───────────────────────────────────────────────────────────────
// Peripheral
// ───────────────────────────────────────────────────────────────

pub struct Peripheral<T: PeripheralTransport> {
    fsm: Fsm,
    ctx: FsmContext,
    engine: RequestEngine,
    transport: T,
    service: ServiceDescriptor,
    advertisement: Advertisement,
}

impl<T: PeripheralTransport> Peripheral<T> {
    /// Build the core around `transport`. The FSM starts in `Unknown` and
    /// issues nothing until the first readiness event.
    pub fn new(config: &PeripheralConfig, transport: T) -> Self {
        let mut ctx = FsmContext::new();
        let mut fsm = Fsm::new(build_state_table(), StateId::Unknown);
        fsm.start(&mut ctx);

        Self {
            fsm,
            ctx,
            engine: RequestEngine::from_config(config),
            transport,
            service: config.service,
            advertisement: Advertisement {
                service_uuid: config.service.service_id,
                local_name: config.local_name.clone(),
            },
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn service(&self) -> &ServiceDescriptor {
        &self.service
    }

    pub fn advertisement(&self) -> &Advertisement {
        &self.advertisement
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ── Event handling ────────────────────────────────────────

    /// Process one transport event to completion.
    pub fn handle_event(&mut self, event: TransportEvent, sink: &mut impl EventSink) {
        match event {
            TransportEvent::ReadinessChanged(state) => {
                info!("BLE: radio state {:?}", state);
                self.drive(LifecycleEvent::Readiness(state), sink);
            }
            TransportEvent::ServiceAdded(result) => {
                self.drive(LifecycleEvent::ServiceAdded(result), sink);
            }
            TransportEvent::AdvertisingStarted(result) => {
                self.drive(LifecycleEvent::AdvertisingStarted(result), sink);
            }
            TransportEvent::WriteRequests(requests) => self.handle_writes(&requests, sink),
            TransportEvent::Subscribed {
                central,
                characteristic,
            } => {
                info!("BLE: central {} subscribed to {}", central, characteristic);
                sink.emit(&AppEvent::Subscription {
                    central,
                    characteristic,
                    subscribed: true,
                });
            }
            TransportEvent::Unsubscribed {
                central,
                characteristic,
            } => {
                info!("BLE: central {} unsubscribed from {}", central, characteristic);
                sink.emit(&AppEvent::Subscription {
                    central,
                    characteristic,
                    subscribed: false,
                });
            }
            TransportEvent::ReadRequest {
                central,
                characteristic,
            } => {
                debug!("BLE: read request from {} on {}", central, characteristic);
            }
            // No retry queue: a frame refused earlier stays dropped.
            TransportEvent::ReadyToUpdateSubscribers => {
                debug!("BLE: transmit queue ready");
            }
        }
    }

    /// Stop advertising without touching the lifecycle state. The FSM
    /// still reports `Advertising` afterwards and only realigns with the
    /// radio on the next readiness event.
    pub fn stop_advertising(&mut self) {
        info!("BLE: stop advertising");
        self.transport.stop_advertising();
    }

    // ── Internal ──────────────────────────────────────────────

    /// Feed a lifecycle event through the FSM and apply what it queued.
    /// Requests the transport refuses synchronously are fed back as
    /// failed completions, so the FSM sees one uniform failure path.
    fn drive(&mut self, first: LifecycleEvent, sink: &mut impl EventSink) {
        let mut pending = VecDeque::from([first]);

        while let Some(event) = pending.pop_front() {
            let from = self.fsm.current_state();
            if let Some(to) = self.fsm.handle(&event, &mut self.ctx) {
                sink.emit(&AppEvent::StateChanged { from, to });
            }

            if let Some((request, error)) = self.ctx.take_failure() {
                sink.emit(&AppEvent::TransportRequestFailed { request, error });
            }

            for request in self.ctx.take_requests() {
                if let Err(error) = self.issue(request) {
                    warn!("BLE: {:?} refused: {}", request, error);
                    if let Some(failed) = LifecycleEvent::failed(request, error) {
                        pending.push_back(failed);
                    }
                }
            }
        }
    }

    fn issue(&mut self, request: TransportRequest) -> Result<(), super::ports::TransportError> {
        match request {
            TransportRequest::AddService => self.transport.add_service(&self.service),
            TransportRequest::StartAdvertising => {
                self.transport.start_advertising(&self.advertisement)
            }
            TransportRequest::StopAdvertising => {
                self.transport.stop_advertising();
                Ok(())
            }
        }
    }

    /// Dispatch a batch in arrival order. Every write is acknowledged,
    /// whether or not it produced a response.
    fn handle_writes(&mut self, requests: &[WriteRequest], sink: &mut impl EventSink) {
        for request in requests {
            if let Some(frame) =
                self.engine
                    .handle_inbound_write(request.characteristic, &request.value, sink)
            {
                let queued = self.transport.update_value(
                    self.service.transmit_characteristic_id,
                    frame.as_bytes(),
                    None,
                );
                if !queued {
                    warn!(
                        "BLE: transmit queue full, dropped {} byte response",
                        frame.wire_len()
                    );
                }
                sink.emit(&AppEvent::ResponseSent {
                    len: frame.wire_len(),
                    queued,
                });
            }
            self.transport.respond(request);
        }
    }
}
