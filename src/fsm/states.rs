//! Concrete state handler functions and table builder.
//!
//! ```text
//!  UNKNOWN ──[ready]──▶ NO_SERVICE ──[added]──▶ SERVICE_ADDED ──[started]──▶ ADVERTISING
//!     │                  ▲   (add)                 (advertise)                  │
//!  [not ready]           │                                                      │
//!     ▼                  │                                                      │
//!  POWERED_OFF ─[ready]──┘◀──────────────[ready: reset, stop + re-add]───────────┘
//!
//!  Any powered-on state ──[ready]──▶ NO_SERVICE (re-entry)
//!  Any powered-on state ──[not ready]──▶ (logged, no change)
//!  Failed add / advertise ──▶ (logged, recorded, no change, no retry)
//! ```

use super::context::{FsmContext, TransportRequest};
use super::{LifecycleEvent, StateDescriptor, StateId};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::Unknown,
            name: "Unknown",
            on_enter: None,
            on_exit: None,
            on_event: unknown_event,
        },
        StateDescriptor {
            id: StateId::PoweredOff,
            name: "PoweredOff",
            on_enter: Some(powered_off_enter),
            on_exit: None,
            on_event: powered_off_event,
        },
        StateDescriptor {
            id: StateId::PoweredOnNoService,
            name: "PoweredOn-NoService",
            on_enter: Some(no_service_enter),
            on_exit: None,
            on_event: no_service_event,
        },
        StateDescriptor {
            id: StateId::PoweredOnServiceAdded,
            name: "PoweredOn-ServiceAdded",
            on_enter: Some(service_added_enter),
            on_exit: None,
            on_event: service_added_event,
        },
        StateDescriptor {
            id: StateId::Advertising,
            name: "Advertising",
            on_enter: Some(advertising_enter),
            on_exit: Some(advertising_exit),
            on_event: advertising_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared handling
// ═══════════════════════════════════════════════════════════════════════════

/// Readiness while already powered on. A ready report means the transport
/// came back from a reset, so the service is published again.
fn powered_on_readiness(event: &LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Readiness(r) if r.is_ready() => Some(StateId::PoweredOnNoService),
        LifecycleEvent::Readiness(r) => {
            warn!("BLE: radio reports {:?}; no teardown modelled, keeping state", r);
            None
        }
        _ => None,
    }
}

/// Completion outside its awaiting state. Failures are still recorded so
/// they reach the event sink.
fn ignore(ctx: &mut FsmContext, state: &str, event: &LifecycleEvent) -> Option<StateId> {
    warn!("BLE: {} ignoring unexpected {:?}", state, event);
    match event {
        LifecycleEvent::ServiceAdded(Err(e)) => {
            ctx.record_failure(TransportRequest::AddService, e.clone());
        }
        LifecycleEvent::AdvertisingStarted(Err(e)) => {
            ctx.record_failure(TransportRequest::StartAdvertising, e.clone());
        }
        _ => {}
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  UNKNOWN: waiting for the first readiness report
// ═══════════════════════════════════════════════════════════════════════════

fn unknown_event(ctx: &mut FsmContext, event: &LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Readiness(r) if r.is_ready() => Some(StateId::PoweredOnNoService),
        LifecycleEvent::Readiness(_) => Some(StateId::PoweredOff),
        other => ignore(ctx, "Unknown", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  POWERED_OFF: radio unusable; nothing to do until it is ready
// ═══════════════════════════════════════════════════════════════════════════

fn powered_off_enter(_ctx: &mut FsmContext) {
    info!("BLE: radio not available, waiting");
}

fn powered_off_event(ctx: &mut FsmContext, event: &LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Readiness(r) if r.is_ready() => Some(StateId::PoweredOnNoService),
        LifecycleEvent::Readiness(r) => {
            info!("BLE: radio still {:?}", r);
            None
        }
        other => ignore(ctx, "PoweredOff", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  NO_SERVICE: add requested, awaiting confirmation
// ═══════════════════════════════════════════════════════════════════════════

fn no_service_enter(ctx: &mut FsmContext) {
    info!("BLE: powered on, adding service");
    ctx.request(TransportRequest::AddService);
}

fn no_service_event(ctx: &mut FsmContext, event: &LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::ServiceAdded(Ok(())) => Some(StateId::PoweredOnServiceAdded),
        LifecycleEvent::ServiceAdded(Err(e)) => {
            warn!("BLE: add service failed: {}", e);
            ctx.record_failure(TransportRequest::AddService, e.clone());
            None
        }
        LifecycleEvent::Readiness(_) => powered_on_readiness(event),
        other => ignore(ctx, "PoweredOn-NoService", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SERVICE_ADDED: advertising requested, awaiting confirmation
// ═══════════════════════════════════════════════════════════════════════════

fn service_added_enter(ctx: &mut FsmContext) {
    info!("BLE: service added, starting advertising");
    ctx.request(TransportRequest::StartAdvertising);
}

fn service_added_event(ctx: &mut FsmContext, event: &LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::AdvertisingStarted(Ok(())) => Some(StateId::Advertising),
        LifecycleEvent::AdvertisingStarted(Err(e)) => {
            warn!("BLE: start advertising failed: {}", e);
            ctx.record_failure(TransportRequest::StartAdvertising, e.clone());
            None
        }
        LifecycleEvent::Readiness(_) => powered_on_readiness(event),
        other => ignore(ctx, "PoweredOn-ServiceAdded", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ADVERTISING: steady state
// ═══════════════════════════════════════════════════════════════════════════

fn advertising_enter(_ctx: &mut FsmContext) {
    info!("BLE: advertising");
}

fn advertising_exit(ctx: &mut FsmContext) {
    ctx.request(TransportRequest::StopAdvertising);
}

fn advertising_event(ctx: &mut FsmContext, event: &LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Readiness(_) => powered_on_readiness(event),
        other => ignore(ctx, "Advertising", other),
    }
}
