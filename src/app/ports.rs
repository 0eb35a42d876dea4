//! Port traits: the boundary between the peripheral core and the radio.
//!
//! ```text
//!   Radio adapter ──▶ PeripheralTransport ──▶ Peripheral (core)
//! ```
//!
//! The transport is injected into [`Peripheral`](super::service::Peripheral)
//! at construction. The core never reaches for a global radio handle, so a
//! recording mock drives every lifecycle path in tests.

use core::fmt;

use uuid::Uuid;

use crate::events::{CentralId, WriteRequest};
use crate::gatt::{Advertisement, ServiceDescriptor};

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: core → radio)
// ───────────────────────────────────────────────────────────────

/// Request side of the BLE peripheral stack. Completions for
/// `add_service` and `start_advertising` arrive later as
/// [`TransportEvent`](crate::events::TransportEvent)s; an `Err` here
/// means the request was refused outright.
pub trait PeripheralTransport {
    /// Publish the service with its two characteristics
    /// (see [`ServiceDescriptor::characteristics`]).
    fn add_service(&mut self, service: &ServiceDescriptor) -> Result<(), TransportError>;

    fn start_advertising(&mut self, advertisement: &Advertisement) -> Result<(), TransportError>;

    fn stop_advertising(&mut self);

    /// Notify `value` on `characteristic`. `None` targets every subscribed
    /// central. Returns `false` when the transmit queue is full.
    fn update_value(
        &mut self,
        characteristic: Uuid,
        value: &[u8],
        centrals: Option<&[CentralId]>,
    ) -> bool;

    /// Complete an ATT write with result `Success`.
    fn respond(&mut self, request: &WriteRequest);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// A service-add or advertising-start request the transport refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The radio is not powered on.
    NotPoweredOn,
    /// Another request of the same kind is still in flight.
    Busy,
    /// Stack-specific rejection with its reason.
    Rejected(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPoweredOn => write!(f, "radio not powered on"),
            Self::Busy => write!(f, "request already in flight"),
            Self::Rejected(why) => write!(f, "rejected: {}", why),
        }
    }
}

impl std::error::Error for TransportError {}
