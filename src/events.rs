//! Inbound transport event stream.
//!
//! Events are produced by the radio stack (or [`SimTransport`] on a
//! host) and consumed one at a time by
//! [`Peripheral::handle_event`](crate::app::service::Peripheral::handle_event).
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Radio stack  │────▶│ TransportEvent│────▶│  Peripheral  │
//! │ (callbacks)  │     │   (serial)   │     │  FSM · RPC   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Delivery is serial. A batch of writes arrives as one
//! [`TransportEvent::WriteRequests`] and is processed in order.
//!
//! [`SimTransport`]: crate::adapters::sim_transport::SimTransport

use uuid::Uuid;

use crate::app::ports::TransportError;

/// Radio power/authorisation state as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioState {
    Unknown,
    Resetting,
    Unsupported,
    Unauthorized,
    PoweredOff,
    PoweredOn,
}

impl RadioState {
    /// Only `PoweredOn` allows services to be published.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::PoweredOn)
    }
}

/// Opaque handle for a connected central, assigned by the transport.
pub type CentralId = u32;

/// One ATT write as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub central: CentralId,
    pub characteristic: Uuid,
    pub value: Vec<u8>,
}

/// Everything the transport can tell the peripheral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    ReadinessChanged(RadioState),
    /// Outcome of an earlier `add_service` request.
    ServiceAdded(Result<(), TransportError>),
    /// Outcome of an earlier `start_advertising` request.
    AdvertisingStarted(Result<(), TransportError>),
    Subscribed {
        central: CentralId,
        characteristic: Uuid,
    },
    Unsubscribed {
        central: CentralId,
        characteristic: Uuid,
    },
    /// Ordered batch; each write yields at most one response.
    WriteRequests(Vec<WriteRequest>),
    ReadRequest {
        central: CentralId,
        characteristic: Uuid,
    },
    /// The transmit queue has room again after a failed `update_value`.
    ReadyToUpdateSubscribers,
}
