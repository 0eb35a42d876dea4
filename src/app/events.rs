//! Outbound application events.
//!
//! [`Peripheral`](super::service::Peripheral) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Every dispatcher drop shows
//! up here as [`AppEvent::RequestDropped`], so a missing response can be
//! told apart from a crash.

use uuid::Uuid;

use crate::events::CentralId;
use crate::fsm::StateId;
use crate::fsm::context::TransportRequest;
use crate::rpc::engine::DropReason;

use super::ports::TransportError;

/// Structured events emitted by the peripheral core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The lifecycle FSM moved (or re-entered a state).
    StateChanged { from: StateId, to: StateId },

    /// The transport refused or failed a lifecycle request. The FSM stays
    /// where it is until the next readiness event.
    TransportRequestFailed {
        request: TransportRequest,
        error: TransportError,
    },

    /// An inbound write produced no response.
    RequestDropped {
        characteristic: Uuid,
        reason: DropReason,
    },

    /// A response frame was handed to the transport. `queued` is the
    /// transport's verdict; `false` means the frame was discarded.
    ResponseSent { len: usize, queued: bool },

    /// A central (un)subscribed from a characteristic.
    Subscription {
        central: CentralId,
        characteristic: Uuid,
        subscribed: bool,
    },
}
