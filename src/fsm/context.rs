//! Shared mutable context threaded through every FSM handler.
//!
//! State handlers never touch the transport. They queue
//! [`TransportRequest`]s here and record refused requests; the
//! [`Peripheral`](crate::app::service::Peripheral) drains both after each
//! event and applies them to the radio.

use heapless::Vec;
use log::warn;

use crate::app::ports::TransportError;

/// Most requests a single transition can queue (stop + add, with headroom).
pub const MAX_PENDING_REQUESTS: usize = 4;

// ---------------------------------------------------------------------------
// Transport requests (written by state handlers; consumed by Peripheral)
// ---------------------------------------------------------------------------

/// A side effect the lifecycle wants the transport to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportRequest {
    AddService,
    StartAdvertising,
    StopAdvertising,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FsmContext {
    /// Requests queued by `on_enter` / `on_exit`, in issue order.
    requests: Vec<TransportRequest, MAX_PENDING_REQUESTS>,
    /// Last transport failure the current state absorbed.
    failure: Option<(TransportRequest, TransportError)>,
}

impl FsmContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, request: TransportRequest) {
        if self.requests.push(request).is_err() {
            warn!("FSM: request queue full, dropping {:?}", request);
        }
    }

    pub fn record_failure(&mut self, request: TransportRequest, error: TransportError) {
        self.failure = Some((request, error));
    }

    /// Drain queued requests in issue order.
    pub fn take_requests(&mut self) -> Vec<TransportRequest, MAX_PENDING_REQUESTS> {
        core::mem::take(&mut self.requests)
    }

    pub fn take_failure(&mut self) -> Option<(TransportRequest, TransportError)> {
        self.failure.take()
    }

    pub fn has_pending(&self) -> bool {
        !self.requests.is_empty()
    }
}
