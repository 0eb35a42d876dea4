//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the
//! `log` facade (stderr via `env_logger` in the simulator).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::TransportRequestFailed { request, error } => {
                warn!("BLE   | {:?} failed: {}", request, error);
            }
            AppEvent::RequestDropped {
                characteristic,
                reason,
            } => {
                info!("DROP  | char={} | {}", characteristic, reason);
            }
            AppEvent::ResponseSent { len, queued } => {
                info!(
                    "TX    | {} bytes | {}",
                    len,
                    if *queued { "queued" } else { "DROPPED" }
                );
            }
            AppEvent::Subscription {
                central,
                characteristic,
                subscribed,
            } => {
                info!(
                    "SUB   | central={} char={} | {}",
                    central,
                    characteristic,
                    if *subscribed { "on" } else { "off" }
                );
            }
        }
    }
}
