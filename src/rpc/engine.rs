//! Request dispatcher: turns one inbound write into at most one response.
//!
//! The engine owns no transport and no session state. Callers hand it
//! `(characteristic, raw_bytes)` via [`RequestEngine::handle_inbound_write`]
//! and get back a framed response for the transmit characteristic.
//!
//! Every write passes through the same pipeline; any gate that fails ends
//! the request with a logged drop and a [`AppEvent::RequestDropped`]:
//!
//! 1. **Routing**: only the receive characteristic is dispatched.
//! 2. **Framing**: strip the 5-byte header (lenient unless configured strict).
//! 3. **Parsing**: the payload must be a JSON object of string → string.
//! 4. **Typing**: `messageType` must be present and known.
//! 5. **Catalog**: the type must have a canned response.
//! 6. **Encoding**: serialise and frame the response.

use core::fmt;
use std::collections::BTreeMap;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::config::PeripheralConfig;
use crate::error::Error;
use crate::gatt::ServiceDescriptor;

use super::catalog::{self, MessageType};
use super::codec::{CodecError, Frame, decode_frame, decode_frame_strict};

/// Key carrying the request tag.
pub const MESSAGE_TYPE_KEY: &str = "messageType";

// ── Drop reasons ─────────────────────────────────────────────

/// Why an inbound write produced no response. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The write targeted some characteristic other than receive.
    WrongCharacteristic(Uuid),
    /// Fewer than five bytes arrived.
    FrameTooShort(usize),
    /// Strict framing only: bad magic or length mismatch.
    FrameCorrupt(&'static str),
    /// The payload is not a JSON object of strings.
    DecodeParseFailure(String),
    MissingMessageType,
    UnknownMessageType(String),
    /// A known type with no catalog entry (the `*_RESPONSE` tags).
    NoCatalogEntry(MessageType),
    /// The response could not be serialised or framed.
    EncodeFailure(Error),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongCharacteristic(id) => write!(f, "write to non-receive characteristic {}", id),
            Self::FrameTooShort(len) => write!(f, "frame too short ({} bytes)", len),
            Self::FrameCorrupt(why) => write!(f, "frame corrupt: {}", why),
            Self::DecodeParseFailure(msg) => write!(f, "payload parse failed: {}", msg),
            Self::MissingMessageType => write!(f, "payload has no {}", MESSAGE_TYPE_KEY),
            Self::UnknownMessageType(tag) => write!(f, "unknown message type {:?}", tag),
            Self::NoCatalogEntry(t) => write!(f, "no catalog entry for {}", t),
            Self::EncodeFailure(e) => write!(f, "response encode failed: {}", e),
        }
    }
}

impl From<CodecError> for DropReason {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::FrameTooShort(len) => Self::FrameTooShort(len),
            CodecError::FrameCorrupt(why) => Self::FrameCorrupt(why),
            other @ CodecError::PayloadTooLarge(_) => Self::EncodeFailure(other.into()),
        }
    }
}

impl DropReason {
    /// Malformed input is worth a warning; routing and catalog misses are
    /// expected traffic.
    fn is_malformed(&self) -> bool {
        !matches!(self, Self::WrongCharacteristic(_) | Self::NoCatalogEntry(_))
    }
}

// ── Engine ───────────────────────────────────────────────────

/// Stateless request dispatcher. Identical writes always yield identical
/// responses.
#[derive(Debug, Clone)]
pub struct RequestEngine {
    service: ServiceDescriptor,
    strict_framing: bool,
    pretty_json: bool,
}

impl RequestEngine {
    pub fn new(service: ServiceDescriptor) -> Self {
        Self {
            service,
            strict_framing: false,
            pretty_json: true,
        }
    }

    pub fn from_config(config: &PeripheralConfig) -> Self {
        Self {
            service: config.service,
            strict_framing: config.strict_framing,
            pretty_json: config.pretty_json,
        }
    }

    /// Dispatch one write. Returns the response frame, or `None` after
    /// logging and emitting the drop reason.
    pub fn handle_inbound_write(
        &self,
        characteristic: Uuid,
        raw: &[u8],
        sink: &mut impl EventSink,
    ) -> Option<Frame> {
        match self.process(characteristic, raw) {
            Ok(frame) => Some(frame),
            Err(reason) => {
                if reason.is_malformed() {
                    warn!("RPC: dropped write ({} bytes): {}", raw.len(), reason);
                } else {
                    debug!("RPC: dropped write: {}", reason);
                }
                sink.emit(&AppEvent::RequestDropped {
                    characteristic,
                    reason,
                });
                None
            }
        }
    }

    /// The dispatch pipeline with its failure made explicit.
    pub fn process(&self, characteristic: Uuid, raw: &[u8]) -> Result<Frame, DropReason> {
        if !self.service.is_receive(characteristic) {
            return Err(DropReason::WrongCharacteristic(characteristic));
        }

        let payload = if self.strict_framing {
            decode_frame_strict(raw)?
        } else {
            decode_frame(raw)?
        };

        let request: BTreeMap<String, String> = serde_json::from_slice(payload)
            .map_err(|e| DropReason::DecodeParseFailure(e.to_string()))?;

        let tag = request
            .get(MESSAGE_TYPE_KEY)
            .ok_or(DropReason::MissingMessageType)?;
        let message_type: MessageType = tag
            .parse()
            .map_err(|_| DropReason::UnknownMessageType(tag.clone()))?;
        info!("RPC: {}", message_type);

        let response =
            catalog::response_for(message_type).ok_or(DropReason::NoCatalogEntry(message_type))?;

        catalog::frame_response(&response, self.pretty_json).map_err(DropReason::EncodeFailure)
    }
}

// ── Tests ────────────────────────────────────────────────────
