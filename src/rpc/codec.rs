//! Magic-prefixed, length-prefixed frame codec.
//!
//! Wire format:
//! ```text
//! ┌────────────────┬──────────────┬─────────────────────────┐
//! │ Magic (3B)     │ Length (2B)  │ JSON payload (N B)      │
//! │ AA 55 AA       │ BE u16       │ UTF-8                   │
//! └────────────────┴──────────────┴─────────────────────────┘
//! ```
//!
//! There is no checksum. Each GATT write carries exactly one frame, so
//! no streaming reassembly is needed.
//!
//! [`decode_frame`] is deliberately lenient: it only checks that a full
//! header is present and returns everything after it. Magic bytes and the
//! declared length are not checked. [`decode_frame_strict`] adds both
//! checks and is opt-in via `PeripheralConfig::strict_framing`.

use core::fmt;

/// Frame start marker.
pub const MAGIC: [u8; 3] = [0xAA, 0x55, 0xAA];

/// Magic (3) + length (2).
pub const HEADER_SIZE: usize = 5;

/// The length field is 16 bits wide.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

// ── Error type ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Payload does not fit the 16-bit length field (carries payload length).
    PayloadTooLarge(usize),
    /// Fewer than `HEADER_SIZE` bytes (carries the received length).
    FrameTooShort(usize),
    /// Strict decoding only: bad magic or length mismatch.
    FrameCorrupt(&'static str),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge(len) => {
                write!(f, "payload too large ({} > {} bytes)", len, MAX_PAYLOAD_SIZE)
            }
            Self::FrameTooShort(len) => {
                write!(f, "frame too short ({} < {} bytes)", len, HEADER_SIZE)
            }
            Self::FrameCorrupt(why) => write!(f, "frame corrupt: {}", why),
        }
    }
}

impl std::error::Error for CodecError {}

// ── Frame ────────────────────────────────────────────────────

/// An encoded frame. Owns its bytes until handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// Full wire bytes, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    /// Value of the big-endian length field.
    pub fn declared_len(&self) -> usize {
        u16::from_be_bytes([self.bytes[3], self.bytes[4]]) as usize
    }

    /// Size on the wire, header included.
    pub fn wire_len(&self) -> usize {
        self.bytes.len()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

// ── Encode / decode ──────────────────────────────────────────

/// Wrap `payload` as `[AA 55 AA][len BE u16][payload]`.
pub fn encode_frame(payload: &[u8]) -> Result<Frame, CodecError> {
    let len = u16::try_from(payload.len())
        .map_err(|_| CodecError::PayloadTooLarge(payload.len()))?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&len.to_be_bytes());
    bytes.extend_from_slice(payload);
    Ok(Frame { bytes })
}

/// Strip the 5-byte header and return the remainder unchecked.
pub fn decode_frame(raw: &[u8]) -> Result<&[u8], CodecError> {
    if raw.len() < HEADER_SIZE {
        return Err(CodecError::FrameTooShort(raw.len()));
    }
    Ok(&raw[HEADER_SIZE..])
}

/// Like [`decode_frame`], but also requires the magic prefix and a length
/// field equal to the number of bytes that follow the header.
pub fn decode_frame_strict(raw: &[u8]) -> Result<&[u8], CodecError> {
    let payload = decode_frame(raw)?;
    if raw[..3] != MAGIC {
        return Err(CodecError::FrameCorrupt("bad magic"));
    }
    let declared = u16::from_be_bytes([raw[3], raw[4]]) as usize;
    if declared != payload.len() {
        return Err(CodecError::FrameCorrupt("length mismatch"));
    }
    Ok(payload)
}

// ── Tests ────────────────────────────────────────────────────
