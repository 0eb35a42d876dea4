//! Framed JSON request/response protocol.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     RPC Stack                            │
//! │                                                          │
//! │  receive char ──▶ ┌───────┐   ┌────────┐   ┌─────────┐  │
//! │                   │ Codec │──▶│ Engine │──▶│ Catalog │  │
//! │  transmit char ◀──│(frame)│◀──│(route) │◀──│(canned) │  │
//! │                   └───────┘   └────────┘   └─────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod codec;
pub mod engine;
