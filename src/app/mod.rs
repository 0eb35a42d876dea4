//! Application core: pure protocol logic, zero I/O.
//!
//! The lifecycle FSM and request engine are wired together in
//! [`service::Peripheral`]. All radio interaction happens through the
//! **port traits** in [`ports`], keeping this layer testable without a
//! real BLE stack.

pub mod events;
pub mod ports;
pub mod service;
