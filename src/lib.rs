//! Hive Active Hub peripheral library.
//!
//! A BLE peripheral that publishes one GATT service and answers framed
//! JSON requests written to its receive characteristic with canned
//! responses notified on its transmit characteristic. The radio is
//! reached only through [`app::ports::PeripheralTransport`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod gatt;
pub mod rpc;

pub use error::{Error, Result};
