//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below exercises the [`Peripheral`] core against the
//! recording transport in `mock_transport`. No radio is required.
//!
//! [`Peripheral`]: activehub::app::service::Peripheral

mod dispatch_tests;
mod lifecycle_tests;
mod mock_transport;
