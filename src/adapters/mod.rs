//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter         | Implements          | Connects to              |
//! |-----------------|---------------------|--------------------------|
//! | `log_sink`      | EventSink           | `log` facade             |
//! | `sim_transport` | PeripheralTransport | In-process simulated radio |

pub mod log_sink;
pub mod sim_transport;
