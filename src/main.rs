//! Active Hub simulator: host entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │   stdin JSON ──▶ SimTransport ──▶ LogEventSink            │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ──────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            Peripheral (pure logic)                 │  │
//! │  │   Lifecycle FSM · Request engine · Catalog         │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `activehub [config.json]`. Each stdin line is one JSON request;
//! it is framed, written to the receive characteristic, and every
//! notified response payload is printed to stdout.
#![deny(unused_must_use)]

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use activehub::adapters::log_sink::LogEventSink;
use activehub::adapters::sim_transport::{SimTransport, run_until_idle};
use activehub::app::service::Peripheral;
use activehub::config::PeripheralConfig;
use activehub::events::CentralId;
use activehub::fsm::StateId;
use activehub::rpc::codec::{decode_frame, encode_frame};

/// Central id used for stdin writes.
const STDIN_CENTRAL: CentralId = 1;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => PeripheralConfig::load(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => PeripheralConfig::default(),
    };
    info!("Active Hub simulator starting as {:?}", config.local_name);

    let mut sink = LogEventSink::new();
    let mut hub = Peripheral::new(&config, SimTransport::new());
    hub.transport_mut().power_on();
    run_until_idle(&mut hub, &mut sink);

    if hub.state() != StateId::Advertising {
        bail!("peripheral stuck in {:?}", hub.state());
    }
    let receive = hub.service().receive_characteristic_id;
    let transmit = hub.service().transmit_characteristic_id;
    hub.transport_mut().subscribe(STDIN_CENTRAL, transmit);
    run_until_idle(&mut hub, &mut sink);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let frame = match encode_frame(line.as_bytes()) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("skipping request: {}", e);
                continue;
            }
        };
        hub.transport_mut()
            .deliver_write(STDIN_CENTRAL, receive, frame.into_bytes());
        run_until_idle(&mut hub, &mut sink);

        for n in hub.transport_mut().take_notifications() {
            let payload = decode_frame(&n.value).context("decoding notified frame")?;
            out.write_all(payload)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
    }

    hub.stop_advertising();
    info!("stdin closed, shutting down");
    Ok(())
}
