//! Loopback demo: a sensor node and a base station, each running a real
//! protocol engine, wired together by an in-memory link instead of radios.
//!
//! The node opens a session, pushes one reading, and closes; the base
//! accepts, acknowledges, and watches the session end.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use arpa_protocol::core::{LinkError, RadioError};
use arpa_protocol::prelude::*;
use tracing::info;

/// One end of an in-memory point-to-point link.
struct PairLink {
    local_id: u8,
    peer_tx: Sender<InboundDatagram>,
    rx: Receiver<InboundDatagram>,
}

impl PairLink {
    /// Build both ends of a link between two node ids.
    fn pair(a_id: u8, b_id: u8) -> (Self, Self) {
        let (a_tx, a_rx) = mpsc::channel();
        let (b_tx, b_rx) = mpsc::channel();
        (
            Self {
                local_id: a_id,
                peer_tx: b_tx,
                rx: a_rx,
            },
            Self {
                local_id: b_id,
                peer_tx: a_tx,
                rx: b_rx,
            },
        )
    }
}

impl LinkTransport for PairLink {
    fn send_to(&mut self, dest: u8, bytes: &[u8]) -> Result<(), LinkError> {
        self.peer_tx
            .send(InboundDatagram {
                from: self.local_id,
                bytes: bytes.to_vec(),
            })
            .map_err(|_| LinkError::SendFailed { dest })
    }

    fn receive_timeout(&mut self, timeout: Duration) -> Option<InboundDatagram> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn configure_retries(&mut self, _count: u8) {}
    fn configure_ack_timeout(&mut self, _timeout: Duration) {}
}

/// Radio driver double: every operation succeeds instantly.
struct NullRadio;

impl RadioDriver for NullRadio {
    fn reset(&mut self) {}
    fn init(&mut self) -> Result<(), RadioError> {
        Ok(())
    }
    fn set_frequency(&mut self, _hz: u32) -> Result<(), RadioError> {
        Ok(())
    }
    fn set_spreading_factor(&mut self, _sf: u8) {}
    fn set_coding_rate(&mut self, _denominator: u8) {}
    fn set_tx_power(&mut self, _dbm: i8, _pa_boost: bool) {}
    fn set_low_power_mode(&mut self) {}
}

fn main() {
    tracing_subscriber::fmt::init();

    let (node_link, base_link) = PairLink::pair(4, 0);

    let base = thread::spawn(move || {
        let identity = NodeIdentity::with_default_base(0, NodeType::Base);
        let mut engine = ArpaEngine::new(base_link, NullRadio, identity);
        engine.initialize().expect("radio init");

        let peer = engine.wait_for_syn();
        info!(peer, "base: session accepted");

        loop {
            match engine.wait_for_connected_message().expect("session active") {
                SessionEvent::Message { kind, payload } => {
                    info!(?kind, payload = %String::from_utf8_lossy(&payload), "base: received");
                }
                SessionEvent::Closed(reason) => {
                    info!(?reason, "base: session closed");
                    break;
                }
            }
        }
    });

    let identity = NodeIdentity::with_default_base(4, NodeType::Sensor);
    let mut engine = ArpaEngine::new(node_link, NullRadio, identity);
    engine.initialize().expect("radio init");

    engine.synchronize().expect("handshake");
    info!("node: session open");

    let reply = engine
        .send_connected_message(0, MessageKind::Data, b"21.5C")
        .expect("send reading");
    info!(?reply, "node: reading delivered");

    engine.close().expect("close");
    engine.set_sleep_state(true).expect("sleep");
    info!("node: done, radio sleeping");

    base.join().expect("base thread");
}
