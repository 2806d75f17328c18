//! # ARPA Protocol
//!
//! ARPA is a connection-oriented session protocol for battery-powered sensor
//! networks on a lossy, half-duplex LoRa link. A sensor node opens a session
//! with a base station - optionally through one forwarding hop - exchanges a
//! bounded run of messages, and closes, so both radios can go back to sleep.
//! It provides:
//!
//! - **Framing**: a two-byte header (message kind + origin address) over the
//!   link layer's reliable datagram service
//! - **Sessions**: at most one active connection, established by a `Syn`
//!   handshake and bounded by a 30 second inactivity window
//! - **Forwarding**: a single intermediate node relaying frames between a
//!   sensor and the base while preserving the true origin address
//! - **Resilience**: exponential, jittered send-failure backoff and
//!   sleep/wake power transitions that re-initialize the radio
//!
//! ## Modules
//!
//! - [`core`]: constants, error types, configuration, and node identity
//! - [`transport`]: frame codec and the link/radio collaborator traits
//! - [`session`]: the protocol engine, connection state, and the relay loop
//! - [`power`]: power state and the send-failure backoff policy
//!
//! ## Example Usage
//!
//! ```no_run
//! use arpa_protocol::prelude::*;
//! # fn radio_link() -> impl LinkTransport { struct L; impl LinkTransport for L {
//! #   fn send_to(&mut self, _: u8, _: &[u8]) -> Result<(), arpa_protocol::core::LinkError> { Ok(()) }
//! #   fn receive_timeout(&mut self, _: std::time::Duration) -> Option<InboundDatagram> { None }
//! #   fn configure_retries(&mut self, _: u8) {}
//! #   fn configure_ack_timeout(&mut self, _: std::time::Duration) {} } L }
//! # fn radio_driver() -> impl RadioDriver { struct R; impl RadioDriver for R {
//! #   fn reset(&mut self) {}
//! #   fn init(&mut self) -> Result<(), arpa_protocol::core::RadioError> { Ok(()) }
//! #   fn set_frequency(&mut self, _: u32) -> Result<(), arpa_protocol::core::RadioError> { Ok(()) }
//! #   fn set_spreading_factor(&mut self, _: u8) {}
//! #   fn set_coding_rate(&mut self, _: u8) {}
//! #   fn set_tx_power(&mut self, _: i8, _: bool) {}
//! #   fn set_low_power_mode(&mut self) {} } R }
//! # fn main() -> Result<(), arpa_protocol::ArpaError> {
//! let identity = NodeIdentity::new(7, 0, NodeType::Sensor);
//! let mut engine = ArpaEngine::new(radio_link(), radio_driver(), identity);
//! engine.initialize()?;
//!
//! // Open a session with the base, push one reading, close.
//! engine.synchronize()?;
//! let reply = engine.send_connected_message(0, MessageKind::Data, b"21.5C")?;
//! assert_eq!(reply, MessageKind::Ack);
//! engine.close()?;
//! engine.set_sleep_state(true)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod power;
pub mod session;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        ArpaError, LinkConfig, NodeIdentity, NodeType, RadioConfig, SessionError,
    };
    pub use crate::power::{FailureBackoff, PowerState};
    pub use crate::session::{ArpaEngine, CloseReason, Connection, SessionEvent};
    pub use crate::transport::{
        Frame, InboundDatagram, LinkTransport, MessageKind, RadioDriver,
    };
}

// Re-export commonly used items at crate root
pub use crate::core::{ArpaError, NodeIdentity, NodeType, SessionError};
pub use crate::session::{ArpaEngine, SessionEvent};
pub use crate::transport::{Frame, LinkTransport, MessageKind, RadioDriver};
