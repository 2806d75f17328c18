//! ARPA Protocol - Session Layer
//!
//! The protocol engine proper:
//!
//! - [`Connection`]: the single bound peer pairing and its activity clock
//! - [`ArpaEngine`]: send/receive primitives, the `Syn` handshake, the
//!   bounded session receive loop, teardown, and power transitions
//! - the single-hop forwarding relay loop (`run_forwarding`)
//!
//! At most one connection exists at a time. Everything here blocks the
//! calling thread; there is no background task and no concurrent session.

mod connection;
mod engine;
mod relay;

pub use connection::Connection;
pub use engine::{ArpaEngine, CloseReason, SessionEvent};
