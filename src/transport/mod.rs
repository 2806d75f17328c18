//! ARPA Protocol - Transport Layer
//!
//! This module implements the wire format and the seams to the hardware:
//!
//! - **Frame codec**: [`Frame`] and [`MessageKind`] with the two-byte
//!   kind/origin header
//! - **Link seam**: [`LinkTransport`], the reliable addressed-datagram
//!   service (link-level acknowledgement and retry live below this trait)
//! - **Radio seam**: [`RadioDriver`], the physical module configuration
//!   surface used on initialization and power transitions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           Session Layer                 │
//! ├─────────────────────────────────────────┤
//! │         Transport Layer                 │  ← This module
//! │     frames, link + radio seams          │
//! ├─────────────────────────────────────────┤
//! │   Reliable datagram radio (external)    │
//! └─────────────────────────────────────────┘
//! ```

mod frame;
mod link;

pub use frame::{Frame, MessageKind};
pub use link::{InboundDatagram, LinkTransport, RadioDriver};
