//! Collaborator seams: the reliable datagram link and the radio driver.
//!
//! Both traits describe hardware the engine drives but does not implement.
//! The link delivers addressed datagrams with its own acknowledgement and
//! retry; the driver exposes the module configuration the engine re-runs on
//! every wake. The engine owns one instance of each for its whole lifetime.

use std::time::Duration;

use crate::core::{LinkError, RadioError};

/// A datagram received from the link layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundDatagram {
    /// Link-layer address of the node that transmitted this datagram.
    pub from: u8,
    /// Raw frame bytes, header included.
    pub bytes: Vec<u8>,
}

/// Reliable point-to-point datagram service, addressed by node id.
pub trait LinkTransport {
    /// Transmit `bytes` to `dest`, blocking until the link acknowledges or
    /// exhausts its retries.
    fn send_to(&mut self, dest: u8, bytes: &[u8]) -> Result<(), LinkError>;

    /// Block until a datagram arrives or `timeout` elapses.
    fn receive_timeout(&mut self, timeout: Duration) -> Option<InboundDatagram>;

    /// Set the link-level retransmission count.
    fn configure_retries(&mut self, count: u8);

    /// Set the link-level acknowledgement timeout.
    fn configure_ack_timeout(&mut self, timeout: Duration);
}

/// Physical radio module configuration surface.
///
/// [`reset`](RadioDriver::reset) and [`init`](RadioDriver::init) are part of
/// the seam because waking the module from its unpowered sleep requires the
/// full reset-and-reinitialize sequence, not just a mode change.
pub trait RadioDriver {
    /// Pulse the module's hardware reset line.
    fn reset(&mut self);

    /// Bring the module up after a reset.
    fn init(&mut self) -> Result<(), RadioError>;

    /// Set the carrier frequency in Hz.
    fn set_frequency(&mut self, hz: u32) -> Result<(), RadioError>;

    /// Set the LoRa spreading factor.
    fn set_spreading_factor(&mut self, sf: u8);

    /// Set the coding rate denominator (4/x).
    fn set_coding_rate(&mut self, denominator: u8);

    /// Set the transmit power, optionally through the PA_BOOST pin.
    fn set_tx_power(&mut self, dbm: i8, pa_boost: bool);

    /// Drop the module into its lowest-power mode.
    fn set_low_power_mode(&mut self);
}
