//! Radio and link configuration.
//!
//! Defaults mirror the deployed sensor-network settings: 915 MHz, SF12,
//! coding rate 4/8, full transmit power, three link-level retries.

use std::time::Duration;

use super::constants;

/// Physical radio parameters applied on every (re-)initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    /// Carrier frequency in Hz.
    pub frequency_hz: u32,
    /// LoRa spreading factor (6..=12).
    pub spreading_factor: u8,
    /// Coding rate denominator (5..=8, i.e. 4/5..4/8).
    pub coding_rate: u8,
    /// Transmit power in dBm.
    pub tx_power_dbm: i8,
    /// Route transmit power through the PA_BOOST pin.
    pub pa_boost: bool,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            frequency_hz: constants::RADIO_FREQUENCY_HZ,
            spreading_factor: constants::RADIO_SPREADING_FACTOR,
            coding_rate: constants::RADIO_CODING_RATE,
            tx_power_dbm: constants::RADIO_TX_POWER_DBM,
            pa_boost: false,
        }
    }
}

/// Link-layer datagram parameters applied on every (re-)initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    /// Blocking-receive timeout for protocol waits.
    pub recv_timeout: Duration,
    /// Per-datagram acknowledgement timeout.
    pub ack_timeout: Duration,
    /// Link-level retransmission attempts.
    pub retries: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            recv_timeout: constants::RECV_TIMEOUT,
            ack_timeout: constants::ACK_TIMEOUT,
            retries: constants::NUM_RETRIES,
        }
    }
}
