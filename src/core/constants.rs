//! Protocol constants for ARPA.
//!
//! These values are fixed by the protocol and MUST NOT be changed.

use std::time::Duration;

// =============================================================================
// ADDRESSING
// =============================================================================

/// Default node id of the base station.
pub const BASE_ID: u8 = 0;

// =============================================================================
// WIRE FORMAT
// =============================================================================

/// Offset of the message kind byte in a frame.
pub const KIND_BYTE_POS: usize = 0;

/// Offset of the origin address byte in a frame.
pub const ADDR_BYTE_POS: usize = 1;

/// Header length: kind byte plus origin address byte.
pub const HEADER_LEN: usize = 2;

/// Largest datagram the link layer will carry.
pub const MAX_FRAME_LEN: usize = 251;

/// Largest payload that fits in a frame after the header.
pub const MAX_MSG_LEN: usize = MAX_FRAME_LEN - HEADER_LEN;

// =============================================================================
// MESSAGE KIND TAGS
// =============================================================================

/// No valid frame received. Never transmitted.
pub const KIND_INVALID: u8 = 0x0;

/// Connection request / accept.
pub const KIND_SYN: u8 = 0x1;

/// Connection teardown.
pub const KIND_FIN: u8 = 0x2;

/// Positive acknowledgement of a session message.
pub const KIND_ACK: u8 = 0x3;

/// Rejection: sender is not the bound peer.
pub const KIND_NACK: u8 = 0x4;

/// Heartbeat probe, answered in kind outside a session.
pub const KIND_CHECK: u8 = 0x5;

/// Application data.
pub const KIND_DATA: u8 = 0xA;

/// Time synchronization payload.
pub const KIND_TIME: u8 = 0xB;

// =============================================================================
// TIMING
// =============================================================================

/// Default blocking-receive timeout.
pub const RECV_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Default link-level acknowledgement timeout.
pub const ACK_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Link-level retransmission attempts per datagram.
pub const NUM_RETRIES: u8 = 3;

/// Close an established session after this long without peer activity.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Settle time around a radio wake before it will accept commands.
pub const WAKE_SETTLE_DELAY: Duration = Duration::from_millis(50);

// =============================================================================
// SEND-FAILURE BACKOFF
// =============================================================================

/// First backoff delay after a failed send.
pub const FAIL_DELAY_SEED_MS: u32 = 15_000;

/// Upper bound on the backoff delay.
pub const FAIL_DELAY_CAP_MS: u32 = 30_000;

/// Width of the random jitter window below the current delay.
pub const FAIL_DELAY_JITTER_MS: u32 = 5_000;

/// Consecutive failed sends tolerated before the policy reports give-up.
pub const FAIL_DELAYS_MAX: u8 = 3;

// =============================================================================
// RADIO DEFAULTS
// =============================================================================

/// Default carrier frequency (US 915 MHz ISM band).
pub const RADIO_FREQUENCY_HZ: u32 = 915_000_000;

/// Default LoRa spreading factor.
pub const RADIO_SPREADING_FACTOR: u8 = 12;

/// Default coding rate denominator (4/8).
pub const RADIO_CODING_RATE: u8 = 8;

/// Default transmit power in dBm.
pub const RADIO_TX_POWER_DBM: i8 = 23;
