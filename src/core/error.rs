//! Error types for the ARPA protocol.

use thiserror::Error;

use crate::transport::MessageKind;

/// Errors that can occur when encoding or decoding a frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Payload does not fit in a frame after the header.
    #[error("payload too large: max {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum allowed payload size.
        max: usize,
        /// Actual payload size.
        actual: usize,
    },

    /// Datagram too short to contain a header.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum expected size.
        expected: usize,
        /// Actual size received.
        actual: usize,
    },
}

/// Errors reported by the link-layer datagram service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The link exhausted its retries without an acknowledgement.
    #[error("datagram to node {dest} not acknowledged")]
    SendFailed {
        /// Destination node id.
        dest: u8,
    },
}

/// Errors reported by the radio driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RadioError {
    /// The module did not come up after a reset.
    #[error("radio initialization failed")]
    InitFailed,

    /// The requested carrier frequency was rejected by the module.
    #[error("radio rejected frequency {hz} Hz")]
    BadFrequency {
        /// Requested frequency.
        hz: u32,
    },
}

/// Errors in the session layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An operation requiring an established session found none.
    #[error("no active connection")]
    NotConnected,

    /// The peer answered a connection request with a `Nack`.
    #[error("connection request rejected by peer")]
    SynRejected,

    /// No valid reply arrived within the receive timeout.
    #[error("timed out waiting for a reply")]
    Timeout,

    /// The peer answered with a kind the state machine cannot use here.
    #[error("unexpected reply: {0:?}")]
    UnexpectedReply(MessageKind),

    /// Frame construction failed.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The underlying send was not acknowledged.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The radio could not be brought up for the operation.
    #[error(transparent)]
    Radio(#[from] RadioError),
}

/// Top-level ARPA errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArpaError {
    /// Session error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Frame error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Link error.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// Radio error.
    #[error("radio error: {0}")]
    Radio(#[from] RadioError),
}
