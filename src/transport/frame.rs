//! Frame encoding and decoding.
//!
//! Every ARPA datagram is a two-byte header followed by the payload:
//!
//! ```text
//! +--------+--------+---------------------+
//! | Kind   | Origin | Payload             |
//! | 1 byte | 1 byte | 0..=249 bytes       |
//! +--------+--------+---------------------+
//! ```
//!
//! The origin byte carries the address of the node that *originated* the
//! frame, which differs from the link-layer sender when a forwarder is in
//! the path.

use crate::core::constants::{ADDR_BYTE_POS, HEADER_LEN, KIND_BYTE_POS, MAX_MSG_LEN};
use crate::core::{constants, FrameError};

/// Message kind tag carried in the first header byte.
///
/// Out-of-range wire values decode to [`MessageKind::Unknown`] so garbage
/// stays distinguishable from every live tag; re-encoding an `Unknown`
/// reproduces the original byte. [`MessageKind::Invalid`] is never placed on
/// the wire by this engine; it is the in-band marker for "no valid frame".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// No valid frame received.
    Invalid,
    /// Connection request / accept.
    Syn,
    /// Connection teardown.
    Fin,
    /// Positive acknowledgement.
    Ack,
    /// Rejection of a frame from an unbound peer.
    Nack,
    /// Heartbeat probe.
    Check,
    /// Application data.
    Data,
    /// Time synchronization payload.
    Time,
    /// Any tag value not assigned by the protocol.
    Unknown(u8),
}

impl MessageKind {
    /// Parse a message kind from its wire byte. Total: unassigned values
    /// become [`MessageKind::Unknown`].
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            constants::KIND_INVALID => Self::Invalid,
            constants::KIND_SYN => Self::Syn,
            constants::KIND_FIN => Self::Fin,
            constants::KIND_ACK => Self::Ack,
            constants::KIND_NACK => Self::Nack,
            constants::KIND_CHECK => Self::Check,
            constants::KIND_DATA => Self::Data,
            constants::KIND_TIME => Self::Time,
            other => Self::Unknown(other),
        }
    }

    /// Convert the message kind to its wire byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Invalid => constants::KIND_INVALID,
            Self::Syn => constants::KIND_SYN,
            Self::Fin => constants::KIND_FIN,
            Self::Ack => constants::KIND_ACK,
            Self::Nack => constants::KIND_NACK,
            Self::Check => constants::KIND_CHECK,
            Self::Data => constants::KIND_DATA,
            Self::Time => constants::KIND_TIME,
            Self::Unknown(byte) => byte,
        }
    }
}

/// A decoded ARPA frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message kind from the header.
    pub kind: MessageKind,
    /// Address of the originating node.
    pub origin: u8,
    /// Application payload, at most [`MAX_MSG_LEN`] bytes.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a frame, rejecting oversized payloads.
    pub fn new(kind: MessageKind, origin: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_MSG_LEN {
            return Err(FrameError::PayloadTooLarge {
                max: MAX_MSG_LEN,
                actual: payload.len(),
            });
        }
        Ok(Self {
            kind,
            origin,
            payload: payload.to_vec(),
        })
    }

    /// Serialize to wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        if self.payload.len() > MAX_MSG_LEN {
            return Err(FrameError::PayloadTooLarge {
                max: MAX_MSG_LEN,
                actual: self.payload.len(),
            });
        }
        let mut buf = Vec::with_capacity(HEADER_LEN + self.payload.len());
        buf.push(self.kind.as_byte());
        buf.push(self.origin);
        buf.extend_from_slice(&self.payload);
        Ok(buf)
    }

    /// Parse a frame from wire bytes.
    ///
    /// Fails only on datagrams too short to hold a header; the kind byte is
    /// decoded totally, so callers see unassigned tags as
    /// [`MessageKind::Unknown`] rather than an error.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_LEN {
            return Err(FrameError::TooShort {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            kind: MessageKind::from_byte(bytes[KIND_BYTE_POS]),
            origin: bytes[ADDR_BYTE_POS],
            payload: bytes[HEADER_LEN..].to_vec(),
        })
    }
}
