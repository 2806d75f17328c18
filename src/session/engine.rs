//! The ARPA protocol engine.
//!
//! One engine instance owns the radio for the lifetime of the process and
//! drives every protocol operation through it: plain and session-bound
//! sends, the `Syn` handshake from either side, the bounded session receive
//! loop, and the sleep/wake transitions that bracket duty cycles.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::constants::{CONNECTION_TIMEOUT, WAKE_SETTLE_DELAY};
use crate::core::{LinkConfig, NodeIdentity, RadioConfig, RadioError, SessionError};
use crate::power::{FailureBackoff, PowerState};
use crate::session::Connection;
use crate::transport::{Frame, LinkTransport, MessageKind, RadioDriver};

/// Outcome of one [`ArpaEngine::wait_for_connected_message`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The bound peer sent a message; it has been acknowledged.
    Message {
        /// Kind of the received message.
        kind: MessageKind,
        /// Its payload.
        payload: Vec<u8>,
    },
    /// The session ended; connection state has been cleared.
    Closed(CloseReason),
}

/// Why an established session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The bound peer sent a `Fin`.
    PeerFin,
    /// Nothing arrived from the bound peer within the inactivity window.
    InactivityTimeout,
    /// Our acknowledgement could not be delivered; the session is
    /// considered dead.
    AckSendFailed,
}

/// The ARPA protocol engine.
///
/// Generic over the reliable datagram link and the radio driver so the
/// state machine can be exercised against in-memory doubles.
#[derive(Debug)]
pub struct ArpaEngine<L, R> {
    link: L,
    radio: R,
    identity: NodeIdentity,
    radio_config: RadioConfig,
    link_config: LinkConfig,
    connection: Option<Connection>,
    power: PowerState,
    backoff: FailureBackoff,

    // origin is the node a message was originally sent from; from is the
    // last hop it arrived by, used only for addressing replies
    last_from: u8,
    last_origin: u8,
    last_datagram: Vec<u8>,
}

impl<L: LinkTransport, R: RadioDriver> ArpaEngine<L, R> {
    /// Create an engine with the protocol's default radio and link settings.
    pub fn new(link: L, radio: R, identity: NodeIdentity) -> Self {
        Self::with_config(link, radio, identity, RadioConfig::default(), LinkConfig::default())
    }

    /// Create an engine with explicit radio and link settings.
    pub fn with_config(
        link: L,
        radio: R,
        identity: NodeIdentity,
        radio_config: RadioConfig,
        link_config: LinkConfig,
    ) -> Self {
        Self {
            link,
            radio,
            identity,
            radio_config,
            link_config,
            connection: None,
            power: PowerState::Awake,
            backoff: FailureBackoff::new(),
            last_from: 0,
            last_origin: 0,
            last_datagram: Vec::new(),
        }
    }

    /// Bring the radio up: hardware reset, module init, and the full
    /// parameter set from [`RadioConfig`] and [`LinkConfig`].
    ///
    /// Must be called before first use and is re-run on every wake.
    pub fn initialize(&mut self) -> Result<(), RadioError> {
        self.radio.reset();
        self.radio.init()?;
        self.radio.set_frequency(self.radio_config.frequency_hz)?;
        self.radio.set_spreading_factor(self.radio_config.spreading_factor);
        self.radio.set_coding_rate(self.radio_config.coding_rate);
        self.radio
            .set_tx_power(self.radio_config.tx_power_dbm, self.radio_config.pa_boost);
        self.link.configure_ack_timeout(self.link_config.ack_timeout);
        self.link.configure_retries(self.link_config.retries);
        self.power = PowerState::Awake;
        debug!(
            freq = self.radio_config.frequency_hz,
            sf = self.radio_config.spreading_factor,
            "radio initialized"
        );
        Ok(())
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Send a single frame to `to`.
    ///
    /// A base engine stamps the tracked true origin of the conversation in
    /// the origin byte so a reply can cross a forwarder back to the node
    /// that started it; every other role stamps its own id.
    pub fn send_message(
        &mut self,
        to: u8,
        kind: MessageKind,
        payload: &[u8],
    ) -> Result<(), SessionError> {
        let origin = if self.identity.is_base() {
            self.last_origin
        } else {
            self.identity.node_id()
        };
        let bytes = Frame::new(kind, origin, payload)?.encode()?;
        self.send_datagram(to, &bytes)
    }

    /// Send a frame and block for the peer's reply.
    ///
    /// Returns the reply kind (`Ack` for an accepted session message, `Nack`
    /// if the receiver is not bound to us).
    pub fn send_connected_message(
        &mut self,
        to: u8,
        kind: MessageKind,
        payload: &[u8],
    ) -> Result<MessageKind, SessionError> {
        self.send_message(to, kind, payload)?;
        match self.wait_for_message() {
            Some(reply) if reply.kind != MessageKind::Invalid => Ok(reply.kind),
            _ => Err(SessionError::Timeout),
        }
    }

    /// Transmit raw frame bytes, waking the radio first if it is asleep.
    pub fn send_datagram(&mut self, to: u8, bytes: &[u8]) -> Result<(), SessionError> {
        if self.power.is_asleep() {
            self.set_sleep_state(false)?;
        }
        match self.link.send_to(to, bytes) {
            Ok(()) => {
                self.backoff.reset();
                Ok(())
            }
            Err(err) => {
                debug!(dest = to, "datagram send failed");
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Receiving
    // =========================================================================

    /// Block until a frame arrives or the receive timeout elapses.
    ///
    /// Returns `None` on timeout or on a datagram too short to decode. A
    /// frame whose kind byte is the `Invalid` tag is still returned (with
    /// bookkeeping updated); callers treat it like no frame.
    pub fn wait_for_message(&mut self) -> Option<Frame> {
        let datagram = self.link.receive_timeout(self.link_config.recv_timeout)?;
        match Frame::decode(&datagram.bytes) {
            Ok(frame) => {
                self.last_from = datagram.from;
                self.last_origin = frame.origin;
                self.last_datagram = datagram.bytes;
                debug!(
                    from = self.last_from,
                    origin = frame.origin,
                    kind = ?frame.kind,
                    len = frame.payload.len(),
                    "frame received"
                );
                Some(frame)
            }
            Err(err) => {
                debug!(from = datagram.from, %err, "undecodable datagram dropped");
                None
            }
        }
    }

    /// Receive the next message from the bound peer.
    ///
    /// Frames from foreign origins are answered with a `Nack` and do not
    /// count as session activity. Messages from the bound peer are
    /// acknowledged before they are returned. The session ends - and the
    /// connection state is cleared - on a peer `Fin`, on an undeliverable
    /// acknowledgement, or when the inactivity window closes.
    pub fn wait_for_connected_message(&mut self) -> Result<SessionEvent, SessionError> {
        if self.connection.is_none() {
            return Err(SessionError::NotConnected);
        }

        loop {
            let Some(conn) = self.connection else {
                return Err(SessionError::NotConnected);
            };
            if conn.is_expired(CONNECTION_TIMEOUT) {
                info!(peer = conn.peer_origin, "session expired, closing");
                self.connection = None;
                return Ok(SessionEvent::Closed(CloseReason::InactivityTimeout));
            }

            let Some(frame) = self.wait_for_message() else {
                continue;
            };
            if frame.kind == MessageKind::Invalid {
                continue;
            }

            if frame.origin != conn.peer_origin {
                debug!(
                    origin = frame.origin,
                    bound = conn.peer_origin,
                    "frame from foreign origin, nacking"
                );
                // Nack goes out stamped with the foreign origin so it can be
                // routed back across a forwarder; restore the bound origin
                // afterwards for subsequent reply addressing.
                let _ = self.send_message(self.last_from, MessageKind::Nack, &[]);
                self.last_origin = conn.peer_origin;
                continue;
            }

            match frame.kind {
                MessageKind::Fin => {
                    info!(peer = conn.peer_origin, "peer closed session");
                    self.connection = None;
                    return Ok(SessionEvent::Closed(CloseReason::PeerFin));
                }
                MessageKind::Syn => {
                    // The peer likely never saw our accept reply; repeat it.
                    // Not session activity, so the clock is left alone.
                    debug!(peer = conn.peer_origin, "syn while established, repeating accept");
                    let _ = self.send_message(conn.peer_immediate, MessageKind::Syn, &[]);
                    continue;
                }
                kind => {
                    if self
                        .send_message(conn.peer_immediate, MessageKind::Ack, &[])
                        .is_err()
                    {
                        warn!(peer = conn.peer_origin, "ack undeliverable, closing session");
                        self.connection = None;
                        return Ok(SessionEvent::Closed(CloseReason::AckSendFailed));
                    }
                    if let Some(conn) = self.connection.as_mut() {
                        conn.touch();
                    }
                    return Ok(SessionEvent::Message {
                        kind,
                        payload: frame.payload,
                    });
                }
            }
        }
    }

    // =========================================================================
    // Handshake and teardown
    // =========================================================================

    /// Actively open a session: send a `Syn` to the base and block for its
    /// answer.
    ///
    /// This primitive does not record connection state; the caller sequences
    /// it with the rest of its duty cycle.
    pub fn synchronize(&mut self) -> Result<(), SessionError> {
        self.send_message(self.identity.base_id(), MessageKind::Syn, &[])?;
        match self.wait_for_message() {
            Some(reply) => match reply.kind {
                MessageKind::Syn => Ok(()),
                MessageKind::Nack => Err(SessionError::SynRejected),
                MessageKind::Invalid => Err(SessionError::Timeout),
                other => Err(SessionError::UnexpectedReply(other)),
            },
            None => Err(SessionError::Timeout),
        }
    }

    /// End the session: send a zero-payload `Fin` to the base.
    ///
    /// Local connection state is untouched; the receive loops own teardown
    /// on both sides.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.send_message(self.identity.base_id(), MessageKind::Fin, &[])
    }

    /// Passively accept a session: block until a `Syn` arrives and the
    /// accept reply goes through, then return the new peer's origin id.
    ///
    /// Any previous connection is discarded before waiting. While
    /// unconnected, `Check` probes are answered in kind and anything else
    /// draws a `Nack`. This call does not return until a session is
    /// established.
    pub fn wait_for_syn(&mut self) -> u8 {
        self.connection = None;

        loop {
            let Some(frame) = self.wait_for_message() else {
                continue;
            };
            match frame.kind {
                MessageKind::Invalid => continue,
                MessageKind::Syn => {
                    if self
                        .send_message(self.last_from, MessageKind::Syn, &[])
                        .is_ok()
                    {
                        info!(peer = frame.origin, via = self.last_from, "session established");
                        self.connection = Some(Connection::new(self.last_from, frame.origin));
                        return frame.origin;
                    }
                    debug!(peer = frame.origin, "accept reply failed, still listening");
                }
                MessageKind::Check => {
                    let _ = self.send_message(self.last_from, MessageKind::Check, &[]);
                }
                _ => {
                    debug!(from = self.last_from, kind = ?frame.kind, "not a syn, nacking");
                    let _ = self.send_message(self.last_from, MessageKind::Nack, &[]);
                }
            }
        }
    }

    // =========================================================================
    // Power and resilience
    // =========================================================================

    /// Sleep (`true`) or wake (`false`) the radio.
    ///
    /// Sleeping drops the module into its unpowered low-power mode. Waking
    /// re-runs the full initialization sequence with settle delays on both
    /// sides and takes on the order of seconds; if initialization fails the
    /// recorded power state is left unchanged and the caller should retry.
    pub fn set_sleep_state(&mut self, asleep: bool) -> Result<(), RadioError> {
        if asleep {
            self.radio.set_low_power_mode();
            self.power = PowerState::Asleep;
            debug!("radio sleeping");
        } else {
            thread::sleep(WAKE_SETTLE_DELAY);
            self.initialize()?;
            thread::sleep(WAKE_SETTLE_DELAY);
            debug!("radio awake");
        }
        Ok(())
    }

    /// Delay after a failed send, escalating per the backoff policy.
    ///
    /// Returns `false` once the failure budget is exhausted - the caller
    /// should give up on the transmission instead of delaying further.
    pub fn send_failure_delay(&mut self) -> bool {
        match self.backoff.next_delay() {
            Some(delay) => {
                warn!(delay_ms = delay.as_millis() as u64, "send failed, backing off");
                thread::sleep(delay);
                true
            }
            None => {
                warn!("send failure budget exhausted, giving up");
                false
            }
        }
    }

    /// Reset the send-failure backoff to its seed state.
    pub fn reset_send_failure_delay(&mut self) {
        self.backoff.reset();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Identity of the local node.
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Mutable identity of the local node.
    pub fn identity_mut(&mut self) -> &mut NodeIdentity {
        &mut self.identity
    }

    /// Link-layer address of the last node a frame arrived from.
    pub fn last_from_id(&self) -> u8 {
        self.last_from
    }

    /// Origin id of the bound peer, if a session is established.
    pub fn connected_origin(&self) -> Option<u8> {
        self.connection.map(|conn| conn.peer_origin)
    }

    /// Whether the radio is asleep.
    pub fn sleep_state(&self) -> bool {
        self.power.is_asleep()
    }

    /// Override the blocking-receive timeout.
    pub fn set_receive_timeout(&mut self, timeout: Duration) {
        self.link_config.recv_timeout = timeout;
    }

    /// Restore the protocol-default receive timeout.
    pub fn reset_receive_timeout(&mut self) {
        self.link_config.recv_timeout = LinkConfig::default().recv_timeout;
    }

    /// Override the link-level acknowledgement timeout.
    pub fn set_transmit_timeout(&mut self, timeout: Duration) {
        self.link_config.ack_timeout = timeout;
        self.link.configure_ack_timeout(timeout);
    }

    /// Restore the protocol-default acknowledgement timeout.
    pub fn reset_transmit_timeout(&mut self) {
        self.set_transmit_timeout(LinkConfig::default().ack_timeout);
    }

    /// Origin id of the last frame received, as tracked for reply stamping.
    pub fn last_origin_id(&self) -> u8 {
        self.last_origin
    }

    pub(crate) fn last_datagram_bytes(&self) -> &[u8] {
        &self.last_datagram
    }
}
