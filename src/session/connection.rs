//! Connection state for the single active session.

use std::time::{Duration, Instant};

/// The bound peer pairing of an established session.
///
/// `peer_immediate` and `peer_origin` are equal unless the peer reached us
/// through a forwarder, in which case `peer_immediate` is the forwarder and
/// `peer_origin` the true originating node. Replies are addressed to
/// `peer_immediate`; session-identity checks compare `peer_origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Link-layer address the session's frames arrive from.
    pub peer_immediate: u8,
    /// Address of the node the session is bound to.
    pub peer_origin: u8,
    /// When the peer last counted as active.
    pub last_activity: Instant,
}

impl Connection {
    /// Bind a fresh connection with the activity clock starting now.
    pub fn new(peer_immediate: u8, peer_origin: u8) -> Self {
        Self {
            peer_immediate,
            peer_origin,
            last_activity: Instant::now(),
        }
    }

    /// Record peer activity, restarting the inactivity window.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Whether the inactivity window has closed.
    ///
    /// Saturating arithmetic keeps the comparison total: a clock anomaly
    /// reads as "not yet timed out", never a fault.
    pub fn is_expired(&self, window: Duration) -> bool {
        Instant::now().saturating_duration_since(self.last_activity) >= window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_connection_not_expired() {
        let conn = Connection::new(3, 3);
        assert!(!conn.is_expired(Duration::from_millis(30_000)));
    }

    #[test]
    fn test_expiry_and_touch() {
        let mut conn = Connection::new(2, 5);
        conn.last_activity = Instant::now() - Duration::from_secs(31);
        assert!(conn.is_expired(Duration::from_millis(30_000)));

        conn.touch();
        assert!(!conn.is_expired(Duration::from_millis(30_000)));
    }

    #[test]
    fn test_zero_window_expires_immediately() {
        let conn = Connection::new(1, 1);
        assert!(conn.is_expired(Duration::ZERO));
    }
}
