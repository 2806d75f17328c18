//! Single-hop message forwarding.
//!
//! A forwarder sits between sensors and a base that cannot hear each other
//! directly. It relays every frame it receives without interpreting it:
//! frames arriving from the base go to the node named in the frame's origin
//! byte, frames from anywhere else go to the base. The raw datagram bytes
//! are retransmitted verbatim, so origin addressing survives the hop.
//!
//! Delivery across the hop is best effort: a failed retransmission is
//! logged and dropped, not retried or reported to either endpoint.

use tracing::{debug, info};

use crate::session::ArpaEngine;
use crate::transport::{LinkTransport, MessageKind, RadioDriver};

impl<L: LinkTransport, R: RadioDriver> ArpaEngine<L, R> {
    /// Receive one frame and relay it toward the right endpoint.
    ///
    /// Returns the id the frame was retransmitted to, or `None` if nothing
    /// valid arrived within the receive timeout. No session is required or
    /// consulted.
    pub fn forward_once(&mut self) -> Option<u8> {
        let frame = self.wait_for_message()?;
        if frame.kind == MessageKind::Invalid {
            return None;
        }

        let base_id = self.identity().base_id();
        let target = if self.last_from_id() == base_id {
            // Base to node: deliver to whoever originated the conversation.
            self.last_origin_id()
        } else {
            // Node to base.
            base_id
        };

        let datagram = self.last_datagram_bytes().to_vec();
        if let Err(err) = self.send_datagram(target, &datagram) {
            debug!(dest = target, %err, "forwarded retransmission dropped");
        }
        Some(target)
    }

    /// Run the forwarding loop. Never returns.
    pub fn run_forwarding(&mut self) -> ! {
        info!(
            node = self.identity().node_id(),
            base = self.identity().base_id(),
            "entering forwarding loop"
        );
        loop {
            self.forward_once();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::core::{LinkError, NodeIdentity, NodeType, RadioError};
    use crate::session::ArpaEngine;
    use crate::transport::{InboundDatagram, LinkTransport, RadioDriver};

    type SendLog = Rc<RefCell<Vec<(u8, Vec<u8>)>>>;

    /// Link double whose outbound log stays visible after the engine takes
    /// ownership.
    #[derive(Debug, Default)]
    struct ScriptedLink {
        inbound: VecDeque<InboundDatagram>,
        sent: SendLog,
        fail_sends: bool,
    }

    impl LinkTransport for ScriptedLink {
        fn send_to(&mut self, dest: u8, bytes: &[u8]) -> Result<(), LinkError> {
            self.sent.borrow_mut().push((dest, bytes.to_vec()));
            if self.fail_sends {
                Err(LinkError::SendFailed { dest })
            } else {
                Ok(())
            }
        }

        fn receive_timeout(&mut self, _timeout: Duration) -> Option<InboundDatagram> {
            self.inbound.pop_front()
        }

        fn configure_retries(&mut self, _count: u8) {}
        fn configure_ack_timeout(&mut self, _timeout: Duration) {}
    }

    #[derive(Debug, Default)]
    struct NullRadio;

    impl RadioDriver for NullRadio {
        fn reset(&mut self) {}
        fn init(&mut self) -> Result<(), RadioError> {
            Ok(())
        }
        fn set_frequency(&mut self, _hz: u32) -> Result<(), RadioError> {
            Ok(())
        }
        fn set_spreading_factor(&mut self, _sf: u8) {}
        fn set_coding_rate(&mut self, _denominator: u8) {}
        fn set_tx_power(&mut self, _dbm: i8, _pa_boost: bool) {}
        fn set_low_power_mode(&mut self) {}
    }

    fn forwarder(
        inbound: Vec<InboundDatagram>,
        fail_sends: bool,
    ) -> (ArpaEngine<ScriptedLink, NullRadio>, SendLog) {
        let sent: SendLog = Rc::new(RefCell::new(Vec::new()));
        let link = ScriptedLink {
            inbound: inbound.into(),
            sent: Rc::clone(&sent),
            fail_sends,
        };
        let identity = NodeIdentity::with_default_base(5, NodeType::Forwarder);
        (ArpaEngine::new(link, NullRadio, identity), sent)
    }

    fn datagram(from: u8, bytes: &[u8]) -> InboundDatagram {
        InboundDatagram {
            from,
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_node_to_base_direction_verbatim() {
        let raw = [0x0A, 7, b'm', b'5'];
        let (mut engine, sent) = forwarder(vec![datagram(7, &raw)], false);

        assert_eq!(engine.forward_once(), Some(0));
        assert_eq!(*sent.borrow(), vec![(0, raw.to_vec())]);
    }

    #[test]
    fn test_base_to_node_direction_verbatim() {
        // From the base (0), origin byte names node 7: an ack crossing back.
        let raw = [0x03, 7];
        let (mut engine, sent) = forwarder(vec![datagram(0, &raw)], false);

        assert_eq!(engine.forward_once(), Some(7));
        assert_eq!(*sent.borrow(), vec![(7, raw.to_vec())]);
    }

    #[test]
    fn test_unknown_kind_still_relayed() {
        let raw = [0x7E, 9, 1, 2, 3];
        let (mut engine, sent) = forwarder(vec![datagram(9, &raw)], false);

        assert_eq!(engine.forward_once(), Some(0));
        assert_eq!(sent.borrow()[0].1, raw.to_vec());
    }

    #[test]
    fn test_failed_retransmission_dropped() {
        let raw = [0x0A, 7, b'm'];
        let (mut engine, sent) = forwarder(vec![datagram(7, &raw), datagram(0, &[0x03, 7])], true);

        // Failure is swallowed; the loop keeps going with the next frame.
        assert_eq!(engine.forward_once(), Some(0));
        assert_eq!(engine.forward_once(), Some(7));
        assert_eq!(sent.borrow().len(), 2);
    }

    #[test]
    fn test_nothing_received_nothing_forwarded() {
        let (mut engine, sent) = forwarder(Vec::new(), false);
        assert_eq!(engine.forward_once(), None);
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_invalid_tag_not_forwarded() {
        let (mut engine, sent) = forwarder(vec![datagram(7, &[0x00, 7])], false);
        assert_eq!(engine.forward_once(), None);
        assert!(sent.borrow().is_empty());
    }
}
