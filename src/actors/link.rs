//! Acknowledgment link between the coordinator and the other actors.
//!
//! The link carries line-oriented, newline-terminated text with exactly two
//! shapes: `PID:<integer>` (one-time identity announcement at startup) and
//! `ACK` (the actor finished reacting to the latest state change). A
//! malformed line or a stalled wait is a fatal protocol error; the lenient
//! warn-and-continue behavior was deliberately not kept.

use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// The acknowledgment message.
pub const ACK: &str = "ACK";

/// Fatal protocol failures on the acknowledgment link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// No message arrived within the bounded wait.
    Stalled(Duration),
    /// A message arrived that is neither `ACK` nor `PID:<n>` as expected.
    Unexpected(String),
    /// Every sender is gone; an actor died without terminating cleanly.
    Disconnected,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Stalled(wait) => {
                write!(f, "protocol stall: no acknowledgment within {wait:?}")
            }
            ProtocolError::Unexpected(line) => {
                write!(f, "unexpected message on acknowledgment link: '{line}'")
            }
            ProtocolError::Disconnected => write!(f, "acknowledgment link closed"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Writing half of the link, cloned into each announcing actor.
#[derive(Debug, Clone)]
pub struct LinkSender {
    tx: mpsc::Sender<String>,
}

impl LinkSender {
    /// Announce the actor's identity, once at startup.
    pub fn hello(&self, actor: u32) {
        self.send_line(&format!("PID:{actor}"));
    }

    /// Confirm the latest state change has been handled.
    pub fn ack(&self) {
        self.send_line(ACK);
    }

    fn send_line(&self, line: &str) {
        // a closed receiver means the coordinator is already gone; the
        // sending actor is about to observe terminate anyway
        let _ = self.tx.send(format!("{line}\n"));
    }
}

/// Reading half of the link, held by the coordinator.
#[derive(Debug)]
pub struct LinkReceiver {
    rx: mpsc::Receiver<String>,
}

impl LinkReceiver {
    fn recv_line(&self, timeout: Duration) -> Result<String, ProtocolError> {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => Ok(line.trim_end_matches('\n').to_string()),
            Err(RecvTimeoutError::Timeout) => Err(ProtocolError::Stalled(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(ProtocolError::Disconnected),
        }
    }

    /// Wait for an `ACK`. Only the first three bytes are inspected, as the
    /// original wire protocol did.
    ///
    /// # Errors
    ///
    /// [`ProtocolError`] on a stall, a non-`ACK` line, or a dead link.
    pub fn expect_ack(&self, timeout: Duration) -> Result<(), ProtocolError> {
        let line = self.recv_line(timeout)?;
        if line.as_bytes().get(..ACK.len()) == Some(ACK.as_bytes()) {
            Ok(())
        } else {
            Err(ProtocolError::Unexpected(line))
        }
    }

    /// Wait for a `PID:<n>` announcement and return the actor id.
    ///
    /// # Errors
    ///
    /// [`ProtocolError`] on a stall, a malformed line, or a dead link.
    pub fn expect_hello(&self, timeout: Duration) -> Result<u32, ProtocolError> {
        let line = self.recv_line(timeout)?;
        match line.strip_prefix("PID:").and_then(|rest| rest.parse().ok()) {
            Some(actor) => Ok(actor),
            None => Err(ProtocolError::Unexpected(line)),
        }
    }
}

/// Create a connected link pair.
#[must_use]
pub fn ack_link() -> (LinkSender, LinkReceiver) {
    let (tx, rx) = mpsc::channel();
    (LinkSender { tx }, LinkReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(200);

    #[test]
    fn test_hello_then_ack() {
        let (tx, rx) = ack_link();
        tx.hello(7);
        tx.ack();
        assert_eq!(rx.expect_hello(WAIT).unwrap(), 7);
        assert!(rx.expect_ack(WAIT).is_ok());
    }

    #[test]
    fn test_unexpected_line_is_fatal() {
        let (tx, rx) = ack_link();
        tx.hello(1);
        let err = rx.expect_ack(WAIT).unwrap_err();
        assert!(matches!(err, ProtocolError::Unexpected(line) if line == "PID:1"));
    }

    #[test]
    fn test_malformed_hello_is_fatal() {
        let (tx, rx) = ack_link();
        tx.ack();
        assert!(matches!(
            rx.expect_hello(WAIT),
            Err(ProtocolError::Unexpected(_))
        ));
    }

    #[test]
    fn test_stall_is_bounded() {
        let (_tx, rx) = ack_link();
        let err = rx.expect_ack(Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, ProtocolError::Stalled(_)));
    }

    #[test]
    fn test_disconnect_detected() {
        let (tx, rx) = ack_link();
        drop(tx);
        assert_eq!(rx.expect_ack(WAIT), Err(ProtocolError::Disconnected));
    }

    #[test]
    fn test_ack_prefix_rule() {
        // only the first three bytes matter, mirroring the original reader
        let (tx, rx) = ack_link();
        tx.send_line("ACKNOWLEDGED");
        assert!(rx.expect_ack(WAIT).is_ok());
    }
}
