//! Connection lifecycle.
//!
//! `Connecting → Open → Closing → Closed`. Transitions are driven only by
//! transport events; the client never closes the WebSocket itself.

use std::fmt;

/// State of the single connection to the notification server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Transport event that may move the connection to another state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// WebSocket handshake finished.
    HandshakeCompleted,
    /// The server sent a close frame.
    CloseFrameReceived,
    /// The underlying stream ended or failed.
    TransportEnded,
}

impl ConnectionState {
    /// Apply an event and return the next state.
    ///
    /// `Closed` is terminal. Events that do not apply to the current state
    /// leave it unchanged.
    #[allow(clippy::match_same_arms)]
    #[must_use]
    pub fn transition(self, event: ConnectionEvent) -> Self {
        use ConnectionEvent::{CloseFrameReceived, HandshakeCompleted, TransportEnded};
        use ConnectionState::{Closed, Closing, Connecting, Open};

        match (self, event) {
            // Connecting + anything
            (Connecting, HandshakeCompleted) => Open,
            (Connecting, CloseFrameReceived) => Closing, // Rejected right after upgrade
            (Connecting, TransportEnded) => Closed,

            // Open + anything
            (Open, HandshakeCompleted) => Open,
            (Open, CloseFrameReceived) => Closing,
            (Open, TransportEnded) => Closed, // Dropped without close frame

            // Closing + anything
            (Closing, HandshakeCompleted) => Closing,
            (Closing, CloseFrameReceived) => Closing,
            (Closing, TransportEnded) => Closed,

            // Closed + anything
            (Closed, _) => Closed,
        }
    }

    /// Whether the connection has started or finished shutting down.
    #[must_use]
    pub fn is_closing_or_closed(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_happy_path() {
        let state = ConnectionState::Connecting
            .transition(ConnectionEvent::HandshakeCompleted)
            .transition(ConnectionEvent::CloseFrameReceived)
            .transition(ConnectionEvent::TransportEnded);
        assert_eq!(state, ConnectionState::Closed);
    }

    #[test]
    fn test_transition_all_combinations() {
        use ConnectionEvent::{CloseFrameReceived, HandshakeCompleted, TransportEnded};
        use ConnectionState::{Closed, Closing, Connecting, Open};

        // Connecting + *
        assert_eq!(Connecting.transition(HandshakeCompleted), Open);
        assert_eq!(Connecting.transition(CloseFrameReceived), Closing);
        assert_eq!(Connecting.transition(TransportEnded), Closed);

        // Open + *
        assert_eq!(Open.transition(HandshakeCompleted), Open);
        assert_eq!(Open.transition(CloseFrameReceived), Closing);
        assert_eq!(Open.transition(TransportEnded), Closed);

        // Closing + *
        assert_eq!(Closing.transition(HandshakeCompleted), Closing);
        assert_eq!(Closing.transition(CloseFrameReceived), Closing);
        assert_eq!(Closing.transition(TransportEnded), Closed);

        // Closed + *
        assert_eq!(Closed.transition(HandshakeCompleted), Closed);
        assert_eq!(Closed.transition(CloseFrameReceived), Closed);
        assert_eq!(Closed.transition(TransportEnded), Closed);
    }

    #[test]
    fn test_is_closing_or_closed() {
        assert!(!ConnectionState::Connecting.is_closing_or_closed());
        assert!(!ConnectionState::Open.is_closing_or_closed());
        assert!(ConnectionState::Closing.is_closing_or_closed());
        assert!(ConnectionState::Closed.is_closing_or_closed());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Closed.to_string(), "closed");
    }
}
