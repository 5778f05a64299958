//! Wire vocabulary shared with the notification server.
//!
//! Only two literal text payloads carry meaning. Everything else the
//! server sends is observed and ignored.

/// Server → client: begin shutdown and reload.
pub const RELOAD: &str = "reload";

/// Client → server: this client is disconnecting.
pub const CLOSE: &str = "close";

/// Meaning of an inbound text payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerSignal {
    /// The server asked the client to reload.
    Reload,
    /// Any other payload. No protocol action.
    Other,
}

impl ServerSignal {
    /// Classify an inbound payload. Matching is exact and case-sensitive.
    #[must_use]
    pub fn classify(payload: &str) -> Self {
        if payload == RELOAD {
            Self::Reload
        } else {
            Self::Other
        }
    }
}
