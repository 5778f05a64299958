//! Event handlers for the two server-driven signals.
//!
//! Handlers are synchronous and never wait on the network. The client loop
//! calls them one at a time, in the order the transport produced events.

use crate::error::{ReloadError, SendError};
use crate::protocol::{CLOSE, ServerSignal};
use crate::reloader::Reloader;
use crate::transport::Outbound;

/// Reacts to inbound messages and to the connection closing.
#[derive(Debug)]
pub struct EventHandler<R> {
    reloader: R,
    /// Whether the server has sent `"reload"` on this connection.
    reload_requested: bool,
}

impl<R: Reloader> EventHandler<R> {
    /// Create a handler that reloads through `reloader`.
    pub fn new(reloader: R) -> Self {
        Self {
            reloader,
            reload_requested: false,
        }
    }

    /// Handle an inbound text message.
    ///
    /// `"reload"` is answered with `"close"`; any other payload is only
    /// logged. Never triggers a reload by itself. A failed acknowledgment is
    /// logged and leaves the connection to the close handler.
    pub fn on_message<O: Outbound>(&mut self, conn: &mut O, payload: &str) {
        tracing::debug!(payload, "Received message");

        if ServerSignal::classify(payload) == ServerSignal::Other {
            return;
        }

        tracing::info!("Reload requested by server");
        self.reload_requested = true;
        if let Err(err) = send_best_effort(conn, CLOSE) {
            tracing::warn!(error = %err, "Failed to acknowledge reload");
        }
    }

    /// Handle the connection closing, for whatever reason.
    ///
    /// Attempts one `"close"` send that may not fail this handler, then
    /// reloads unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError`] if the reload could not be started.
    pub fn on_close<O: Outbound>(&mut self, conn: &mut O) -> Result<(), ReloadError> {
        if let Err(err) = send_best_effort(conn, CLOSE) {
            tracing::warn!(error = %err, "Failed to acknowledge close");
        }

        tracing::info!(
            reload_requested = self.reload_requested,
            "Connection closed, reloading"
        );
        self.reloader.reload()
    }

    /// Whether the server has asked for a reload on this connection.
    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    /// Consume the handler, returning its reloader.
    #[cfg(test)]
    pub(crate) fn into_reloader(self) -> R {
        self.reloader
    }
}

/// Send, treating an already closed connection as success.
fn send_best_effort<O: Outbound>(conn: &mut O, text: &str) -> Result<(), SendError> {
    match conn.send_text(text) {
        Err(SendError::Closed) => {
            tracing::debug!(text, "Connection already closed, send skipped");
            Ok(())
        }
        result => result,
    }
}
