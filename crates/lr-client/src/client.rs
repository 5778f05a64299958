//! The live reload client loop.

use lr_config::ClientConfig;

use crate::error::ClientError;
use crate::handler::EventHandler;
use crate::reloader::Reloader;
use crate::state::{ConnectionEvent, ConnectionState};
use crate::transport::{self, Inbound};

/// How a client session ended, when the reloader returned at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The connection was never established. Nothing was retried.
    NotConnected,
    /// The connection closed and the reload was triggered.
    Reloaded,
}

/// Keeps one connection to the notification server and reloads on request.
#[derive(Debug)]
pub struct ReloadClient<R> {
    config: ClientConfig,
    handler: EventHandler<R>,
}

impl<R: Reloader> ReloadClient<R> {
    /// Create a client for `config` that reloads through `reloader`.
    pub fn new(config: ClientConfig, reloader: R) -> Self {
        Self {
            config,
            handler: EventHandler::new(reloader),
        }
    }

    /// Connect and deliver events until the connection closes.
    ///
    /// A failed connection attempt is logged and reported as
    /// [`SessionEnd::NotConnected`]. Otherwise the close handler runs exactly
    /// once and triggers the reload; with [`ProcessReloader`] this call
    /// never returns.
    ///
    /// [`ProcessReloader`]: crate::ProcessReloader
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the reload could not be
    /// started.
    pub async fn start(self) -> Result<SessionEnd, ClientError> {
        let Self {
            config,
            mut handler,
        } = self;
        let endpoint = config.endpoint()?;

        let mut state = ConnectionState::Connecting;
        tracing::debug!(endpoint = %endpoint, %state, "Connecting to notification server");

        let (mut sender, mut reader) = match transport::connect(&endpoint).await {
            Ok(halves) => halves,
            Err(err) => {
                tracing::warn!(endpoint = %endpoint, error = %err, "Live reload connection failed");
                return Ok(SessionEnd::NotConnected);
            }
        };

        state = state.transition(ConnectionEvent::HandshakeCompleted);
        tracing::info!(endpoint = %endpoint, %state, "Connected to notification server");

        // Keep reading after a close frame so tungstenite flushes its close
        // reply; the close event fires once the transport has ended.
        loop {
            match reader.recv().await {
                Inbound::Text(payload) if !state.is_closing_or_closed() => {
                    handler.on_message(&mut sender, &payload);
                }
                Inbound::Binary(len) if !state.is_closing_or_closed() => {
                    tracing::debug!(len, "Received binary message");
                }
                Inbound::Text(_) | Inbound::Binary(_) => {
                    tracing::debug!(%state, "Ignoring message received while closing");
                }
                Inbound::Close { code, reason } => {
                    state = state.transition(ConnectionEvent::CloseFrameReceived);
                    tracing::debug!(code, reason = %reason, %state, "Received close frame");
                }
                Inbound::Ended => {
                    state = state.transition(ConnectionEvent::TransportEnded);
                    tracing::debug!(%state, "Connection ended");
                    break;
                }
            }
        }

        debug_assert_eq!(state, ConnectionState::Closed);
        handler.on_close(&mut sender)?;

        Ok(SessionEnd::Reloaded)
    }
}
