//! Error types for the live reload client.

use std::io;

use lr_config::ConfigError;
use tokio_tungstenite::tungstenite;

/// Failure to send a message on the connection.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The connection is closing or already closed.
    #[error("connection is closed")]
    Closed,
    /// Any other transport failure.
    #[error("WebSocket send failed: {0}")]
    Transport(#[source] tungstenite::Error),
}

impl SendError {
    /// Whether this error belongs to the "already closed" class.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<tungstenite::Error> for SendError {
    fn from(err: tungstenite::Error) -> Self {
        if is_closed_error(&err) {
            Self::Closed
        } else {
            Self::Transport(err)
        }
    }
}

/// Check whether a transport error only means the channel is gone.
fn is_closed_error(err: &tungstenite::Error) -> bool {
    use tungstenite::error::ProtocolError;

    match err {
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => true,
        tungstenite::Error::Protocol(
            ProtocolError::SendAfterClosing | ProtocolError::ResetWithoutClosingHandshake,
        ) => true,
        tungstenite::Error::Io(io_err) => matches!(
            io_err.kind(),
            io::ErrorKind::BrokenPipe
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::NotConnected
        ),
        _ => false,
    }
}

/// Failure to restart the host process.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The path of the running executable could not be determined.
    #[error("Failed to locate current executable: {0}")]
    CurrentExe(#[source] io::Error),
    /// The replacement process could not be started.
    #[error("Failed to restart process: {0}")]
    Exec(#[source] io::Error),
}

/// Live reload client error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Reload(#[from] ReloadError),
}
