//! WebSocket transport.
//!
//! Thin wrapper around `tokio-tungstenite`. [`connect`] performs the
//! handshake and returns a queued sender plus a reader.
//!
//! Sends never block the event handlers: [`QueuedSender`] pushes onto an
//! unbounded channel that a writer task drains into the socket. Once the
//! writer task stops (socket closed or failed), every further send reports
//! [`SendError::Closed`].

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::error::SendError;

/// Concrete WebSocket stream type.
type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Outbound half of a connection as seen by the event handlers.
pub trait Outbound {
    /// Send a text payload without waiting for it to hit the wire.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Closed`] if the connection can no longer carry
    /// messages, or [`SendError::Transport`] for any other failure.
    fn send_text(&mut self, text: &str) -> Result<(), SendError>;
}

/// Sender backed by the writer task.
#[derive(Debug)]
pub(crate) struct QueuedSender {
    tx: mpsc::UnboundedSender<Message>,
}

impl Outbound for QueuedSender {
    fn send_text(&mut self, text: &str) -> Result<(), SendError> {
        self.tx
            .send(Message::text(text))
            .map_err(|_| SendError::Closed)
    }
}

/// Inbound event delivered to the client loop.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Inbound {
    /// UTF-8 text frame.
    Text(String),
    /// Binary frame (payload length only).
    Binary(usize),
    /// Close frame from the server.
    Close {
        /// WebSocket close code (1005 when the frame carried none).
        code: u16,
        /// Close reason.
        reason: String,
    },
    /// Stream ended or failed without a close frame.
    Ended,
}

/// Read half of a connection.
pub(crate) struct Reader {
    stream: SplitStream<WsStream>,
}

impl Reader {
    /// Receive the next event. Ping, pong and raw frames are skipped.
    pub(crate) async fn recv(&mut self) -> Inbound {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Inbound::Text(text.as_str().to_owned()),
                Some(Ok(Message::Binary(data))) => return Inbound::Binary(data.len()),
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|cf| (u16::from(cf.code), cf.reason.as_str().to_owned()))
                        .unwrap_or((1005, String::new()));
                    return Inbound::Close { code, reason };
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "WebSocket read error");
                    return Inbound::Ended;
                }
                None => return Inbound::Ended,
            }
        }
    }
}

/// Connect to the notification server.
///
/// Spawns the writer task on success. The task ends on its own when the
/// socket rejects a write or every sender is dropped.
pub(crate) async fn connect(endpoint: &str) -> Result<(QueuedSender, Reader), tungstenite::Error> {
    let (ws_stream, _response) = tokio_tungstenite::connect_async(endpoint).await?;
    let (sink, stream) = ws_stream.split();

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(write_loop(sink, rx));

    Ok((QueuedSender { tx }, Reader { stream }))
}

/// Drain queued messages into the socket.
async fn write_loop(
    mut sink: SplitSink<WsStream, Message>,
    mut rx: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(message) = rx.recv().await {
        if let Err(err) = sink.send(message).await {
            let err = SendError::from(err);
            if err.is_closed() {
                tracing::debug!(error = %err, "Dropped outbound message on closed connection");
            } else {
                tracing::warn!(error = %err, "Live reload send failed");
            }
            return;
        }
    }
}
