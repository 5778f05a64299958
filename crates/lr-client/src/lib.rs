//! Live reload client.
//!
//! Keeps a single WebSocket connection to a development notification server
//! and reloads the hosting process when told to. The whole protocol is two
//! text payloads:
//!
//! - server sends `"reload"`: the client answers `"close"`
//! - server closes the connection: the client tries to send `"close"`
//!   (best effort, usually a no-op) and then reloads
//!
//! Any other payload is logged and ignored. There is no reconnect logic:
//! a reload restarts the process, and the new process connects from scratch.
//!
//! # Quick Start
//!
//! ```ignore
//! use lr_client::{ProcessReloader, ReloadClient};
//! use lr_config::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ReloadClient::new(ClientConfig::default(), ProcessReloader);
//!     client.start().await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Notification server ──ws://localhost:8081──► Reader ──► ReloadClient loop
//!          ▲                                                     │
//!          │                                                     ▼
//!          └──── writer task ◄── QueuedSender ◄─────────── EventHandler
//!                                                                │
//!                                                                ▼
//!                                                   Reloader (process restart)
//! ```

mod client;
mod error;
mod handler;
mod protocol;
mod reloader;
mod state;
mod transport;

pub use client::{ReloadClient, SessionEnd};
pub use error::{ClientError, ReloadError, SendError};
pub use handler::EventHandler;
pub use protocol::{CLOSE, RELOAD, ServerSignal};
pub use reloader::{ProcessReloader, Reloader};
pub use state::{ConnectionEvent, ConnectionState};
pub use transport::Outbound;
