#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Resilient stream client
//!
//! A thin wrapper over a byte-stream connection that keeps working when the
//! network does not. Callers read delimiter-terminated records and write
//! payloads; when the connection breaks underneath them the client backs off,
//! redials the same endpoint and retries, up to a fixed number of attempts.
//!
//! ## Overview
//!
//! Each top-level operation runs a small state machine:
//!
//! ```text
//! Idle ─► Attempting ─► Success
//!             │
//!             ▼
//!        Disconnected ─► Backoff ─► Reconnecting ─► Attempting ...
//!                                                        │
//!                                                        ▼
//!                                                 RetriesExhausted
//! ```
//!
//! - **Backoff** doubles on every consumed attempt and resets on the next call
//! - **Buffering** keeps bytes read past a delimiter for the next read, across reconnects
//! - **Read deadlines** end a read on a connected but silent peer instead of retrying
//!
//! ## Usage
//!
//! ```no_run
//! use resilient_stream::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("tcp", "127.0.0.1:7000").await?;
//!
//!     client.write(b"HELLO\n").await?;
//!     let line = client.read_string(b'\n').await?;
//!     println!("{}", line.trim_end());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - The reconnecting client, its buffer, configuration and backoff
//! - **[transport]** - Endpoints and the connector capability the client dials through
//! - **[error]** - Error types and result handling

pub mod client;
pub mod error;
pub mod transport;

pub use client::{Client, ClientConfig};
pub use error::{Result, StreamError};
pub use transport::{Connector, Endpoint, NetConnector, Network};
