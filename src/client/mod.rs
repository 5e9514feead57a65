//! Resilient stream client implementation.
//!
//! This module provides the client that sits between callers and a flaky
//! transport, enabling them to:
//!
//! - **Read delimited records** assembled from arbitrarily fragmented reads
//! - **Write payloads** without handling disconnections themselves
//! - **Reconnect automatically** with exponential backoff
//! - **Fail deterministically** once a bounded number of attempts is spent
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── stream  - Client and its read/write retry loops
//! ├── buffer  - Read buffer and delimiter scanning
//! ├── config  - Client configuration
//! └── utils   - Backoff schedule
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Reconnecting stream client |
//! | [`ClientConfig`] | Retry, backoff and I/O tuning |
//! | [`ReadBuffer`] | Bytes read but not yet consumed |
//! | [`Backoff`] | Per-operation doubling delay schedule |
//!
//! # Examples
//!
//! ## Configuring a Client
//!
//! ```
//! use resilient_stream::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     max_retries: 5,
//!     retry_interval_ms: 200,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Backoff Schedule
//!
//! ```
//! use resilient_stream::client::exponential_backoff;
//! use std::time::Duration;
//!
//! let delay = exponential_backoff(2, Duration::from_millis(100));
//! assert_eq!(delay, Duration::from_millis(400));
//! ```

mod buffer;
mod config;
mod stream;
mod utils;

pub use buffer::ReadBuffer;
pub use config::{ClientConfig, DEFAULT_READ_CHUNK_SIZE};
pub use stream::Client;
pub use utils::{exponential_backoff, Backoff};
