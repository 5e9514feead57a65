//! Error types and result handling.
//!
//! Every fallible operation in this crate returns [`Result<T>`], an alias over
//! [`StreamError`]. The variants fall into three groups:
//!
//! | Group | Variants | Seen by callers? |
//! |-------|----------|------------------|
//! | Construction | `Dial`, `InvalidEndpoint`, `InvalidConfig` | Yes |
//! | Recoverable | `Transport`, `Reconnect`, `NotConnected` | Only from a bare reconnect |
//! | Terminal | `Timeout`, `RetriesExhausted` | Yes |
//!
//! Recoverable errors are absorbed by the retry loops in
//! [`Client`](crate::Client); each one costs a retry attempt.

use std::io;
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the resilient stream client.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The initial dial failed. Construction is never retried.
    #[error("failed to dial {endpoint}: {source}")]
    Dial {
        /// Endpoint that was dialed
        endpoint: String,
        /// Underlying connect error
        #[source]
        source: io::Error,
    },

    /// A reconnect attempt failed.
    #[error("failed to reconnect to {endpoint}: {source}")]
    Reconnect {
        /// Endpoint that was redialed
        endpoint: String,
        /// Underlying connect error
        #[source]
        source: io::Error,
    },

    /// A single read exceeded its deadline while the connection was up.
    #[error("read timed out after {0:?}")]
    Timeout(Duration),

    /// Read or write on the live transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// The operation consumed its whole retry budget.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts consumed
        attempts: u32,
    },

    /// There is no live transport handle.
    #[error("not connected")]
    NotConnected,

    /// A delimited read was not valid UTF-8. The bytes were still consumed.
    #[error("invalid UTF-8 in delimited read: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Unknown network name or malformed address.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Rejected client configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StreamError {
    /// Whether reconnecting and retrying may clear this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::Transport(_) | StreamError::Reconnect { .. } | StreamError::NotConnected
        )
    }

    /// Whether the retry loop gave up.
    ///
    /// A read timeout counts: it ends the loop immediately without spending the
    /// remaining attempts.
    pub fn is_retries_exhausted(&self) -> bool {
        matches!(
            self,
            StreamError::RetriesExhausted { .. } | StreamError::Timeout(_)
        )
    }

    /// Whether this is a read deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, StreamError::Timeout(_))
    }
}

/// Result type for stream client operations.
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_retryable() {
        let err = StreamError::from(io::Error::from(io::ErrorKind::ConnectionReset));
        assert!(err.is_retryable());
        assert!(!err.is_retries_exhausted());
        assert!(StreamError::NotConnected.is_retryable());
    }

    #[test]
    fn test_timeout_counts_as_exhausted() {
        let err = StreamError::Timeout(Duration::from_millis(10));
        assert!(err.is_timeout());
        assert!(err.is_retries_exhausted());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = StreamError::RetriesExhausted { attempts: 3 };
        assert_eq!(err.to_string(), "retries exhausted after 3 attempts");

        let err = StreamError::Dial {
            endpoint: "tcp://127.0.0.1:1".to_string(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert!(err.to_string().starts_with("failed to dial tcp://127.0.0.1:1"));
    }
}
