//! Client configuration.

use crate::error::{Result, StreamError};
use serde::Deserialize;
use std::time::Duration;

/// Default scratch region size for one physical read, also the initial read buffer capacity
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4096;

/// Retry, backoff and I/O tuning for a [`Client`](crate::Client).
///
/// Defaults match a client built without explicit configuration: 10 attempts
/// per operation starting from a one second backoff.
///
/// Deserializes from any serde format, with missing fields taking their
/// defaults:
///
/// ```
/// use resilient_stream::ClientConfig;
///
/// let config = ClientConfig::default().with_max_retries(3).with_retry_interval_ms(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Attempts allowed per logical operation before giving up
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds; reset at the start of every operation
    pub retry_interval_ms: u64,

    /// Upper bound on the doubled backoff delay. `None` leaves it unbounded.
    pub max_retry_interval_ms: Option<u64>,

    /// Fixed deadline for a single read. `None` uses the current backoff interval.
    pub read_timeout_ms: Option<u64>,

    /// Bound on a single dial. `None` waits for the OS connect timeout.
    pub connect_timeout_ms: Option<u64>,

    /// Size of the scratch region used for one physical read
    pub read_chunk_size: usize,

    /// Emit `tracing` events for retry activity. Off by default: failures are
    /// reported to the caller through the returned error only.
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            max_retries: 10,
            retry_interval_ms: 1000,
            max_retry_interval_ms: None,
            read_timeout_ms: None,
            connect_timeout_ms: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            enable_logging: false,
        }
    }
}

impl ClientConfig {
    /// Set the per-operation attempt budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base backoff delay
    pub fn with_retry_interval_ms(mut self, ms: u64) -> Self {
        self.retry_interval_ms = ms;
        self
    }

    /// Cap the doubled backoff delay
    pub fn with_max_retry_interval_ms(mut self, ms: u64) -> Self {
        self.max_retry_interval_ms = Some(ms);
        self
    }

    /// Use a fixed read deadline instead of tracking the backoff interval
    pub fn with_read_timeout_ms(mut self, ms: u64) -> Self {
        self.read_timeout_ms = Some(ms);
        self
    }

    /// Bound each dial
    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.connect_timeout_ms = Some(ms);
        self
    }

    /// Set the scratch region size for physical reads
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }

    /// Turn retry logging on or off
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Base backoff delay
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Backoff cap, if any
    pub fn max_retry_interval(&self) -> Option<Duration> {
        self.max_retry_interval_ms.map(Duration::from_millis)
    }

    /// Fixed read deadline, if any
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Dial bound, if any
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Reject values the retry loops cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(StreamError::InvalidConfig(
                "max_retries must be positive".to_string(),
            ));
        }
        if self.retry_interval_ms == 0 {
            return Err(StreamError::InvalidConfig(
                "retry_interval_ms must be positive".to_string(),
            ));
        }
        if self.read_chunk_size == 0 {
            return Err(StreamError::InvalidConfig(
                "read_chunk_size must be positive".to_string(),
            ));
        }
        if let Some(cap) = self.max_retry_interval_ms {
            if cap < self.retry_interval_ms {
                return Err(StreamError::InvalidConfig(format!(
                    "max_retry_interval_ms ({}) is below retry_interval_ms ({})",
                    cap, self.retry_interval_ms
                )));
            }
        }
        if self.read_timeout_ms == Some(0) {
            return Err(StreamError::InvalidConfig(
                "read_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
