//! The resilient stream client.
//!
//! Provides [`Client`], which reads delimited records and writes payloads over
//! a transport that may drop at any time, reconnecting with exponential
//! backoff underneath the caller.
//!
//! # Examples
//!
//! ## Line-oriented request/response
//!
//! ```no_run
//! use resilient_stream::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("tcp", "127.0.0.1:7000").await?;
//!     client.write(b"PING\n").await?;
//!     let reply = client.read_string(b'\n').await?;
//!     println!("reply: {}", reply.trim_end());
//!     client.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom retry policy
//!
//! ```no_run
//! use resilient_stream::{Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default()
//!         .with_max_retries(3)
//!         .with_retry_interval_ms(10);
//!     let mut client = Client::connect_with_config("tcp", "127.0.0.1:7000", config).await?;
//!     let record = client.read_until(b';').await?;
//!     println!("{} bytes", record.len());
//!     Ok(())
//! }
//! ```

use crate::client::{Backoff, ClientConfig, ReadBuffer};
use crate::error::{Result, StreamError};
use crate::transport::{Connector, Endpoint, NetConnector};
use bytes::Bytes;
use std::fmt;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::sleep;

/// A stream connection that reconnects itself.
///
/// # Retry model
///
/// Each call to [`read_until`](Self::read_until) or [`write`](Self::write)
/// gets its own budget of `max_retries` attempts and its own backoff schedule
/// starting at `retry_interval`. An attempt is consumed by a failed reconnect
/// or a failed read/write; successful reads that have not yet produced the
/// delimiter are free. A read that outlives its deadline ends the call at once
/// with [`StreamError::Timeout`], separating a silent peer from a broken one.
///
/// # Concurrency
///
/// All operations take `&mut self`: one logical operation runs at a time.
/// Callers sharing a client across tasks must serialize access themselves,
/// for example behind a `tokio::sync::Mutex`.
///
/// # Known limitation
///
/// A write that fails part-way is resent in full after reconnecting. The peer
/// may therefore see some bytes twice. Bytes in flight when a connection drops
/// may also be lost on the read side.
pub struct Client<C: Connector = NetConnector> {
    connector: C,
    endpoint: Endpoint,
    /// Live handle; `None` after a failed reconnect or once closed
    transport: Option<C::Stream>,
    read_buffer: ReadBuffer,
    config: ClientConfig,
}

impl Client<NetConnector> {
    /// Dial `address` on `network` (`tcp`, `tcp4`, `tcp6` or `unix`) with default settings
    pub async fn connect(network: &str, address: &str) -> Result<Self> {
        Self::connect_with_config(network, address, ClientConfig::default()).await
    }

    /// Dial `address` on `network` with a custom configuration
    pub async fn connect_with_config(
        network: &str,
        address: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let endpoint = Endpoint::new(network, address)?;
        Self::connect_with(NetConnector::new(), endpoint, config).await
    }
}

impl<C: Connector> Client<C> {
    /// Dial `endpoint` once through `connector`.
    ///
    /// Fails with [`StreamError::Dial`] without retrying.
    pub async fn connect_with(connector: C, endpoint: Endpoint, config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let transport = dial(&connector, &endpoint, config.connect_timeout())
            .await
            .map_err(|source| StreamError::Dial {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(Client {
            connector,
            endpoint,
            transport: Some(transport),
            read_buffer: ReadBuffer::with_capacity(config.read_chunk_size),
            config,
        })
    }

    /// Read through the first `delimiter`, inclusive.
    ///
    /// Served from the read buffer without touching the transport when the
    /// delimiter is already buffered. Otherwise reads, reconnecting as needed,
    /// until the delimiter shows up, a read times out, or the attempt budget
    /// runs out. Bytes after the delimiter stay buffered for the next call.
    pub async fn read_until(&mut self, delimiter: u8) -> Result<Bytes> {
        if let Some(record) = self.read_buffer.take_through(delimiter) {
            return Ok(record);
        }

        let mut backoff = self.backoff();
        let mut disconnected = self.transport.is_none();
        let mut attempts = 0;
        let mut scratch = vec![0u8; self.config.read_chunk_size];

        while attempts < self.config.max_retries {
            if disconnected {
                sleep(backoff.advance()).await;

                if let Err(e) = self.reconnect().await {
                    attempts += 1;
                    self.log_attempt("read", attempts, &backoff, &e);
                    continue;
                }
                disconnected = false;
            }

            let deadline = self.config.read_timeout().unwrap_or_else(|| backoff.current());
            match self.read_once(&mut scratch, deadline).await {
                Ok(n) => {
                    self.read_buffer.extend(&scratch[..n]);
                    if let Some(record) = self.read_buffer.take_through(delimiter) {
                        return Ok(record);
                    }
                    if self.config.enable_logging {
                        tracing::trace!(
                            "read {} bytes without delimiter, {} buffered",
                            n,
                            self.read_buffer.len()
                        );
                    }
                }
                Err(e) if e.is_timeout() => {
                    if self.config.enable_logging {
                        tracing::warn!("read from {} gave up: {}", self.endpoint, e);
                    }
                    return Err(e);
                }
                Err(e) => {
                    disconnected = true;
                    attempts += 1;
                    self.log_attempt("read", attempts, &backoff, &e);
                }
            }
        }

        Err(self.exhausted("read", attempts))
    }

    /// Read through the first `delimiter` and decode it as UTF-8.
    ///
    /// The record is consumed even when it fails to decode.
    pub async fn read_string(&mut self, delimiter: u8) -> Result<String> {
        let record = self.read_until(delimiter).await?;
        Ok(String::from_utf8(record.to_vec())?)
    }

    /// Deliver `payload` in full, reconnecting and resending on failure.
    ///
    /// Every retry resends the whole payload; see the type-level note on
    /// duplicates.
    pub async fn write(&mut self, payload: &[u8]) -> Result<()> {
        let first = match self.write_once(payload).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        if self.config.enable_logging {
            tracing::debug!("write to {} failed, recovering: {}", self.endpoint, first);
        }

        let mut backoff = self.backoff();
        let mut attempts = 0;

        while attempts < self.config.max_retries {
            sleep(backoff.advance()).await;

            if let Err(e) = self.reconnect().await {
                attempts += 1;
                self.log_attempt("write", attempts, &backoff, &e);
                continue;
            }

            match self.write_once(payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    attempts += 1;
                    self.log_attempt("write", attempts, &backoff, &e);
                }
            }
        }

        Err(self.exhausted("write", attempts))
    }

    /// Replace the transport with a fresh connection to the same endpoint.
    ///
    /// The current handle is shut down first and its shutdown error ignored.
    /// On dial failure the client is left without a transport and the next
    /// operation starts by reconnecting.
    async fn reconnect(&mut self) -> Result<()> {
        if let Some(mut old) = self.transport.take() {
            let _ = old.shutdown().await;
        }

        let stream = dial(&self.connector, &self.endpoint, self.config.connect_timeout())
            .await
            .map_err(|source| StreamError::Reconnect {
                endpoint: self.endpoint.to_string(),
                source,
            })?;
        self.transport = Some(stream);

        if self.config.enable_logging {
            tracing::debug!("reconnected to {}", self.endpoint);
        }
        Ok(())
    }

    /// Shut down the transport and discard buffered bytes
    pub async fn close(mut self) -> Result<()> {
        self.read_buffer.clear();
        match self.transport.take() {
            Some(mut transport) => Ok(transport.shutdown().await?),
            None => Ok(()),
        }
    }

    /// Endpoint dialed at construction and on every reconnect
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a transport handle is installed
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Borrow the live transport handle
    pub fn transport(&self) -> Option<&C::Stream> {
        self.transport.as_ref()
    }

    /// Mutably borrow the live transport handle
    pub fn transport_mut(&mut self) -> Option<&mut C::Stream> {
        self.transport.as_mut()
    }

    /// Bytes read but not yet returned by [`read_until`](Self::read_until)
    pub fn buffered(&self) -> &[u8] {
        self.read_buffer.as_slice()
    }

    fn backoff(&self) -> Backoff {
        Backoff::new(self.config.retry_interval(), self.config.max_retry_interval())
    }

    /// One physical read bounded by `deadline`. End of stream is a transport error.
    async fn read_once(&mut self, scratch: &mut [u8], deadline: Duration) -> Result<usize> {
        let transport = self.transport.as_mut().ok_or(StreamError::NotConnected)?;

        match tokio::time::timeout(deadline, transport.read(scratch)).await {
            Err(_) => Err(StreamError::Timeout(deadline)),
            Ok(Ok(0)) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed by peer",
            )
            .into()),
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e)) if e.kind() == io::ErrorKind::TimedOut => Err(StreamError::Timeout(deadline)),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    async fn write_once(&mut self, payload: &[u8]) -> Result<()> {
        let transport = self.transport.as_mut().ok_or(StreamError::NotConnected)?;
        transport.write_all(payload).await?;
        transport.flush().await?;
        Ok(())
    }

    fn log_attempt(&self, op: &str, attempt: u32, backoff: &Backoff, err: &StreamError) {
        if self.config.enable_logging && attempt < self.config.max_retries {
            tracing::warn!(
                "{} on {} failed (attempt {}/{}), retrying after {:?}: {}",
                op,
                self.endpoint,
                attempt,
                self.config.max_retries,
                backoff.current(),
                err
            );
        }
    }

    fn exhausted(&self, op: &str, attempts: u32) -> StreamError {
        if self.config.enable_logging {
            tracing::warn!(
                "{} on {} gave up after {} attempts",
                op,
                self.endpoint,
                attempts
            );
        }
        StreamError::RetriesExhausted { attempts }
    }
}

impl<C: Connector> fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("connected", &self.transport.is_some())
            .field("buffered", &self.read_buffer.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Dial once, bounded by `limit` when set
async fn dial<C: Connector>(
    connector: &C,
    endpoint: &Endpoint,
    limit: Option<Duration>,
) -> io::Result<C::Stream> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, connector.connect(endpoint))
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connect to {} timed out after {:?}", endpoint, limit),
                )
            })?,
        None => connector.connect(endpoint).await,
    }
}
