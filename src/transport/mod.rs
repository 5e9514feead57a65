//! The transport capability the client consumes.
//!
//! The client never opens sockets itself. It asks a [`Connector`] for a fresh
//! byte stream whenever it needs one (at construction and on every
//! reconnect), then drives that stream through the `tokio::io` traits:
//!
//! | Primitive | Mapped to |
//! |-----------|-----------|
//! | Dial | [`Connector::connect`] |
//! | Read | `AsyncReadExt::read` under `tokio::time::timeout` |
//! | Write | `AsyncWriteExt::write_all` + `flush` |
//! | Close | `AsyncWriteExt::shutdown`, then drop |
//! | Remote endpoint | the [`Endpoint`] remembered by the client |
//!
//! [`NetConnector`] is the production implementation over `tokio::net`.
//! Tests and embedders can supply their own connector to wrap TLS, proxies
//! or scripted streams.

mod endpoint;
mod net;

pub use endpoint::{Endpoint, Network};
pub use net::{NetConnector, NetStream};

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};

/// Opens byte streams to an endpoint.
///
/// Each call must return a brand-new stream; the client owns it exclusively
/// until it is replaced or the client is closed.
#[async_trait]
pub trait Connector: Send + Sync {
    /// The stream type produced by a successful dial
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    /// Dial `endpoint` once
    async fn connect(&self, endpoint: &Endpoint) -> io::Result<Self::Stream>;
}
