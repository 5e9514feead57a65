//! Socket-backed connector built on `tokio::net`.

use super::{Connector, Endpoint, Network};
use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
#[cfg(unix)]
use tokio::net::UnixStream;

/// Dials TCP and Unix stream sockets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetConnector;

impl NetConnector {
    /// Create a new connector
    pub fn new() -> Self {
        NetConnector
    }
}

#[async_trait]
impl Connector for NetConnector {
    type Stream = NetStream;

    async fn connect(&self, endpoint: &Endpoint) -> io::Result<NetStream> {
        match endpoint.network() {
            Network::Tcp => {
                let stream = TcpStream::connect(endpoint.address()).await?;
                stream.set_nodelay(true)?;
                Ok(NetStream::Tcp(stream))
            }
            Network::Tcp4 | Network::Tcp6 => {
                let want_v4 = endpoint.network() == Network::Tcp4;
                let mut last_err = None;
                for addr in tokio::net::lookup_host(endpoint.address()).await? {
                    if addr.is_ipv4() != want_v4 {
                        continue;
                    }
                    match TcpStream::connect(addr).await {
                        Ok(stream) => {
                            stream.set_nodelay(true)?;
                            return Ok(NetStream::Tcp(stream));
                        }
                        Err(e) => last_err = Some(e),
                    }
                }
                Err(last_err.unwrap_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::AddrNotAvailable,
                        format!("no {} address for {}", endpoint.network(), endpoint.address()),
                    )
                }))
            }
            #[cfg(unix)]
            Network::Unix => Ok(NetStream::Unix(UnixStream::connect(endpoint.address()).await?)),
            #[cfg(not(unix))]
            Network::Unix => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "unix sockets are not available on this platform",
            )),
        }
    }
}

/// A connected TCP or Unix stream.
#[derive(Debug)]
pub enum NetStream {
    /// TCP connection
    Tcp(TcpStream),
    /// Unix domain connection
    #[cfg(unix)]
    Unix(UnixStream),
}

impl AsyncRead for NetStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            NetStream::Tcp(s) => Pin::new(s).poll_read(cx, buf),
            #[cfg(unix)]
            NetStream::Unix(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for NetStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            NetStream::Tcp(s) => Pin::new(s).poll_write(cx, buf),
            #[cfg(unix)]
            NetStream::Unix(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            NetStream::Tcp(s) => Pin::new(s).poll_flush(cx),
            #[cfg(unix)]
            NetStream::Unix(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            NetStream::Tcp(s) => Pin::new(s).poll_shutdown(cx),
            #[cfg(unix)]
            NetStream::Unix(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}
