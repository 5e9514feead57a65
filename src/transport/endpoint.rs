//! Remote endpoint descriptors.
//!
//! An [`Endpoint`] pairs a network family with an address, using the network
//! names common to socket APIs:
//!
//! | Name | Family | Address form |
//! |------|--------|--------------|
//! | `tcp` | TCP, any IP version | `host:port` |
//! | `tcp4` | TCP over IPv4 only | `host:port` |
//! | `tcp6` | TCP over IPv6 only | `host:port` |
//! | `unix` | Unix domain stream socket | filesystem path |
//!
//! ```
//! use resilient_stream::transport::{Endpoint, Network};
//!
//! let endpoint = Endpoint::new("tcp4", "127.0.0.1:7000").unwrap();
//! assert_eq!(endpoint.network(), Network::Tcp4);
//! assert_eq!(endpoint.to_string(), "tcp4://127.0.0.1:7000");
//! ```

use crate::error::{Result, StreamError};
use std::fmt;
use std::str::FromStr;

/// Network family of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// TCP over whichever IP version resolves first
    Tcp,
    /// TCP restricted to IPv4 addresses
    Tcp4,
    /// TCP restricted to IPv6 addresses
    Tcp6,
    /// Unix domain stream socket
    Unix,
}

impl Network {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Tcp4 => "tcp4",
            Network::Tcp6 => "tcp6",
            Network::Unix => "unix",
        }
    }
}

impl FromStr for Network {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Network::Tcp),
            "tcp4" => Ok(Network::Tcp4),
            "tcp6" => Ok(Network::Tcp6),
            "unix" => Ok(Network::Unix),
            other => Err(StreamError::InvalidEndpoint(format!(
                "unknown network: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to dial, captured once at construction and reused on every reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    network: Network,
    address: String,
}

impl Endpoint {
    /// Parse a network name and pair it with `address`
    pub fn new(network: &str, address: impl Into<String>) -> Result<Self> {
        Self::with_network(network.parse()?, address)
    }

    /// Pair an already parsed network with `address`
    pub fn with_network(network: Network, address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(StreamError::InvalidEndpoint(format!(
                "empty {} address",
                network
            )));
        }
        Ok(Endpoint { network, address })
    }

    /// TCP endpoint at `host:port`
    pub fn tcp(address: impl Into<String>) -> Result<Self> {
        Self::with_network(Network::Tcp, address)
    }

    /// Unix socket endpoint at `path`
    pub fn unix(path: impl Into<String>) -> Result<Self> {
        Self::with_network(Network::Unix, path)
    }

    /// Network family
    pub fn network(&self) -> Network {
        self.network
    }

    /// Address as given at construction
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.network, self.address)
    }
}
