//! Read buffer for delimiter-based reads.
//!
//! Bytes arrive from the transport in arbitrarily sized chunks. They are
//! accumulated here and handed out one delimited record at a time, so partial
//! reads compose with delimiter scanning.
//!
//! # Scanning
//!
//! 1. **Append**: Bytes from a physical read are appended at the tail
//! 2. **Scan**: The buffer is searched from its start for the delimiter
//! 3. **Split**: On a hit, everything up to and including the delimiter is
//!    split off and returned; the remainder stays for the next call
//!
//! No scan position is kept between calls; each scan starts at offset zero.
//!
//! # Examples
//!
//! ```
//! use resilient_stream::client::ReadBuffer;
//!
//! let mut buffer = ReadBuffer::new();
//! buffer.extend(b"ab,c");
//! assert_eq!(buffer.take_through(b',').unwrap(), &b"ab,"[..]);
//! assert!(buffer.take_through(b',').is_none());
//!
//! buffer.extend(b"d,");
//! assert_eq!(buffer.take_through(b',').unwrap(), &b"cd,"[..]);
//! assert!(buffer.is_empty());
//! ```

use crate::client::DEFAULT_READ_CHUNK_SIZE;
use bytes::{Bytes, BytesMut};

/// Bytes read from the transport but not yet returned to a caller.
///
/// Owned by a single [`Client`](crate::Client) and kept across reconnects:
/// bytes already buffered stay valid when the transport is replaced.
#[derive(Debug)]
pub struct ReadBuffer {
    /// Pending bytes, oldest first
    buffer: BytesMut,
}

impl ReadBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_READ_CHUNK_SIZE)
    }

    /// Create an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        ReadBuffer {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Append freshly read bytes
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Position of the first `delimiter`, if buffered
    pub fn find(&self, delimiter: u8) -> Option<usize> {
        self.buffer.iter().position(|&b| b == delimiter)
    }

    /// Split off the shortest prefix ending with `delimiter`.
    ///
    /// Returns `None` and leaves the buffer untouched when the delimiter is
    /// not present.
    pub fn take_through(&mut self, delimiter: u8) -> Option<Bytes> {
        let pos = self.find(delimiter)?;
        Some(self.buffer.split_to(pos + 1).freeze())
    }

    /// Unconsumed bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Bytes that fit without reallocating
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of unconsumed bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Discard everything buffered
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_no_record() {
        let mut buffer = ReadBuffer::new();
        assert!(buffer.take_through(b'\n').is_none());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_take_through_keeps_remainder() {
        let mut buffer = ReadBuffer::new();
        buffer.extend(b"ab,cd,ef");

        assert_eq!(buffer.take_through(b',').unwrap(), Bytes::from_static(b"ab,"));
        assert_eq!(buffer.take_through(b',').unwrap(), Bytes::from_static(b"cd,"));
        assert!(buffer.take_through(b',').is_none());
        assert_eq!(buffer.as_slice(), b"ef");
    }

    #[test]
    fn test_delimiter_at_start() {
        let mut buffer = ReadBuffer::new();
        buffer.extend(b"\nrest");
        assert_eq!(buffer.take_through(b'\n').unwrap(), Bytes::from_static(b"\n"));
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_record_spanning_appends() {
        let mut buffer = ReadBuffer::new();
        buffer.extend(b"hel");
        assert!(buffer.take_through(b'\n').is_none());
        buffer.extend(b"lo");
        assert!(buffer.take_through(b'\n').is_none());
        buffer.extend(b"\nnext");
        assert_eq!(buffer.take_through(b'\n').unwrap(), Bytes::from_static(b"hello\n"));
        assert_eq!(buffer.as_slice(), b"next");
    }

    #[test]
    fn test_default_capacity_matches_read_chunk() {
        let buffer = ReadBuffer::new();
        assert!(buffer.capacity() >= DEFAULT_READ_CHUNK_SIZE);
        assert_eq!(
            crate::ClientConfig::default().read_chunk_size,
            DEFAULT_READ_CHUNK_SIZE
        );
    }

    #[test]
    fn test_clear() {
        let mut buffer = ReadBuffer::new();
        buffer.extend(b"abc");
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
