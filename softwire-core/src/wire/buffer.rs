//! Fixed-capacity transmit and receive buffers

use heapless::Vec;

/// Default transmit/receive capacity in bytes
pub const BUFFER_SIZE: usize = 32;

/// Outgoing bytes for the next write transaction
///
/// Bytes past capacity are dropped and a sticky overflow flag is set;
/// nothing is reported until the transaction is ended.
#[derive(Debug, Default)]
pub struct TxBuffer<const N: usize = BUFFER_SIZE> {
    bytes: Vec<u8, N>,
    overflow: bool,
}

impl<const N: usize> TxBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            overflow: false,
        }
    }

    /// Append a byte, or flag overflow if full
    ///
    /// Returns false if the byte was dropped.
    pub fn push(&mut self, value: u8) -> bool {
        if self.bytes.push(value).is_err() {
            self.overflow = true;
            return false;
        }
        true
    }

    /// Queued bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check if a byte has been dropped since the last reset
    pub fn overflowed(&self) -> bool {
        self.overflow
    }

    /// Clear the cursor and the overflow flag
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.overflow = false;
    }
}

/// Incoming bytes awaiting the caller
///
/// Fills from the back across several requests; drains from the front.
/// Both cursors return to zero once everything has been read.
#[derive(Debug)]
pub struct RxBuffer<const N: usize = BUFFER_SIZE> {
    bytes: [u8; N],
    /// Filled length
    len: usize,
    /// Read cursor
    cursor: usize,
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            cursor: 0,
        }
    }

    /// Bytes received but not yet read
    pub fn available(&self) -> usize {
        self.len - self.cursor
    }

    /// Room left for further requests
    pub fn remaining_capacity(&self) -> usize {
        N - self.len
    }

    /// Unfilled space, up to `count` bytes, for the next read transaction
    pub fn spare_mut(&mut self, count: usize) -> &mut [u8] {
        let end = self.len + count.min(self.remaining_capacity());
        &mut self.bytes[self.len..end]
    }

    /// Mark `count` bytes of spare space as filled
    pub fn commit(&mut self, count: usize) {
        self.len = (self.len + count).min(N);
    }

    /// Take the next byte, resetting both cursors once drained
    pub fn pop(&mut self) -> Option<u8> {
        if self.cursor == self.len {
            self.reset();
            return None;
        }
        let value = self.bytes[self.cursor];
        self.cursor += 1;
        if self.cursor == self.len {
            self.reset();
        }
        Some(value)
    }

    /// Discard everything
    pub fn reset(&mut self) {
        self.len = 0;
        self.cursor = 0;
    }
}
