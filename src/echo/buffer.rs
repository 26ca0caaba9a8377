// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Fixed-Capacity Byte Buffer

use heapless::Vec;

use crate::err::BufferError;

/// Append-only byte store with a compile-time capacity
///
/// Bytes at `[0, len)` are valid and in insertion order since the last
/// [`clear`](FixedBuffer::clear). Never allocates and never blocks, so it
/// can be driven from an interrupt handler.
pub struct FixedBuffer<const N: usize> {
    data: Vec<u8, N>,
}

impl<const N: usize> FixedBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Discard all entries; stale bytes are overwritten by later writes
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Append a byte
    ///
    /// Returns [`BufferError::Full`] without touching the buffer when
    /// `len() == capacity()`.
    #[inline]
    pub fn write(&mut self, byte: u8) -> Result<(), BufferError> {
        self.data.push(byte).map_err(|_| BufferError::Full)
    }

    /// Byte at `index`, or [`BufferError::OutOfRange`] past `len()`
    #[inline]
    pub fn read(&self, index: usize) -> Result<u8, BufferError> {
        self.data.get(index).copied().ok_or(BufferError::OutOfRange)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.is_full()
    }

    /// Valid entries in insertion order
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
