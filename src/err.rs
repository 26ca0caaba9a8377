// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Driver Error Codes
//!
//! Error types and their status codes. Buffer errors never leave interrupt
//! context; the state machine consumes them as control-flow signals.

use core::fmt;

/// Status code type
pub type Status = i8;

/// Success status code
pub const OK: Status = 0;

/// Buffer full error
pub const ERR_BUFFER_FULL: Status = -1;

/// Index out of range error
pub const ERR_OUT_OF_RANGE: Status = -2;

/// Baud rate cannot be programmed
pub const ERR_BAUD: Status = -3;

/// Interrupt-owned state already installed
pub const ERR_ALREADY_INSTALLED: Status = -4;

/// Errors reported by [`FixedBuffer`](crate::echo::FixedBuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Write attempted with `length == capacity`
    Full,
    /// Read index at or past `length`
    OutOfRange,
}

impl BufferError {
    /// Status code for this error
    pub const fn status(self) -> Status {
        match self {
            BufferError::Full => ERR_BUFFER_FULL,
            BufferError::OutOfRange => ERR_OUT_OF_RANGE,
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Full => f.write_str("buffer full"),
            BufferError::OutOfRange => f.write_str("index out of range"),
        }
    }
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Buffer operation failed
    Buffer(BufferError),

    /// Requested baud rate has no UBRR divisor
    BaudUnreachable {
        /// Requested rate in bits per second
        baud: u32,
    },

    /// The echo service was already handed to interrupt context
    AlreadyInstalled,
}

impl Error {
    /// Status code for this error
    pub const fn status(self) -> Status {
        match self {
            Error::Buffer(e) => e.status(),
            Error::BaudUnreachable { .. } => ERR_BAUD,
            Error::AlreadyInstalled => ERR_ALREADY_INSTALLED,
        }
    }
}

impl From<BufferError> for Error {
    fn from(e: BufferError) -> Self {
        Error::Buffer(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Buffer(e) => write!(f, "buffer: {}", e),
            Error::BaudUnreachable { baud } => write!(f, "baud rate {} unreachable", baud),
            Error::AlreadyInstalled => f.write_str("echo service already installed"),
        }
    }
}
