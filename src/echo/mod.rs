// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Interrupt-Driven Echo
//!
//! Buffered receive and transmit driven entirely by the USART interrupts:
//! bytes accumulate in a [`FixedBuffer`] until it overflows, then the whole
//! buffer is sent back one data-register-empty interrupt at a time.
//!
//! - [`FixedBuffer`]: bounded append-only storage
//! - [`EchoMachine`]: the receiving/transmitting state machine
//! - [`InterruptEcho`]: the single process-wide instance the vectors call

pub mod buffer;
pub mod machine;
pub mod shared;

// Re-exports
pub use buffer::*;
pub use machine::*;
pub use shared::*;
