// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! UART Driver
//!
//! Register-level driver for the ATmega328 USART0.
//!
//! # Usage
//!
//! The driver supports both polling and interrupt-driven operation:
//! - **Blocking mode**: `putc`/`getc` and `core::fmt::Write`, spinning on
//!   the status flags
//! - **Interrupt mode**: the [`SerialPort`] primitives, each valid only
//!   from the handler of the matching interrupt

pub mod atmega328;
pub mod baud;

// Re-exports
pub use atmega328::*;
pub use baud::*;

/// Hardware primitives consumed by interrupt-driven code
///
/// `read_byte` and `write_byte` never wait. They are only meaningful when
/// the corresponding interrupt fired (receive complete, data register
/// empty), which is what guarantees the hardware precondition.
pub trait SerialPort {
    /// Take the received byte out of the data register
    fn read_byte(&mut self) -> u8;

    /// Put a byte into the transmit data register
    fn write_byte(&mut self, byte: u8);

    /// A received byte is waiting
    fn byte_available(&self) -> bool;

    /// The transmit data register can accept a byte
    fn ready_to_send(&self) -> bool;

    fn enable_rx_interrupt(&mut self);
    fn disable_rx_interrupt(&mut self);
    fn enable_tx_interrupt(&mut self);
    fn disable_tx_interrupt(&mut self);
}
