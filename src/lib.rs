// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! ATmega328 UART Driver
//!
//! Driver for the single USART0 peripheral of the ATmega328 family.
//!
//! # Layers
//!
//! - **reg**: memory-mapped register map and bit layouts
//! - **dev::uart**: register-level init, baud rate, polling and blocking I/O
//! - **echo**: interrupt-driven accumulate-then-echo service
//! - **sync**: state shared with interrupt context
//!
//! The library is `no_std` and never allocates. Host builds (tests) link the
//! `std` critical-section implementation; with the `firmware` feature
//! [`arch`] provides the single-core one for the AVR part.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

#[macro_use]
mod debug;

pub mod arch;
pub mod config;
pub mod dev;
pub mod echo;
pub mod err;
pub mod reg;
pub mod sync;

#[cfg(feature = "log")]
pub use debug::{init as log_init, UartLogger};

pub use config::{CharacterSize, Parity, StopBits, UartConfig, ECHO_BUFFER_SIZE};
pub use dev::uart::{BaudSetting, ReadStatus, SerialPort, Usart};
pub use echo::{
    EchoMachine, FixedBuffer, InterruptEcho, Mode, ReceiveOutcome, TransmitOutcome,
};
pub use err::{BufferError, Error};
