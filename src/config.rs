// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! UART Configuration
//!
//! Frame format and clocking. The defaults match an Arduino Uno class
//! board: 16 MHz system clock, 9600 baud, 8N1.

use crate::reg::{Ucsr0b, UCSZ00_SHIFT, UPM00_SHIFT, USBS0_SHIFT};

/// Default system clock in Hz
pub const DEFAULT_CPU_HZ: u32 = 16_000_000;

/// Default baud rate
pub const DEFAULT_BAUD: u32 = 9600;

/// Capacity of the interrupt-driven echo buffer
pub const ECHO_BUFFER_SIZE: usize = 4;

/// Data bits per frame
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSize {
    Five = 0x0,
    Six = 0x1,
    Seven = 0x2,
    Eight = 0x3,
    /// Nine data bits; the ninth bit lives in RXB80/TXB80 and is not used
    /// by the byte-oriented I/O of this driver.
    Nine = 0x7,
}

impl CharacterSize {
    /// UCSZ02 contribution to UCSR0B
    #[inline]
    pub const fn ucsr0b_bits(self) -> u8 {
        (self as u8) & Ucsr0b::UCSZ02.bits()
    }

    /// UCSZ01:00 contribution to UCSR0C
    #[inline]
    pub const fn ucsr0c_bits(self) -> u8 {
        ((self as u8) & 0x03) << UCSZ00_SHIFT
    }
}

/// Parity mode
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Disabled = 0x0,
    Even = 0x2,
    Odd = 0x3,
}

impl Parity {
    /// UPM01:00 contribution to UCSR0C
    #[inline]
    pub const fn ucsr0c_bits(self) -> u8 {
        (self as u8) << UPM00_SHIFT
    }
}

/// Stop bits per frame
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One = 0x0,
    Two = 0x1,
}

impl StopBits {
    /// USBS0 contribution to UCSR0C
    #[inline]
    pub const fn ucsr0c_bits(self) -> u8 {
        (self as u8) << USBS0_SHIFT
    }
}

/// USART0 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// System clock feeding the baud rate generator, in Hz
    pub cpu_hz: u32,
    /// Requested baud rate
    pub baud: u32,
    pub character_size: CharacterSize,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// Default configuration (16 MHz, 9600 baud, 8N1)
    pub const fn new() -> Self {
        Self {
            cpu_hz: DEFAULT_CPU_HZ,
            baud: DEFAULT_BAUD,
            character_size: CharacterSize::Eight,
            parity: Parity::Disabled,
            stop_bits: StopBits::One,
        }
    }

    pub const fn cpu_hz(mut self, cpu_hz: u32) -> Self {
        self.cpu_hz = cpu_hz;
        self
    }

    pub const fn baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    pub const fn character_size(mut self, size: CharacterSize) -> Self {
        self.character_size = size;
        self
    }

    pub const fn parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub const fn stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }

    /// Value for UCSR0C (asynchronous mode)
    #[inline]
    pub const fn ucsr0c(&self) -> u8 {
        self.parity.ucsr0c_bits() | self.stop_bits.ucsr0c_bits() | self.character_size.ucsr0c_bits()
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new()
    }
}
