// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! USART0 Register Access
//!
//! # Register Map
//!
//! | Address | Name    | Description                       |
//! |---------|---------|-----------------------------------|
//! | 0xC0    | UCSR0A  | Control and Status Register A     |
//! | 0xC1    | UCSR0B  | Control and Status Register B     |
//! | 0xC2    | UCSR0C  | Control and Status Register C     |
//! | 0xC4    | UBRR0L  | Baud Rate Register, low byte      |
//! | 0xC5    | UBRR0H  | Baud Rate Register, high nibble   |
//! | 0xC6    | UDR0    | I/O Data Register                 |

use bitflags::bitflags;

/// USART0 registers (data-space addresses)
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Ucsr0a = 0xC0,
    Ucsr0b = 0xC1,
    Ucsr0c = 0xC2,
    Ubrr0l = 0xC4,
    Ubrr0h = 0xC5,
    Udr0 = 0xC6,
}

impl Register {
    /// Data-space address of the register
    #[inline]
    pub const fn addr(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// UCSR0A: status flags and double speed
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ucsr0a: u8 {
        /// Receive complete
        const RXC0 = 1 << 7;
        /// Transmit complete
        const TXC0 = 1 << 6;
        /// Data register empty
        const UDRE0 = 1 << 5;
        /// Frame error
        const FE0 = 1 << 4;
        /// Data overrun
        const DOR0 = 1 << 3;
        /// Parity error
        const UPE0 = 1 << 2;
        /// Double transmission speed
        const U2X0 = 1 << 1;
        /// Multi-processor communication mode
        const MPCM0 = 1 << 0;
    }
}

bitflags! {
    /// UCSR0B: interrupt enables, RX/TX enables, ninth data bit
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ucsr0b: u8 {
        /// RX complete interrupt enable
        const RXCIE0 = 1 << 7;
        /// TX complete interrupt enable
        const TXCIE0 = 1 << 6;
        /// Data register empty interrupt enable
        const UDRIE0 = 1 << 5;
        /// Receiver enable
        const RXEN0 = 1 << 4;
        /// Transmitter enable
        const TXEN0 = 1 << 3;
        /// Character size bit 2
        const UCSZ02 = 1 << 2;
        /// Receive data bit 8
        const RXB80 = 1 << 1;
        /// Transmit data bit 8
        const TXB80 = 1 << 0;
    }
}

bitflags! {
    /// UCSR0C: frame format
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ucsr0c: u8 {
        const UMSEL01 = 1 << 7;
        const UMSEL00 = 1 << 6;
        const UPM01 = 1 << 5;
        const UPM00 = 1 << 4;
        const USBS0 = 1 << 3;
        const UCSZ01 = 1 << 2;
        const UCSZ00 = 1 << 1;
        const UCPOL0 = 1 << 0;
    }
}

/// Bit position of UPM00 in UCSR0C
pub const UPM00_SHIFT: u8 = 4;

/// Bit position of USBS0 in UCSR0C
pub const USBS0_SHIFT: u8 = 3;

/// Bit position of UCSZ00 in UCSR0C
pub const UCSZ00_SHIFT: u8 = 1;

/// Byte-wide register access
///
/// Implemented with volatile accesses for the real peripheral and with a
/// plain register file for host tests.
pub trait RegisterIo {
    /// Read a register
    fn read(&self, reg: Register) -> u8;

    /// Write a register
    fn write(&mut self, reg: Register, value: u8);

    /// Read-modify-write a register
    #[inline]
    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Register, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

/// Memory-mapped USART0 of the real part
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Take the memory-mapped peripheral
    ///
    /// # Safety
    ///
    /// Must only be called on an ATmega328. Every handle aliases the same
    /// registers, so accesses through different handles must never
    /// interleave.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for Mmio {
    #[inline]
    fn read(&self, reg: Register) -> u8 {
        // SAFETY: `reg` is a valid USART0 address on the part `steal` requires.
        unsafe { core::ptr::read_volatile(reg.addr() as *const u8) }
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u8) {
        // SAFETY: as above.
        unsafe { core::ptr::write_volatile(reg.addr() as *mut u8, value) }
    }
}
