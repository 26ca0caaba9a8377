// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! ATmega328 USART0 Driver
//!
//! # Features
//!
//! - Configurable frame format and baud rate
//! - Non-blocking read/write for interrupt handlers and polling loops
//! - Blocking putc/getc with `\n` to `\r\n` mapping on output
//! - Receive status with parity, overrun and frame error flags
//! - RX complete and data register empty interrupt control

use core::fmt;

use bitflags::bitflags;

use super::baud::BaudSetting;
use super::SerialPort;
use crate::config::UartConfig;
use crate::err::Error;
use crate::reg::{Register, RegisterIo, Ucsr0a, Ucsr0b};

bitflags! {
    /// Receive status returned by [`Usart::read_ready`]
    ///
    /// Bit 0 reports a completed reception; the error bits keep their
    /// UCSR0A positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReadStatus: u8 {
        /// New data available
        const READY = 1 << 0;
        /// Parity error on the received frame
        const PARITY_ERROR = Ucsr0a::UPE0.bits();
        /// Receive data overrun
        const OVERRUN_ERROR = Ucsr0a::DOR0.bits();
        /// Frame (stop bit) error
        const FRAME_ERROR = Ucsr0a::FE0.bits();
    }
}

impl ReadStatus {
    const ERRORS: ReadStatus = ReadStatus::PARITY_ERROR
        .union(ReadStatus::OVERRUN_ERROR)
        .union(ReadStatus::FRAME_ERROR);

    /// Any reception error flag is set
    #[inline]
    pub const fn is_error(self) -> bool {
        self.intersects(Self::ERRORS)
    }

    /// Data is ready and no error flag is set
    #[inline]
    pub const fn is_clean(self) -> bool {
        self.bits() == Self::READY.bits()
    }
}

/// USART0 driver over a register backend
pub struct Usart<R: RegisterIo> {
    regs: R,
}

impl<R: RegisterIo> Usart<R> {
    /// Wrap a register backend; the peripheral is untouched until [`init`].
    ///
    /// [`init`]: Usart::init
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Give back the register backend
    pub fn release(self) -> R {
        self.regs
    }

    /// Initialize the USART
    ///
    /// Programs the baud rate generator, clears a pending frame error,
    /// enables the receiver and transmitter and sets the frame format.
    /// Both interrupts are left disabled.
    pub fn init(&mut self, config: &UartConfig) -> Result<BaudSetting, Error> {
        let baud = BaudSetting::compute(config.cpu_hz, config.baud)?;

        self.regs.write(Register::Ubrr0h, baud.high());
        self.regs.write(Register::Ubrr0l, baud.low());

        self.regs.modify(Register::Ucsr0a, |a| {
            let mut a = Ucsr0a::from_bits_retain(a);
            a.set(Ucsr0a::U2X0, baud.double_speed);
            a.remove(Ucsr0a::FE0);
            a.bits()
        });

        let b = Ucsr0b::RXEN0 | Ucsr0b::TXEN0;
        self.regs
            .write(Register::Ucsr0b, b.bits() | config.character_size.ucsr0b_bits());
        self.regs.write(Register::Ucsr0c, config.ucsr0c());

        log_info!(
            "USART0: {} baud (ubrr={}, u2x={}), actual {}",
            config.baud,
            baud.ubrr,
            baud.double_speed,
            baud.actual_baud(config.cpu_hz)
        );
        if !baud.within_tolerance {
            log_warn!(
                "USART0: baud rate {} outside {}% tolerance",
                config.baud,
                super::baud::BAUD_TOLERANCE_PERCENT
            );
        }

        Ok(baud)
    }

    #[inline]
    fn status(&self) -> Ucsr0a {
        Ucsr0a::from_bits_retain(self.regs.read(Register::Ucsr0a))
    }

    /// Receive a single character (non-blocking)
    #[inline]
    pub fn read(&mut self) -> u8 {
        self.regs.read(Register::Udr0)
    }

    /// Transmit a single character (non-blocking)
    #[inline]
    pub fn write(&mut self, data: u8) {
        self.regs.write(Register::Udr0, data);
    }

    /// Transmit data register is empty
    #[inline]
    pub fn write_ready(&self) -> bool {
        self.status().contains(Ucsr0a::UDRE0)
    }

    /// Reception status and error flags
    pub fn read_ready(&self) -> ReadStatus {
        let a = self.status();
        let mut status = ReadStatus::from_bits_truncate(a.bits());
        status.set(ReadStatus::READY, a.contains(Ucsr0a::RXC0));
        status
    }

    /// Transmit a character, waiting for the data register
    ///
    /// A newline is preceded by a carriage return.
    pub fn putc(&mut self, data: u8) {
        if data == b'\n' {
            self.putc(b'\r');
        }
        while !self.write_ready() {
            core::hint::spin_loop();
        }
        self.write(data);
    }

    /// Receive a character, waiting until one arrives
    ///
    /// Error flags are ignored; use [`read_ready`](Usart::read_ready) to
    /// inspect them.
    pub fn getc(&mut self) -> u8 {
        while !self.status().contains(Ucsr0a::RXC0) {
            core::hint::spin_loop();
        }
        self.read()
    }

    #[inline]
    fn set_interrupt(&mut self, irq: Ucsr0b, enabled: bool) {
        self.regs.modify(Register::Ucsr0b, |b| {
            let mut b = Ucsr0b::from_bits_retain(b);
            b.set(irq, enabled);
            b.bits()
        });
    }

    /// Enable TX ready (data register empty) interrupt
    pub fn enable_interrupt_tx_ready(&mut self) {
        self.set_interrupt(Ucsr0b::UDRIE0, true);
    }

    /// Disable TX ready (data register empty) interrupt
    pub fn disable_interrupt_tx_ready(&mut self) {
        self.set_interrupt(Ucsr0b::UDRIE0, false);
    }

    /// Enable RX complete interrupt
    pub fn enable_interrupt_rx_complete(&mut self) {
        self.set_interrupt(Ucsr0b::RXCIE0, true);
    }

    /// Disable RX complete interrupt
    pub fn disable_interrupt_rx_complete(&mut self) {
        self.set_interrupt(Ucsr0b::RXCIE0, false);
    }

    /// Currently enabled interrupt sources (RXCIE0 and UDRIE0 only)
    pub fn enabled_interrupts(&self) -> Ucsr0b {
        Ucsr0b::from_bits_retain(self.regs.read(Register::Ucsr0b))
            & (Ucsr0b::RXCIE0 | Ucsr0b::UDRIE0)
    }
}

impl<R: RegisterIo> SerialPort for Usart<R> {
    #[inline]
    fn read_byte(&mut self) -> u8 {
        self.read()
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.write(byte);
    }

    #[inline]
    fn byte_available(&self) -> bool {
        self.status().contains(Ucsr0a::RXC0)
    }

    #[inline]
    fn ready_to_send(&self) -> bool {
        self.write_ready()
    }

    fn enable_rx_interrupt(&mut self) {
        self.enable_interrupt_rx_complete();
    }

    fn disable_rx_interrupt(&mut self) {
        self.disable_interrupt_rx_complete();
    }

    fn enable_tx_interrupt(&mut self) {
        self.enable_interrupt_tx_ready();
    }

    fn disable_tx_interrupt(&mut self) {
        self.disable_interrupt_tx_ready();
    }
}

impl<R: RegisterIo> fmt::Write for Usart<R> {
    // Blocking; callers must not race the interrupt-driven path
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.putc(b);
        }
        Ok(())
    }
}
