// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Accumulate-then-Echo State Machine
//!
//! Received bytes are collected until the buffer is full. The next receive
//! interrupt finds no room: that byte is dropped and the machine switches
//! to draining, where every data-register-empty interrupt sends one
//! buffered byte. When the drain cursor reaches the end the buffer is
//! cleared and receiving resumes.
//!
//! # Overflow policy
//!
//! The byte that triggers the switch is discarded; earlier bytes are kept
//! and echoed. One byte is therefore lost per full cycle. This is counted
//! in [`EchoMachine::overflow_count`] and never retried.
//!
//! # Interrupt sources
//!
//! [`Mode`] is the source of truth. Exactly one of RX complete / TX ready
//! is enabled and it always matches the mode; each transition disables the
//! old source and enables the new one back to back before the handler
//! returns.

use super::buffer::FixedBuffer;
use crate::dev::uart::SerialPort;
use crate::err::BufferError;

/// Which interrupt source is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// RX complete enabled, TX ready disabled
    Receiving,
    /// TX ready enabled, RX complete disabled
    Transmitting,
}

/// Result of a receive-complete interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Byte appended to the buffer
    Stored,
    /// Buffer was full: this byte was dropped and draining started
    Overflow(u8),
    /// Not in receiving mode; the byte was read to clear the flag and dropped
    Ignored(u8),
}

/// Result of a transmit-ready interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitOutcome {
    /// Byte handed to the transmitter
    Sent(u8),
    /// All buffered bytes sent; buffer cleared, receiving again
    Drained,
    /// Not in transmitting mode; nothing sent
    Ignored,
}

/// RX-accumulate / TX-drain state machine
pub struct EchoMachine<const N: usize> {
    buffer: FixedBuffer<N>,
    mode: Mode,
    drain_cursor: usize,
    overflow_count: u32,
}

impl<const N: usize> EchoMachine<N> {
    /// Create a machine in receiving mode with an empty buffer
    pub const fn new() -> Self {
        Self {
            buffer: FixedBuffer::new(),
            mode: Mode::Receiving,
            drain_cursor: 0,
            overflow_count: 0,
        }
    }

    /// Arm the port for receiving
    ///
    /// Clears the buffer and leaves only the RX complete interrupt enabled.
    /// Called once from the foreground before global interrupts are on.
    pub fn start<P: SerialPort>(&mut self, port: &mut P) {
        self.buffer.clear();
        self.drain_cursor = 0;
        self.mode = Mode::Receiving;
        port.disable_tx_interrupt();
        port.enable_rx_interrupt();
    }

    /// Receive-complete interrupt
    pub fn on_receive<P: SerialPort>(&mut self, port: &mut P) -> ReceiveOutcome {
        let byte = port.read_byte();

        if self.mode != Mode::Receiving {
            return ReceiveOutcome::Ignored(byte);
        }

        match self.buffer.write(byte) {
            Ok(()) => ReceiveOutcome::Stored,
            Err(BufferError::Full | BufferError::OutOfRange) => {
                self.overflow_count = self.overflow_count.wrapping_add(1);
                self.drain_cursor = 0;
                self.mode = Mode::Transmitting;
                port.disable_rx_interrupt();
                port.enable_tx_interrupt();
                log_trace!("echo: buffer full, dropped {:#04x}, draining", byte);
                ReceiveOutcome::Overflow(byte)
            }
        }
    }

    /// Transmit-ready interrupt
    pub fn on_transmit_ready<P: SerialPort>(&mut self, port: &mut P) -> TransmitOutcome {
        if self.mode != Mode::Transmitting {
            return TransmitOutcome::Ignored;
        }

        match self.buffer.read(self.drain_cursor) {
            Ok(byte) => {
                port.write_byte(byte);
                self.drain_cursor += 1;
                TransmitOutcome::Sent(byte)
            }
            Err(_) => {
                self.buffer.clear();
                self.drain_cursor = 0;
                self.mode = Mode::Receiving;
                port.disable_tx_interrupt();
                port.enable_rx_interrupt();
                log_trace!("echo: drained, receiving");
                TransmitOutcome::Drained
            }
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Next buffer index to transmit while draining
    #[inline]
    pub fn drain_cursor(&self) -> usize {
        self.drain_cursor
    }

    /// Bytes currently held
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Bytes dropped on overflow since start (wrapping)
    #[inline]
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }
}

impl<const N: usize> Default for EchoMachine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::vec::Vec;

    use crate::dev::uart::SerialPort;

    /// Port that replays scripted input and records everything else
    #[derive(Default)]
    pub struct MockPort {
        pub incoming: VecDeque<u8>,
        pub sent: Vec<u8>,
        pub rx_enabled: bool,
        pub tx_enabled: bool,
        /// Toggle calls in order, e.g. "rx-" / "tx+"
        pub toggles: Vec<&'static str>,
    }

    impl MockPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn exactly_one_enabled(&self) -> bool {
            self.rx_enabled != self.tx_enabled
        }
    }

    impl SerialPort for MockPort {
        fn read_byte(&mut self) -> u8 {
            self.incoming.pop_front().unwrap_or(0)
        }

        fn write_byte(&mut self, byte: u8) {
            self.sent.push(byte);
        }

        fn byte_available(&self) -> bool {
            !self.incoming.is_empty()
        }

        fn ready_to_send(&self) -> bool {
            true
        }

        fn enable_rx_interrupt(&mut self) {
            self.rx_enabled = true;
            self.toggles.push("rx+");
        }

        fn disable_rx_interrupt(&mut self) {
            self.rx_enabled = false;
            self.toggles.push("rx-");
        }

        fn enable_tx_interrupt(&mut self) {
            self.tx_enabled = true;
            self.toggles.push("tx+");
        }

        fn disable_tx_interrupt(&mut self) {
            self.tx_enabled = false;
            self.toggles.push("tx-");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPort;
    use super::*;

    fn started() -> (EchoMachine<4>, MockPort) {
        let mut machine = EchoMachine::<4>::new();
        let mut port = MockPort::new();
        port.tx_enabled = true;
        machine.start(&mut port);
        (machine, port)
    }

    fn receive(machine: &mut EchoMachine<4>, port: &mut MockPort, byte: u8) -> ReceiveOutcome {
        port.incoming.push_back(byte);
        machine.on_receive(port)
    }

    #[test]
    fn test_start_arms_receive_only() {
        let (machine, port) = started();
        assert_eq!(machine.mode(), Mode::Receiving);
        assert!(machine.buffered().is_empty());
        assert!(port.rx_enabled);
        assert!(!port.tx_enabled);
        assert_eq!(port.toggles, ["tx-", "rx+"]);
    }

    #[test]
    fn test_fill_stays_receiving() {
        let (mut machine, mut port) = started();
        for b in b"ABCD" {
            assert_eq!(receive(&mut machine, &mut port, *b), ReceiveOutcome::Stored);
            assert_eq!(machine.mode(), Mode::Receiving);
            assert!(port.exactly_one_enabled());
        }
        assert_eq!(machine.buffered(), b"ABCD");
        assert!(port.sent.is_empty());
    }

    #[test]
    fn test_overflow_drops_byte_and_switches() {
        let (mut machine, mut port) = started();
        for b in b"ABCD" {
            receive(&mut machine, &mut port, *b);
        }
        port.toggles.clear();

        assert_eq!(receive(&mut machine, &mut port, b'E'), ReceiveOutcome::Overflow(b'E'));
        assert_eq!(machine.mode(), Mode::Transmitting);
        assert_eq!(machine.drain_cursor(), 0);
        assert_eq!(machine.buffered(), b"ABCD");
        assert_eq!(machine.overflow_count(), 1);
        assert_eq!(port.toggles, ["rx-", "tx+"]);
        assert!(!port.rx_enabled && port.tx_enabled);
    }

    #[test]
    fn test_drain_sends_in_order_then_resumes() {
        let (mut machine, mut port) = started();
        for b in b"ABCDE" {
            receive(&mut machine, &mut port, *b);
        }
        port.toggles.clear();

        for (i, b) in b"ABCD".iter().enumerate() {
            assert_eq!(machine.on_transmit_ready(&mut port), TransmitOutcome::Sent(*b));
            assert_eq!(machine.drain_cursor(), i + 1);
            assert_eq!(machine.mode(), Mode::Transmitting);
            assert!(port.exactly_one_enabled());
        }
        assert_eq!(port.sent, b"ABCD");

        assert_eq!(machine.on_transmit_ready(&mut port), TransmitOutcome::Drained);
        assert_eq!(machine.mode(), Mode::Receiving);
        assert!(machine.buffered().is_empty());
        assert_eq!(port.toggles, ["tx-", "rx+"]);
        assert!(port.rx_enabled && !port.tx_enabled);
        // The overflow byte is never echoed
        assert_eq!(port.sent, b"ABCD");
    }

    #[test]
    fn test_second_cycle_after_drain() {
        let (mut machine, mut port) = started();
        for b in b"ABCDE" {
            receive(&mut machine, &mut port, *b);
        }
        while machine.on_transmit_ready(&mut port) != TransmitOutcome::Drained {}

        for b in b"wxyz!" {
            receive(&mut machine, &mut port, *b);
        }
        while machine.on_transmit_ready(&mut port) != TransmitOutcome::Drained {}

        assert_eq!(port.sent, b"ABCDwxyz");
        assert_eq!(machine.overflow_count(), 2);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let (mut machine, mut port) = started();
        receive(&mut machine, &mut port, b'A');
        assert_eq!(machine.on_transmit_ready(&mut port), TransmitOutcome::Ignored);
        assert!(port.sent.is_empty());
        assert_eq!(machine.buffered(), b"A");

        for b in b"BCDE" {
            receive(&mut machine, &mut port, *b);
        }
        assert_eq!(receive(&mut machine, &mut port, b'F'), ReceiveOutcome::Ignored(b'F'));
        assert_eq!(machine.buffered(), b"ABCD");
        assert_eq!(machine.overflow_count(), 1);
    }
}
