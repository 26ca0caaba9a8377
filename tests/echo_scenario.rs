// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! End-to-end echo through the USART driver and a simulated register file.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use atmega_uart::reg::{Register, RegisterIo, Ucsr0a, Ucsr0b};
use atmega_uart::{
    InterruptEcho, Mode, ReceiveOutcome, TransmitOutcome, UartConfig, Usart, ECHO_BUFFER_SIZE,
};

/// Serial line as seen from the test: bytes to deliver and bytes sent
#[derive(Default)]
struct Wire {
    rx: RefCell<VecDeque<u8>>,
    tx: RefCell<Vec<u8>>,
}

/// USART0 register file: UDR0 reads pop `wire.rx`, UDR0 writes land in
/// `wire.tx`.
#[derive(Default)]
struct SimRegs {
    file: [u8; 8],
    wire: Rc<Wire>,
}

impl SimRegs {
    fn slot(reg: Register) -> usize {
        reg.addr() - Register::Ucsr0a.addr()
    }
}

impl RegisterIo for SimRegs {
    fn read(&self, reg: Register) -> u8 {
        match reg {
            Register::Udr0 => self.wire.rx.borrow_mut().pop_front().unwrap_or(0),
            Register::Ucsr0a => {
                let mut a = Ucsr0a::from_bits_retain(self.file[Self::slot(reg)]);
                a.set(Ucsr0a::RXC0, !self.wire.rx.borrow().is_empty());
                a.insert(Ucsr0a::UDRE0);
                a.bits()
            }
            _ => self.file[Self::slot(reg)],
        }
    }

    fn write(&mut self, reg: Register, value: u8) {
        match reg {
            Register::Udr0 => self.wire.tx.borrow_mut().push(value),
            _ => self.file[Self::slot(reg)] = value,
        }
    }
}

type Echo = InterruptEcho<Usart<SimRegs>, ECHO_BUFFER_SIZE>;

fn installed() -> (Echo, Rc<Wire>) {
    let regs = SimRegs::default();
    let wire = Rc::clone(&regs.wire);
    let mut usart = Usart::new(regs);
    usart.init(&UartConfig::new()).unwrap();
    let echo = Echo::new();
    echo.install(usart).unwrap();
    (echo, wire)
}

/// Deliver one byte and run the RX complete handler
fn receive(echo: &Echo, wire: &Wire, byte: u8) -> ReceiveOutcome {
    wire.rx.borrow_mut().push_back(byte);
    echo.on_receive().unwrap()
}

fn interrupts(echo: &Echo) -> Ucsr0b {
    echo.inspect(|_, usart| usart.enabled_interrupts()).unwrap()
}

fn assert_lockstep(echo: &Echo) {
    let (mode, irqs) = echo
        .inspect(|m, usart| (m.mode(), usart.enabled_interrupts()))
        .unwrap();
    match mode {
        Mode::Receiving => assert_eq!(irqs, Ucsr0b::RXCIE0),
        Mode::Transmitting => assert_eq!(irqs, Ucsr0b::UDRIE0),
    }
}

#[test]
fn install_arms_receive_interrupt_only() {
    let (echo, _wire) = installed();
    assert_eq!(interrupts(&echo), Ucsr0b::RXCIE0);
    assert_lockstep(&echo);
}

#[test]
fn accumulate_overflow_drain_resume() {
    let (echo, wire) = installed();

    for b in b"ABCD" {
        assert_eq!(receive(&echo, &wire, *b), ReceiveOutcome::Stored);
        assert_lockstep(&echo);
    }
    assert_eq!(
        echo.inspect(|m, _| (m.mode(), m.buffered().to_vec())),
        Some((Mode::Receiving, b"ABCD".to_vec()))
    );

    assert_eq!(receive(&echo, &wire, b'E'), ReceiveOutcome::Overflow(b'E'));
    assert_eq!(
        echo.inspect(|m, _| (m.mode(), m.drain_cursor())),
        Some((Mode::Transmitting, 0))
    );
    assert_eq!(interrupts(&echo), Ucsr0b::UDRIE0);

    for b in b"ABCD" {
        assert_eq!(echo.on_transmit_ready(), Some(TransmitOutcome::Sent(*b)));
        assert_lockstep(&echo);
    }
    assert_eq!(*wire.tx.borrow(), b"ABCD");

    assert_eq!(echo.on_transmit_ready(), Some(TransmitOutcome::Drained));
    assert_eq!(
        echo.inspect(|m, _| (m.mode(), m.buffered().len(), m.overflow_count())),
        Some((Mode::Receiving, 0, 1))
    );
    assert_eq!(interrupts(&echo), Ucsr0b::RXCIE0);
}

#[test]
fn overflow_byte_is_never_transmitted() {
    let (echo, wire) = installed();

    for b in b"ABCDE12345" {
        receive(&echo, &wire, *b);
        while let Some(TransmitOutcome::Sent(_)) = echo.on_transmit_ready() {}
    }

    assert_eq!(*wire.tx.borrow(), b"ABCD1234");
    assert_eq!(echo.inspect(|m, _| m.overflow_count()), Some(2));
}
