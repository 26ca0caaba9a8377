// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Process-Wide Echo Instance
//!
//! The firmware keeps one [`InterruptEcho`] in a `static`. The foreground
//! installs the port once, before global interrupts are enabled, and never
//! touches it again; from then on only the two interrupt vectors drive it.
//!
//! ```ignore
//! static ECHO: InterruptEcho<Usart<Mmio>, ECHO_BUFFER_SIZE> = InterruptEcho::new();
//!
//! ECHO.install(usart)?;
//! arch::enable_interrupts();
//!
//! // USART_RX vector
//! ECHO.on_receive();
//! // USART_UDRE vector
//! ECHO.on_transmit_ready();
//! ```

use super::machine::{EchoMachine, ReceiveOutcome, TransmitOutcome};
use crate::dev::uart::SerialPort;
use crate::err::Error;
use crate::sync::IrqCell;

struct Installed<P, const N: usize> {
    port: P,
    machine: EchoMachine<N>,
}

/// Echo service owned by interrupt context
pub struct InterruptEcho<P, const N: usize> {
    state: IrqCell<Option<Installed<P, N>>>,
}

impl<P: SerialPort, const N: usize> InterruptEcho<P, N> {
    /// Create an empty slot; nothing runs until [`install`](Self::install)
    pub const fn new() -> Self {
        Self {
            state: IrqCell::new(None),
        }
    }

    /// Hand the port over to interrupt context
    ///
    /// Clears the buffer and arms the RX complete interrupt. There is no
    /// reinitialization path: a second call fails with
    /// [`Error::AlreadyInstalled`] and drops `port`.
    pub fn install(&self, mut port: P) -> Result<(), Error> {
        self.state.with(|state| {
            if state.is_some() {
                return Err(Error::AlreadyInstalled);
            }
            let mut machine = EchoMachine::new();
            machine.start(&mut port);
            *state = Some(Installed { port, machine });
            Ok(())
        })?;

        log_info!("echo: installed, {}-byte buffer", N);
        Ok(())
    }

    /// Receive-complete interrupt entry point
    ///
    /// Returns `None` before installation.
    pub fn on_receive(&self) -> Option<ReceiveOutcome> {
        self.state.with(|state| {
            state
                .as_mut()
                .map(|Installed { port, machine }| machine.on_receive(port))
        })
    }

    /// Transmit-ready interrupt entry point
    ///
    /// Returns `None` before installation.
    pub fn on_transmit_ready(&self) -> Option<TransmitOutcome> {
        self.state.with(|state| {
            state
                .as_mut()
                .map(|Installed { port, machine }| machine.on_transmit_ready(port))
        })
    }

    pub fn is_installed(&self) -> bool {
        self.state.with(|state| state.is_some())
    }

    /// Look at the machine and port, for diagnostics and tests
    pub fn inspect<R>(&self, f: impl FnOnce(&EchoMachine<N>, &P) -> R) -> Option<R> {
        self.state
            .with(|state| state.as_ref().map(|Installed { port, machine }| f(machine, port)))
    }
}

impl<P: SerialPort, const N: usize> Default for InterruptEcho<P, N> {
    fn default() -> Self {
        Self::new()
    }
}
