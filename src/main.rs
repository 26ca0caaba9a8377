// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! UART Echo Firmware - Main Entry Point
//!
//! Collects received bytes until the echo buffer overflows, then sends the
//! buffered bytes back and starts collecting again. Everything after start-up
//! happens in the USART_RX and USART_UDRE interrupt handlers; the main loop
//! only idles.
//!
//! Build for the part with the `firmware` feature:
//! ```bash
//! cargo +nightly build --release --features firmware \
//!   --target avr-unknown-gnu-atmega328 -Z build-std=core
//! ```

#![cfg_attr(target_arch = "avr", no_std, no_main, feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use atmega_uart::reg::Mmio;
    use atmega_uart::{arch, InterruptEcho, UartConfig, UartLogger, Usart, ECHO_BUFFER_SIZE};
    use log::LevelFilter;
    use panic_halt as _;

    /// Echo service driven by the USART vectors
    static ECHO: InterruptEcho<Usart<Mmio>, ECHO_BUFFER_SIZE> = InterruptEcho::new();

    static LOGGER: UartLogger = UartLogger::new(console_write);

    /// Blocking console output for start-up logging
    fn console_write(s: &str) {
        // SAFETY: only used before the port is handed to interrupt context;
        // logging is switched off before interrupts are enabled.
        let mut uart = Usart::new(unsafe { Mmio::steal() });
        for b in s.bytes() {
            uart.putc(b);
        }
    }

    fn halt() -> ! {
        loop {
            core::hint::spin_loop();
        }
    }

    /// Firmware entry point, called by the C runtime start-up code
    #[no_mangle]
    pub extern "C" fn main() -> ! {
        // SAFETY: the only handle used after start-up.
        let mut usart = Usart::new(unsafe { Mmio::steal() });

        if usart.init(&UartConfig::new()).is_err() {
            halt();
        }

        let _ = atmega_uart::log_init(&LOGGER, LevelFilter::Info);

        if let Err(e) = ECHO.install(usart) {
            log::error!("echo: {}", e);
            halt();
        }

        // The data register belongs to the echo service from here on
        log::set_max_level(LevelFilter::Off);
        arch::enable_interrupts();

        loop {
            core::hint::spin_loop();
        }
    }

    /// USART0 RX complete
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_18() {
        ECHO.on_receive();
    }

    /// USART0 data register empty
    #[no_mangle]
    pub unsafe extern "avr-interrupt" fn __vector_19() {
        ECHO.on_transmit_ready();
    }
}

// The firmware only exists for the AVR part
#[cfg(not(target_arch = "avr"))]
fn main() {}
