// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Formatted I/O over the blocking USART
//!
//! Prints a few formatted values, then echoes every key press together with
//! its code.

#![cfg_attr(target_arch = "avr", no_std, no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use core::fmt::Write;

    use atmega_uart::reg::Mmio;
    use atmega_uart::{UartConfig, Usart};
    use panic_halt as _;

    #[no_mangle]
    pub extern "C" fn main() -> ! {
        // SAFETY: the only handle to USART0 in this program.
        let mut uart = Usart::new(unsafe { Mmio::steal() });
        let _ = uart.init(&UartConfig::new());

        let u16_data: u16 = 10;
        let flt_data: f64 = 3.141593;
        let s8_data: i8 = -5;
        let u8_str = "Hello world";

        let _ = writeln!(uart, "u16Data: {} ", u16_data);
        let _ = writeln!(uart, "u16Data(hex): {:#04x} ", u16_data);
        let _ = writeln!(uart, "double: {:08.3} ", flt_data);
        let _ = writeln!(uart, "s8Data: {} ", s8_data);
        let _ = writeln!(uart, "u8str: {:<20} ", u8_str);
        let _ = writeln!(uart, "String stored in flash");
        let _ = writeln!(uart, "writeln!(uart, \"\\nstring = {{:<20}}\", u8_str);");

        loop {
            let _ = writeln!(uart, "\nPress any key...");
            let key = uart.getc();
            let _ = writeln!(uart, "You pressed: {}; Key code: {} ", key as char, key);
        }
    }
}

// The firmware only exists for the AVR part
#[cfg(not(target_arch = "avr"))]
fn main() {}
