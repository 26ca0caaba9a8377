// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! AVR Global Interrupt Control
//!
//! The I bit of SREG gates every interrupt on the part. With the
//! `firmware` feature this module also provides the single-core
//! `critical-section` implementation: save whether interrupts were on,
//! `cli`, and `sei` again on release only if they were.

#[cfg(target_arch = "avr")]
use core::arch::asm;

/// Data-space address of SREG
pub const SREG: usize = 0x5F;

/// Global interrupt enable bit in SREG
pub const SREG_I: u8 = 1 << 7;

/// Enable interrupts (`sei`)
#[cfg(target_arch = "avr")]
#[inline(always)]
pub fn enable_interrupts() {
    // SAFETY: only sets the I flag; no `nomem` so memory accesses are not
    // moved across it.
    unsafe { asm!("sei", options(nostack)) }
}

/// Disable interrupts (`cli`)
#[cfg(target_arch = "avr")]
#[inline(always)]
pub fn disable_interrupts() {
    // SAFETY: as above.
    unsafe { asm!("cli", options(nostack)) }
}

/// Global interrupts are currently enabled
#[cfg(target_arch = "avr")]
#[inline(always)]
pub fn interrupts_enabled() -> bool {
    // SAFETY: SREG is always mapped on AVR.
    let sreg = unsafe { core::ptr::read_volatile(SREG as *const u8) };
    sreg & SREG_I != 0
}

#[cfg(all(target_arch = "avr", feature = "firmware"))]
mod critical {
    struct SingleCoreCriticalSection;
    critical_section::set_impl!(SingleCoreCriticalSection);

    unsafe impl critical_section::Impl for SingleCoreCriticalSection {
        unsafe fn acquire() -> critical_section::RawRestoreState {
            let was_enabled = super::interrupts_enabled();
            super::disable_interrupts();
            was_enabled
        }

        unsafe fn release(was_enabled: critical_section::RawRestoreState) {
            if was_enabled {
                super::enable_interrupts();
            }
        }
    }
}
