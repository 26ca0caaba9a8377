// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Baud Rate Divisor
//!
//! Computes UBRR0 the way avr-libc's `<util/setbaud.h>` does: normal speed
//! first, double speed (U2X0) when the normal-speed rate misses the
//! requested one by more than [`BAUD_TOLERANCE_PERCENT`].

use crate::err::Error;

/// Accepted deviation from the requested baud rate, in percent
pub const BAUD_TOLERANCE_PERCENT: u64 = 2;

/// Largest value the 12-bit UBRR0 register holds
pub const UBRR_MAX: u16 = 0x0FFF;

/// Programmed baud rate generator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaudSetting {
    /// UBRR0 divisor
    pub ubrr: u16,
    /// U2X0 set
    pub double_speed: bool,
    /// Actual rate is within the tolerance of the requested one
    pub within_tolerance: bool,
}

impl BaudSetting {
    /// Compute the divisor for `baud` at `cpu_hz`
    ///
    /// Out-of-tolerance rates are still returned (double speed, flagged);
    /// only divisors that cannot be programmed at all are errors.
    pub fn compute(cpu_hz: u32, baud: u32) -> Result<Self, Error> {
        if baud == 0 {
            return Err(Error::BaudUnreachable { baud });
        }

        let normal = divisor(cpu_hz, baud, 16);
        if let Some(ubrr) = normal {
            if within_tolerance(cpu_hz, baud, 16, ubrr) {
                return Ok(Self {
                    ubrr,
                    double_speed: false,
                    within_tolerance: true,
                });
            }
        }

        let ubrr = divisor(cpu_hz, baud, 8).ok_or(Error::BaudUnreachable { baud })?;
        Ok(Self {
            ubrr,
            double_speed: true,
            within_tolerance: within_tolerance(cpu_hz, baud, 8, ubrr),
        })
    }

    /// Baud rate the hardware actually produces
    pub fn actual_baud(&self, cpu_hz: u32) -> u32 {
        let samples: u64 = if self.double_speed { 8 } else { 16 };
        (u64::from(cpu_hz) / (samples * (u64::from(self.ubrr) + 1))) as u32
    }

    /// UBRR0H value
    #[inline]
    pub const fn high(&self) -> u8 {
        (self.ubrr >> 8) as u8
    }

    /// UBRR0L value
    #[inline]
    pub const fn low(&self) -> u8 {
        self.ubrr as u8
    }
}

/// Rounded divisor for `samples` clocks per bit
fn divisor(cpu_hz: u32, baud: u32, samples: u64) -> Option<u16> {
    let cpu = u64::from(cpu_hz);
    let baud = u64::from(baud);
    let rounded = (cpu + samples / 2 * baud) / (samples * baud);
    let ubrr = rounded.checked_sub(1)?;
    if ubrr > u64::from(UBRR_MAX) {
        return None;
    }
    Some(ubrr as u16)
}

fn within_tolerance(cpu_hz: u32, baud: u32, samples: u64, ubrr: u16) -> bool {
    let cpu = u64::from(cpu_hz);
    let baud = u64::from(baud);
    let clocks = samples * (u64::from(ubrr) + 1);
    let too_fast = 100 * cpu > clocks * (100 * baud + baud * BAUD_TOLERANCE_PERCENT);
    let too_slow = 100 * cpu < clocks * (100 * baud - baud * BAUD_TOLERANCE_PERCENT);
    !(too_fast || too_slow)
}
