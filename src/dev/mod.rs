// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Device Drivers
//!
//! Only the USART0 serial peripheral is driven by this crate.

// UART driver
pub mod uart;

// Re-exports
pub use uart::*;
