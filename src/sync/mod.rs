// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Synchronization Primitives
//!
//! State touched from interrupt handlers lives behind [`IrqCell`], which
//! only hands out access inside a critical section. On the single-core
//! target that means with global interrupts masked, so handlers and the
//! foreground never observe each other mid-update.

pub mod irq;

// Re-exports
pub use irq::*;
