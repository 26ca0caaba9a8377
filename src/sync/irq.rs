// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Interrupt-Shared Cell

use core::cell::RefCell;

use critical_section::Mutex;

/// Mutable state shared with interrupt context
///
/// Every access goes through [`critical_section::with`], which acts as a
/// compiler barrier: loads and stores cannot be cached or reordered across
/// the boundary of an interrupt handler.
pub struct IrqCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> IrqCell<T> {
    /// Create a new cell
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| {
            let mut guard = self.inner.borrow_ref_mut(cs);
            f(&mut guard)
        })
    }

    /// Replace the value, returning the old one
    pub fn replace(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.replace(cs, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COUNTER: IrqCell<u32> = IrqCell::new(0);

    #[test]
    fn test_with_mutates_in_place() {
        let cell = IrqCell::new([0u8; 4]);
        cell.with(|buf| buf[1] = 7);
        assert_eq!(cell.with(|buf| *buf), [0, 7, 0, 0]);
    }

    #[test]
    fn test_static_cell_across_threads() {
        let handles: std::vec::Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    for _ in 0..1000 {
                        COUNTER.with(|c| *c += 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(COUNTER.with(|c| *c), 4000);
    }

    #[test]
    fn test_replace() {
        let cell = IrqCell::new(Some(1u8));
        assert_eq!(cell.replace(None), Some(1));
        assert_eq!(cell.with(|v| *v), None);
    }
}
