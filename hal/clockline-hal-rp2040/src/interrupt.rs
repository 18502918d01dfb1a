//! Interrupt masking on the current core

use clockline_hal::InterruptGate;

/// Masks interrupts with `PRIMASK` for the duration of a closure
///
/// Only the calling core is affected. The clockless driver never shares
/// its line or counter with the other core, so no spinlock is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreInterruptGate;

impl InterruptGate for CoreInterruptGate {
    #[inline(always)]
    fn with_suppressed<R>(&mut self, f: impl FnOnce() -> R) -> R {
        cortex_m::interrupt::free(|_| f())
    }
}
