//! Global interrupt masking
//!
//! The masked region is a closure, so interrupts are restored on every
//! exit path and the masked region is visible at the call site.

/// Scoped critical section
pub trait InterruptGate {
    /// Run `f` with interrupts suppressed
    fn with_suppressed<R>(&mut self, f: impl FnOnce() -> R) -> R;
}
