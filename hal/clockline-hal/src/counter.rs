//! Free-running hardware down-counter
//!
//! Timers such as the Cortex-M SysTick count down from a reload value and
//! wrap. The core turns that into a virtual up-counter, so this trait only
//! exposes the raw register.

/// Hardware down-counter of fixed bit width
pub trait DownCounter {
    /// Width of the counter register in bits
    const BITS: u32;

    /// Read the raw counter value
    ///
    /// The value counts down and lies in `[0, 2^BITS)`.
    fn count(&self) -> u32;

    /// Check if the counter is running with the full-width reload value
    fn is_free_running(&mut self) -> bool;

    /// Program the full-width reload value and start counting
    ///
    /// Must not be called while the counter is already free-running:
    /// restarting introduces a discontinuity in elapsed time.
    fn start_free_running(&mut self);
}
