//! System clock control

/// Core clock configuration
///
/// Tick timings are absolute counts of core clock cycles, so the clock
/// must run at a known frequency before the first transmission.
pub trait SystemClock {
    /// Run the core clock at the platform's maximum supported frequency
    ///
    /// Returns the resulting frequency in Hz.
    fn run_at_max(&mut self) -> u32;
}
