//! SysTick tick counter
//!
//! The Cortex-M0+ SysTick is a 24-bit down-counter clocked from the core
//! clock. Embassy's RP2040 time driver runs on the TIMER peripheral, so
//! SysTick is free to serve as the clockless tick source. It runs with its
//! interrupt disabled: the counter only has to be read, never serviced.

use clockline_hal::DownCounter;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;

/// Full 24-bit reload value
pub const SYSTICK_RELOAD: u32 = 0x00FF_FFFF;

/// SysTick as a free-running [`DownCounter`]
pub struct SysTickCounter {
    syst: SYST,
}

impl SysTickCounter {
    /// Take ownership of SysTick
    ///
    /// The counter is left as-is; it is started by
    /// [`DownCounter::start_free_running`] if needed.
    pub fn new(syst: SYST) -> Self {
        Self { syst }
    }
}

impl DownCounter for SysTickCounter {
    const BITS: u32 = 24;

    #[inline(always)]
    fn count(&self) -> u32 {
        SYST::get_current()
    }

    fn is_free_running(&mut self) -> bool {
        self.syst.is_counter_enabled()
            && SYST::get_reload() == SYSTICK_RELOAD
            && self.syst.get_clock_source() == SystClkSource::Core
    }

    fn start_free_running(&mut self) {
        self.syst.disable_counter();
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload(SYSTICK_RELOAD);
        self.syst.clear_current();
        self.syst.disable_interrupt();
        self.syst.enable_counter();

        #[cfg(feature = "defmt")]
        defmt::debug!("SysTick free-running, reload {=u32:#x}", SYSTICK_RELOAD);
    }
}
