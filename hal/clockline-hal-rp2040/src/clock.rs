//! System clock

use clockline_hal::SystemClock;

/// RP2040 system clock
///
/// `embassy_rp::init` already runs the system PLL at the rated 125 MHz,
/// so this only reports the resulting frequency.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rp2040Clock;

impl SystemClock for Rp2040Clock {
    fn run_at_max(&mut self) -> u32 {
        embassy_rp::clocks::clk_sys_freq()
    }
}
