//! Refresh-rate governor
//!
//! Clockless LEDs latch their data once the line has been idle for a
//! minimum time. The governor busy-waits out that gap before the next
//! frame starts.

use crate::tick::{Tick, TickSource};

/// Highest frame rate the protocol's devices tolerate (Hz)
pub const MAX_REFRESH_RATE_HZ: u16 = 400;

/// Minimum-gap enforcement between frames
///
/// Elapsed time is measured with the same wrapping counter as bit timing.
/// After more than one full counter wrap the measured gap is ambiguous,
/// which can cost at most one extra gap of waiting.
#[derive(Debug, Clone)]
pub struct RefreshGovernor<const BITS: u32> {
    /// Minimum gap in ticks
    min_gap_ticks: u32,
    /// Completion time of the last frame
    last_completion: Option<Tick<BITS>>,
}

impl<const BITS: u32> RefreshGovernor<BITS> {
    /// Create a governor with the given minimum gap in ticks
    pub const fn new(min_gap_ticks: u32) -> Self {
        Self {
            min_gap_ticks,
            last_completion: None,
        }
    }

    /// Minimum gap in ticks
    pub fn min_gap_ticks(&self) -> u32 {
        self.min_gap_ticks
    }

    /// Completion time of the last frame, if any
    pub fn last_completion(&self) -> Option<Tick<BITS>> {
        self.last_completion
    }

    /// Busy-wait until the minimum gap has passed since the last frame
    ///
    /// Returns immediately before the first frame.
    pub fn wait_for_minimum_gap<T: TickSource<BITS>>(&self, ticks: &mut T) {
        let Some(last) = self.last_completion else {
            return;
        };
        while ticks.now().since(last) < self.min_gap_ticks {
            core::hint::spin_loop();
        }
    }

    /// Record the current tick as the end of a frame
    pub fn mark_completion<T: TickSource<BITS>>(&mut self, ticks: &mut T) {
        self.last_completion = Some(ticks.now());
    }
}
