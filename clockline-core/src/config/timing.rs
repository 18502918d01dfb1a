//! Bit timing
//!
//! Every bit starts with a high pulse and ends low:
//!
//! ```text
//!        ┌──── T1 ────┬──── T2 ────┐
//!  "1"   │            │            │            │
//!  ──────┘            │            └──── T3 ────┘
//!        ┌──── T1 ────┐
//!  "0"   │            │                         │
//!  ──────┘            └──────── T2 + T3 ────────┘
//! ```

use crate::tick::Tick;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Per-bit tick counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingSpec {
    /// High time shared by both bit values
    pub t1: u32,
    /// Extra high time of a `1` bit
    pub t2: u32,
    /// Low tail of a `1` bit
    pub t3: u32,
}

impl TimingSpec {
    /// WS2812 timing in nanoseconds (800 kHz)
    pub const WS2812_NS: [u32; 3] = [250, 625, 375];

    /// SK6812 timing in nanoseconds
    pub const SK6812_NS: [u32; 3] = [300, 300, 600];

    /// Create a timing spec
    ///
    /// Fails if the bit period is zero or overflows `u32`.
    pub const fn new(t1: u32, t2: u32, t3: u32) -> Result<Self, ConfigError> {
        match t1.checked_add(t2) {
            Some(high) => match high.checked_add(t3) {
                Some(0) => Err(ConfigError::ZeroPeriod),
                Some(_) => Ok(Self { t1, t2, t3 }),
                None => Err(ConfigError::PeriodOverflow),
            },
            None => Err(ConfigError::PeriodOverflow),
        }
    }

    /// Create a timing spec from nanosecond durations
    ///
    /// Each phase is rounded to the nearest tick of a counter running at
    /// `clock_hz`.
    pub const fn from_nanos(
        t1_ns: u32,
        t2_ns: u32,
        t3_ns: u32,
        clock_hz: u32,
    ) -> Result<Self, ConfigError> {
        if clock_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Self::new(
            ns_to_ticks(t1_ns, clock_hz),
            ns_to_ticks(t2_ns, clock_hz),
            ns_to_ticks(t3_ns, clock_hz),
        )
    }

    /// WS2812 timing for a counter running at `clock_hz`
    pub const fn ws2812(clock_hz: u32) -> Result<Self, ConfigError> {
        let [t1, t2, t3] = Self::WS2812_NS;
        Self::from_nanos(t1, t2, t3, clock_hz)
    }

    /// SK6812 timing for a counter running at `clock_hz`
    pub const fn sk6812(clock_hz: u32) -> Result<Self, ConfigError> {
        let [t1, t2, t3] = Self::SK6812_NS;
        Self::from_nanos(t1, t2, t3, clock_hz)
    }

    /// Full bit period, identical for both bit values
    pub const fn period(&self) -> u32 {
        self.t1.saturating_add(self.t2).saturating_add(self.t3)
    }

    /// High time of a bit
    pub const fn high_time(&self, one: bool) -> u32 {
        if one {
            self.t1 + self.t2
        } else {
            self.t1
        }
    }

    /// Remaining period at which the line drops low
    pub const fn low_tail(&self, one: bool) -> u32 {
        if one {
            self.t3
        } else {
            self.t2 + self.t3
        }
    }

    /// Check that one bit period fits a `BITS`-wide counter
    ///
    /// Deadlines are compared by modular distance, so a period must stay
    /// inside half the counter window.
    pub const fn validate_for<const BITS: u32>(&self) -> Result<(), ConfigError> {
        let period = match self.t1.checked_add(self.t2) {
            Some(high) => match high.checked_add(self.t3) {
                Some(period) => period,
                None => return Err(ConfigError::PeriodOverflow),
            },
            None => return Err(ConfigError::PeriodOverflow),
        };
        if period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if period > Tick::<BITS>::HALF_WINDOW {
            return Err(ConfigError::PeriodExceedsCounter {
                period,
                max: Tick::<BITS>::HALF_WINDOW,
            });
        }
        Ok(())
    }
}

/// Convert nanoseconds to ticks, rounding
const fn ns_to_ticks(ns: u32, clock_hz: u32) -> u32 {
    ((ns as u64 * clock_hz as u64 + 500_000_000) / 1_000_000_000) as u32
}
