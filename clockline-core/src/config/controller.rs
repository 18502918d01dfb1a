//! Controller configuration
//!
//! The full configuration surface of a clockless controller: data pin,
//! bit timing, channel order, protocol variant and interrupt policy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::TimingSpec;
use crate::tick::Tick;

/// Default minimum idle gap between frames (µs)
pub const DEFAULT_MIN_WAIT_US: u32 = 50;

/// Maximum extra bits appended to each byte
pub const MAX_EXTRA_BITS: u8 = 8;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// T1 + T2 + T3 is zero
    ZeroPeriod,
    /// T1 + T2 + T3 overflows `u32`
    PeriodOverflow,
    /// Bit period does not fit the tick counter
    PeriodExceedsCounter { period: u32, max: u32 },
    /// More than [`MAX_EXTRA_BITS`] extra bits per byte
    TooManyExtraBits(u8),
    /// Tick rate is zero
    ZeroTickRate,
    /// Minimum frame gap does not fit the tick counter
    GapExceedsCounter,
    /// Interrupt budget leaves no room for overrun detection
    BudgetExceedsGap { budget_us: u32, gap_us: u32 },
    /// Core clock does not produce the configured tick rate
    ClockMismatch { expected_ticks_per_us: u32, actual_hz: u32 },
}

/// Order in which a pixel's color channels go on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ChannelOrder {
    /// Indices into `[r, g, b]` in transmission order
    pub const fn indices(self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Rbg => [0, 2, 1],
            ChannelOrder::Grb => [1, 0, 2],
            ChannelOrder::Gbr => [1, 2, 0],
            ChannelOrder::Brg => [2, 0, 1],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }
}

/// Interrupt handling during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterruptPolicy {
    /// Interrupts stay masked for the whole frame
    #[default]
    Suppressed,
    /// Interrupts may run between pixels
    ///
    /// A pixel is abandoned when the previous deadline has been missed by
    /// more than `(min_wait_us - interrupt_budget_us)` microseconds.
    AllowBetweenPixels {
        /// Longest interrupt handler run time expected between pixels (µs)
        interrupt_budget_us: u32,
    },
}

/// Clockless controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Logical data pin identity
    pub pin: u8,
    /// Bit timing in ticks
    pub timing: TimingSpec,
    /// Channel order on the wire
    pub order: ChannelOrder,
    /// Zero bits appended to every byte
    pub extra_bits: u8,
    /// Drive the line inverted (logical high = pin low)
    pub inverted: bool,
    /// Minimum idle time between frames (µs)
    pub min_wait_us: u32,
    /// Constant level of a 4th (white) channel, if the strip has one
    pub white: Option<u8>,
    /// Interrupt policy during transmission
    pub interrupts: InterruptPolicy,
    /// Tick counter rate (ticks per µs)
    pub ticks_per_us: u32,
}

impl ControllerConfig {
    /// Create a config with default variant settings
    ///
    /// RGB order, no extra bits, no white channel, interrupts suppressed
    /// and a 50 µs frame gap.
    pub const fn new(pin: u8, timing: TimingSpec, ticks_per_us: u32) -> Self {
        Self {
            pin,
            timing,
            order: ChannelOrder::Rgb,
            extra_bits: 0,
            inverted: false,
            min_wait_us: DEFAULT_MIN_WAIT_US,
            white: None,
            interrupts: InterruptPolicy::Suppressed,
            ticks_per_us,
        }
    }

    /// Bits sent per channel byte
    pub const fn bits_per_byte(&self) -> u32 {
        8 + self.extra_bits as u32
    }

    /// Bytes sent per pixel
    pub const fn bytes_per_pixel(&self) -> u32 {
        if self.white.is_some() {
            4
        } else {
            3
        }
    }

    /// Minimum frame gap in ticks
    pub const fn min_wait_ticks(&self) -> u32 {
        self.min_wait_us.saturating_mul(self.ticks_per_us)
    }

    /// Deadline overrun that aborts a pass, if overrun detection is enabled
    pub const fn overrun_threshold_ticks(&self) -> Option<u32> {
        match self.interrupts {
            InterruptPolicy::Suppressed => None,
            InterruptPolicy::AllowBetweenPixels { interrupt_budget_us } => Some(
                self.min_wait_us
                    .saturating_sub(interrupt_budget_us)
                    .saturating_mul(self.ticks_per_us),
            ),
        }
    }

    /// Check the config against a `BITS`-wide tick counter
    pub const fn validate<const BITS: u32>(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.timing.validate_for::<BITS>() {
            return Err(e);
        }
        if self.extra_bits > MAX_EXTRA_BITS {
            return Err(ConfigError::TooManyExtraBits(self.extra_bits));
        }
        if self.ticks_per_us == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        match self.min_wait_us.checked_mul(self.ticks_per_us) {
            Some(ticks) if ticks <= Tick::<BITS>::HALF_WINDOW => {}
            _ => return Err(ConfigError::GapExceedsCounter),
        }
        if let InterruptPolicy::AllowBetweenPixels { interrupt_budget_us } = self.interrupts {
            if interrupt_budget_us >= self.min_wait_us {
                return Err(ConfigError::BudgetExceedsGap {
                    budget_us: interrupt_budget_us,
                    gap_us: self.min_wait_us,
                });
            }
        }
        Ok(())
    }

    /// Check that a core clock of `clock_hz` produces the configured tick rate
    pub const fn check_clock(&self, clock_hz: u32) -> Result<(), ConfigError> {
        if clock_hz / 1_000_000 != self.ticks_per_us {
            return Err(ConfigError::ClockMismatch {
                expected_ticks_per_us: self.ticks_per_us,
                actual_hz: clock_hz,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws2812_48mhz() -> ControllerConfig {
        ControllerConfig::new(16, TimingSpec::ws2812(48_000_000).unwrap(), 48)
    }

    #[test]
    fn test_defaults() {
        let config = ws2812_48mhz();
        assert_eq!(config.min_wait_us, 50);
        assert_eq!(config.bits_per_byte(), 8);
        assert_eq!(config.bytes_per_pixel(), 3);
        assert_eq!(config.min_wait_ticks(), 2400);
        assert_eq!(config.overrun_threshold_ticks(), None);
        assert_eq!(config.validate::<24>(), Ok(()));
    }

    #[test]
    fn test_channel_order_indices() {
        assert_eq!(ChannelOrder::Grb.indices(), [1, 0, 2]);
        assert_eq!(ChannelOrder::Bgr.indices(), [2, 1, 0]);
    }

    #[test]
    fn test_white_channel_adds_byte() {
        let config = ControllerConfig {
            white: Some(1),
            ..ws2812_48mhz()
        };
        assert_eq!(config.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_overrun_threshold() {
        let config = ControllerConfig {
            interrupts: InterruptPolicy::AllowBetweenPixels {
                interrupt_budget_us: 5,
            },
            ..ws2812_48mhz()
        };
        // (50 - 5) * 48
        assert_eq!(config.overrun_threshold_ticks(), Some(2160));
        assert_eq!(config.validate::<24>(), Ok(()));
    }

    #[test]
    fn test_budget_must_leave_room() {
        let config = ControllerConfig {
            interrupts: InterruptPolicy::AllowBetweenPixels {
                interrupt_budget_us: 50,
            },
            ..ws2812_48mhz()
        };
        assert_eq!(
            config.validate::<24>(),
            Err(ConfigError::BudgetExceedsGap {
                budget_us: 50,
                gap_us: 50
            })
        );
    }

    #[test]
    fn test_too_many_extra_bits() {
        let config = ControllerConfig {
            extra_bits: 9,
            ..ws2812_48mhz()
        };
        assert_eq!(
            config.validate::<24>(),
            Err(ConfigError::TooManyExtraBits(9))
        );
    }

    #[test]
    fn test_zero_tick_rate() {
        let config = ControllerConfig {
            ticks_per_us: 0,
            ..ws2812_48mhz()
        };
        assert_eq!(config.validate::<24>(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn test_gap_must_fit_counter() {
        // 1 second at 48 ticks/us is far past half a 24-bit window
        let config = ControllerConfig {
            min_wait_us: 1_000_000,
            ..ws2812_48mhz()
        };
        assert_eq!(config.validate::<24>(), Err(ConfigError::GapExceedsCounter));
    }

    #[test]
    fn test_clock_check() {
        let config = ws2812_48mhz();
        assert!(config.check_clock(48_000_000).is_ok());
        assert_eq!(
            config.check_clock(24_000_000),
            Err(ConfigError::ClockMismatch {
                expected_ticks_per_us: 48,
                actual_hz: 24_000_000
            })
        );
    }
}
