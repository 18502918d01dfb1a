//! Clockless controller
//!
//! Ties the frame driver to the hardware it owns and applies the
//! per-frame policy:
//!
//! 1. wait out the minimum gap since the previous frame
//! 2. send the frame
//! 3. if the pass was abandoned, let pending interrupts run for one
//!    frame gap and send the frame once more, whatever the outcome
//! 4. record the completion time
//!
//! A second miss is accepted as a degraded frame. Bits already on the
//! wire cannot be taken back, and retrying without bound would block the
//! caller for an unbounded time.

use clockline_core::{
    ConfigError, ControllerConfig, PixelSource, RefreshGovernor, Tick, TickSource,
    MAX_REFRESH_RATE_HZ,
};
use clockline_hal::{InterruptGate, OutputPin, SystemClock};
use embedded_hal::delay::DelayNs;

use super::frame::{DeadlineMissed, FrameDriver};
use super::line::DataLine;

#[cfg(feature = "defmt")]
use defmt::{debug, info, warn};

/// Clockless LED controller
///
/// Exclusively owns the data line and tick source for its lifetime.
pub struct ClocklessController<P, T, G, D, const BITS: u32 = 24> {
    config: ControllerConfig,
    line: DataLine<P>,
    ticks: T,
    gate: G,
    delay: D,
    driver: FrameDriver<BITS>,
    governor: RefreshGovernor<BITS>,
}

impl<P, T, G, D, const BITS: u32> ClocklessController<P, T, G, D, BITS>
where
    P: OutputPin,
    T: TickSource<BITS>,
    G: InterruptGate,
    D: DelayNs,
{
    /// Create a controller
    ///
    /// # Arguments
    /// - `config`: Controller configuration, validated against the tick width
    /// - `pin`: Data pin
    /// - `ticks`: Free-running tick source
    /// - `gate`: Interrupt masking
    /// - `delay`: Delay used for the settle time before a retry
    pub fn new(
        config: ControllerConfig,
        pin: P,
        ticks: T,
        gate: G,
        delay: D,
    ) -> Result<Self, ConfigError> {
        config.validate::<BITS>()?;

        Ok(Self {
            line: DataLine::new(pin, config.inverted),
            ticks,
            gate,
            delay,
            driver: FrameDriver::new(&config),
            governor: RefreshGovernor::new(config.min_wait_ticks()),
            config,
        })
    }

    /// One-time hardware setup
    ///
    /// Configures the data pin as output and idles it, brings the core
    /// clock up to speed, and starts the tick counter if it is not already
    /// running. Fails if the resulting clock does not match the
    /// configured tick rate.
    pub fn init<C: SystemClock>(&mut self, clock: &mut C) -> Result<(), ConfigError> {
        self.line.init();
        let clock_hz = clock.run_at_max();
        self.ticks.ensure_free_running();

        #[cfg(feature = "defmt")]
        info!(
            "Clockless controller on pin {}: clock {} Hz, {}-bit ticks, period {} ticks",
            self.config.pin,
            clock_hz,
            BITS,
            self.config.timing.period()
        );

        self.config.check_clock(clock_hz)
    }

    /// Show one frame
    ///
    /// `pixels` is cloned before the first pass so a retry replays the
    /// same frame from the start.
    pub fn show_frame<S: PixelSource + Clone>(&mut self, pixels: S) {
        self.governor.wait_for_minimum_gap(&mut self.ticks);

        if let Err(_missed) = self.transmit(pixels.clone()) {
            #[cfg(feature = "defmt")]
            warn!(
                "Frame pass abandoned {} ticks late, retrying",
                _missed.late_by
            );

            // Interrupts are unmasked here, pending handlers run now
            self.delay.delay_us(self.config.min_wait_us);

            match self.transmit(pixels) {
                Ok(_) => {
                    #[cfg(feature = "defmt")]
                    debug!("Frame retry succeeded");
                }
                Err(_missed) => {
                    #[cfg(feature = "defmt")]
                    warn!(
                        "Frame retry abandoned {} ticks late, frame degraded",
                        _missed.late_by
                    );
                }
            }
        }

        self.governor.mark_completion(&mut self.ticks);
    }

    fn transmit<S: PixelSource>(&mut self, pixels: S) -> Result<Tick<BITS>, DeadlineMissed> {
        self.driver
            .transmit(&mut self.ticks, &mut self.line, &mut self.gate, pixels)
    }

    /// Highest frame rate the LEDs tolerate (Hz)
    pub fn max_refresh_rate(&self) -> u16 {
        MAX_REFRESH_RATE_HZ
    }

    /// Get the controller configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get access to the data line
    pub fn line(&self) -> &DataLine<P> {
        &self.line
    }

    /// Get access to the tick source
    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    /// Get access to the interrupt gate
    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Get access to the settle delay
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Completion time of the last frame, if any
    pub fn last_completion(&self) -> Option<Tick<BITS>> {
        self.governor.last_completion()
    }
}
