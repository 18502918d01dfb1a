//! Frame driver
//!
//! Sends one pass over a pixel stream: three channel bytes per pixel,
//! plus a constant white byte when configured. Interrupts are masked
//! either for the whole pass or, when the config allows interrupts
//! between pixels, one pixel at a time. In the latter case a pass is
//! abandoned as soon as an interrupt has held the line idle long enough
//! for the LEDs to latch a partial frame.

use clockline_core::{ControllerConfig, PixelSource, Tick, TickSource};
use clockline_hal::{InterruptGate, OutputPin};

use super::emitter::BitEmitter;
use super::line::DataLine;

/// A pass was abandoned because a bit deadline was missed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadlineMissed {
    /// How far past the deadline the pass was, in ticks
    pub late_by: u32,
}

/// Frame driver
#[derive(Debug, Clone, Copy)]
pub struct FrameDriver<const BITS: u32> {
    emitter: BitEmitter<BITS>,
    extra_bits: u8,
    white: Option<u8>,
    overrun_threshold: Option<u32>,
}

impl<const BITS: u32> FrameDriver<BITS> {
    /// Create a frame driver from a validated config
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            emitter: BitEmitter::new(config.timing),
            extra_bits: config.extra_bits,
            white: config.white,
            overrun_threshold: config.overrun_threshold_ticks(),
        }
    }

    /// Transmit one pass over `pixels`
    ///
    /// Returns the tick at which the pass finished, or [`DeadlineMissed`]
    /// if overrun detection is enabled and a pixel started too late. An
    /// empty stream returns immediately without touching the line.
    pub fn transmit<T, P, G, S>(
        &self,
        ticks: &mut T,
        line: &mut DataLine<P>,
        gate: &mut G,
        mut pixels: S,
    ) -> Result<Tick<BITS>, DeadlineMissed>
    where
        T: TickSource<BITS>,
        P: OutputPin,
        G: InterruptGate,
        S: PixelSource,
    {
        if !pixels.has(1) {
            return Ok(ticks.now());
        }

        line.set_low();
        pixels.prepare_first_byte();
        let mut byte = pixels.load0();

        match self.overrun_threshold {
            None => gate.with_suppressed(|| {
                let mut deadline = self.emitter.first_deadline(ticks.now());
                while pixels.has(1) {
                    pixels.step_dithering();
                    byte = self.send_pixel(ticks, line, &mut deadline, &mut pixels, byte);
                }
            }),
            Some(threshold) => {
                let period = self.emitter.timing().period();
                let mut deadline =
                    gate.with_suppressed(|| self.emitter.first_deadline(ticks.now()));
                while pixels.has(1) {
                    pixels.step_dithering();
                    gate.with_suppressed(|| {
                        // An on-time deadline is at most one period ahead.
                        // Anything else is late, however far the counter
                        // has moved on.
                        let now = ticks.now();
                        if deadline.since(now) > period {
                            let late_by = now.since(deadline);
                            if late_by > threshold {
                                return Err(DeadlineMissed { late_by });
                            }
                        }
                        byte = self.send_pixel(ticks, line, &mut deadline, &mut pixels, byte);
                        Ok(())
                    })?;
                }
            }
        }

        Ok(ticks.now())
    }

    /// Send the pixel whose channel 0 is `first`, returning the next
    /// pixel's channel 0
    #[inline(always)]
    fn send_pixel<T, P, S>(
        &self,
        ticks: &mut T,
        line: &mut DataLine<P>,
        deadline: &mut Tick<BITS>,
        pixels: &mut S,
        first: u8,
    ) -> u8
    where
        T: TickSource<BITS>,
        P: OutputPin,
        S: PixelSource,
    {
        let extra = self.extra_bits;

        self.emitter.emit_byte(ticks, line, deadline, first, extra);
        let b = pixels.load1();
        self.emitter.emit_byte(ticks, line, deadline, b, extra);
        let b = pixels.load2();
        self.emitter.emit_byte(ticks, line, deadline, b, extra);
        let next = pixels.advance_and_load0();

        if let Some(white) = self.white {
            self.emitter.emit_byte(ticks, line, deadline, white, extra);
        }

        next
    }
}
