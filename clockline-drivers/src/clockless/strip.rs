//! `smart-leds` integration
//!
//! [`ClocklessStrip`] implements [`SmartLedsWrite`] on top of a
//! [`ClocklessController`]. Colors are buffered first so that a retried
//! pass can replay the frame.

use core::convert::Infallible;

use clockline_core::{OrderedPixels, TickSource};
use clockline_hal::{InterruptGate, OutputPin};
use embedded_hal::delay::DelayNs;
use heapless::Vec;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use super::controller::ClocklessController;

/// LED strip of up to `N` pixels
pub struct ClocklessStrip<P, T, G, D, const N: usize, const BITS: u32 = 24> {
    controller: ClocklessController<P, T, G, D, BITS>,
    buffer: Vec<RGB8, N>,
    brightness: u8,
}

impl<P, T, G, D, const N: usize, const BITS: u32> ClocklessStrip<P, T, G, D, N, BITS>
where
    P: OutputPin,
    T: TickSource<BITS>,
    G: InterruptGate,
    D: DelayNs,
{
    /// Wrap an initialized controller
    pub fn new(controller: ClocklessController<P, T, G, D, BITS>) -> Self {
        Self {
            controller,
            buffer: Vec::new(),
            brightness: u8::MAX,
        }
    }

    /// Set the global brightness (255 = unscaled)
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Get the underlying controller
    pub fn controller(&self) -> &ClocklessController<P, T, G, D, BITS> {
        &self.controller
    }

    /// Colors of the last frame written
    pub fn frame(&self) -> &[RGB8] {
        &self.buffer
    }
}

impl<P, T, G, D, const N: usize, const BITS: u32> SmartLedsWrite
    for ClocklessStrip<P, T, G, D, N, BITS>
where
    P: OutputPin,
    T: TickSource<BITS>,
    G: InterruptGate,
    D: DelayNs,
{
    type Error = Infallible;
    type Color = RGB8;

    /// Write all the items of an iterator to the strip
    ///
    /// Colors beyond the strip length are dropped.
    fn write<I, C>(&mut self, iterator: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        self.buffer.clear();
        for color in iterator {
            if self.buffer.push(color.into()).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Frame truncated to {} pixels", N);
                break;
            }
        }

        let order = self.controller.config().order;
        let pixels = OrderedPixels::with_brightness(&self.buffer, order, self.brightness);
        self.controller.show_frame(pixels);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clockless::sim::{
        bits, byte_bits, pulses, RecordingPin, SimClock, SimDelay, SimGate, SimTime,
    };
    use clockline_core::{ChannelOrder, ControllerConfig, TimingSpec};

    type TestStrip<const N: usize> =
        ClocklessStrip<RecordingPin, SimClock, SimGate, SimDelay, N>;

    fn strip<const N: usize>(time: &SimTime, order: ChannelOrder) -> TestStrip<N> {
        let config = ControllerConfig {
            order,
            ..ControllerConfig::new(0, TimingSpec::new(2, 5, 3).unwrap(), 1)
        };
        let controller = ClocklessController::new(
            config,
            RecordingPin::new(time),
            SimClock::new(time),
            SimGate::new(time),
            SimDelay::new(time, 1),
        )
        .unwrap();
        ClocklessStrip::new(controller)
    }

    #[test]
    fn test_write_applies_order() {
        let time = SimTime::default();
        let mut strip = strip::<4>(&time, ChannelOrder::Grb);

        strip.write([RGB8::new(0x10, 0x20, 0x30)]).unwrap();

        assert_eq!(
            bits(&pulses(&strip.controller().line().pin().edges), 7, 2),
            byte_bits(&[0x20, 0x10, 0x30])
        );
    }

    #[test]
    fn test_write_truncates_to_capacity() {
        let time = SimTime::default();
        let mut strip = strip::<2>(&time, ChannelOrder::Rgb);

        strip.write([RGB8::new(1, 1, 1); 5]).unwrap();

        assert_eq!(strip.frame().len(), 2);
        assert_eq!(pulses(&strip.controller().line().pin().edges).len(), 48);
    }

    #[test]
    fn test_brightness() {
        let time = SimTime::default();
        let mut strip = strip::<1>(&time, ChannelOrder::Rgb);
        strip.set_brightness(127);

        strip.write([RGB8::new(0xFF, 0x80, 0x00)]).unwrap();

        assert_eq!(
            bits(&pulses(&strip.controller().line().pin().edges), 7, 2),
            byte_bits(&[0x7F, 0x40, 0x00])
        );
    }

    #[test]
    fn test_write_accepts_tuples() {
        let time = SimTime::default();
        let mut strip = strip::<1>(&time, ChannelOrder::Rgb);

        strip.write([(1u8, 2u8, 3u8)]).unwrap();

        assert_eq!(strip.frame(), [RGB8::new(1, 2, 3)]);
    }
}
