//! Pixel byte stream
//!
//! The driver pulls channel bytes one at a time, already scaled and
//! dithered, and never mutates color values itself.

use rgb::RGB8;

use crate::config::ChannelOrder;

/// Sequential source of per-channel bytes
///
/// Mirrors the way the driver consumes pixels: load channel 0, then 1,
/// then 2, then advance and load channel 0 of the next pixel. A clone
/// taken before a pass must replay the same frame.
pub trait PixelSource {
    /// Check if at least `n` more pixels remain
    fn has(&self, n: usize) -> bool;

    /// Prepare dithering before the first byte of a pass
    fn prepare_first_byte(&mut self) {}

    /// Advance the dithering phase once per pixel
    fn step_dithering(&mut self) {}

    /// Load channel 0 of the current pixel
    fn load0(&mut self) -> u8;

    /// Load channel 1 of the current pixel
    fn load1(&mut self) -> u8;

    /// Load channel 2 of the current pixel
    fn load2(&mut self) -> u8;

    /// Move to the next pixel and load its channel 0
    ///
    /// Returns 0 when the stream is exhausted.
    fn advance_and_load0(&mut self) -> u8;
}

/// Pixel source over a slice of RGB values
///
/// Applies a channel permutation and a global brightness scale.
#[derive(Debug, Clone)]
pub struct OrderedPixels<'a> {
    pixels: &'a [RGB8],
    order: [usize; 3],
    brightness: u8,
}

impl<'a> OrderedPixels<'a> {
    /// Create a source at full brightness
    pub fn new(pixels: &'a [RGB8], order: ChannelOrder) -> Self {
        Self::with_brightness(pixels, order, u8::MAX)
    }

    /// Create a source scaled by `brightness` (255 = unscaled)
    pub fn with_brightness(pixels: &'a [RGB8], order: ChannelOrder, brightness: u8) -> Self {
        Self {
            pixels,
            order: order.indices(),
            brightness,
        }
    }

    /// Number of pixels not yet advanced past
    pub fn remaining(&self) -> usize {
        self.pixels.len()
    }

    fn channel(&self, slot: usize) -> u8 {
        match self.pixels.first() {
            Some(px) => {
                let raw = [px.r, px.g, px.b][self.order[slot]];
                scale8(raw, self.brightness)
            }
            None => 0,
        }
    }
}

impl PixelSource for OrderedPixels<'_> {
    fn has(&self, n: usize) -> bool {
        self.pixels.len() >= n
    }

    fn load0(&mut self) -> u8 {
        self.channel(0)
    }

    fn load1(&mut self) -> u8 {
        self.channel(1)
    }

    fn load2(&mut self) -> u8 {
        self.channel(2)
    }

    fn advance_and_load0(&mut self) -> u8 {
        if let Some((_, rest)) = self.pixels.split_first() {
            self.pixels = rest;
        }
        self.channel(0)
    }
}

/// Scale `value` by `scale / 256`, keeping 255 as identity
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}
