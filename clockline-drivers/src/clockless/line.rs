//! Data line output
//!
//! Wraps the GPIO pin with the configured polarity. Everything above this
//! layer works in logical levels: "low" is the idle level the line must
//! hold between frames.

use clockline_hal::OutputPin;

/// Logical data line
pub struct DataLine<P> {
    pin: P,
    /// If true, logical high = pin LOW
    inverted: bool,
}

impl<P: OutputPin> DataLine<P> {
    /// Create a data line
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the strip
    /// - `inverted`: If true, the line idles with the pin HIGH
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Configure the pin as output and force the line idle
    pub fn init(&mut self) {
        self.pin.configure_output();
        self.set_low();
    }

    /// Drive the line to its active level
    #[inline(always)]
    pub fn set_high(&mut self) {
        if self.inverted {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }

    /// Drive the line to its idle level
    #[inline(always)]
    pub fn set_low(&mut self) {
        if self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    /// Check if the line is at its active level
    pub fn is_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }

    /// Get access to the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Release the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}
