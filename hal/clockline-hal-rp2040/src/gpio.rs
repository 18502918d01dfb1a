//! Data pin
//!
//! Uses a `Flex` pin so output mode is entered through
//! [`OutputPin::configure_output`] rather than at construction.

use clockline_hal::OutputPin;
use embassy_rp::gpio::{Drive, Flex, Pin, SlewRate};
use embassy_rp::Peri;

/// GPIO used as clockless data line
pub struct DataPin<'d> {
    pin: Flex<'d>,
}

impl<'d> DataPin<'d> {
    /// Create a data pin; it stays an input until configured
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Flex::new(pin),
        }
    }
}

impl OutputPin for DataPin<'_> {
    fn configure_output(&mut self) {
        // Sharp edges matter more than EMI at 800 kHz
        self.pin.set_slew_rate(SlewRate::Fast);
        self.pin.set_drive_strength(Drive::_8mA);
        self.pin.set_low();
        self.pin.set_as_output();
    }

    #[inline(always)]
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    #[inline(always)]
    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
