//! Clockless LED driver
//!
//! Bit-bangs the pulse-width encoded one-wire protocol used by
//! WS2812/SK6812-class LEDs. Every signal edge is scheduled against an
//! absolute deadline on a free-running hardware counter, instead of
//! calibrated delay loops:
//!
//! - [`clockless::BitEmitter`] - one bit per call, deadline-scheduled
//! - [`clockless::FrameDriver`] - one frame pass, with overrun detection
//! - [`clockless::ClocklessController`] - init, refresh gap and retry policy
//! - [`clockless::ClocklessStrip`] - `smart-leds` writer on top

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clockless;
