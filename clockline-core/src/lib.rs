//! Board-agnostic timing core for clockless LED strips
//!
//! This crate contains the parts of the clockless driver that do not
//! depend on a specific chip:
//!
//! - Modular tick arithmetic over a fixed-width counter
//! - Virtual up-counter built on a hardware down-counter
//! - Bit timing and controller configuration, with validation
//! - Pixel byte stream abstraction
//! - Refresh-rate governor

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod pixels;
pub mod refresh;
pub mod tick;

pub use config::{ChannelOrder, ConfigError, ControllerConfig, InterruptPolicy, TimingSpec};
pub use pixels::{OrderedPixels, PixelSource};
pub use refresh::{RefreshGovernor, MAX_REFRESH_RATE_HZ};
pub use tick::{Tick, TickSource, VirtualTicks};
