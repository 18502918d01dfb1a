//! Clockline Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the clockless LED driver
//! consumes. Chip-specific HALs (RP2040, ...) implement them, and the
//! timing logic in `clockline-core`/`clockline-drivers` is tested on the
//! host against simulated implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (clockline-firmware, etc.) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  clockline-core / clockline-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  clockline-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌────────────────┐
//!            │ clockline-hal- │
//!            │     rp2040     │
//!            └────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Data line output
//! - [`counter::DownCounter`] - Free-running hardware tick counter
//! - [`interrupt::InterruptGate`] - Scoped interrupt masking
//! - [`clock::SystemClock`] - Core clock bring-up

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod counter;
pub mod gpio;
pub mod interrupt;

// Re-export key traits at crate root for convenience
pub use clock::SystemClock;
pub use counter::DownCounter;
pub use gpio::OutputPin;
pub use interrupt::InterruptGate;
