//! RP2040-specific HAL for the clockless LED driver
//!
//! This crate provides RP2040 implementations of the shared
//! `clockline-hal` traits:
//!
//! - SysTick as free-running 24-bit tick counter
//! - `Flex` GPIO data pin with fast slew rate
//! - `PRIMASK` interrupt gate
//! - System clock query

#![no_std]

pub mod clock;
pub mod gpio;
pub mod interrupt;
pub mod systick;

pub use clock::Rp2040Clock;
pub use gpio::DataPin;
pub use interrupt::CoreInterruptGate;
pub use systick::{SysTickCounter, SYSTICK_RELOAD};
