//! Clockless output over a single GPIO line

pub mod controller;
pub mod emitter;
pub mod frame;
pub mod line;
pub mod strip;

#[cfg(test)]
pub(crate) mod sim;

pub use controller::ClocklessController;
pub use emitter::BitEmitter;
pub use frame::{DeadlineMissed, FrameDriver};
pub use line::DataLine;
pub use strip::ClocklessStrip;
