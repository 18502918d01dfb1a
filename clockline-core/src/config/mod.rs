//! Configuration types
//!
//! Everything here is fixed for the lifetime of a controller instance.
//! Validation happens once, when the controller is constructed (or at
//! build time for firmware configs), never inside the timing loop.

pub mod controller;
pub mod timing;

pub use controller::*;
pub use timing::*;
