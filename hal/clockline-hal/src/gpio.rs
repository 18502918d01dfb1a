//! GPIO pin abstractions
//!
//! The clockless driver only ever drives a single output line, so the
//! trait is limited to what a bit-banged data pin needs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. `set_high` and `set_low` are called inside the
/// timing loop and must complete in a small, roughly constant number of
/// cycles.
pub trait OutputPin {
    /// Put the pin into push-pull output mode
    fn configure_output(&mut self);

    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}
