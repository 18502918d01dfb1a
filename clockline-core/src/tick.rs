//! Virtual tick counter
//!
//! Hardware timers used for clockless output count down and are narrower
//! than the native word (SysTick is 24 bits). All timing is expressed as
//! [`Tick`] values: readings of a virtual up-counter that wraps at
//! `2^BITS`. A tick has no epoch; only the difference between two readings
//! is meaningful, and that difference is always taken modulo the width.

use clockline_hal::DownCounter;

/// A reading of a `BITS`-wide virtual up-counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick<const BITS: u32>(u32);

impl<const BITS: u32> Tick<BITS> {
    /// Mask selecting the counter's bits
    pub const MASK: u32 = u32::MAX >> (32 - BITS);

    /// Largest distance still treated as "in the past" by [`Tick::has_reached`]
    pub const HALF_WINDOW: u32 = Self::MASK >> 1;

    /// Create a tick from a raw value, discarding bits above the width
    pub const fn new(raw: u32) -> Self {
        Self(raw & Self::MASK)
    }

    /// Raw counter value in `[0, 2^BITS)`
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The tick `ticks` after this one, wrapping at the counter width
    pub const fn wrapping_add(self, ticks: u32) -> Self {
        Self::new(self.0.wrapping_add(ticks))
    }

    /// Ticks elapsed from `earlier` to `self`, modulo `2^BITS`
    pub const fn since(self, earlier: Self) -> u32 {
        difference::<BITS>(self.0, earlier.0)
    }

    /// Check if this reading is at or past `deadline`
    ///
    /// A reading counts as past the deadline when it lies less than half a
    /// counter window after it. Deadlines are never scheduled more than one
    /// bit period ahead, so this stays correct across the wrap.
    pub const fn has_reached(self, deadline: Self) -> bool {
        self.since(deadline) <= Self::HALF_WINDOW
    }
}

/// `(a - b) mod 2^BITS`
pub const fn difference<const BITS: u32>(a: u32, b: u32) -> u32 {
    a.wrapping_sub(b) & Tick::<BITS>::MASK
}

/// Source of virtual ticks
pub trait TickSource<const BITS: u32> {
    /// Read the current tick
    fn now(&mut self) -> Tick<BITS>;

    /// Make sure the underlying counter is running
    ///
    /// Must leave an already running counter untouched.
    fn ensure_free_running(&mut self);
}

/// Virtual up-counter over a hardware [`DownCounter`]
///
/// Inverting the raw value within the counter width turns the down-count
/// into an up-count with the same wrap point.
pub struct VirtualTicks<C, const BITS: u32> {
    counter: C,
}

impl<C: DownCounter, const BITS: u32> VirtualTicks<C, BITS> {
    const WIDTH_MATCHES: () = assert!(
        C::BITS == BITS && BITS > 0 && BITS <= 32,
        "tick width must match the counter register width"
    );

    /// Wrap a hardware counter
    pub fn new(counter: C) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_MATCHES;
        Self { counter }
    }

    /// Get access to the underlying counter
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Release the underlying counter
    pub fn release(self) -> C {
        self.counter
    }
}

impl<C: DownCounter, const BITS: u32> TickSource<BITS> for VirtualTicks<C, BITS> {
    #[inline(always)]
    fn now(&mut self) -> Tick<BITS> {
        Tick::new(!self.counter.count())
    }

    fn ensure_free_running(&mut self) {
        if !self.counter.is_free_running() {
            self.counter.start_free_running();
        }
    }
}
