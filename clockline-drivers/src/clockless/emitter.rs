//! Deadline-scheduled bit emitter
//!
//! Each bit is one high pulse followed by a low tail, with a constant
//! period of `T1 + T2 + T3` ticks. The deadline for the next bit is taken
//! from the tick at which the current bit actually started, so a late
//! start delays the following bits instead of shortening them, and drift
//! never exceeds one bit period.

use clockline_core::{Tick, TickSource, TimingSpec};
use clockline_hal::OutputPin;

use super::line::DataLine;

/// Emits single bits against an absolute tick deadline
#[derive(Debug, Clone, Copy)]
pub struct BitEmitter<const BITS: u32> {
    timing: TimingSpec,
}

impl<const BITS: u32> BitEmitter<BITS> {
    /// Create an emitter for the given (validated) timing
    pub const fn new(timing: TimingSpec) -> Self {
        Self { timing }
    }

    /// Bit timing in use
    pub fn timing(&self) -> &TimingSpec {
        &self.timing
    }

    /// Deadline for a first bit starting one period after `now`
    pub fn first_deadline(&self, now: Tick<BITS>) -> Tick<BITS> {
        now.wrapping_add(self.timing.period())
    }

    /// Emit one bit
    ///
    /// Waits for `deadline`, raises the line, drops it once only the low
    /// tail of the period remains, and moves `deadline` to the start of
    /// the next bit.
    #[inline(always)]
    pub fn emit_bit<T, P>(
        &self,
        ticks: &mut T,
        line: &mut DataLine<P>,
        deadline: &mut Tick<BITS>,
        one: bool,
    ) where
        T: TickSource<BITS>,
        P: OutputPin,
    {
        let period = self.timing.period();
        let tail = self.timing.low_tail(one);

        let start = loop {
            let now = ticks.now();
            if now.has_reached(*deadline) {
                break now;
            }
        };
        let next = start.wrapping_add(period);
        *deadline = next;

        line.set_high();
        loop {
            // Past `next` the distance wraps above `period`
            let remaining = next.since(ticks.now());
            if remaining <= tail || remaining > period {
                break;
            }
        }
        line.set_low();
    }

    /// Emit a byte MSB first, followed by `extra_bits` zero bits
    #[inline(always)]
    pub fn emit_byte<T, P>(
        &self,
        ticks: &mut T,
        line: &mut DataLine<P>,
        deadline: &mut Tick<BITS>,
        byte: u8,
        extra_bits: u8,
    ) where
        T: TickSource<BITS>,
        P: OutputPin,
    {
        let mut b = byte;
        for _ in 0..8 {
            self.emit_bit(ticks, line, deadline, b & 0x80 != 0);
            b <<= 1;
        }
        for _ in 0..extra_bits {
            self.emit_bit(ticks, line, deadline, false);
        }
    }
}
