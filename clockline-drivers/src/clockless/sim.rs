//! Simulated hardware for host tests
//!
//! All mocks share one simulated clock. Every tick read advances it by
//! one tick, so busy-wait loops terminate and each recorded edge carries
//! the tick at which it happened.

extern crate std;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use clockline_core::{OrderedPixels, PixelSource, Tick, TickSource};
use clockline_hal::{InterruptGate, OutputPin, SystemClock};
use embedded_hal::delay::DelayNs;

/// Shared simulated time
#[derive(Clone, Default)]
pub(crate) struct SimTime(Rc<Cell<u32>>);

impl SimTime {
    pub(crate) fn starting_at(t: u32) -> Self {
        Self(Rc::new(Cell::new(t)))
    }

    pub(crate) fn get(&self) -> u32 {
        self.0.get()
    }

    pub(crate) fn advance(&self, ticks: u32) {
        self.0.set(self.0.get().wrapping_add(ticks));
    }
}

/// Tick source over [`SimTime`], one tick per read
pub(crate) struct SimClock {
    time: SimTime,
    pub(crate) starts: u32,
}

impl SimClock {
    pub(crate) fn new(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            starts: 0,
        }
    }
}

impl TickSource<24> for SimClock {
    fn now(&mut self) -> Tick<24> {
        let t = Tick::new(self.time.get());
        self.time.advance(1);
        t
    }

    fn ensure_free_running(&mut self) {
        self.starts += 1;
    }
}

/// Level change on the simulated pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) at: u32,
    pub(crate) high: bool,
}

/// Pin recording every level change with its tick
pub(crate) struct RecordingPin {
    time: SimTime,
    high: bool,
    pub(crate) output: bool,
    pub(crate) edges: Vec<Edge>,
}

impl RecordingPin {
    pub(crate) fn new(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            high: false,
            output: false,
            edges: Vec::new(),
        }
    }

    fn drive(&mut self, high: bool) {
        if self.high != high {
            self.high = high;
            self.edges.push(Edge {
                at: self.time.get(),
                high,
            });
        }
    }
}

impl OutputPin for RecordingPin {
    fn configure_output(&mut self) {
        self.output = true;
    }

    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Interrupt gate that can inject interrupt latency
///
/// A stall scheduled for exit `n` advances time right after the `n`th
/// (zero-based) critical section ends, as an interrupt handler would.
pub(crate) struct SimGate {
    time: SimTime,
    pub(crate) masked: bool,
    pub(crate) exits: u32,
    stalls: Vec<(u32, u32)>,
}

impl SimGate {
    pub(crate) fn new(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            masked: false,
            exits: 0,
            stalls: Vec::new(),
        }
    }

    pub(crate) fn stall_after(mut self, exit: u32, ticks: u32) -> Self {
        self.stalls.push((exit, ticks));
        self
    }
}

impl InterruptGate for SimGate {
    fn with_suppressed<R>(&mut self, f: impl FnOnce() -> R) -> R {
        assert!(!self.masked, "critical sections must not nest");
        self.masked = true;
        let r = f();
        self.masked = false;
        let exit = self.exits;
        self.exits += 1;
        for &(at, ticks) in &self.stalls {
            if at == exit {
                self.time.advance(ticks);
            }
        }
        r
    }
}

/// Delay advancing simulated time at one tick per µs multiple
pub(crate) struct SimDelay {
    time: SimTime,
    ticks_per_us: u32,
    pub(crate) calls: u32,
    pub(crate) total_us: u32,
}

impl SimDelay {
    pub(crate) fn new(time: &SimTime, ticks_per_us: u32) -> Self {
        Self {
            time: time.clone(),
            ticks_per_us,
            calls: 0,
            total_us: 0,
        }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.calls += 1;
        self.total_us += us;
        self.time.advance(us * self.ticks_per_us);
    }
}

/// Fixed-frequency clock
pub(crate) struct FixedClock {
    pub(crate) hz: u32,
    pub(crate) raised: bool,
}

impl SystemClock for FixedClock {
    fn run_at_max(&mut self) -> u32 {
        self.raised = true;
        self.hz
    }
}

/// Pixel source counting passes and dithering steps
#[derive(Clone)]
pub(crate) struct CountingPixels<'a> {
    inner: OrderedPixels<'a>,
    pub(crate) passes: Rc<Cell<u32>>,
    pub(crate) dither_steps: Rc<Cell<u32>>,
}

impl<'a> CountingPixels<'a> {
    pub(crate) fn new(inner: OrderedPixels<'a>) -> Self {
        Self {
            inner,
            passes: Rc::default(),
            dither_steps: Rc::default(),
        }
    }
}

impl PixelSource for CountingPixels<'_> {
    fn has(&self, n: usize) -> bool {
        self.inner.has(n)
    }

    fn prepare_first_byte(&mut self) {
        self.passes.set(self.passes.get() + 1);
    }

    fn step_dithering(&mut self) {
        self.dither_steps.set(self.dither_steps.get() + 1);
    }

    fn load0(&mut self) -> u8 {
        self.inner.load0()
    }

    fn load1(&mut self) -> u8 {
        self.inner.load1()
    }

    fn load2(&mut self) -> u8 {
        self.inner.load2()
    }

    fn advance_and_load0(&mut self) -> u8 {
        self.inner.advance_and_load0()
    }
}

/// One decoded bit: high time and, if another bit follows, its period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pulse {
    pub(crate) high: u32,
    pub(crate) period: Option<u32>,
}

/// Decode recorded edges into pulses
pub(crate) fn pulses(edges: &[Edge]) -> Vec<Pulse> {
    let rises: Vec<usize> = edges
        .iter()
        .enumerate()
        .filter(|(_, e)| e.high)
        .map(|(i, _)| i)
        .collect();

    rises
        .iter()
        .enumerate()
        .map(|(n, &i)| {
            let rise = edges[i].at;
            let fall = edges[i + 1].at;
            assert!(!edges[i + 1].high, "rising edge must be followed by a fall");
            Pulse {
                high: fall.wrapping_sub(rise),
                period: rises.get(n + 1).map(|&j| edges[j].at.wrapping_sub(rise)),
            }
        })
        .collect()
}

/// Decode pulses into bits given the two valid high times
pub(crate) fn bits(pulses: &[Pulse], one_high: u32, zero_high: u32) -> Vec<bool> {
    pulses
        .iter()
        .map(|p| {
            assert!(
                p.high == one_high || p.high == zero_high,
                "unexpected high time {}",
                p.high
            );
            p.high == one_high
        })
        .collect()
}

/// Expand bytes into MSB-first bits
pub(crate) fn byte_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&b| (0..8).rev().map(move |i| b & (1 << i) != 0))
        .collect()
}
