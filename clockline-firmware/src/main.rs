//! Clockline - clockless LED strip firmware
//!
//! Drives a WS2812/SK6812-class strip from an RP2040 GPIO, timing every
//! bit against SysTick. Strip parameters come from strip.toml and are
//! validated at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Delay, Timer};
use smart_leds::hsv::{hsv2rgb, Hsv};
use smart_leds::{gamma, SmartLedsWrite};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use clockline_core::{ChannelOrder, ControllerConfig, InterruptPolicy, TimingSpec, VirtualTicks};
use clockline_drivers::clockless::{ClocklessController, ClocklessStrip};
use clockline_hal_rp2040::{CoreInterruptGate, DataPin, Rp2040Clock, SysTickCounter};

include!(concat!(env!("OUT_DIR"), "/strip_config.rs"));

type Strip = ClocklessStrip<
    DataPin<'static>,
    VirtualTicks<SysTickCounter, 24>,
    CoreInterruptGate,
    Delay,
    LED_COUNT,
>;

// The frame buffer lives here rather than on the executor's stack
static STRIP: StaticCell<Strip> = StaticCell::new();

/// Hue step between neighbouring LEDs
const HUE_SPREAD: u8 = 4;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Clockline firmware starting...");

    let p = embassy_rp::init(Default::default());
    let core = unwrap!(cortex_m::Peripherals::take());
    info!("Peripherals initialized");

    let mut controller = match ClocklessController::new(
        CONFIG,
        DataPin::new(data_pin!(p)),
        VirtualTicks::new(SysTickCounter::new(core.SYST)),
        CoreInterruptGate,
        Delay,
    ) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Invalid strip config: {}", e);
            return;
        }
    };

    if let Err(e) = controller.init(&mut Rp2040Clock) {
        error!(
            "Clock check failed ({}), strip.toml expects {} Hz",
            e, CLOCK_HZ
        );
        return;
    }

    let strip = STRIP.init(ClocklessStrip::new(controller));
    strip.set_brightness(BRIGHTNESS);
    info!(
        "Driving {} LEDs, max {} frames/s",
        LED_COUNT,
        strip.controller().max_refresh_rate()
    );

    let mut hue: u8 = 0;
    loop {
        let colors = (0..LED_COUNT).map(|i| {
            hsv2rgb(Hsv {
                hue: hue.wrapping_add((i as u8).wrapping_mul(HUE_SPREAD)),
                sat: 255,
                val: 255,
            })
        });
        if let Err(never) = strip.write(gamma(colors)) {
            match never {}
        }

        hue = hue.wrapping_add(1);
        Timer::after_millis(20).await;
    }
}
