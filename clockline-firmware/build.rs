//! Build script for clockline-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates strip.toml at compile time
//! - Generates the strip constants included by `main.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clockline_core::{ChannelOrder, ControllerConfig, InterruptPolicy, TimingSpec};
use serde::Deserialize;

/// Highest user GPIO on the RP2040
const MAX_GPIO: u8 = 29;

/// Tick counter width (SysTick)
const TICK_BITS: u32 = 24;

#[derive(Deserialize)]
struct StripFile {
    strip: StripSection,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Chipset {
    Ws2812,
    Sk6812,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StripSection {
    pin: u8,
    led_count: usize,
    #[serde(default)]
    chipset: Option<Chipset>,
    #[serde(default)]
    timing_ns: Option<[u32; 3]>,
    #[serde(default)]
    order: ChannelOrder,
    #[serde(default)]
    extra_bits: u8,
    #[serde(default)]
    inverted: bool,
    #[serde(default = "default_min_wait_us")]
    min_wait_us: u32,
    #[serde(default)]
    white: Option<u8>,
    #[serde(default)]
    interrupt_budget_us: Option<u32>,
    clock_hz: u32,
    #[serde(default = "default_brightness")]
    brightness: u8,
}

fn default_min_wait_us() -> u32 {
    clockline_core::config::DEFAULT_MIN_WAIT_US
}

fn default_brightness() -> u8 {
    u8::MAX
}

fn main() {
    setup_linker();
    let strip = load_config();
    let config = build_controller_config(&strip);
    generate_constants(&strip, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse strip.toml
fn load_config() -> StripSection {
    println!("cargo:rerun-if-changed=strip.toml");

    let config_path = Path::new("strip.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: strip.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a strip.toml configuration file.          ║\n\
            ║  Please create one in the clockline-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read strip.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str::<StripFile>(&content) {
        Ok(file) => file.strip,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid strip.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a list of configuration errors
fn report_errors(errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid [strip] configuration                            ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Check the [strip] section and turn it into a controller config
fn build_controller_config(strip: &StripSection) -> ControllerConfig {
    let mut errors = Vec::new();

    if strip.pin > MAX_GPIO {
        errors.push(format!("pin must be 0-{}", MAX_GPIO));
    }
    if strip.led_count == 0 {
        errors.push("led_count must be at least 1".to_string());
    }

    let nanos = match (strip.chipset, strip.timing_ns) {
        (_, Some(ns)) => Some(ns),
        (Some(Chipset::Ws2812), None) => Some(TimingSpec::WS2812_NS),
        (Some(Chipset::Sk6812), None) => Some(TimingSpec::SK6812_NS),
        (None, None) => {
            errors.push("either 'chipset' or 'timing_ns' is required".to_string());
            None
        }
    };

    let timing = nanos.and_then(|[t1, t2, t3]| {
        match TimingSpec::from_nanos(t1, t2, t3, strip.clock_hz) {
            Ok(timing) => Some(timing),
            Err(e) => {
                errors.push(format!("timing: {:?}", e));
                None
            }
        }
    });

    if !errors.is_empty() {
        report_errors(&errors);
    }
    let Some(timing) = timing else {
        report_errors(&["timing could not be derived".to_string()]);
    };

    let config = ControllerConfig {
        order: strip.order,
        extra_bits: strip.extra_bits,
        inverted: strip.inverted,
        min_wait_us: strip.min_wait_us,
        white: strip.white,
        interrupts: match strip.interrupt_budget_us {
            None => InterruptPolicy::Suppressed,
            Some(interrupt_budget_us) => InterruptPolicy::AllowBetweenPixels {
                interrupt_budget_us,
            },
        },
        ..ControllerConfig::new(strip.pin, timing, strip.clock_hz / 1_000_000)
    };

    if let Err(e) = config.validate::<TICK_BITS>() {
        report_errors(&[format!("{:?}", e)]);
    }

    println!(
        "cargo:warning=strip.toml validated: {} LEDs on GPIO{}, bit period {} ticks",
        strip.led_count,
        strip.pin,
        timing.period()
    );

    config
}

/// Write the generated constants to `$OUT_DIR/strip_config.rs`
fn generate_constants(strip: &StripSection, config: &ControllerConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let timing = config.timing;

    let interrupts = match config.interrupts {
        InterruptPolicy::Suppressed => "InterruptPolicy::Suppressed".to_string(),
        InterruptPolicy::AllowBetweenPixels { interrupt_budget_us } => format!(
            "InterruptPolicy::AllowBetweenPixels {{ interrupt_budget_us: {} }}",
            interrupt_budget_us
        ),
    };

    let generated = format!(
        "// Generated from strip.toml by build.rs\n\
         \n\
         /// Number of LEDs on the strip\n\
         pub const LED_COUNT: usize = {led_count};\n\
         \n\
         /// Global brightness\n\
         pub const BRIGHTNESS: u8 = {brightness};\n\
         \n\
         /// Expected core clock (Hz)\n\
         pub const CLOCK_HZ: u32 = {clock_hz};\n\
         \n\
         /// Controller configuration\n\
         pub const CONFIG: ControllerConfig = ControllerConfig {{\n\
         \x20   pin: {pin},\n\
         \x20   timing: TimingSpec {{ t1: {t1}, t2: {t2}, t3: {t3} }},\n\
         \x20   order: ChannelOrder::{order:?},\n\
         \x20   extra_bits: {extra_bits},\n\
         \x20   inverted: {inverted},\n\
         \x20   min_wait_us: {min_wait_us},\n\
         \x20   white: {white:?},\n\
         \x20   interrupts: {interrupts},\n\
         \x20   ticks_per_us: {ticks_per_us},\n\
         }};\n\
         \n\
         /// Take the data pin out of the peripherals\n\
         macro_rules! data_pin {{\n\
         \x20   ($p:ident) => {{\n\
         \x20       $p.PIN_{pin}\n\
         \x20   }};\n\
         }}\n",
        led_count = strip.led_count,
        brightness = strip.brightness,
        clock_hz = strip.clock_hz,
        pin = config.pin,
        t1 = timing.t1,
        t2 = timing.t2,
        t3 = timing.t3,
        order = config.order,
        extra_bits = config.extra_bits,
        inverted = config.inverted,
        min_wait_us = config.min_wait_us,
        white = config.white,
        interrupts = interrupts,
        ticks_per_us = config.ticks_per_us,
    );

    fs::write(out_dir.join("strip_config.rs"), generated).unwrap();
}
