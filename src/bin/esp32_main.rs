//! ESP32 VFD demonstration.
//!
//! Brings the display up and then loops the demonstration cycle:
//! - Lamp test for one second
//! - "12:34:56" for two seconds
//! - Five custom katakana glyphs for two seconds
//!
//! # Wiring
//!
//! | VFD | GPIO |
//! |-----|------|
//! | DIN | 13 |
//! | CLK | 14 |
//! | CS  | 15 |
//! | RST | 12 |
//! | EN  | 0 |
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! ```

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripherals::Peripherals;
use log::info;
use rs_vfd::demo::{run_cycle, DemoTiming};
use rs_vfd::hal::esp32::{pins, Esp32Delay, Esp32Pins, Esp32Spi};
use rs_vfd::{PinConfig, VfdConfig, VfdDriver};

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("rs-vfd demo starting");

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = VfdConfig::default()
        .with_pins(
            PinConfig::default()
                .with_data(pins::DATA)
                .with_clock(pins::CLOCK)
                .with_chip_select(pins::CHIP_SELECT)
                .with_reset(pins::RESET)
                .with_enable(pins::ENABLE),
        )
        .with_clock_hz(500_000)
        .with_digits(8);

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize VFD (SPI2 on GPIO13/14, control lines on GPIO15/12/0)
    // =========================================================================
    let spi = Esp32Spi::new(
        peripherals.spi2,
        peripherals.pins.gpio14.downgrade_output(),
        peripherals.pins.gpio13.downgrade_output(),
    );
    let mut vfd = VfdDriver::new(config, Esp32Pins::new(), spi, Esp32Delay::new())?;

    // Bring-up failure is fatal
    vfd.init()?;
    info!("VFD ready ({} digits)", vfd.digits());

    // =========================================================================
    // Demo loop
    // =========================================================================
    let timing = DemoTiming::default();
    let mut hold = Esp32Delay::new();

    loop {
        run_cycle(&mut vfd, &mut hold, &timing)?;
    }
}
