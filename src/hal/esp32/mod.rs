//! ESP-IDF backends for the VFD driver.
//!
//! Control lines go through the raw GPIO driver so they can be addressed by
//! number from a [`PinConfig`](crate::PinConfig); the serial link is an
//! `esp_idf_hal` SPI master device on SPI2 without a hardware chip-select.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32 (SPI2 host)
//! - **Display**: 8-digit 5x7 dot-matrix VFD module with serial command input
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for the default GPIO assignments.

mod delay;
mod gpio;
mod spi;

pub use delay::Esp32Delay;
pub use gpio::Esp32Pins;
pub use spi::Esp32Spi;

use core::fmt;

use esp_idf_hal::sys::EspError;

/// Error from the ESP-IDF backends.
#[derive(Debug)]
pub enum Esp32Error {
    /// A level was set before the pins were configured.
    NotConfigured,
    /// A byte was sent before the SPI device was opened.
    NotOpen,
    /// An earlier bus setup failed and consumed the SPI peripheral.
    BusUnavailable,
    /// ESP-IDF call failed.
    Esp(EspError),
}

impl From<EspError> for Esp32Error {
    fn from(err: EspError) -> Self {
        Esp32Error::Esp(err)
    }
}

impl fmt::Display for Esp32Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Esp32Error::NotConfigured => f.write_str("pins not configured"),
            Esp32Error::NotOpen => f.write_str("SPI device not open"),
            Esp32Error::BusUnavailable => f.write_str("SPI bus unavailable after failed setup"),
            Esp32Error::Esp(e) => write!(f, "ESP-IDF error: {}", e),
        }
    }
}

impl std::error::Error for Esp32Error {}

/// Default GPIO assignments for the VFD module.
///
/// These match [`PinConfig::default`](crate::PinConfig::default).
pub mod pins {
    /// Serial data (DIN)
    pub const DATA: i32 = 13;

    /// Serial clock (CLK)
    pub const CLOCK: i32 = 14;

    /// Chip-select, driven as a plain GPIO
    pub const CHIP_SELECT: i32 = 15;

    /// Controller reset, active low
    pub const RESET: i32 = 12;

    /// Display power enable
    pub const ENABLE: i32 = 0;
}
