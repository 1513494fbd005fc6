//! Write-only SPI link to the VFD controller.
//!
//! The SPI2 bus (clock + data, no MISO) is only brought up when the transport
//! is opened, after the driver has configured its pins, so pin setup cannot
//! undo the bus routing. Chip-select is not attached to the peripheral: the
//! driver holds it as a GPIO for the length of each command.
//!
//! The bus driver is created on the first `open` and kept for the lifetime
//! of the value. `close` only removes the device, so a released driver can be
//! brought up again.

use alloc::rc::Rc;

use super::Esp32Error;
use crate::traits::{self, BusConfig, SerialTransport, SpiMode};
use embedded_hal::spi::{MODE_0, MODE_1, MODE_2, MODE_3};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin};
use esp_idf_hal::spi::config::{BitOrder, Config, DriverConfig, Duplex};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver, SPI2};
use esp_idf_hal::units::Hertz;

/// Transaction queue depth for the device.
const QUEUE_SIZE: usize = 7;

struct BusPins {
    spi: SPI2,
    sclk: AnyOutputPin,
    sdo: AnyOutputPin,
}

/// SPI master device for the VFD.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::OutputPin;
/// use rs_vfd::hal::esp32::Esp32Spi;
///
/// let peripherals = Peripherals::take()?;
/// let spi = Esp32Spi::new(
///     peripherals.spi2,
///     peripherals.pins.gpio14.downgrade_output(),
///     peripherals.pins.gpio13.downgrade_output(),
/// );
/// ```
pub struct Esp32Spi<'d> {
    pending: Option<BusPins>,
    bus: Option<Rc<SpiDriver<'d>>>,
    device: Option<SpiDeviceDriver<'d, Rc<SpiDriver<'d>>>>,
}

impl<'d> Esp32Spi<'d> {
    /// Takes the SPI2 peripheral and its clock and data pins.
    ///
    /// Nothing is configured until `open`.
    pub fn new(spi: SPI2, sclk: AnyOutputPin, sdo: AnyOutputPin) -> Self {
        Self {
            pending: Some(BusPins { spi, sclk, sdo }),
            bus: None,
            device: None,
        }
    }

    fn device_config(config: &BusConfig) -> Config {
        let data_mode = match config.mode {
            SpiMode::Mode0 => MODE_0,
            SpiMode::Mode1 => MODE_1,
            SpiMode::Mode2 => MODE_2,
            SpiMode::Mode3 => MODE_3,
        };
        let duplex = match config.duplex {
            traits::Duplex::Full => Duplex::Full,
            traits::Duplex::Half => Duplex::Half,
        };
        let bit_order = match config.bit_order {
            traits::BitOrder::MsbFirst => BitOrder::MsbFirst,
            traits::BitOrder::LsbFirst => BitOrder::LsbFirst,
        };

        Config::new()
            .baudrate(Hertz(config.clock_hz))
            .data_mode(data_mode)
            .duplex(duplex)
            .bit_order(bit_order)
            .write_only(true)
            .queue_size(QUEUE_SIZE)
    }
}

impl SerialTransport for Esp32Spi<'_> {
    type Error = Esp32Error;

    fn open(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        if self.device.is_some() {
            return Ok(());
        }
        if config.hardware_cs {
            log::warn!("hardware chip-select requested; device is added without one");
        }

        let bus = match &self.bus {
            Some(bus) => Rc::clone(bus),
            None => {
                let BusPins { spi, sclk, sdo } =
                    self.pending.take().ok_or(Esp32Error::BusUnavailable)?;
                let driver =
                    SpiDriver::new(spi, sclk, sdo, Option::<AnyIOPin>::None, &DriverConfig::new())?;
                let bus = Rc::new(driver);
                self.bus = Some(Rc::clone(&bus));
                bus
            }
        };
        let device = SpiDeviceDriver::new(
            bus,
            Option::<AnyOutputPin>::None,
            &Self::device_config(config),
        )?;

        self.device = Some(device);
        Ok(())
    }

    fn transmit(&mut self, byte: u8) -> Result<(), Self::Error> {
        let device = self.device.as_mut().ok_or(Esp32Error::NotOpen)?;
        device.write(&[byte])?;
        Ok(())
    }

    fn close(&mut self) {
        // Removes the device; the bus driver stays for the next open
        self.device = None;
    }
}
