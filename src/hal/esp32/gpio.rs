//! VFD control lines through the ESP-IDF GPIO driver.

use super::Esp32Error;
use crate::config::PinConfig;
use crate::traits::{Level, PinControl, PinRole};
use esp_idf_hal::sys::{
    esp, gpio_config, gpio_config_t, gpio_int_type_t_GPIO_INTR_DISABLE,
    gpio_mode_t_GPIO_MODE_OUTPUT, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
    gpio_pullup_t_GPIO_PULLUP_ENABLE, gpio_set_level,
};

/// GPIO backend addressing pins by number.
///
/// # Example
///
/// ```ignore
/// use rs_vfd::hal::esp32::Esp32Pins;
/// use rs_vfd::traits::{PinControl, PinRole};
/// use rs_vfd::PinConfig;
///
/// let mut pins = Esp32Pins::new();
/// pins.configure_outputs(&PinConfig::default())?;
/// pins.set_high(PinRole::Enable)?;
/// ```
#[derive(Debug, Default)]
pub struct Esp32Pins {
    pins: Option<PinConfig>,
}

impl Esp32Pins {
    /// Creates an unconfigured backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PinControl for Esp32Pins {
    type Error = Esp32Error;

    fn configure_outputs(&mut self, pins: &PinConfig) -> Result<(), Self::Error> {
        let io_conf = gpio_config_t {
            pin_bit_mask: pins.bit_mask(),
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        // Safe: the config struct outlives the call and only names output pins
        esp!(unsafe { gpio_config(&io_conf) })?;
        self.pins = Some(*pins);
        Ok(())
    }

    fn set_level(&mut self, role: PinRole, level: Level) -> Result<(), Self::Error> {
        let pins = self.pins.as_ref().ok_or(Esp32Error::NotConfigured)?;
        esp!(unsafe { gpio_set_level(role.gpio(pins), level.as_raw()) })?;
        Ok(())
    }
}
