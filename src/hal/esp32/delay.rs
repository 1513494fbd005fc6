//! Blocking delay on top of the FreeRTOS scheduler.

use crate::traits::Delay;
use esp_idf_hal::delay::FreeRtos;

/// FreeRTOS task delay.
///
/// Yields the calling task for the requested time, rounded to scheduler ticks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new delay.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Delay for Esp32Delay {
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}
