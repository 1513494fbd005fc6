//! Demonstration cycle exercising every display operation.
//!
//! Lamp test, a clock-style string, then the katakana presets uploaded to
//! CGRAM and shown in the first five cells. The ESP32 binary runs this in a
//! loop.
//!
//! # Example
//!
//! ```rust
//! use rs_vfd::demo::{run_cycle, DemoTiming};
//! use rs_vfd::{hal::MockBus, VfdConfig, VfdDriver};
//!
//! let bus = MockBus::new();
//! let mut vfd = VfdDriver::new(
//!     VfdConfig::default(),
//!     bus.pins(),
//!     bus.transport(),
//!     bus.delay(),
//! )
//! .unwrap();
//! vfd.init().unwrap();
//!
//! let mut hold = bus.delay();
//! run_cycle(&mut vfd, &mut hold, &DemoTiming::default()).unwrap();
//! ```

use crate::driver::{DriverError, VfdDriver};
use crate::font::KATAKANA;
use crate::traits::{Delay, PinControl, SerialTransport};

/// Text shown in the second step of the cycle.
pub const CLOCK_TEXT: &str = "12:34:56";

/// Durations used by [`run_cycle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoTiming {
    /// Lamp test duration in milliseconds.
    pub lamp_test_ms: u32,
    /// How long each screen is held in milliseconds.
    pub hold_ms: u32,
}

impl Default for DemoTiming {
    fn default() -> Self {
        Self {
            lamp_test_ms: 1000,
            hold_ms: 2000,
        }
    }
}

impl DemoTiming {
    /// Set the lamp test duration
    pub fn with_lamp_test_ms(mut self, ms: u32) -> Self {
        self.lamp_test_ms = ms;
        self
    }

    /// Set the hold duration
    pub fn with_hold_ms(mut self, ms: u32) -> Self {
        self.hold_ms = ms;
        self
    }
}

/// Runs one demonstration cycle.
///
/// `hold` paces the screens; the driver's own delay is used for the lamp test.
/// Glyphs are only shown in cells that exist on the configured display.
pub fn run_cycle<P, T, D, H>(
    vfd: &mut VfdDriver<P, T, D>,
    hold: &mut H,
    timing: &DemoTiming,
) -> Result<(), DriverError<P, T>>
where
    P: PinControl,
    T: SerialTransport,
    D: Delay,
    H: Delay,
{
    vfd.full_test(timing.lamp_test_ms)?;

    let digits = vfd.digits();
    let text = &CLOCK_TEXT[..CLOCK_TEXT.len().min(digits as usize)];
    vfd.write_string(0, text)?;
    hold.delay_ms(timing.hold_ms);
    vfd.clear()?;

    for font in KATAKANA.iter().filter(|f| f.id() < digits) {
        vfd.load_custom_font(font)?;
        vfd.write_char(font.id(), font.id())?;
    }
    hold.delay_ms(timing.hold_ms);
    vfd.clear()
}
