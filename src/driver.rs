//! Device controller for the VFD module.
//!
//! [`VfdDriver`] owns the pin and transport backends for its whole lifetime
//! and is the only thing that talks to the bus. It runs the bring-up
//! sequence and exposes the display operations.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init()--> Ready --release()/drop--> Uninitialized
//! ```
//!
//! # Example
//!
//! ```rust
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
//!
//! vfd.init().unwrap();
//! vfd.write_string(0, "12:34:56").unwrap();
//!
//! assert_eq!(bus.frames().last().unwrap(), b"\x2012:34:56");
//! ```
//!
//! # Thread Safety
//!
//! Each command is a critical section on the bus. The driver takes `&mut self`
//! for every operation, so sharing it between tasks needs an external mutex
//! (e.g. `Arc<Mutex<VfdDriver<..>>>`).

use log::{debug, info, warn};

use crate::commands::VfdCommand;
use crate::config::{ConfigError, VfdConfig, MAX_DIGITS};
use crate::encoder::transmit_frame;
use crate::error::VfdError;
use crate::font::Font;
use crate::reset::reset_sequence;
use crate::traits::{Delay, PinControl, PinRole, SerialTransport};

/// Brightness applied at the end of bring-up.
pub const MAX_BRIGHTNESS: u8 = 0xFF;

/// Lamp test duration used by [`VfdDriver::full_test_default`].
pub const DEFAULT_LAMP_TEST_MS: u32 = 1000;

/// Lifecycle state of the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeviceState {
    /// Constructed, or released. No command has been sent.
    #[default]
    Uninitialized,
    /// Bring-up complete; display operations are accepted.
    Ready,
}

/// Driver error type for a given set of backends.
pub type DriverError<P, T> =
    VfdError<<P as PinControl>::Error, <T as SerialTransport>::Error>;

/// VFD device controller.
///
/// # Type Parameters
///
/// - `P`: Control-line backend ([`PinControl`])
/// - `T`: Serial link backend ([`SerialTransport`])
/// - `D`: Blocking delay ([`Delay`])
pub struct VfdDriver<P, T, D>
where
    P: PinControl,
    T: SerialTransport,
    D: Delay,
{
    config: VfdConfig,
    pins: P,
    transport: T,
    delay: D,
    state: DeviceState,
    transport_open: bool,
}

impl<P, T, D> VfdDriver<P, T, D>
where
    P: PinControl,
    T: SerialTransport,
    D: Delay,
{
    /// Creates a driver. Nothing is sent until [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: VfdConfig, pins: P, transport: T, delay: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            pins,
            transport,
            delay,
            state: DeviceState::Uninitialized,
            transport_open: false,
        })
    }

    /// Brings the display up. A no-op once the driver is ready.
    ///
    /// In order: configure the five pins, open the transport, raise enable,
    /// pulse reset, set the digit count, set maximum brightness.
    ///
    /// # Errors
    ///
    /// Any pin or transport failure aborts bring-up. The driver stays
    /// [`Uninitialized`](DeviceState::Uninitialized) and a transport opened
    /// during this call is closed again.
    pub fn init(&mut self) -> Result<(), DriverError<P, T>> {
        if self.state == DeviceState::Ready {
            return Ok(());
        }

        info!(
            "VFD bring-up: {} digits at {} Hz",
            self.config.digits, self.config.clock_hz
        );

        self.pins
            .configure_outputs(&self.config.pins)
            .map_err(VfdError::Pin)?;
        self.transport
            .open(&self.config.bus_config())
            .map_err(VfdError::Transport)?;
        self.transport_open = true;

        if let Err(e) = self.bring_up() {
            self.close_transport();
            return Err(e);
        }

        self.state = DeviceState::Ready;
        info!("VFD initialization complete");
        Ok(())
    }

    fn bring_up(&mut self) -> Result<(), DriverError<P, T>> {
        self.pins
            .set_high(PinRole::Enable)
            .map_err(VfdError::Pin)?;
        reset_sequence(&mut self.pins, &mut self.delay).map_err(VfdError::Pin)?;
        self.send(VfdCommand::SetDigits(self.config.digits))?;
        self.send(VfdCommand::SetBrightness(MAX_BRIGHTNESS))
    }

    /// Blanks every cell by writing spaces across the display.
    pub fn clear(&mut self) -> Result<(), DriverError<P, T>> {
        let blank = [b' '; MAX_DIGITS as usize];
        let digits = self.config.digits as usize;
        self.write_bytes(0, &blank[..digits])
    }

    /// Lights every segment for `duration_ms`, then restores normal rendering.
    ///
    /// Blocks the caller for the whole duration.
    pub fn full_test(&mut self, duration_ms: u32) -> Result<(), DriverError<P, T>> {
        self.ensure_ready()?;
        self.send(VfdCommand::LampTestOn)?;
        self.delay.delay_ms(duration_ms);
        self.send(VfdCommand::LampTestOff)
    }

    /// [`full_test`](Self::full_test) for [`DEFAULT_LAMP_TEST_MS`].
    pub fn full_test_default(&mut self) -> Result<(), DriverError<P, T>> {
        self.full_test(DEFAULT_LAMP_TEST_MS)
    }

    /// Sets display intensity (raw 0-255).
    pub fn set_brightness(&mut self, level: u8) -> Result<(), DriverError<P, T>> {
        self.ensure_ready()?;
        self.send(VfdCommand::SetBrightness(level))
    }

    /// Shows character `code` at cell `position`.
    ///
    /// Codes `0x00-0x07` show uploaded glyphs; `0x30-0x3F` built-in ones.
    pub fn write_char(&mut self, position: u8, code: u8) -> Result<(), DriverError<P, T>> {
        self.ensure_ready()?;
        self.check_position(position)?;
        self.send(VfdCommand::WriteChar { position, code })
    }

    /// Writes `text` into consecutive cells starting at `start`.
    ///
    /// Under the default payload policy a NUL in `text` ends the write.
    pub fn write_string(&mut self, start: u8, text: &str) -> Result<(), DriverError<P, T>> {
        self.write_bytes(start, text.as_bytes())
    }

    /// Writes raw character codes into consecutive cells starting at `start`.
    ///
    /// The length is checked against the bytes the payload policy sends, so
    /// anything after a NUL under `StopAtNul` does not count.
    pub fn write_bytes(&mut self, start: u8, text: &[u8]) -> Result<(), DriverError<P, T>> {
        self.ensure_ready()?;
        self.check_position(start)?;
        let digits = self.config.digits;
        let len = self.config.payload_policy.sent_len(text);
        if start as usize + len > digits as usize {
            return Err(VfdError::TextTooLong { start, len, digits });
        }
        self.send(VfdCommand::WriteString { start, text })
    }

    /// Uploads a glyph bitmap into CGRAM slot `font.id()`.
    pub fn load_custom_font(&mut self, font: &Font) -> Result<(), DriverError<P, T>> {
        self.ensure_ready()?;
        self.send(VfdCommand::LoadFont(font))
    }

    /// Closes the transport and returns to
    /// [`Uninitialized`](DeviceState::Uninitialized).
    ///
    /// Safe to call repeatedly; also run on drop. A later
    /// [`init`](Self::init) reopens the transport and runs the full bring-up.
    pub fn release(&mut self) {
        self.close_transport();
        self.state = DeviceState::Uninitialized;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Whether bring-up has completed.
    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }

    /// Configuration the driver was built with.
    pub fn config(&self) -> &VfdConfig {
        &self.config
    }

    /// Number of character cells.
    pub fn digits(&self) -> u8 {
        self.config.digits
    }

    fn ensure_ready(&self) -> Result<(), DriverError<P, T>> {
        match self.state {
            DeviceState::Ready => Ok(()),
            DeviceState::Uninitialized => Err(VfdError::NotReady),
        }
    }

    fn check_position(&self, position: u8) -> Result<(), DriverError<P, T>> {
        if position >= self.config.digits {
            return Err(VfdError::PositionOutOfRange {
                position,
                digits: self.config.digits,
            });
        }
        Ok(())
    }

    fn send(&mut self, cmd: VfdCommand<'_>) -> Result<(), DriverError<P, T>> {
        let encoded = cmd.encode(self.config.payload_policy)?;
        if let Some(index) = encoded.truncated_at {
            warn!(
                "opcode {:#04x}: payload cut at zero byte (index {})",
                cmd.opcode(),
                index
            );
        }
        debug!("frame {:02x?}", encoded.frame.as_slice());
        transmit_frame(&mut self.pins, &mut self.transport, &encoded.frame)?;
        Ok(())
    }

    fn close_transport(&mut self) {
        if self.transport_open {
            self.transport.close();
            self.transport_open = false;
            info!("VFD transport released");
        }
    }
}

impl<P, T, D> Drop for VfdDriver<P, T, D>
where
    P: PinControl,
    T: SerialTransport,
    D: Delay,
{
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{BusEvent, MockBus, MockDelay, MockPins, MockTransport};
    use crate::traits::Level;

    type MockDriver = VfdDriver<MockPins, MockTransport, MockDelay>;

    fn driver(bus: &MockBus, config: VfdConfig) -> MockDriver {
        VfdDriver::new(config, bus.pins(), bus.transport(), bus.delay()).unwrap()
    }

    #[test]
    fn new_rejects_bad_digit_count() {
        let bus = MockBus::new();
        let result = VfdDriver::new(
            VfdConfig::default().with_digits(0),
            bus.pins(),
            bus.transport(),
            bus.delay(),
        );
        assert!(matches!(result, Err(ConfigError::DigitsOutOfRange(0))));
    }

    #[test]
    fn new_sends_nothing() {
        let bus = MockBus::new();
        let vfd = driver(&bus, VfdConfig::default());
        assert_eq!(vfd.state(), DeviceState::Uninitialized);
        assert!(bus.events().is_empty());
    }

    #[test]
    fn init_sequence_order() {
        let bus = MockBus::new();
        let mut vfd = driver(&bus, VfdConfig::default());

        vfd.init().unwrap();

        let events = bus.events();
        assert!(matches!(events[0], BusEvent::Configure(_)));
        assert!(matches!(events[1], BusEvent::Open(_)));
        assert_eq!(events[2], BusEvent::Level(PinRole::Enable, Level::High));
        assert_eq!(events[3], BusEvent::Sleep(2));
        assert_eq!(events[4], BusEvent::Level(PinRole::Reset, Level::Low));
        assert_eq!(events[5], BusEvent::Sleep(2));
        assert_eq!(events[6], BusEvent::Level(PinRole::Reset, Level::High));
        assert_eq!(bus.frames(), vec![vec![0xE0, 7], vec![0xE4, 0xFF]]);
        assert!(vfd.is_ready());
    }

    #[test]
    fn init_is_idempotent() {
        let bus = MockBus::new();
        let mut vfd = driver(&bus, VfdConfig::default());

        vfd.init().unwrap();
        let after_first = bus.events().len();
        vfd.init().unwrap();

        assert_eq!(bus.events().len(), after_first);
    }

    #[test]
    fn operations_require_ready() {
        let bus = MockBus::new();
        let mut vfd = driver(&bus, VfdConfig::default());

        assert_eq!(vfd.set_brightness(10), Err(VfdError::NotReady));
        assert_eq!(vfd.write_char(0, 0x30), Err(VfdError::NotReady));
        assert_eq!(vfd.write_string(0, "hi"), Err(VfdError::NotReady));
        assert_eq!(vfd.clear(), Err(VfdError::NotReady));
        assert_eq!(vfd.full_test(10), Err(VfdError::NotReady));
        assert_eq!(
            vfd.load_custom_font(&crate::font::KATAKANA[0]),
            Err(VfdError::NotReady)
        );
        assert!(bus.events().is_empty());
    }

    #[test]
    fn release_closes_once() {
        let bus = MockBus::new();
        let mut vfd = driver(&bus, VfdConfig::default());

        vfd.init().unwrap();
        vfd.release();
        vfd.release();

        let closes = bus
            .events()
            .iter()
            .filter(|e| **e == BusEvent::Close)
            .count();
        assert_eq!(closes, 1);
        assert_eq!(vfd.state(), DeviceState::Uninitialized);
    }

    #[test]
    fn release_without_init_is_noop() {
        let bus = MockBus::new();
        let mut vfd = driver(&bus, VfdConfig::default());
        vfd.release();
        assert!(bus.events().is_empty());
    }

    #[test]
    fn drop_releases_transport() {
        let bus = MockBus::new();
        {
            let mut vfd = driver(&bus, VfdConfig::default());
            vfd.init().unwrap();
        }
        assert_eq!(bus.events().last(), Some(&BusEvent::Close));
        assert!(!bus.is_open());
    }
}
