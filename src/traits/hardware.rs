//! Hardware capability traits for the VFD control lines and serial bus.
//!
//! The driver never touches a vendor API directly. It talks to three
//! capabilities that a platform backend provides:
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PinControl`] | Chip-select, reset and enable lines (plus bus pin setup) |
//! | [`SerialTransport`] | Write-only synchronous byte link to the controller |
//! | [`Delay`] | Blocking millisecond sleep |
//!
//! # Implementation
//!
//! For testing and desktop development, use the simulated bus from
//! [`crate::hal::mock`]. For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_vfd::hal::MockBus;
//! use rs_vfd::traits::{Level, PinControl, PinRole, SerialTransport};
//! use rs_vfd::VfdConfig;
//!
//! let bus = MockBus::new();
//! let mut pins = bus.pins();
//! let mut spi = bus.transport();
//! spi.open(&VfdConfig::default().bus_config()).unwrap();
//!
//! pins.set_level(PinRole::ChipSelect, Level::Low).unwrap();
//! spi.transmit(0xE4).unwrap();
//! pins.set_level(PinRole::ChipSelect, Level::High).unwrap();
//!
//! assert_eq!(bus.frames(), vec![vec![0xE4]]);
//! ```

use crate::config::PinConfig;

/// Logic level of a digital output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Driven low (0).
    Low,
    /// Driven high (1).
    High,
}

impl Level {
    /// Returns the level as the raw value used by GPIO drivers.
    #[inline]
    pub const fn as_raw(self) -> u32 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Logical function of each line wired to the VFD module.
///
/// Backends map a role to a physical pin using the [`PinConfig`] handed to
/// [`PinControl::configure_outputs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PinRole {
    /// Serial data out (DIN on the module).
    Data,
    /// Serial clock.
    Clock,
    /// Chip-select, active low. Frames every command.
    ChipSelect,
    /// Controller reset, active low.
    Reset,
    /// Display power enable, active high.
    Enable,
}

impl PinRole {
    /// Returns the GPIO number assigned to this role.
    pub const fn gpio(self, pins: &PinConfig) -> i32 {
        match self {
            PinRole::Data => pins.data,
            PinRole::Clock => pins.clock,
            PinRole::ChipSelect => pins.chip_select,
            PinRole::Reset => pins.reset,
            PinRole::Enable => pins.enable,
        }
    }
}

/// Clock polarity/phase mode of the serial bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpiMode {
    /// CPOL = 0, CPHA = 0.
    #[default]
    Mode0,
    /// CPOL = 0, CPHA = 1.
    Mode1,
    /// CPOL = 1, CPHA = 0.
    Mode2,
    /// CPOL = 1, CPHA = 1.
    Mode3,
}

/// Direction of data flow on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duplex {
    /// Simultaneous transmit and receive.
    Full,
    /// One direction at a time. The VFD only ever receives.
    Half,
}

/// Order in which the bits of each byte are shifted out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Most significant bit first.
    MsbFirst,
    /// Least significant bit first.
    LsbFirst,
}

/// Logical contract for opening the serial transport.
///
/// DMA, queue depth and interrupt allocation are left to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusConfig {
    /// Bus clock in hertz.
    pub clock_hz: u32,
    /// Clock polarity/phase.
    pub mode: SpiMode,
    /// Duplex mode.
    pub duplex: Duplex,
    /// Bit order for transmitted bytes.
    pub bit_order: BitOrder,
    /// Whether the peripheral drives chip-select itself.
    ///
    /// Always `false` for the VFD: chip-select is a plain GPIO held by the
    /// driver for the whole command.
    pub hardware_cs: bool,
}

/// Digital output capability for the VFD control lines.
///
/// # Implementation Notes
///
/// - `configure_outputs` is called once during bring-up, before any level change
/// - Outputs should be push-pull with pull-up enabled and interrupts disabled
/// - `set_level` must take effect before it returns
pub trait PinControl {
    /// Error type for pin operations.
    type Error;

    /// Configures all five pins in `pins` as digital outputs.
    fn configure_outputs(&mut self, pins: &PinConfig) -> Result<(), Self::Error>;

    /// Drives the pin assigned to `role` to `level`.
    fn set_level(&mut self, role: PinRole, level: Level) -> Result<(), Self::Error>;

    /// Drives the pin assigned to `role` low.
    fn set_low(&mut self, role: PinRole) -> Result<(), Self::Error> {
        self.set_level(role, Level::Low)
    }

    /// Drives the pin assigned to `role` high.
    fn set_high(&mut self, role: PinRole) -> Result<(), Self::Error> {
        self.set_level(role, Level::High)
    }
}

/// Write-only synchronous serial link.
///
/// # Implementation Notes
///
/// - `transmit` sends exactly one 8-bit value and blocks until it is on the wire
/// - `close` must be safe to call when the link was never opened
pub trait SerialTransport {
    /// Error type for transport operations.
    type Error;

    /// Opens the link with the given bus contract.
    fn open(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Transmits one byte as its own transaction.
    fn transmit(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Releases the link. No-op if it is not open.
    fn close(&mut self);
}

/// Blocking delay.
///
/// Used for the reset pulse and the lamp test hold. Injected so tests run
/// without real time passing.
pub trait Delay {
    /// Blocks the caller for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
