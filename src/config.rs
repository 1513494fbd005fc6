//! Driver configuration.
//!
//! Pin numbers, bus clock and the number of character cells on the module.
//! A [`VfdConfig`] is checked once when the driver is built and never changes
//! afterwards.
//!
//! # Example
//!
//! ```rust
//! use rs_vfd::config::{PinConfig, VfdConfig};
//! use rs_vfd::PayloadPolicy;
//!
//! // Use defaults (8 digits, 500 kHz)
//! let config = VfdConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // Or customize
//! let config = VfdConfig::default()
//!     .with_pins(PinConfig::default().with_chip_select(5))
//!     .with_digits(16)
//!     .with_payload_policy(PayloadPolicy::RejectNul);
//! assert!(config.validate().is_ok());
//! ```

use core::fmt;

use crate::commands::PayloadPolicy;
use crate::traits::{BitOrder, BusConfig, Duplex, SpiMode};

/// Smallest supported number of character cells.
pub const MIN_DIGITS: u8 = 1;

/// Largest supported number of character cells.
///
/// Cell addresses are added to the DCRAM opcode and must stay inside its
/// 16-entry window.
pub const MAX_DIGITS: u8 = 16;

/// Default bus clock (500 kHz).
pub const DEFAULT_CLOCK_HZ: u32 = 500_000;

/// Default number of character cells.
pub const DEFAULT_DIGITS: u8 = 8;

// ============================================================================
// Pin Config
// ============================================================================

/// GPIO assignment for the five VFD lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinConfig {
    /// Serial data out.
    pub data: i32,
    /// Serial clock.
    pub clock: i32,
    /// Chip-select (active low).
    pub chip_select: i32,
    /// Reset (active low).
    pub reset: i32,
    /// Power enable (active high).
    pub enable: i32,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            data: 13,
            clock: 14,
            chip_select: 15,
            reset: 12,
            enable: 0,
        }
    }
}

impl PinConfig {
    /// Set the data pin
    pub fn with_data(mut self, pin: i32) -> Self {
        self.data = pin;
        self
    }

    /// Set the clock pin
    pub fn with_clock(mut self, pin: i32) -> Self {
        self.clock = pin;
        self
    }

    /// Set the chip-select pin
    pub fn with_chip_select(mut self, pin: i32) -> Self {
        self.chip_select = pin;
        self
    }

    /// Set the reset pin
    pub fn with_reset(mut self, pin: i32) -> Self {
        self.reset = pin;
        self
    }

    /// Set the enable pin
    pub fn with_enable(mut self, pin: i32) -> Self {
        self.enable = pin;
        self
    }

    /// All five pins in configuration order.
    pub fn all(&self) -> [i32; 5] {
        [
            self.data,
            self.clock,
            self.chip_select,
            self.reset,
            self.enable,
        ]
    }

    /// Bit mask with one bit set per configured pin.
    ///
    /// Negative pin numbers are skipped.
    pub fn bit_mask(&self) -> u64 {
        self.all()
            .iter()
            .filter(|pin| (0..64).contains(*pin))
            .fold(0u64, |mask, pin| mask | (1u64 << pin))
    }
}

// ============================================================================
// VFD Config
// ============================================================================

/// Complete driver configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VfdConfig {
    /// Pin assignment.
    pub pins: PinConfig,
    /// Serial clock in hertz.
    pub clock_hz: u32,
    /// Number of character cells on the module (1-16).
    pub digits: u8,
    /// How zero bytes inside multi-byte payloads are handled.
    pub payload_policy: PayloadPolicy,
}

impl Default for VfdConfig {
    fn default() -> Self {
        Self {
            pins: PinConfig::default(),
            clock_hz: DEFAULT_CLOCK_HZ,
            digits: DEFAULT_DIGITS,
            payload_policy: PayloadPolicy::default(),
        }
    }
}

impl VfdConfig {
    /// Set the pin assignment
    pub fn with_pins(mut self, pins: PinConfig) -> Self {
        self.pins = pins;
        self
    }

    /// Set the bus clock
    pub fn with_clock_hz(mut self, hz: u32) -> Self {
        self.clock_hz = hz;
        self
    }

    /// Set the number of character cells
    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    /// Set the payload policy
    pub fn with_payload_policy(mut self, policy: PayloadPolicy) -> Self {
        self.payload_policy = policy;
        self
    }

    /// Checks the invariants the protocol relies on.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DigitsOutOfRange`] unless `1 <= digits <= 16`
    /// - [`ConfigError::ZeroClock`] if `clock_hz` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(ConfigError::DigitsOutOfRange(self.digits));
        }
        if self.clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        Ok(())
    }

    /// Transport contract required by the controller.
    ///
    /// Mode 0, half duplex, LSB first, chip-select driven as a GPIO.
    pub fn bus_config(&self) -> BusConfig {
        BusConfig {
            clock_hz: self.clock_hz,
            mode: SpiMode::Mode0,
            duplex: Duplex::Half,
            bit_order: BitOrder::LsbFirst,
            hardware_cs: false,
        }
    }
}

/// Rejected configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Digit count outside 1-16.
    DigitsOutOfRange(u8),
    /// Bus clock of 0 Hz.
    ZeroClock,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DigitsOutOfRange(d) => write!(
                f,
                "digit count {} outside {}..={}",
                d, MIN_DIGITS, MAX_DIGITS
            ),
            ConfigError::ZeroClock => f.write_str("bus clock must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

// ============================================================================
// Tests
// ============================================================================
