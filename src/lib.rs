//! # rs-vfd
//!
//! Driver for character Vacuum Fluorescent Display modules that take
//! commands over a write-only serial bus with a separate chip-select,
//! reset and enable line.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for control pins, serial link and delays
//! - **Bring-up sequence**: Pin setup, bus open, enable, reset pulse, digit count, brightness
//! - **Display operations**: Character and string writes, custom glyph upload, brightness, lamp test
//! - **Explicit payload policy**: The controller's stop-at-NUL quirk is a named, switchable policy
//! - **Validated addressing**: Out-of-range cells and glyph slots are errors, not silent misaddressing
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Pin, transport and delay capabilities
//! - `commands` - Opcode table and command encoding
//! - `encoder` - Chip-select framing of encoded commands
//! - `reset` - Reset pulse timing
//! - `driver` - Device controller that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_vfd::{hal::MockBus, Font, VfdConfig, VfdDriver};
//!
//! // Create a driver on a simulated bus
//! let bus = MockBus::new();
//! let mut vfd = VfdDriver::new(
//!     VfdConfig::default().with_digits(8),
//!     bus.pins(),
//!     bus.transport(),
//!     bus.delay(),
//! )
//! .unwrap();
//!
//! vfd.init().unwrap();
//! vfd.write_string(0, "12:34:56").unwrap();
//!
//! // Upload a glyph and show it in cell 7
//! let ki = Font::new(4, [0x14, 0x14, 0x7f, 0x0a, 0x0a]).unwrap();
//! vfd.load_custom_font(&ki).unwrap();
//! vfd.write_char(7, ki.id()).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Opcode table, payload policy and command encoding.
pub mod commands;
/// Driver configuration with validation.
pub mod config;
/// Demonstration cycle used by the ESP32 binary.
pub mod demo;
/// Device controller: lifecycle and display operations.
pub mod driver;
/// Chip-select framing of encoded commands.
pub mod encoder;
/// Driver error type.
pub mod error;
/// Custom glyph bitmaps and presets.
pub mod font;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Controller reset pulse.
pub mod reset;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use commands::{EncodeError, Encoded, Payload, PayloadPolicy, VfdCommand};
pub use config::{ConfigError, PinConfig, VfdConfig};
pub use driver::{DeviceState, DriverError, VfdDriver};
pub use error::VfdError;
pub use font::{Font, FontError};
pub use traits::{BusConfig, Delay, Level, PinControl, PinRole, SerialTransport};
