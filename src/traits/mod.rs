//! Trait definitions for hardware abstraction.
//!
//! This module defines the capabilities rs-vfd needs from a platform so the
//! protocol layer can:
//! - Run on different hardware (ESP32, desktop mock)
//! - Be tested without real time passing
//!
//! # Hardware Abstraction
//!
//! - [`PinControl`]: Chip-select, reset and enable lines
//! - [`SerialTransport`]: Byte-at-a-time serial link
//! - [`Delay`]: Blocking sleeps for the reset pulse and lamp test

pub mod hardware;

pub use hardware::*;
