//! Simulated bus for testing without hardware.
//!
//! [`MockBus`] hands out pin, transport and delay backends that all append
//! to one shared, ordered trace. Tests drive the real driver through these
//! backends and then inspect exactly what would have appeared on the wires.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPins`] | [`PinControl`] | Records configuration and level changes |
//! | [`MockTransport`] | [`SerialTransport`] | Records open/close and every byte |
//! | [`MockDelay`] | [`Delay`] | Records sleeps without sleeping |
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
//! bus.reset_trace();
//!
//! vfd.set_brightness(0x40).unwrap();
//! assert_eq!(bus.frames(), vec![vec![0xE4, 0x40]]);
//! ```
//!
//! [`PinControl`]: crate::traits::PinControl
//! [`SerialTransport`]: crate::traits::SerialTransport
//! [`Delay`]: crate::traits::Delay

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::config::PinConfig;
use crate::traits::{BusConfig, Delay, Level, PinControl, PinRole, SerialTransport};

/// One observable action on the simulated bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusEvent {
    /// Pins configured as outputs.
    Configure(PinConfig),
    /// A control line changed level.
    Level(PinRole, Level),
    /// Transport opened.
    Open(BusConfig),
    /// One byte transmitted.
    Byte(u8),
    /// Transport closed.
    Close,
    /// Blocking delay in milliseconds.
    Sleep(u32),
}

/// Error injected by a mock backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockError {
    /// Pin configuration refused.
    Configure,
    /// Level change refused.
    SetLevel,
    /// Transport open refused.
    Open,
    /// Byte transmission refused.
    Transmit,
    /// Byte sent on a transport that is not open.
    NotOpen,
}

#[derive(Debug, Default)]
struct Trace {
    events: Vec<BusEvent>,
    open: bool,
}

type SharedTrace = Rc<RefCell<Trace>>;

// ============================================================================
// Bus
// ============================================================================

/// Shared trace plus factory for the mock backends.
#[derive(Debug, Default, Clone)]
pub struct MockBus {
    trace: SharedTrace,
}

impl MockBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin backend recording into this bus.
    pub fn pins(&self) -> MockPins {
        MockPins {
            trace: Rc::clone(&self.trace),
            fail_configure: false,
            fail_set_level: false,
        }
    }

    /// Transport backend recording into this bus.
    pub fn transport(&self) -> MockTransport {
        MockTransport {
            trace: Rc::clone(&self.trace),
            fail_open: false,
            fail_transmit_after: None,
            transmitted: 0,
        }
    }

    /// Delay backend recording into this bus.
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            trace: Rc::clone(&self.trace),
        }
    }

    /// Every event so far, in order.
    pub fn events(&self) -> Vec<BusEvent> {
        self.trace.borrow().events.clone()
    }

    /// Forgets recorded events. The open/closed state is kept.
    pub fn reset_trace(&self) {
        self.trace.borrow_mut().events.clear();
    }

    /// Every transmitted byte, in order.
    pub fn bytes(&self) -> Vec<u8> {
        self.trace
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Transmitted bytes grouped by chip-select frame.
    ///
    /// A frame opens on chip-select low and closes on chip-select high.
    /// A frame still open at the end of the trace is not returned.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<u8>> = None;

        for event in self.trace.borrow().events.iter() {
            match event {
                BusEvent::Level(PinRole::ChipSelect, Level::Low) => current = Some(Vec::new()),
                BusEvent::Level(PinRole::ChipSelect, Level::High) => {
                    if let Some(frame) = current.take() {
                        frames.push(frame);
                    }
                }
                BusEvent::Byte(b) => {
                    if let Some(frame) = current.as_mut() {
                        frame.push(*b);
                    }
                }
                _ => {}
            }
        }
        frames
    }

    /// Number of chip-select level changes.
    pub fn cs_transitions(&self) -> usize {
        self.trace
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, BusEvent::Level(PinRole::ChipSelect, _)))
            .count()
    }

    /// Every delay, in milliseconds.
    pub fn sleeps(&self) -> Vec<u32> {
        self.trace
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Sleep(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Bus contract of the most recent open, if any.
    pub fn open_config(&self) -> Option<BusConfig> {
        self.trace
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|e| match e {
                BusEvent::Open(config) => Some(*config),
                _ => None,
            })
    }

    /// Whether the transport is currently open.
    pub fn is_open(&self) -> bool {
        self.trace.borrow().open
    }

    fn record(trace: &SharedTrace, event: BusEvent) {
        trace.borrow_mut().events.push(event);
    }
}

// ============================================================================
// Pins
// ============================================================================

/// Mock control-line backend.
#[derive(Debug)]
pub struct MockPins {
    trace: SharedTrace,
    fail_configure: bool,
    fail_set_level: bool,
}

impl MockPins {
    /// Makes `configure_outputs` fail.
    pub fn fail_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    /// Makes every `set_level` fail.
    pub fn fail_set_level(mut self) -> Self {
        self.fail_set_level = true;
        self
    }
}

impl PinControl for MockPins {
    type Error = MockError;

    fn configure_outputs(&mut self, pins: &PinConfig) -> Result<(), MockError> {
        if self.fail_configure {
            return Err(MockError::Configure);
        }
        MockBus::record(&self.trace, BusEvent::Configure(*pins));
        Ok(())
    }

    fn set_level(&mut self, role: PinRole, level: Level) -> Result<(), MockError> {
        if self.fail_set_level {
            return Err(MockError::SetLevel);
        }
        MockBus::record(&self.trace, BusEvent::Level(role, level));
        Ok(())
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Mock serial link.
#[derive(Debug)]
pub struct MockTransport {
    trace: SharedTrace,
    fail_open: bool,
    fail_transmit_after: Option<usize>,
    transmitted: usize,
}

impl MockTransport {
    /// Makes `open` fail.
    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Lets `count` bytes through, then fails every transmit.
    pub fn fail_transmit_after(mut self, count: usize) -> Self {
        self.fail_transmit_after = Some(count);
        self
    }
}

impl SerialTransport for MockTransport {
    type Error = MockError;

    fn open(&mut self, config: &BusConfig) -> Result<(), MockError> {
        if self.fail_open {
            return Err(MockError::Open);
        }
        let mut trace = self.trace.borrow_mut();
        trace.open = true;
        trace.events.push(BusEvent::Open(*config));
        Ok(())
    }

    fn transmit(&mut self, byte: u8) -> Result<(), MockError> {
        if !self.trace.borrow().open {
            return Err(MockError::NotOpen);
        }
        if self
            .fail_transmit_after
            .is_some_and(|limit| self.transmitted >= limit)
        {
            return Err(MockError::Transmit);
        }
        self.transmitted += 1;
        MockBus::record(&self.trace, BusEvent::Byte(byte));
        Ok(())
    }

    fn close(&mut self) {
        let mut trace = self.trace.borrow_mut();
        if trace.open {
            trace.open = false;
            trace.events.push(BusEvent::Close);
        }
    }
}

// ============================================================================
// Delay
// ============================================================================

/// Mock delay; records the request and returns immediately.
#[derive(Debug)]
pub struct MockDelay {
    trace: SharedTrace,
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        MockBus::record(&self.trace, BusEvent::Sleep(ms));
    }
}
