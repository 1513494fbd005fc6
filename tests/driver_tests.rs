//! Integration tests for the VFD driver on the simulated bus

use rs_vfd::hal::{BusEvent, MockBus, MockDelay, MockPins, MockTransport};
use rs_vfd::traits::{BitOrder, Duplex, SpiMode};
use rs_vfd::{DeviceState, Font, Level, PinRole, VfdConfig, VfdDriver};

type MockDriver = VfdDriver<MockPins, MockTransport, MockDelay>;

fn ready_driver(bus: &MockBus, config: VfdConfig) -> MockDriver {
    let mut vfd = VfdDriver::new(config, bus.pins(), bus.transport(), bus.delay()).unwrap();
    vfd.init().unwrap();
    bus.reset_trace();
    vfd
}

#[test]
fn bring_up_sequence() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default(),
        bus.pins(),
        bus.transport(),
        bus.delay(),
    )
    .unwrap();

    vfd.init().unwrap();

    let events = bus.events();
    assert_eq!(
        events[..7],
        [
            BusEvent::Configure(VfdConfig::default().pins),
            BusEvent::Open(VfdConfig::default().bus_config()),
            BusEvent::Level(PinRole::Enable, Level::High),
            BusEvent::Sleep(2),
            BusEvent::Level(PinRole::Reset, Level::Low),
            BusEvent::Sleep(2),
            BusEvent::Level(PinRole::Reset, Level::High),
        ]
    );
    assert_eq!(bus.frames(), vec![vec![0xE0, 0x07], vec![0xE4, 0xFF]]);
    assert_eq!(vfd.state(), DeviceState::Ready);
}

#[test]
fn transport_opened_with_vfd_contract() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default().with_clock_hz(250_000),
        bus.pins(),
        bus.transport(),
        bus.delay(),
    )
    .unwrap();
    vfd.init().unwrap();

    let open = bus.open_config().unwrap();
    assert_eq!(open.clock_hz, 250_000);
    assert_eq!(open.mode, SpiMode::Mode0);
    assert_eq!(open.duplex, Duplex::Half);
    assert_eq!(open.bit_order, BitOrder::LsbFirst);
    assert!(!open.hardware_cs);
}

#[test]
fn repeated_init_sends_digit_count_once() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default(),
        bus.pins(),
        bus.transport(),
        bus.delay(),
    )
    .unwrap();

    vfd.init().unwrap();
    vfd.init().unwrap();
    vfd.init().unwrap();

    let digit_frames = bus.frames().iter().filter(|f| f[0] == 0xE0).count();
    assert_eq!(digit_frames, 1);
}

#[test]
fn write_string_clock_text() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.write_string(0, "12:34:56").unwrap();

    assert_eq!(
        bus.bytes(),
        vec![0x20, b'1', b'2', b':', b'3', b'4', b':', b'5', b'6']
    );
    assert_eq!(bus.frames().len(), 1);
    assert_eq!(bus.cs_transitions(), 2);
}

#[test]
fn clear_matches_blank_write() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default().with_digits(8));
    vfd.clear().unwrap();
    let cleared = bus.events();

    let other = MockBus::new();
    let mut reference = ready_driver(&other, VfdConfig::default().with_digits(8));
    reference.write_string(0, "        ").unwrap();

    assert_eq!(cleared, other.events());
}

#[test]
fn load_custom_font_frame() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    let font = Font::new(4, [0x14, 0x14, 0x7f, 0x0a, 0x0a]).unwrap();
    vfd.load_custom_font(&font).unwrap();

    assert_eq!(bus.frames(), vec![vec![0x44, 0x14, 0x14, 0x7f, 0x0a, 0x0a]]);
}

#[test]
fn set_brightness_frame() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.set_brightness(0xFF).unwrap();

    assert_eq!(bus.bytes(), vec![0xE4, 0xFF]);
}

#[test]
fn full_test_waits_between_frames() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.full_test(1000).unwrap();

    assert_eq!(
        bus.events(),
        vec![
            BusEvent::Level(PinRole::ChipSelect, Level::Low),
            BusEvent::Byte(0xE9),
            BusEvent::Level(PinRole::ChipSelect, Level::High),
            BusEvent::Sleep(1000),
            BusEvent::Level(PinRole::ChipSelect, Level::Low),
            BusEvent::Byte(0xE8),
            BusEvent::Level(PinRole::ChipSelect, Level::High),
        ]
    );
}

#[test]
fn full_test_default_duration() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.full_test_default().unwrap();

    assert_eq!(bus.sleeps(), vec![1000]);
}

#[test]
fn write_char_custom_slot_zero() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.write_char(0, 0x00).unwrap();
    vfd.write_char(7, 0x35).unwrap();

    assert_eq!(bus.frames(), vec![vec![0x20, 0x00], vec![0x27, 0x35]]);
}

#[test]
fn single_digit_display_sends_zero_count() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default().with_digits(1),
        bus.pins(),
        bus.transport(),
        bus.delay(),
    )
    .unwrap();

    vfd.init().unwrap();

    assert_eq!(bus.frames()[0], vec![0xE0, 0x00]);
}

#[test]
fn release_then_init_runs_bring_up_again() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.release();
    assert!(!vfd.is_ready());
    assert!(!bus.is_open());

    vfd.init().unwrap();
    assert!(vfd.is_ready());
    assert_eq!(bus.frames(), vec![vec![0xE0, 0x07], vec![0xE4, 0xFF]]);
}
