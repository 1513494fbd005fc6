//! Failure paths, addressing bounds and payload policy tests

use rs_vfd::hal::{BusEvent, MockBus, MockDelay, MockError, MockPins, MockTransport};
use rs_vfd::{
    DeviceState, EncodeError, Font, PayloadPolicy, VfdConfig, VfdDriver, VfdError,
};

type MockDriver = VfdDriver<MockPins, MockTransport, MockDelay>;

fn ready_driver(bus: &MockBus, config: VfdConfig) -> MockDriver {
    let mut vfd = VfdDriver::new(config, bus.pins(), bus.transport(), bus.delay()).unwrap();
    vfd.init().unwrap();
    bus.reset_trace();
    vfd
}

// ============================================================================
// Bring-up Failures
// ============================================================================

#[test]
fn pin_configuration_failure_aborts_init() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default(),
        bus.pins().fail_configure(),
        bus.transport(),
        bus.delay(),
    )
    .unwrap();

    assert_eq!(vfd.init(), Err(VfdError::Pin(MockError::Configure)));
    assert_eq!(vfd.state(), DeviceState::Uninitialized);
    assert!(bus.events().is_empty());
}

#[test]
fn transport_open_failure_aborts_init() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default(),
        bus.pins(),
        bus.transport().fail_open(),
        bus.delay(),
    )
    .unwrap();

    assert_eq!(vfd.init(), Err(VfdError::Transport(MockError::Open)));
    assert_eq!(vfd.state(), DeviceState::Uninitialized);
    assert!(bus.bytes().is_empty());
}

#[test]
fn failure_after_open_closes_transport() {
    let bus = MockBus::new();
    let mut vfd = VfdDriver::new(
        VfdConfig::default(),
        bus.pins(),
        bus.transport().fail_transmit_after(1),
        bus.delay(),
    )
    .unwrap();

    assert_eq!(vfd.init(), Err(VfdError::Transport(MockError::Transmit)));
    assert_eq!(vfd.state(), DeviceState::Uninitialized);
    assert!(!bus.is_open());
    assert_eq!(bus.events().last(), Some(&BusEvent::Close));
}

// ============================================================================
// Addressing Bounds
// ============================================================================

#[test]
fn write_char_past_last_cell_rejected() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default().with_digits(8));

    assert!(vfd.write_char(7, 0x30).is_ok());
    assert_eq!(
        vfd.write_char(8, 0x30),
        Err(VfdError::PositionOutOfRange {
            position: 8,
            digits: 8
        })
    );
    assert_eq!(bus.frames().len(), 1);
}

#[test]
fn write_string_start_out_of_range() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default().with_digits(4));

    assert_eq!(
        vfd.write_string(4, "A"),
        Err(VfdError::PositionOutOfRange {
            position: 4,
            digits: 4
        })
    );
    assert!(bus.events().is_empty());
}

#[test]
fn write_string_overrun_rejected() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default().with_digits(8));

    assert_eq!(
        vfd.write_string(6, "ABC"),
        Err(VfdError::TextTooLong {
            start: 6,
            len: 3,
            digits: 8
        })
    );
    assert!(vfd.write_string(6, "AB").is_ok());
    assert_eq!(bus.frames(), vec![vec![0x26, b'A', b'B']]);
}

#[test]
fn empty_string_sends_opcode_only() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.write_string(3, "").unwrap();

    assert_eq!(bus.frames(), vec![vec![0x23]]);
}

#[test]
fn sixteen_digit_display_uses_full_window() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default().with_digits(16));

    vfd.write_char(15, 0x31).unwrap();
    vfd.clear().unwrap();

    let frames = bus.frames();
    assert_eq!(frames[0], vec![0x2F, 0x31]);
    assert_eq!(frames[1].len(), 17);
}

#[test]
fn font_slot_out_of_range_cannot_be_built() {
    assert!(Font::new(16, [0x7f; 5]).is_err());
}

// ============================================================================
// Payload Policy
// ============================================================================

#[test]
fn stop_at_nul_truncates_text() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    vfd.write_string(0, "AB\0CD").unwrap();

    assert_eq!(bus.frames(), vec![vec![0x20, b'A', b'B']]);
    assert_eq!(bus.cs_transitions(), 2);
}

#[test]
fn bytes_past_nul_do_not_count_toward_length() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default().with_digits(4));

    vfd.write_string(0, "AB\0xxxxxx").unwrap();

    assert_eq!(bus.frames(), vec![vec![0x20, b'A', b'B']]);
}

#[test]
fn verbatim_counts_every_byte_toward_length() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(
        &bus,
        VfdConfig::default()
            .with_digits(4)
            .with_payload_policy(PayloadPolicy::Verbatim),
    );

    assert_eq!(
        vfd.write_string(0, "AB\0CD"),
        Err(VfdError::TextTooLong {
            start: 0,
            len: 5,
            digits: 4
        })
    );
    assert!(bus.events().is_empty());
}

#[test]
fn stop_at_nul_truncates_glyph() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(&bus, VfdConfig::default());

    let font = Font::new(3, [0x3e, 0x41, 0x00, 0x41, 0x3e]).unwrap();
    vfd.load_custom_font(&font).unwrap();

    assert_eq!(bus.frames(), vec![vec![0x43, 0x3e, 0x41]]);
}

#[test]
fn reject_nul_sends_nothing() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(
        &bus,
        VfdConfig::default().with_payload_policy(PayloadPolicy::RejectNul),
    );

    let font = Font::new(3, [0x3e, 0x41, 0x00, 0x41, 0x3e]).unwrap();

    assert_eq!(
        vfd.load_custom_font(&font),
        Err(VfdError::Encode(EncodeError::NulInPayload { index: 2 }))
    );
    assert!(bus.events().is_empty());
}

#[test]
fn reject_nul_still_sends_zero_char_code() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(
        &bus,
        VfdConfig::default().with_payload_policy(PayloadPolicy::RejectNul),
    );

    vfd.write_char(1, 0x00).unwrap();

    assert_eq!(bus.frames(), vec![vec![0x21, 0x00]]);
}

#[test]
fn verbatim_sends_blank_columns() {
    let bus = MockBus::new();
    let mut vfd = ready_driver(
        &bus,
        VfdConfig::default().with_payload_policy(PayloadPolicy::Verbatim),
    );

    let font = Font::new(3, [0x3e, 0x41, 0x00, 0x41, 0x3e]).unwrap();
    vfd.load_custom_font(&font).unwrap();

    assert_eq!(bus.frames(), vec![vec![0x43, 0x3e, 0x41, 0x00, 0x41, 0x3e]]);
}

// ============================================================================
// Mid-frame Failures
// ============================================================================

#[test]
fn transmit_failure_releases_chip_select() {
    let bus = MockBus::new();
    // bring-up sends 4 bytes; allow one more
    let mut vfd = VfdDriver::new(
        VfdConfig::default(),
        bus.pins(),
        bus.transport().fail_transmit_after(5),
        bus.delay(),
    )
    .unwrap();
    vfd.init().unwrap();
    bus.reset_trace();

    assert_eq!(
        vfd.write_string(0, "HELLO"),
        Err(VfdError::Transport(MockError::Transmit))
    );
    assert_eq!(bus.bytes(), vec![0x20]);
    assert_eq!(bus.cs_transitions(), 2);
}
