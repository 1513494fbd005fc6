//! Chip-select framing of encoded commands.
//!
//! A frame is: chip-select low, each byte as its own transport transaction,
//! chip-select high. Chip-select is held for the whole frame and only toggled
//! once in each direction.

use crate::commands::Frame;
use crate::traits::{PinControl, PinRole, SerialTransport};

/// Failure while a frame was on the bus.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameError<PE, TE> {
    /// Chip-select could not be driven.
    Pin(PE),
    /// A byte could not be transmitted.
    Transport(TE),
}

/// Sends one encoded command under a single chip-select frame.
///
/// If a byte fails to transmit, chip-select is still released before the
/// transport error is returned so the controller does not see a dangling
/// frame.
///
/// # Example
///
/// ```rust
/// use rs_vfd::commands::{Frame, VfdCommand};
/// use rs_vfd::encoder::transmit_frame;
/// use rs_vfd::hal::MockBus;
/// use rs_vfd::{PayloadPolicy, SerialTransport, VfdConfig};
///
/// let bus = MockBus::new();
/// let (mut pins, mut spi) = (bus.pins(), bus.transport());
/// spi.open(&VfdConfig::default().bus_config()).unwrap();
///
/// let encoded = VfdCommand::SetBrightness(0x80)
///     .encode(PayloadPolicy::StopAtNul)
///     .unwrap();
/// transmit_frame(&mut pins, &mut spi, &encoded.frame).unwrap();
///
/// assert_eq!(bus.frames(), vec![vec![0xE4, 0x80]]);
/// ```
pub fn transmit_frame<P, T>(
    pins: &mut P,
    transport: &mut T,
    frame: &Frame,
) -> Result<(), FrameError<P::Error, T::Error>>
where
    P: PinControl,
    T: SerialTransport,
{
    pins.set_low(PinRole::ChipSelect).map_err(FrameError::Pin)?;

    let sent = frame
        .iter()
        .try_for_each(|&byte| transport.transmit(byte));

    let released = pins.set_high(PinRole::ChipSelect);
    sent.map_err(FrameError::Transport)?;
    released.map_err(FrameError::Pin)
}
