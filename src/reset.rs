//! Hardware reset pulse for the VFD controller.

use crate::traits::{Delay, PinControl, PinRole};

/// Length of each phase of the reset pulse.
pub const RESET_PULSE_MS: u32 = 2;

/// Pulses the reset line: wait, pull low, wait, release high.
///
/// Runs once during bring-up, before the first command.
pub fn reset_sequence<P, D>(pins: &mut P, delay: &mut D) -> Result<(), P::Error>
where
    P: PinControl,
    D: Delay,
{
    delay.delay_ms(RESET_PULSE_MS);
    pins.set_low(PinRole::Reset)?;
    delay.delay_ms(RESET_PULSE_MS);
    pins.set_high(PinRole::Reset)
}
