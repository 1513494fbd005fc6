//! Driver error type.

use core::fmt;

use crate::commands::EncodeError;
use crate::encoder::FrameError;

/// Error returned by [`VfdDriver`](crate::VfdDriver) operations.
///
/// `PE` and `TE` are the error types of the pin and transport backends.
///
/// Bring-up failures surface as [`Pin`](Self::Pin) or
/// [`Transport`](Self::Transport) from [`init`](crate::VfdDriver::init); the
/// driver stays uninitialized and the caller decides whether to abort.
#[derive(Debug, PartialEq, Eq)]
pub enum VfdError<PE, TE> {
    /// A control line could not be configured or driven.
    Pin(PE),
    /// The serial transport could not be opened or a byte failed to send.
    Transport(TE),
    /// Operation attempted before [`init`](crate::VfdDriver::init) completed.
    NotReady,
    /// Cell address at or beyond the configured digit count.
    PositionOutOfRange {
        /// Requested cell.
        position: u8,
        /// Configured digit count.
        digits: u8,
    },
    /// Text would run past the last cell.
    TextTooLong {
        /// First cell.
        start: u8,
        /// Bytes that would be sent under the payload policy.
        len: usize,
        /// Configured digit count.
        digits: u8,
    },
    /// Command refused by the payload policy or frame bound.
    Encode(EncodeError),
}

impl<PE, TE> From<FrameError<PE, TE>> for VfdError<PE, TE> {
    fn from(err: FrameError<PE, TE>) -> Self {
        match err {
            FrameError::Pin(e) => VfdError::Pin(e),
            FrameError::Transport(e) => VfdError::Transport(e),
        }
    }
}

impl<PE, TE> From<EncodeError> for VfdError<PE, TE> {
    fn from(err: EncodeError) -> Self {
        VfdError::Encode(err)
    }
}

impl<PE: fmt::Debug, TE: fmt::Debug> fmt::Display for VfdError<PE, TE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfdError::Pin(e) => write!(f, "pin error: {:?}", e),
            VfdError::Transport(e) => write!(f, "transport error: {:?}", e),
            VfdError::NotReady => f.write_str("display not initialized"),
            VfdError::PositionOutOfRange { position, digits } => write!(
                f,
                "position {} outside a {}-digit display",
                position, digits
            ),
            VfdError::TextTooLong { start, len, digits } => write!(
                f,
                "{} bytes from position {} overrun a {}-digit display",
                len, start, digits
            ),
            VfdError::Encode(e) => write!(f, "encode error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<PE: fmt::Debug, TE: fmt::Debug> std::error::Error for VfdError<PE, TE> {}

#[cfg(test)]
mod tests {
    use super::*;

    type TestError = VfdError<(), ()>;

    #[test]
    fn frame_error_conversion() {
        let pin: TestError = FrameError::Pin(()).into();
        assert_eq!(pin, VfdError::Pin(()));

        let transport: TestError = FrameError::Transport(()).into();
        assert_eq!(transport, VfdError::Transport(()));
    }

    #[test]
    fn display_messages() {
        let err: TestError = VfdError::PositionOutOfRange {
            position: 9,
            digits: 8,
        };
        assert_eq!(err.to_string(), "position 9 outside a 8-digit display");

        let err: TestError = VfdError::Encode(EncodeError::NulInPayload { index: 3 });
        assert_eq!(err.to_string(), "encode error: zero byte at payload index 3");

        let err: TestError = VfdError::NotReady;
        assert_eq!(err.to_string(), "display not initialized");
    }
}
