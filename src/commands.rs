//! Command model and byte encoding for the VFD controller.
//!
//! Every operation on the display is one command: an opcode byte followed by
//! zero or more payload bytes, sent under a single chip-select frame.
//!
//! # Opcode Table
//!
//! | Command | Opcode | Payload |
//! |---------|--------|---------|
//! | [`VfdCommand::WriteChar`] | `0x20 + position` | character code |
//! | [`VfdCommand::WriteString`] | `0x20 + start` | text bytes |
//! | [`VfdCommand::LoadFont`] | `0x40 + font id` | 5 column bytes |
//! | [`VfdCommand::SetDigits`] | `0xE0` | digit count - 1 |
//! | [`VfdCommand::SetBrightness`] | `0xE4` | level |
//! | [`VfdCommand::LampTestOff`] | `0xE8` | - |
//! | [`VfdCommand::LampTestOn`] | `0xE9` | - |
//!
//! # Zero Bytes In Payloads
//!
//! The controller firmware this crate targets has always been fed multi-byte
//! payloads as NUL-terminated strings, so the first `0x00` ends the payload.
//! That is the default [`PayloadPolicy::StopAtNul`]. It also cuts glyph
//! bitmaps with a blank column short. Whether the controller needs this is
//! unverified on hardware, so the behavior is a named policy rather than
//! hidden inside the encoder.
//!
//! ```rust
//! use rs_vfd::{PayloadPolicy, VfdCommand};
//!
//! let cmd = VfdCommand::WriteString { start: 0, text: b"AB\0CD" };
//!
//! let encoded = cmd.encode(PayloadPolicy::StopAtNul).unwrap();
//! assert_eq!(encoded.frame.as_slice(), &[0x20, b'A', b'B']);
//! assert_eq!(encoded.truncated_at, Some(2));
//!
//! assert!(cmd.encode(PayloadPolicy::RejectNul).is_err());
//! ```

use core::fmt;

use crate::config::MAX_DIGITS;
use crate::font::Font;

/// Write to display RAM; the cell address is added to it.
pub const DCRAM_WRITE: u8 = 0x20;
/// Write to character-generator RAM; the slot is added to it.
pub const CGRAM_WRITE: u8 = 0x40;
/// Set the number of active cells.
pub const SET_DIGITS: u8 = 0xE0;
/// Set display intensity.
pub const SET_BRIGHTNESS: u8 = 0xE4;
/// Return to normal rendering.
pub const LAMP_TEST_OFF: u8 = 0xE8;
/// Force every segment on.
pub const LAMP_TEST_ON: u8 = 0xE9;

/// Longest encoded command: opcode plus one byte per cell.
pub const MAX_FRAME_LEN: usize = 1 + MAX_DIGITS as usize;

/// Encoded command bytes, opcode first.
pub type Frame = heapless::Vec<u8, MAX_FRAME_LEN>;

// ============================================================================
// Payload Policy
// ============================================================================

/// Treatment of `0x00` inside multi-byte payloads.
///
/// Single-byte payloads are never affected: writing character code `0x00`
/// (CGRAM slot 0) or a digit count of 1 always sends the zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PayloadPolicy {
    /// Stop at the first zero byte without sending it.
    ///
    /// Wire-compatible with existing controller firmware.
    #[default]
    StopAtNul,
    /// Refuse the command before anything is sent.
    RejectNul,
    /// Send every byte, zeros included.
    Verbatim,
}

impl PayloadPolicy {
    /// Number of leading bytes of `bytes` this policy puts on the wire.
    ///
    /// Under [`RejectNul`](Self::RejectNul) a payload holding a zero is
    /// refused at encode time; its full length is reported here.
    pub fn sent_len(self, bytes: &[u8]) -> usize {
        match self {
            PayloadPolicy::StopAtNul => bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len()),
            PayloadPolicy::RejectNul | PayloadPolicy::Verbatim => bytes.len(),
        }
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Payload shape of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Opcode only.
    None,
    /// Exactly one byte, always sent.
    Byte(u8),
    /// Byte sequence, subject to the [`PayloadPolicy`].
    Bytes(&'a [u8]),
}

// ============================================================================
// Commands
// ============================================================================

/// A single controller command.
///
/// Addresses are not range-checked here; the opcode is formed with 8-bit
/// wrapping arithmetic. [`VfdDriver`](crate::VfdDriver) validates positions
/// against the configured digit count before building a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VfdCommand<'a> {
    /// Show character `code` at cell `position`.
    ///
    /// Codes `0x00-0x07` select CGRAM glyphs, `0x30-0x3F` built-in glyphs.
    WriteChar {
        /// Cell address.
        position: u8,
        /// Character code.
        code: u8,
    },
    /// Write consecutive cells starting at `start`.
    WriteString {
        /// First cell address.
        start: u8,
        /// Character codes, one per cell.
        text: &'a [u8],
    },
    /// Upload a glyph bitmap into its CGRAM slot.
    LoadFont(&'a Font),
    /// Set display intensity (raw 0-255).
    SetBrightness(u8),
    /// Set the number of active cells (1-16).
    SetDigits(u8),
    /// Force all segments on.
    LampTestOn,
    /// Return to normal rendering.
    LampTestOff,
}

impl<'a> VfdCommand<'a> {
    /// Opcode byte for this command.
    pub fn opcode(&self) -> u8 {
        match self {
            VfdCommand::WriteChar { position, .. } => DCRAM_WRITE.wrapping_add(*position),
            VfdCommand::WriteString { start, .. } => DCRAM_WRITE.wrapping_add(*start),
            VfdCommand::LoadFont(font) => CGRAM_WRITE.wrapping_add(font.id()),
            VfdCommand::SetBrightness(_) => SET_BRIGHTNESS,
            VfdCommand::SetDigits(_) => SET_DIGITS,
            VfdCommand::LampTestOn => LAMP_TEST_ON,
            VfdCommand::LampTestOff => LAMP_TEST_OFF,
        }
    }

    /// Payload carried after the opcode.
    pub fn payload(&self) -> Payload<'a> {
        match *self {
            VfdCommand::WriteChar { code, .. } => Payload::Byte(code),
            VfdCommand::WriteString { text, .. } => Payload::Bytes(text),
            VfdCommand::LoadFont(font) => Payload::Bytes(font.data()),
            VfdCommand::SetBrightness(level) => Payload::Byte(level),
            VfdCommand::SetDigits(digits) => Payload::Byte(digits.wrapping_sub(1)),
            VfdCommand::LampTestOn | VfdCommand::LampTestOff => Payload::None,
        }
    }

    /// Encodes the command into the bytes that go on the wire.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::NulInPayload`] under [`PayloadPolicy::RejectNul`]
    /// - [`EncodeError::FrameTooLong`] if the frame exceeds [`MAX_FRAME_LEN`]
    pub fn encode(&self, policy: PayloadPolicy) -> Result<Encoded, EncodeError> {
        let mut frame = Frame::new();
        push(&mut frame, self.opcode())?;

        let mut truncated_at = None;
        match self.payload() {
            Payload::None => {}
            Payload::Byte(byte) => push(&mut frame, byte)?,
            Payload::Bytes(bytes) => {
                let nul = bytes.iter().position(|&b| b == 0);
                let sent = match (policy, nul) {
                    (PayloadPolicy::RejectNul, Some(index)) => {
                        return Err(EncodeError::NulInPayload { index });
                    }
                    (PayloadPolicy::StopAtNul, Some(index)) => {
                        truncated_at = Some(index);
                        &bytes[..index]
                    }
                    _ => bytes,
                };
                frame
                    .extend_from_slice(sent)
                    .map_err(|_| EncodeError::FrameTooLong {
                        len: 1 + sent.len(),
                    })?;
            }
        }

        Ok(Encoded {
            frame,
            truncated_at,
        })
    }
}

fn push(frame: &mut Frame, byte: u8) -> Result<(), EncodeError> {
    frame.push(byte).map_err(|_| EncodeError::FrameTooLong {
        len: frame.len() + 1,
    })
}

/// Result of encoding a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Opcode followed by the payload bytes that will be sent.
    pub frame: Frame,
    /// Index of the zero byte that ended the payload early, if any.
    pub truncated_at: Option<usize>,
}

/// Command that cannot be put on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// Zero byte found at `index` while running [`PayloadPolicy::RejectNul`].
    NulInPayload {
        /// Payload index of the first zero byte.
        index: usize,
    },
    /// Frame would be longer than [`MAX_FRAME_LEN`].
    FrameTooLong {
        /// Length the frame would have had.
        len: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::NulInPayload { index } => {
                write!(f, "zero byte at payload index {}", index)
            }
            EncodeError::FrameTooLong { len } => {
                write!(f, "frame of {} bytes exceeds {}", len, MAX_FRAME_LEN)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
