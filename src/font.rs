//! Custom glyphs for the controller's CGRAM.
//!
//! A glyph is five column bytes (5x7 dot matrix, bit 0 at the top). It is
//! uploaded to one of the CGRAM slots and then shown by writing the slot
//! number as a character code.
//!
//! # Example
//!
//! ```rust
//! use rs_vfd::Font;
//!
//! let ki = Font::new(4, [0x14, 0x14, 0x7f, 0x0a, 0x0a]).unwrap();
//! assert_eq!(ki.id(), 4);
//! assert!(!ki.contains_nul());
//!
//! assert!(Font::new(16, [0; 5]).is_err());
//! ```

use core::fmt;

/// Number of column bytes in a glyph bitmap.
pub const GLYPH_WIDTH: usize = 5;

/// Highest CGRAM slot addressable by the upload opcode.
pub const MAX_FONT_ID: u8 = 15;

/// Glyph bitmap bound to a CGRAM slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFont"))]
pub struct Font {
    id: u8,
    data: [u8; GLYPH_WIDTH],
}

impl Font {
    /// Creates a glyph for slot `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::IdOutOfRange`] if `id > 15`.
    pub const fn new(id: u8, data: [u8; GLYPH_WIDTH]) -> Result<Self, FontError> {
        if id > MAX_FONT_ID {
            return Err(FontError::IdOutOfRange(id));
        }
        Ok(Self { id, data })
    }

    /// CGRAM slot.
    #[inline]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Column bitmap.
    #[inline]
    pub const fn data(&self) -> &[u8; GLYPH_WIDTH] {
        &self.data
    }

    /// Whether any column is blank (`0x00`).
    ///
    /// Blank columns cut the upload short under
    /// [`PayloadPolicy::StopAtNul`](crate::PayloadPolicy::StopAtNul).
    pub fn contains_nul(&self) -> bool {
        self.data.contains(&0)
    }
}

/// Unchecked wire form; deserialized fonts go through [`Font::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFont {
    id: u8,
    data: [u8; GLYPH_WIDTH],
}

#[cfg(feature = "serde")]
impl TryFrom<RawFont> for Font {
    type Error = FontError;

    fn try_from(raw: RawFont) -> Result<Self, FontError> {
        Font::new(raw.id, raw.data)
    }
}

/// Rejected glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontError {
    /// Slot number above 15.
    IdOutOfRange(u8),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::IdOutOfRange(id) => {
                write!(f, "font id {} outside 0..={}", id, MAX_FONT_ID)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FontError {}

const fn preset(id: u8, data: [u8; GLYPH_WIDTH]) -> Font {
    Font { id, data }
}

/// Half-width katakana glyphs for slots 0-4: ヘ ン ソ ク キ.
pub const KATAKANA: [Font; 5] = [
    preset(0, [0x04, 0x02, 0x04, 0x08, 0x30]),
    preset(1, [0x41, 0x42, 0x20, 0x10, 0x08]),
    preset(2, [0x41, 0x22, 0x10, 0x08, 0x07]),
    preset(3, [0x08, 0x44, 0x26, 0x15, 0x0c]),
    preset(4, [0x14, 0x14, 0x7f, 0x0a, 0x0a]),
];
