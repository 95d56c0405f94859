//! Colors as stored in CMC and ENC fields

use std::fmt;

/// Color of a table entry or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Stored index 256
    #[default]
    ByLayer,
    /// Stored index 0
    ByBlock,
    /// Color index 1-255
    Index(u8),
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from a stored color index.
    ///
    /// Layers store a negative index when they are switched off; the
    /// magnitude is the color.
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            _ if index < 0 => Color::Index(index.unsigned_abs().min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Decode a packed `0x00RRGGBB` true-color value as found in ENC/CMC.
    pub fn from_packed_rgb(rgb: u32) -> Self {
        let [b, g, r, _] = rgb.to_le_bytes();
        Color::Rgb { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => f.write_str("ByLayer"),
            Color::ByBlock => f.write_str("ByBlock"),
            Color::Index(i) => write!(f, "Index({i})"),
            Color::Rgb { r, g, b } => write!(f, "#{r:02X}{g:02X}{b:02X}"),
        }
    }
}
