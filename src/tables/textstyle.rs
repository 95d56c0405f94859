//! Text style table entry

use super::TableEntryCommon;

bitflags::bitflags! {
    // Text generation flags (DXF group 71)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextGenerationFlags: u8 {
        /// Mirrored in X
        const BACKWARD = 2;
        /// Mirrored in Y
        const UPSIDE_DOWN = 4;
    }
}

/// A text style table entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub common: TableEntryCommon,
    pub is_vertical: bool,
    /// Style is a shape file reference, not a text font
    pub is_shape_file: bool,
    /// Fixed text height (0 = variable)
    pub height: f64,
    pub width_factor: f64,
    /// Oblique angle in radians
    pub oblique_angle: f64,
    pub generation: TextGenerationFlags,
    pub last_height: f64,
    pub font_file: String,
    /// Big font file name (for Asian languages)
    pub big_font_file: String,
}

impl TextStyle {
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
            width_factor: 1.0,
            last_height: 0.2,
            font_file: "txt".to_string(),
            ..Default::default()
        }
    }
}
