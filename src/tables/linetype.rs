//! Line type table entry

use super::TableEntryCommon;
use crate::types::{Handle, Vector2};

/// One dash, gap or embedded shape of a line type pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTypeSegment {
    /// Dash length; negative for gaps
    pub length: f64,
    /// Shape number or text-in-style index
    pub shape_code: i16,
    pub offset: Vector2,
    pub scale: f64,
    pub rotation: f64,
    /// 1 absolute rotation, 2 text, 4 shape
    pub shape_flags: i16,
    /// Text shown in the segment when `shape_flags & 2` is set
    pub text: String,
    /// Style or shape file the segment draws with
    pub style: Handle,
}

impl LineTypeSegment {
    pub fn is_text(&self) -> bool {
        self.shape_flags & 2 != 0
    }
}

/// A line type table entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineType {
    pub common: TableEntryCommon,
    pub description: String,
    /// Total pattern length
    pub pattern_length: f64,
    /// Always 'A' (65) in practice
    pub alignment: u8,
    pub segments: Vec<LineTypeSegment>,
}

impl LineType {
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
            alignment: b'A',
            ..Default::default()
        }
    }

    /// BYLAYER, BYBLOCK and CONTINUOUS carry no pattern.
    pub fn is_continuous(&self) -> bool {
        self.segments.is_empty()
    }
}
