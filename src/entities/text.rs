//! Single-line text entity

use super::EntityCommon;
use crate::types::{Handle, Vector3};

/// A single line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    pub value: String,
    /// First alignment point; Z holds the elevation
    pub insert_point: Vector3,
    /// Second alignment point, used when the text is not left aligned
    pub alignment_point: Vector3,
    pub normal: Vector3,
    pub thickness: f64,
    pub oblique_angle: f64,
    pub rotation: f64,
    pub height: f64,
    pub width_factor: f64,
    /// 2 = backward, 4 = upside down
    pub generation: i16,
    pub horizontal_alignment: i16,
    pub vertical_alignment: i16,
    pub style_handle: Handle,
    /// Text style name, resolved from the style table
    pub style: String,
}

impl Text {
    pub fn new(value: impl Into<String>, insert_point: Vector3) -> Self {
        Text {
            value: value.into(),
            insert_point,
            ..Default::default()
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Text {
            common: EntityCommon::new(),
            value: String::new(),
            insert_point: Vector3::ZERO,
            alignment_point: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
            thickness: 0.0,
            oblique_angle: 0.0,
            rotation: 0.0,
            height: 0.0,
            width_factor: 1.0,
            generation: 0,
            horizontal_alignment: 0,
            vertical_alignment: 0,
            style_handle: Handle::NULL,
            style: String::new(),
        }
    }
}
