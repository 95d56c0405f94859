//! Multi-line text entity

use super::EntityCommon;
use crate::types::{Color, Handle, Vector3};

/// Multi-line text with inline formatting codes kept as stored
#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pub common: EntityCommon,
    pub value: String,
    pub insert_point: Vector3,
    pub normal: Vector3,
    /// Direction of the text's X axis
    pub x_direction: Vector3,
    pub rect_width: f64,
    /// Reference rectangle height (R2007+)
    pub rect_height: f64,
    pub text_height: f64,
    /// 1..=9, top-left to bottom-right
    pub attachment: i16,
    pub drawing_direction: i16,
    pub extents_height: f64,
    pub extents_width: f64,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
    /// Background fill flags (R2004+)
    pub background_flags: i32,
    pub background_scale: f64,
    pub background_color: Color,
    pub background_transparency: i32,
    pub style_handle: Handle,
    /// Text style name, resolved from the style table
    pub style: String,
}

impl MText {
    /// Rotation derived from the X direction, in radians
    pub fn rotation(&self) -> f64 {
        self.x_direction.y.atan2(self.x_direction.x)
    }
}

impl Default for MText {
    fn default() -> Self {
        MText {
            common: EntityCommon::new(),
            value: String::new(),
            insert_point: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
            x_direction: Vector3::new(1.0, 0.0, 0.0),
            rect_width: 0.0,
            rect_height: 0.0,
            text_height: 0.0,
            attachment: 1,
            drawing_direction: 1,
            extents_height: 0.0,
            extents_width: 0.0,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
            background_flags: 0,
            background_scale: 1.5,
            background_color: Color::ByLayer,
            background_transparency: 0,
            style_handle: Handle::NULL,
            style: String::new(),
        }
    }
}
