//! Solid and trace entities

use super::EntityCommon;
use crate::types::Vector3;

/// A filled quadrilateral. Traces share the same record layout.
///
/// Corners carry the record's elevation as their Z value.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub common: EntityCommon,
    pub first_corner: Vector3,
    pub second_corner: Vector3,
    pub third_corner: Vector3,
    pub fourth_corner: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Solid {
    /// A solid whose third and fourth corners coincide is a triangle
    pub fn is_triangle(&self) -> bool {
        self.third_corner == self.fourth_corner
    }
}

impl Default for Solid {
    fn default() -> Self {
        Solid {
            common: EntityCommon::new(),
            first_corner: Vector3::ZERO,
            second_corner: Vector3::ZERO,
            third_corner: Vector3::ZERO,
            fourth_corner: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}
