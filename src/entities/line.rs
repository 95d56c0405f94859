//! Line entity

use super::EntityCommon;
use crate::types::Vector3;

/// Straight segment between two points.
///
/// R2000+ records store the Z of both endpoints only when either is
/// non-zero; flat lines decode with both Z values at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub common: EntityCommon,
    pub start: Vector3,
    pub end: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Line {
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Default::default()
        }
    }
}

impl Default for Line {
    fn default() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}
