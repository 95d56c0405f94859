//! Arc entity

use super::EntityCommon;
use crate::types::Vector3;

/// A circular arc entity
///
/// Angles are stored in radians, counter-clockwise around `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Default for Arc {
    fn default() -> Self {
        Arc {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}
