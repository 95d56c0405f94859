//! Construction line entity

use super::EntityCommon;
use crate::types::Vector3;

/// An infinite construction line through `base_point`
#[derive(Debug, Clone, PartialEq)]
pub struct XLine {
    pub common: EntityCommon,
    pub base_point: Vector3,
    pub direction: Vector3,
}

impl Default for XLine {
    fn default() -> Self {
        XLine {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::new(1.0, 0.0, 0.0),
        }
    }
}
