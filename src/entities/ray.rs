//! Ray entity

use super::EntityCommon;
use crate::types::Vector3;

/// A semi-infinite line starting at `base_point`
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub common: EntityCommon,
    pub base_point: Vector3,
    pub direction: Vector3,
}

impl Default for Ray {
    fn default() -> Self {
        Ray {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::new(1.0, 0.0, 0.0),
        }
    }
}
