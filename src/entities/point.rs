//! Point entity

use super::EntityCommon;
use crate::types::Vector3;

/// A point entity
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub common: EntityCommon,
    pub location: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
    /// Angle of the X axis of the UCS in effect when drawn
    pub x_axis_angle: f64,
}

impl Point {
    pub fn new(location: Vector3) -> Self {
        Point {
            location,
            ..Default::default()
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Point {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            x_axis_angle: 0.0,
        }
    }
}
