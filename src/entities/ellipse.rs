//! Ellipse entity

use super::EntityCommon;
use crate::types::Vector3;

/// An ellipse or elliptical arc
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: EntityCommon,
    pub center: Vector3,
    /// Endpoint of the major axis, relative to the center
    pub major_axis: Vector3,
    pub normal: Vector3,
    /// Minor to major axis ratio
    pub ratio: f64,
    pub start_parameter: f64,
    pub end_parameter: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Ellipse {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            major_axis: Vector3::new(1.0, 0.0, 0.0),
            normal: Vector3::UNIT_Z,
            ratio: 1.0,
            start_parameter: 0.0,
            end_parameter: std::f64::consts::TAU,
        }
    }
}
