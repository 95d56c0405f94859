//! Spline entity

use super::EntityCommon;
use crate::types::Vector3;

/// A NURBS curve, stored either by control points or by fit points
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub common: EntityCommon,
    /// 1 control points, 2 fit points
    pub scenario: i32,
    /// Spline flags (R2013+)
    pub spline_flags: i32,
    /// Knot parameterization (R2013+)
    pub knot_parameter: i32,
    pub degree: i32,
    pub rational: bool,
    pub closed: bool,
    pub periodic: bool,
    pub knot_tolerance: f64,
    pub control_tolerance: f64,
    pub fit_tolerance: f64,
    pub start_tangent: Vector3,
    pub end_tangent: Vector3,
    pub knots: Vec<f64>,
    pub control_points: Vec<Vector3>,
    /// One weight per control point when the spline is weighted
    pub weights: Vec<f64>,
    pub fit_points: Vec<Vector3>,
}

impl Default for Spline {
    fn default() -> Self {
        Spline {
            common: EntityCommon::new(),
            scenario: 1,
            spline_flags: 0,
            knot_parameter: 0,
            degree: 3,
            rational: false,
            closed: false,
            periodic: false,
            knot_tolerance: 0.0,
            control_tolerance: 0.0,
            fit_tolerance: 0.0,
            start_tangent: Vector3::ZERO,
            end_tangent: Vector3::ZERO,
            knots: Vec::new(),
            control_points: Vec::new(),
            weights: Vec::new(),
            fit_points: Vec::new(),
        }
    }
}
