//! Hatch entity

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};

/// One color stop of a gradient fill
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientColor {
    pub value: f64,
    /// Packed 0x00RRGGBB value
    pub rgb: u32,
}

/// Gradient fill definition (R2004+)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HatchGradient {
    pub enabled: bool,
    pub reserved: i32,
    pub angle: f64,
    pub shift: f64,
    pub single_color: bool,
    pub tint: f64,
    pub colors: Vec<GradientColor>,
    pub name: String,
}

/// Edge of a non-polyline boundary path
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryEdge {
    Line {
        start: Vector2,
        end: Vector2,
    },
    CircularArc {
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    EllipticArc {
        center: Vector2,
        major_axis: Vector2,
        minor_ratio: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    Spline {
        degree: i32,
        rational: bool,
        periodic: bool,
        knots: Vec<f64>,
        /// Control points; Z holds the weight
        control_points: Vec<Vector3>,
        fit_points: Vec<Vector2>,
        start_tangent: Vector2,
        end_tangent: Vector2,
    },
}

/// A hatch boundary loop
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPath {
    /// 1 external, 2 polyline, 4 derived, 16 outermost
    pub flags: u32,
    pub edges: Vec<BoundaryEdge>,
    /// Polyline vertices; Z holds the bulge
    pub polyline: Vec<Vector3>,
    pub polyline_closed: bool,
    /// Entities the path was derived from
    pub boundary_handles: Vec<Handle>,
}

impl BoundaryPath {
    pub fn is_polyline(&self) -> bool {
        self.flags & 2 != 0
    }
}

/// One line family of a hatch pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternLine {
    pub angle: f64,
    pub base_point: Vector2,
    pub offset: Vector2,
    pub dashes: Vec<f64>,
}

/// A hatch (area fill) entity
#[derive(Debug, Clone, PartialEq)]
pub struct Hatch {
    pub common: EntityCommon,
    pub gradient: HatchGradient,
    pub elevation: f64,
    pub normal: Vector3,
    pub pattern_name: String,
    pub is_solid: bool,
    pub is_associative: bool,
    pub paths: Vec<BoundaryPath>,
    /// 0 normal, 1 outer, 2 ignore
    pub style: i16,
    /// 0 user defined, 1 predefined, 2 custom
    pub pattern_type: i16,
    pub pattern_angle: f64,
    pub pattern_scale: f64,
    pub is_double: bool,
    pub pattern_lines: Vec<PatternLine>,
    pub pixel_size: f64,
    pub seed_points: Vec<Vector2>,
}

impl Default for Hatch {
    fn default() -> Self {
        Hatch {
            common: EntityCommon::new(),
            gradient: HatchGradient::default(),
            elevation: 0.0,
            normal: Vector3::UNIT_Z,
            pattern_name: String::new(),
            is_solid: false,
            is_associative: false,
            paths: Vec::new(),
            style: 0,
            pattern_type: 1,
            pattern_angle: 0.0,
            pattern_scale: 1.0,
            is_double: false,
            pattern_lines: Vec::new(),
            pixel_size: 0.0,
            seed_points: Vec::new(),
        }
    }
}
