//! Dimension entities
//!
//! All seven dimension records share a common block of fields followed by
//! kind-specific definition points. Point names follow the DXF group codes
//! they correspond to (10, 13, 14, 15, 16).

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};

/// Kind-specific part of a dimension
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionKind {
    Ordinate {
        definition_point: Vector3,
        feature_location: Vector3,
        leader_endpoint: Vector3,
        /// X-type ordinate when set
        is_x_type: bool,
    },
    Linear {
        first_point: Vector3,
        second_point: Vector3,
        definition_point: Vector3,
        rotation: f64,
        ext_line_rotation: f64,
    },
    Aligned {
        first_point: Vector3,
        second_point: Vector3,
        definition_point: Vector3,
        ext_line_rotation: f64,
    },
    Angular3Pt {
        definition_point: Vector3,
        first_point: Vector3,
        second_point: Vector3,
        angle_vertex: Vector3,
    },
    Angular2Ln {
        arc_point: Vector2,
        first_point: Vector3,
        second_point: Vector3,
        angle_vertex: Vector3,
        definition_point: Vector3,
    },
    Radius {
        definition_point: Vector3,
        chord_point: Vector3,
        leader_length: f64,
    },
    Diameter {
        definition_point: Vector3,
        chord_point: Vector3,
        leader_length: f64,
    },
}

impl DimensionKind {
    pub fn name(&self) -> &'static str {
        match self {
            DimensionKind::Ordinate { .. } => "ordinate",
            DimensionKind::Linear { .. } => "linear",
            DimensionKind::Aligned { .. } => "aligned",
            DimensionKind::Angular3Pt { .. } => "angular 3 point",
            DimensionKind::Angular2Ln { .. } => "angular 2 line",
            DimensionKind::Radius { .. } => "radius",
            DimensionKind::Diameter { .. } => "diameter",
        }
    }
}

/// A dimension entity
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub common: EntityCommon,
    pub kind: DimensionKind,
    /// Record version (R2010+)
    pub version: u8,
    pub normal: Vector3,
    pub text_midpoint: Vector2,
    pub elevation: f64,
    pub flags: u8,
    /// Text override; empty means the measurement is shown
    pub user_text: String,
    pub text_rotation: f64,
    pub horizontal_direction: f64,
    pub insertion_scale: Vector3,
    pub insertion_rotation: f64,
    pub attachment: i16,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
    pub actual_measurement: f64,
    pub flip_arrow1: bool,
    pub flip_arrow2: bool,
    /// Insertion point of the dimension block (DXF 12)
    pub clone_insertion: Vector2,
    pub dimstyle_handle: Handle,
    /// Dimension style name, resolved from the dimstyle table
    pub dimstyle: String,
    /// Anonymous block holding the rendered dimension
    pub block_handle: Handle,
}

impl Dimension {
    pub fn new(kind: DimensionKind) -> Self {
        Dimension {
            common: EntityCommon::new(),
            kind,
            version: 0,
            normal: Vector3::UNIT_Z,
            text_midpoint: Vector2::ZERO,
            elevation: 0.0,
            flags: 0,
            user_text: String::new(),
            text_rotation: 0.0,
            horizontal_direction: 0.0,
            insertion_scale: Vector3::new(1.0, 1.0, 1.0),
            insertion_rotation: 0.0,
            attachment: 5,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
            actual_measurement: 0.0,
            flip_arrow1: false,
            flip_arrow2: false,
            clone_insertion: Vector2::ZERO,
            dimstyle_handle: Handle::NULL,
            dimstyle: String::new(),
            block_handle: Handle::NULL,
        }
    }
}
