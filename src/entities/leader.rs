//! Leader entity

use super::EntityCommon;
use crate::types::{Handle, Vector3};

/// A leader line pointing from an annotation to a feature
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub common: EntityCommon,
    /// 0 text, 1 tolerance, 2 block reference, 3 none
    pub annotation_type: i16,
    /// 0 straight segments, 1 spline
    pub path_type: i16,
    pub vertices: Vec<Vector3>,
    pub origin: Vector3,
    pub normal: Vector3,
    pub horizontal_direction: Vector3,
    pub block_offset: Vector3,
    pub end_point_projection: Vector3,
    pub dimension_gap: f64,
    pub box_height: f64,
    pub box_width: f64,
    pub hookline_on_x_direction: bool,
    pub arrow_head_on: bool,
    pub arrow_head_type: i16,
    pub arrow_head_size: f64,
    pub by_block_color: i16,
    pub hookline_on: bool,
    pub annotation_handle: Handle,
    pub dimstyle_handle: Handle,
    /// Dimension style name, resolved from the dimstyle table
    pub dimstyle: String,
}

impl Default for Leader {
    fn default() -> Self {
        Leader {
            common: EntityCommon::new(),
            annotation_type: 3,
            path_type: 0,
            vertices: Vec::new(),
            origin: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
            horizontal_direction: Vector3::new(1.0, 0.0, 0.0),
            block_offset: Vector3::ZERO,
            end_point_projection: Vector3::ZERO,
            dimension_gap: 0.0,
            box_height: 0.0,
            box_width: 0.0,
            hookline_on_x_direction: false,
            arrow_head_on: true,
            arrow_head_type: 0,
            arrow_head_size: 0.0,
            by_block_color: 0,
            hookline_on: false,
            annotation_handle: Handle::NULL,
            dimstyle_handle: Handle::NULL,
            dimstyle: String::new(),
        }
    }
}
