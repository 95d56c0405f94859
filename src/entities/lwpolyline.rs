//! Lightweight polyline entity (2D polyline with bulges)

use super::EntityCommon;
use crate::types::{Vector2, Vector3};

/// A vertex in a lightweight polyline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LwVertex {
    pub location: Vector2,
    /// 0 = straight segment, otherwise tan(included angle / 4)
    pub bulge: f64,
    pub start_width: f64,
    pub end_width: f64,
    /// Vertex id (R2010+)
    pub id: i32,
}

impl LwVertex {
    pub fn new(location: Vector2) -> Self {
        LwVertex {
            location,
            ..Default::default()
        }
    }
}

/// A lightweight (2D) polyline entity
#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    /// Stored flag word; 0x200 marks a closed polyline
    pub flags: i16,
    pub constant_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<LwVertex>,
}

impl LwPolyline {
    pub fn is_closed(&self) -> bool {
        self.flags & 0x200 != 0
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            flags: 0,
            constant_width: 0.0,
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
        }
    }
}
