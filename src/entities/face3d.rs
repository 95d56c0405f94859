//! 3D face entity

use super::EntityCommon;
use crate::types::Vector3;

bitflags::bitflags! {
    /// Edges of a 3D face that are not drawn
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvisibleEdgeFlags: u16 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
    }
}

/// A three or four sided face in 3D space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face3D {
    pub common: EntityCommon,
    pub first_corner: Vector3,
    pub second_corner: Vector3,
    pub third_corner: Vector3,
    pub fourth_corner: Vector3,
    pub invisible_edges: InvisibleEdgeFlags,
}
