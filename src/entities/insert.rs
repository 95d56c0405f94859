//! Block reference (INSERT / MINSERT) entity

use super::EntityCommon;
use crate::tables::MemberChain;
use crate::types::{Handle, Vector3};

/// A block reference, optionally repeated on a rectangular grid (MINSERT)
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub common: EntityCommon,
    /// Block record handle
    pub block_record: Handle,
    /// Block name, resolved from the block record table
    pub block_name: String,
    pub insert_point: Vector3,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub normal: Vector3,
    pub has_attributes: bool,
    /// Attribute entities following the insert
    pub attributes: MemberChain,
    /// SEQEND closing the attribute list
    pub seqend: Handle,
    pub column_count: u16,
    pub row_count: u16,
    pub column_spacing: f64,
    pub row_spacing: f64,
}

impl Insert {
    pub fn new(block_record: Handle, insert_point: Vector3) -> Self {
        Insert {
            block_record,
            insert_point,
            ..Default::default()
        }
    }

    /// Whether this reference repeats on a grid
    pub fn is_multiple(&self) -> bool {
        self.column_count > 1 || self.row_count > 1
    }
}

impl Default for Insert {
    fn default() -> Self {
        Insert {
            common: EntityCommon::new(),
            block_record: Handle::NULL,
            block_name: String::new(),
            insert_point: Vector3::ZERO,
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            rotation: 0.0,
            normal: Vector3::UNIT_Z,
            has_attributes: false,
            attributes: MemberChain::default(),
            seqend: Handle::NULL,
            column_count: 1,
            row_count: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_defaults() {
        let insert = Insert::new(Handle::new(0x1F), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(insert.x_scale, 1.0);
        assert_eq!(insert.block_record, Handle::new(0x1F));
        assert!(!insert.is_multiple());
    }

    #[test]
    fn test_minsert_grid() {
        let insert = Insert {
            column_count: 3,
            row_count: 1,
            ..Default::default()
        };
        assert!(insert.is_multiple());
    }
}
