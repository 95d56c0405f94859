//! Block begin and end markers

use super::EntityCommon;
use crate::tables::BlockFlags;
use crate::types::{Handle, Vector3};

/// BLOCK entity opening a block definition.
///
/// The record itself stores little more than the name; base point and
/// flags are copied over from the owning block record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub common: EntityCommon,
    pub name: String,
    pub base_point: Vector3,
    pub flags: BlockFlags,
    pub description: String,
    pub xref_path: String,
    /// Block record this block belongs to
    pub block_record: Handle,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Anonymous blocks (dimensions, hatches, ...) start with '*'
    pub fn is_anonymous(&self) -> bool {
        self.flags.contains(BlockFlags::ANONYMOUS) || self.name.starts_with('*')
    }
}

/// ENDBLK entity closing a block definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockEnd {
    pub common: EntityCommon,
}
