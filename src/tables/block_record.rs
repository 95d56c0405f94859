//! Block record table entry

use super::TableEntryCommon;
use crate::types::{Handle, Vector3};

bitflags::bitflags! {
    // Block type flags (DXF group 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: i16 {
        const ANONYMOUS = 1;
        const HAS_ATTRIBUTES = 2;
        const XREF = 4;
        const XREF_OVERLAY = 8;
        const EXTERNALLY_DEPENDENT = 16;
        const RESOLVED_XREF = 32;
        const REFERENCED_XREF = 64;
    }
}

/// Member list of a block record or polyline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberChain {
    /// Pre-R2004: first and last member; each member stores its successor.
    Linked { first: Handle, last: Handle },
    /// R2004+: every member, in order.
    Ordered(Vec<Handle>),
}

impl Default for MemberChain {
    fn default() -> Self {
        MemberChain::Ordered(Vec::new())
    }
}

impl MemberChain {
    pub fn is_empty(&self) -> bool {
        match self {
            MemberChain::Linked { first, .. } => first.is_null(),
            MemberChain::Ordered(list) => list.is_empty(),
        }
    }
}

/// A block record table entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockRecord {
    pub common: TableEntryCommon,
    pub flags: BlockFlags,
    /// Insertion base point
    pub base_point: Vector3,
    pub xref_path: String,
    pub description: String,
    /// Insertion units (R2007+)
    pub units: i16,
    pub explodable: bool,
    pub scale_uniformly: bool,
    /// BLOCK entity opening the definition
    pub block_entity: Handle,
    /// ENDBLK entity closing the definition
    pub end_block: Handle,
    /// Layout object for model and paper space records
    pub layout: Handle,
    pub members: MemberChain,
}

impl BlockRecord {
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
            explodable: true,
            ..Default::default()
        }
    }

    pub fn is_model_space(&self) -> bool {
        self.common.name.eq_ignore_ascii_case("*Model_Space")
    }

    pub fn is_paper_space(&self) -> bool {
        self.common
            .name
            .get(..12)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("*Paper_Space"))
    }

    pub fn is_xref(&self) -> bool {
        self.flags.intersects(BlockFlags::XREF | BlockFlags::XREF_OVERLAY)
    }
}
