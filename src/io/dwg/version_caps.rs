//! Per-generation capability table.
//!
//! Every layout difference between DWG generations that the object decoder
//! cares about is answered here, once, when the session starts. Parsers ask
//! `VersionCaps` instead of comparing versions at each call site.

use crate::tables::TableKind;
use crate::types::DwgVersion;

/// Encoding of the object type code at the start of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCodeWidth {
    /// A bit short (R13-R2007).
    BitShort,
    /// 2-bit selector followed by one byte, `0x1F0 + byte` or a raw short
    /// (R2010+).
    Paired,
}

/// How block records and polylines list their members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberChainKind {
    /// First/last handles, each member links to the next one (pre-R2004).
    Linked,
    /// Every member handle is listed in order (R2004+).
    Ordered,
}

/// Where a record stores the bit offset of its handle stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSizeLocation {
    /// RL after the handle and EED (after the graphics for entities). R13/R14.
    AfterEed,
    /// RL ahead of the record's own handle. R2000-R2007.
    BeforeHandle,
    /// No RL; an MC after the record size gives the handle stream length.
    /// R2010+.
    Trailing,
}

/// Version flags and layout facts for one DWG generation.
#[derive(Debug, Clone, Copy)]
pub struct VersionCaps {
    version: DwgVersion,

    /// R13-R14 only
    pub r13_14_only: bool,
    /// R13-R15 only
    pub r13_15_only: bool,
    /// R2000+ (AC1015+)
    pub r2000_plus: bool,
    /// Pre-R2004
    pub r2004_pre: bool,
    /// R2004+ (AC1018+)
    pub r2004_plus: bool,
    /// R2007+ (AC1021+)
    pub r2007_plus: bool,
    /// R2010+ (AC1024+)
    pub r2010_plus: bool,
    /// R2013+ (AC1027+)
    pub r2013_plus: bool,
    /// R2018+ (AC1032+)
    pub r2018_plus: bool,
}

impl VersionCaps {
    /// Pre-compute the flags for `version`.
    pub fn new(version: DwgVersion) -> Self {
        Self {
            r13_14_only: version == DwgVersion::AC1014 || version == DwgVersion::AC1012,
            r13_15_only: version >= DwgVersion::AC1012 && version <= DwgVersion::AC1015,
            r2000_plus: version >= DwgVersion::AC1015,
            r2004_pre: version < DwgVersion::AC1018,
            r2004_plus: version >= DwgVersion::AC1018,
            r2007_plus: version >= DwgVersion::AC1021,
            r2010_plus: version >= DwgVersion::AC1024,
            r2013_plus: version >= DwgVersion::AC1027,
            r2018_plus: version >= DwgVersion::AC1032,
            version,
        }
    }

    /// Get the DWG version.
    pub fn version(&self) -> DwgVersion {
        self.version
    }

    /// Bit width of the record type code.
    pub fn type_code_width(&self) -> TypeCodeWidth {
        if self.r2010_plus {
            TypeCodeWidth::Paired
        } else {
            TypeCodeWidth::BitShort
        }
    }

    /// Whether the record size (MS) is followed by an unsigned MC holding the
    /// handle stream length in bits.
    pub fn has_handle_stream_size(&self) -> bool {
        self.r2010_plus
    }

    /// Whether a control record of `kind` carries an extra RC counting
    /// trailing handles. Only the dimension style control does, from R2000.
    pub fn control_extra_byte(&self, kind: TableKind) -> bool {
        kind == TableKind::DimStyle && self.r2000_plus
    }

    /// Whether non-entity records carry a "has string data" bit.
    pub fn has_string_stream_bit(&self) -> bool {
        self.r2007_plus
    }

    /// Whether strings live in a separate stream at the end of the record.
    pub fn separate_text_stream(&self) -> bool {
        self.r2007_plus
    }

    /// Member list representation for block records and polylines.
    pub fn member_chain(&self) -> MemberChainKind {
        if self.r2004_plus {
            MemberChainKind::Ordered
        } else {
            MemberChainKind::Linked
        }
    }

    /// Where the handle stream offset is stored.
    pub fn object_size_location(&self) -> ObjectSizeLocation {
        if self.r2010_plus {
            ObjectSizeLocation::Trailing
        } else if self.r2000_plus {
            ObjectSizeLocation::BeforeHandle
        } else {
            ObjectSizeLocation::AfterEed
        }
    }
}
