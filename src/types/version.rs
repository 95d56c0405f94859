//! DWG format generations

use std::fmt;
use std::str::FromStr;

use crate::error::DwgError;

/// DWG file format generation, named after the file's version tag.
///
/// Ordering follows release order, so range checks like
/// `version >= DwgVersion::AC1018` read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DwgVersion {
    /// R10
    AC1006,
    /// R11/R12
    AC1009,
    /// R13
    AC1012,
    /// R14
    AC1014,
    /// R2000-R2002
    AC1015,
    /// R2004-R2006
    AC1018,
    /// R2007-R2009
    AC1021,
    /// R2010-R2012
    AC1024,
    /// R2013-R2017
    AC1027,
    /// R2018+
    AC1032,
}

impl DwgVersion {
    /// All known generations, oldest first.
    pub const ALL: [DwgVersion; 10] = [
        DwgVersion::AC1006,
        DwgVersion::AC1009,
        DwgVersion::AC1012,
        DwgVersion::AC1014,
        DwgVersion::AC1015,
        DwgVersion::AC1018,
        DwgVersion::AC1021,
        DwgVersion::AC1024,
        DwgVersion::AC1027,
        DwgVersion::AC1032,
    ];

    /// The six-character tag stored at the start of the file.
    pub fn tag(&self) -> &'static str {
        match self {
            DwgVersion::AC1006 => "AC1006",
            DwgVersion::AC1009 => "AC1009",
            DwgVersion::AC1012 => "AC1012",
            DwgVersion::AC1014 => "AC1014",
            DwgVersion::AC1015 => "AC1015",
            DwgVersion::AC1018 => "AC1018",
            DwgVersion::AC1021 => "AC1021",
            DwgVersion::AC1024 => "AC1024",
            DwgVersion::AC1027 => "AC1027",
            DwgVersion::AC1032 => "AC1032",
        }
    }

    /// Whether the object decoder understands this generation's record
    /// layout. R12 and earlier use a different, non-handle-based layout.
    pub fn is_object_format(&self) -> bool {
        *self >= DwgVersion::AC1012
    }
}

impl fmt::Display for DwgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DwgVersion {
    type Err = DwgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DwgVersion::ALL
            .iter()
            .copied()
            .find(|v| v.tag() == s)
            .ok_or_else(|| DwgError::UnsupportedVersion(s.to_string()))
    }
}
