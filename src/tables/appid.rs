//! Application ID table entry

use super::TableEntryCommon;

/// An application ID table entry (registers an EED owner)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppId {
    pub common: TableEntryCommon,
}

impl AppId {
    pub fn new(name: impl Into<String>) -> Self {
        AppId {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn is_acad(&self) -> bool {
        self.common.name.eq_ignore_ascii_case("ACAD")
    }
}
