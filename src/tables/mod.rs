//! Table records and the per-session table store

use indexmap::IndexMap;

use crate::io::dwg::object_type::DwgObjectType;
use crate::types::Handle;

pub mod appid;
pub mod block_record;
pub mod dimstyle;
pub mod layer;
pub mod linetype;
pub mod textstyle;
pub mod vport;

pub use appid::AppId;
pub use block_record::{BlockFlags, BlockRecord, MemberChain};
pub use dimstyle::DimStyle;
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeSegment};
pub use textstyle::{TextGenerationFlags, TextStyle};
pub use vport::VPort;

/// The seven symbol tables the decoder loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    LineType,
    Layer,
    TextStyle,
    DimStyle,
    VPort,
    BlockRecord,
    AppId,
}

impl TableKind {
    /// Load order. Line types come before layers so the cross-link pass
    /// finds them.
    pub const LOAD_ORDER: [TableKind; 7] = [
        TableKind::LineType,
        TableKind::Layer,
        TableKind::TextStyle,
        TableKind::DimStyle,
        TableKind::VPort,
        TableKind::BlockRecord,
        TableKind::AppId,
    ];

    /// Type code of the table's control record.
    pub fn control_type(self) -> DwgObjectType {
        match self {
            TableKind::LineType => DwgObjectType::LtypeControlObj,
            TableKind::Layer => DwgObjectType::LayerControlObj,
            TableKind::TextStyle => DwgObjectType::StyleControlObj,
            TableKind::DimStyle => DwgObjectType::DimstyleControlObj,
            TableKind::VPort => DwgObjectType::VportControlObj,
            TableKind::BlockRecord => DwgObjectType::BlockControlObj,
            TableKind::AppId => DwgObjectType::AppidControlObj,
        }
    }

    /// Type code of the table's entries (control code + 1).
    pub fn entry_type(self) -> DwgObjectType {
        match self {
            TableKind::LineType => DwgObjectType::Ltype,
            TableKind::Layer => DwgObjectType::Layer,
            TableKind::TextStyle => DwgObjectType::Style,
            TableKind::DimStyle => DwgObjectType::Dimstyle,
            TableKind::VPort => DwgObjectType::Vport,
            TableKind::BlockRecord => DwgObjectType::BlockHeader,
            TableKind::AppId => DwgObjectType::Appid,
        }
    }

    /// Number of members the control lists after the counted ones
    /// (BYLAYER/BYBLOCK line types, model/paper space block records).
    pub fn implicit_members(self) -> usize {
        match self {
            TableKind::LineType | TableKind::BlockRecord => 2,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TableKind::LineType => "LTYPE",
            TableKind::Layer => "LAYER",
            TableKind::TextStyle => "STYLE",
            TableKind::DimStyle => "DIMSTYLE",
            TableKind::VPort => "VPORT",
            TableKind::BlockRecord => "BLOCK_RECORD",
            TableKind::AppId => "APPID",
        }
    }
}

/// Header shared by every table record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableEntryCommon {
    pub handle: Handle,
    pub owner: Handle,
    pub name: String,
    /// Standard flags (DXF group 70) as far as the record stores them.
    pub flags: i16,
    pub xref_dependent: bool,
}

/// Access to the shared header of a table record.
pub trait TableEntry {
    fn common(&self) -> &TableEntryCommon;

    fn common_mut(&mut self) -> &mut TableEntryCommon;

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn name(&self) -> &str {
        &self.common().name
    }
}

macro_rules! impl_table_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TableEntry for $ty {
                fn common(&self) -> &TableEntryCommon {
                    &self.common
                }

                fn common_mut(&mut self) -> &mut TableEntryCommon {
                    &mut self.common
                }
            }
        )*
    };
}

impl_table_entry!(LineType, Layer, TextStyle, DimStyle, VPort, BlockRecord, AppId);

/// Handle-keyed records of one table, in control-listing order.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<Handle, T>,
    /// Handle of the control record, once loaded.
    control: Handle,
    failed: bool,
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            control: Handle::NULL,
            failed: false,
        }
    }
}

impl<T: TableEntry> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` under its own handle, replacing any previous record.
    pub fn insert(&mut self, entry: T) {
        self.entries.insert(entry.handle(), entry);
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.entries.get_mut(&handle)
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.entries
            .values()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    /// Name of the record at `handle`, or "" when there is none.
    pub fn name_of(&self, handle: Handle) -> &str {
        self.entries.get(&handle).map(|e| e.name()).unwrap_or("")
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn control(&self) -> Handle {
        self.control
    }

    pub fn set_control(&mut self, handle: Handle) {
        self.control = handle;
    }

    /// Whether the table's control record could not be decoded.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }
}

/// All tables decoded in one session.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    pub line_types: Table<LineType>,
    pub layers: Table<Layer>,
    pub text_styles: Table<TextStyle>,
    pub dim_styles: Table<DimStyle>,
    pub vports: Table<VPort>,
    pub block_records: Table<BlockRecord>,
    pub app_ids: Table<AppId>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_type_name(&self, handle: Handle) -> &str {
        self.line_types.name_of(handle)
    }

    pub fn layer_name(&self, handle: Handle) -> &str {
        self.layers.name_of(handle)
    }

    pub fn text_style_name(&self, handle: Handle) -> &str {
        self.text_styles.name_of(handle)
    }

    pub fn dim_style_name(&self, handle: Handle) -> &str {
        self.dim_styles.name_of(handle)
    }

    pub fn block_record_name(&self, handle: Handle) -> &str {
        self.block_records.name_of(handle)
    }

    /// Mark a table failed.
    pub fn mark_failed(&mut self, kind: TableKind) {
        match kind {
            TableKind::LineType => self.line_types.mark_failed(),
            TableKind::Layer => self.layers.mark_failed(),
            TableKind::TextStyle => self.text_styles.mark_failed(),
            TableKind::DimStyle => self.dim_styles.mark_failed(),
            TableKind::VPort => self.vports.mark_failed(),
            TableKind::BlockRecord => self.block_records.mark_failed(),
            TableKind::AppId => self.app_ids.mark_failed(),
        }
    }

    pub fn is_failed(&self, kind: TableKind) -> bool {
        match kind {
            TableKind::LineType => self.line_types.is_failed(),
            TableKind::Layer => self.layers.is_failed(),
            TableKind::TextStyle => self.text_styles.is_failed(),
            TableKind::DimStyle => self.dim_styles.is_failed(),
            TableKind::VPort => self.vports.is_failed(),
            TableKind::BlockRecord => self.block_records.is_failed(),
            TableKind::AppId => self.app_ids.is_failed(),
        }
    }

    /// Drop every record of a table.
    pub fn clear(&mut self, kind: TableKind) {
        match kind {
            TableKind::LineType => self.line_types.clear(),
            TableKind::Layer => self.layers.clear(),
            TableKind::TextStyle => self.text_styles.clear(),
            TableKind::DimStyle => self.dim_styles.clear(),
            TableKind::VPort => self.vports.clear(),
            TableKind::BlockRecord => self.block_records.clear(),
            TableKind::AppId => self.app_ids.clear(),
        }
    }

    pub fn set_control(&mut self, kind: TableKind, handle: Handle) {
        match kind {
            TableKind::LineType => self.line_types.set_control(handle),
            TableKind::Layer => self.layers.set_control(handle),
            TableKind::TextStyle => self.text_styles.set_control(handle),
            TableKind::DimStyle => self.dim_styles.set_control(handle),
            TableKind::VPort => self.vports.set_control(handle),
            TableKind::BlockRecord => self.block_records.set_control(handle),
            TableKind::AppId => self.app_ids.set_control(handle),
        }
    }

    /// Resolve every layer's line type name from its handle.
    /// Unresolved handles give "".
    pub fn link_layer_line_types(&mut self) {
        let line_types = &self.line_types;
        for layer in self.layers.iter_mut() {
            layer.line_type = line_types.name_of(layer.line_type_handle).to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_type(handle: u64, name: &str) -> LineType {
        let mut lt = LineType::default();
        lt.common.handle = Handle::new(handle);
        lt.common.name = name.to_string();
        lt
    }

    #[test]
    fn test_codes() {
        for kind in TableKind::LOAD_ORDER {
            assert_eq!(kind.entry_type().code(), kind.control_type().code() + 1);
        }
        assert_eq!(TableKind::DimStyle.control_type().code(), 0x44);
        assert_eq!(TableKind::LineType.implicit_members(), 2);
        assert_eq!(TableKind::Layer.implicit_members(), 0);
    }

    #[test]
    fn test_table_keeps_insertion_order() {
        let mut table = Table::new();
        table.insert(line_type(0x20, "DASHED"));
        table.insert(line_type(0x14, "ByLayer"));
        let names: Vec<&str> = table.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["DASHED", "ByLayer"]);
        assert_eq!(table.find("dashed").map(|e| e.handle()), Some(Handle::new(0x20)));
    }

    #[test]
    fn test_name_of_absent_is_empty() {
        let table: Table<LineType> = Table::new();
        assert_eq!(table.name_of(Handle::new(0x99)), "");
    }

    #[test]
    fn test_link_layer_line_types() {
        let mut tables = TableSet::new();
        tables.line_types.insert(line_type(0x16, "CENTER"));

        let mut linked = Layer::default();
        linked.common.handle = Handle::new(0x10);
        linked.line_type_handle = Handle::new(0x16);
        tables.layers.insert(linked);

        let mut dangling = Layer::default();
        dangling.common.handle = Handle::new(0x11);
        dangling.line_type_handle = Handle::new(0x77);
        dangling.line_type = "stale".to_string();
        tables.layers.insert(dangling);

        tables.link_layer_line_types();
        assert_eq!(tables.layers.name_of(Handle::new(0x10)), "");
        assert_eq!(tables.layers.get(Handle::new(0x10)).map(|l| l.line_type.as_str()), Some("CENTER"));
        assert_eq!(tables.layers.get(Handle::new(0x11)).map(|l| l.line_type.as_str()), Some(""));
    }

    #[test]
    fn test_failed_flag() {
        let mut tables = TableSet::new();
        assert!(!tables.is_failed(TableKind::VPort));
        tables.mark_failed(TableKind::VPort);
        assert!(tables.is_failed(TableKind::VPort));
        assert!(!tables.is_failed(TableKind::AppId));
    }
}
