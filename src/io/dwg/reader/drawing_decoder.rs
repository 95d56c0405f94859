//! Drawing decoder: loads the tables, walks the blocks and sweeps the
//! remaining entities of one drawing into a [`DrawingSink`].
//!
//! # Stages
//!
//! 1. Table load: each control record in [`TableKind::LOAD_ORDER`], then
//!    every entry it lists.
//! 2. Cross-link: layer line type names. The tables are then sent to the
//!    sink.
//! 3. Block load: every block record's BLOCK entity, its members and its
//!    ENDBLK. Model and paper space members are left to the sweep.
//! 4. Polyline vertices, read right after their polyline.
//! 5. Residual sweep over the handles nothing consumed yet, ascending.
//! 6. Per-entity dispatch through the entity registry.
//!
//! Every stage fails softly. A failed record is logged, kept in
//! [`DrawingDecoder::failures`] and skipped; [`DrawingDecoder::decode`]
//! returns `false` if anything failed.

use crate::entities::{Block, BlockEnd, EntityCommon, EntityType, Polyline, PolylineKind, Vertex, VertexKind};
use crate::error::{DwgError, Result};
use crate::io::dwg::classes::ClassMap;
use crate::io::dwg::object_map::{ObjectMap, ObjectTracker};
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::text_codec::TextCodec;
use crate::notification::{DebugLevel, NotificationCollection, NotificationType};
use crate::sink::DrawingSink;
use crate::tables::{BlockRecord, TableKind, TableSet};
use crate::types::{DwgVersion, Handle};

use super::entity_registry;
use super::member_chain::MemberWalk;
use super::object_reader::{ObjectControl, ObjectReader, StreamSet};

/// Options for a decode session.
#[derive(Debug, Clone)]
pub struct DecoderConfiguration {
    /// Verbosity of the session's notifications.
    ///
    /// Default: [`DebugLevel::None`].
    pub debug_level: DebugLevel,

    /// When `true`, a table whose control record failed keeps the records
    /// that could still be read. When `false` such a table is emptied.
    ///
    /// Default: `true`.
    pub keep_partial_tables: bool,

    /// When `true`, model and paper space members are walked during the
    /// block load instead of being left to the residual sweep.
    ///
    /// Default: `false`.
    pub walk_model_space: bool,
}

impl Default for DecoderConfiguration {
    fn default() -> Self {
        Self {
            debug_level: DebugLevel::None,
            keep_partial_tables: true,
            walk_model_space: false,
        }
    }
}

/// Handles of the seven table control records, as found in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlHandles {
    pub line_type: Handle,
    pub layer: Handle,
    pub text_style: Handle,
    pub dim_style: Handle,
    pub vport: Handle,
    pub block_record: Handle,
    pub app_id: Handle,
}

impl ControlHandles {
    pub fn get(&self, kind: TableKind) -> Handle {
        match kind {
            TableKind::LineType => self.line_type,
            TableKind::Layer => self.layer,
            TableKind::TextStyle => self.text_style,
            TableKind::DimStyle => self.dim_style,
            TableKind::VPort => self.vport,
            TableKind::BlockRecord => self.block_record,
            TableKind::AppId => self.app_id,
        }
    }
}

/// One decode session over a drawing's object data.
pub struct DrawingDecoder<'a> {
    reader: ObjectReader<'a>,
    tracker: ObjectTracker<'a>,
    classes: &'a ClassMap,
    controls: ControlHandles,
    config: DecoderConfiguration,
    tables: TableSet,
    notifications: NotificationCollection,
    failures: Vec<DwgError>,
}

impl<'a> DrawingDecoder<'a> {
    /// Set up a session.
    ///
    /// `data` is the object data the offsets in `objects` point into.
    /// Fails only for generations older than R13.
    pub fn new(
        version: DwgVersion,
        data: &'a [u8],
        objects: &'a ObjectMap,
        classes: &'a ClassMap,
        controls: ControlHandles,
        codec: TextCodec,
        config: DecoderConfiguration,
    ) -> Result<Self> {
        if !version.is_object_format() {
            return Err(DwgError::UnsupportedVersion(version.to_string()));
        }

        Ok(Self {
            reader: ObjectReader::new(data, version, codec),
            tracker: ObjectTracker::new(objects),
            classes,
            controls,
            notifications: NotificationCollection::with_level(config.debug_level),
            config,
            tables: TableSet::new(),
            failures: Vec::new(),
        })
    }

    /// Run every stage, pushing the results into `sink`.
    ///
    /// Returns `true` when no record failed.
    pub fn decode(&mut self, sink: &mut dyn DrawingSink) -> bool {
        let mut ok = self.read_tables();

        self.tables.link_layer_line_types();
        self.emit_tables(sink);

        ok &= self.read_blocks(sink);
        ok &= self.read_entities(sink);

        self.notifications.debug(format!(
            "decoded {} records, {} left unread, {} failures",
            self.tracker.consumed_count(),
            self.tracker.remaining_count(),
            self.failures.len()
        ));
        // vertex failures are recorded without failing their polyline
        ok && self.failures.is_empty()
    }

    pub fn version(&self) -> DwgVersion {
        self.reader.version()
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Every error recorded so far, in the order it happened.
    pub fn failures(&self) -> &[DwgError] {
        &self.failures
    }

    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Consume the session, keeping its tables.
    pub fn into_tables(self) -> TableSet {
        self.tables
    }

    fn record_failure(&mut self, error: DwgError) {
        let ntype = match &error {
            DwgError::HandleNotFound(_) => NotificationType::Warning,
            _ => NotificationType::Error,
        };
        self.notifications.notify(ntype, error.to_string());
        self.failures.push(error);
    }

    /// Take `handle` and set up its streams.
    fn open(&mut self, handle: Handle) -> Result<StreamSet<'a>> {
        let location = self
            .tracker
            .take(handle)
            .ok_or(DwgError::HandleNotFound(handle))?;
        let streams = self.reader.open(location)?;
        self.notifications.debug(format!(
            "object {:#X} at {} type {:#X}",
            handle, location.offset, streams.type_code
        ));
        Ok(streams)
    }

    // -----------------------------------------------------------------------
    // Tables
    // -----------------------------------------------------------------------

    fn read_tables(&mut self) -> bool {
        let mut ok = true;
        for kind in TableKind::LOAD_ORDER {
            ok &= self.read_table(kind);
        }

        if !self.config.keep_partial_tables {
            for kind in TableKind::LOAD_ORDER {
                if self.tables.is_failed(kind) {
                    self.tables.clear(kind);
                }
            }
        }
        ok
    }

    fn read_table(&mut self, kind: TableKind) -> bool {
        let handle = self.controls.get(kind);
        self.tables.set_control(kind, handle);

        let (entries, mut ok) = match self.read_control(kind, handle) {
            Ok((control, complete)) => (control.entries, complete),
            Err(e) => {
                self.tables.mark_failed(kind);
                self.record_failure(e);
                return false;
            }
        };

        for member in entries {
            if let Err(e) = self.read_table_entry(kind, member) {
                self.record_failure(e);
                ok = false;
            }
        }
        ok
    }

    /// Decode a control record. The flag is `false` when the record was
    /// truncated; the entries read before that are still returned.
    fn read_control(&mut self, kind: TableKind, handle: Handle) -> Result<(ObjectControl, bool)> {
        let mut streams = self.open(handle)?;
        streams.expect_type(kind.control_type())?;
        let control = ObjectControl::read(&self.reader, &mut streams, kind)?;

        match streams.finish() {
            Ok(()) => Ok((control, true)),
            Err(e) => {
                self.tables.mark_failed(kind);
                self.record_failure(e);
                Ok((control, false))
            }
        }
    }

    fn read_table_entry(&mut self, kind: TableKind, handle: Handle) -> Result<()> {
        let mut streams = self.open(handle)?;
        streams.expect_type(kind.entry_type())?;

        let reader = &self.reader;
        match kind {
            TableKind::LineType => self.tables.line_types.insert(reader.read_line_type(&mut streams)?),
            TableKind::Layer => self.tables.layers.insert(reader.read_layer(&mut streams)?),
            TableKind::TextStyle => self.tables.text_styles.insert(reader.read_text_style(&mut streams)?),
            TableKind::DimStyle => self.tables.dim_styles.insert(reader.read_dim_style(&mut streams)?),
            TableKind::VPort => self.tables.vports.insert(reader.read_vport(&mut streams)?),
            TableKind::BlockRecord => self.tables.block_records.insert(reader.read_block_record(&mut streams)?),
            TableKind::AppId => self.tables.app_ids.insert(reader.read_app_id(&mut streams)?),
        }
        Ok(())
    }

    fn emit_tables(&self, sink: &mut dyn DrawingSink) {
        for line_type in self.tables.line_types.iter() {
            sink.add_line_type(line_type);
        }
        for layer in self.tables.layers.iter() {
            sink.add_layer(layer);
        }
        for style in self.tables.text_styles.iter() {
            sink.add_text_style(style);
        }
        for style in self.tables.dim_styles.iter() {
            sink.add_dim_style(style);
        }
        for vport in self.tables.vports.iter() {
            sink.add_vport(vport);
        }
        for app_id in self.tables.app_ids.iter() {
            sink.add_app_id(app_id);
        }
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    fn read_blocks(&mut self, sink: &mut dyn DrawingSink) -> bool {
        let records: Vec<BlockRecord> = self.tables.block_records.iter().cloned().collect();
        let mut ok = true;
        for record in &records {
            ok &= self.read_block_definition(record, sink);
        }
        ok
    }

    fn read_block_definition(&mut self, record: &BlockRecord, sink: &mut dyn DrawingSink) -> bool {
        let record_handle = record.common.handle;
        let mut ok = true;
        let mut block = match self.read_block_entity(record.block_entity) {
            Ok(block) => block,
            Err(e @ DwgError::HandleNotFound(_)) => {
                self.record_failure(e);
                return false;
            }
            // A damaged BLOCK still opens its definition from the record.
            Err(e) => {
                self.record_failure(e);
                ok = false;
                let layout = record.is_model_space() || record.is_paper_space();
                Block {
                    common: EntityCommon {
                        handle: record.block_entity,
                        owner: if layout { Handle::NULL } else { record_handle },
                        ..EntityCommon::new()
                    },
                    name: record.common.name.clone(),
                    ..Default::default()
                }
            }
        };

        block.base_point = record.base_point;
        block.flags = record.flags;
        block.xref_path = record.xref_path.clone();
        block.description = record.description.clone();
        block.block_record = record_handle;
        self.resolve_common_names(&mut block.common);

        // Model and paper space blocks store no owner.
        let has_owner = !block.common.owner.is_null();
        if !has_owner {
            block.common.owner = record_handle;
        }

        sink.add_block(&block);
        if let Some(stored) = self.tables.block_records.get_mut(record_handle) {
            stored.common.name = block.name.clone();
        }

        if has_owner || self.config.walk_model_space {
            let mut walk = MemberWalk::new(&record.members);
            let follow_links = walk.is_linked();
            while let Some(member) = walk.next_handle() {
                match self.read_entity(member, follow_links, sink) {
                    Ok(next) => walk.advance(next),
                    Err(e) => {
                        self.record_failure(e);
                        walk.advance(None);
                        ok = false;
                    }
                }
            }
        }

        let end = match self.read_end_block_entity(record.end_block) {
            Ok(end) => end,
            Err(e) => {
                self.record_failure(e);
                ok = false;
                BlockEnd {
                    common: EntityCommon {
                        owner: record_handle,
                        layer_handle: block.common.layer_handle,
                        layer: block.common.layer.clone(),
                        ..EntityCommon::new()
                    },
                }
            }
        };
        sink.end_block(&end);
        ok
    }

    fn read_block_entity(&mut self, handle: Handle) -> Result<Block> {
        let mut streams = self.open(handle)?;
        streams.expect_type(DwgObjectType::Block)?;
        let entity = self.reader.read_block(&mut streams)?;
        streams.finish()?;
        match entity {
            EntityType::Block(block) => Ok(block),
            other => Err(DwgError::InvalidRecord {
                handle,
                reason: format!("expected BLOCK, decoded {}", other.type_name()),
            }),
        }
    }

    fn read_end_block_entity(&mut self, handle: Handle) -> Result<BlockEnd> {
        let mut streams = self.open(handle)?;
        streams.expect_type(DwgObjectType::Endblk)?;
        let entity = self.reader.read_end_block(&mut streams)?;
        streams.finish()?;
        match entity {
            EntityType::BlockEnd(mut end) => {
                self.resolve_common_names(&mut end.common);
                Ok(end)
            }
            other => Err(DwgError::InvalidRecord {
                handle,
                reason: format!("expected ENDBLK, decoded {}", other.type_name()),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Entities
    // -----------------------------------------------------------------------

    /// Dispatch every handle still unconsumed, lowest first.
    fn read_entities(&mut self, sink: &mut dyn DrawingSink) -> bool {
        let mut ok = true;
        for handle in self.tracker.remaining() {
            // Taken while the sweep ran (vertices of an earlier polyline).
            if self.tracker.is_consumed(handle) {
                continue;
            }
            // Vertices and SEQENDs are left for the polyline that owns
            // them, wherever it sorts.
            if self.is_polyline_member(handle) {
                continue;
            }
            if let Err(e) = self.read_entity(handle, false, sink) {
                self.record_failure(e);
                ok = false;
            }
        }
        ok
    }

    /// Whether the unconsumed record at `handle` is a vertex or SEQEND.
    /// Peeks at the type code without taking the handle.
    fn is_polyline_member(&self, handle: Handle) -> bool {
        let Some(location) = self.tracker.peek(handle) else {
            return false;
        };
        let Ok(streams) = self.reader.open(location) else {
            return false;
        };
        matches!(
            DwgObjectType::from_raw(streams.type_code),
            Some(
                DwgObjectType::Vertex2D
                    | DwgObjectType::Vertex3D
                    | DwgObjectType::VertexMesh
                    | DwgObjectType::VertexPface
                    | DwgObjectType::VertexPfaceFace
                    | DwgObjectType::Seqend
            )
        )
    }

    /// Decode the record at `handle` and send it to the sink.
    ///
    /// Returns the next-entity link the record stores, when it is known.
    /// With `follow_links`, a record of a kind without a decoder still has
    /// its common header read for the link.
    fn read_entity(
        &mut self,
        handle: Handle,
        follow_links: bool,
        sink: &mut dyn DrawingSink,
    ) -> Result<Option<Handle>> {
        let mut streams = self.open(handle)?;

        let mut type_code = streams.type_code;
        if type_code >= 500 {
            type_code = self
                .classes
                .resolve(type_code)
                .ok_or(DwgError::UnresolvedClass { code: type_code, handle })?;
            streams.type_code = type_code;
        }

        let Some(decoder) = entity_registry::decoder_for(type_code) else {
            self.notifications.notify(
                NotificationType::NotImplemented,
                format!("object {handle:#X}: type {type_code:#X} skipped"),
            );
            if !follow_links {
                return Ok(None);
            }
            let link = self
                .reader
                .read_common_entity_data(&mut streams)
                .ok()
                .filter(|_| streams.is_good())
                .map(|common| common.next_entity);
            return Ok(link);
        };

        let mut entity = decoder(&self.reader, &mut streams)?;
        streams.finish()?;

        if let EntityType::Polyline(polyline) = &mut entity {
            self.read_vertices(polyline);
        }
        self.resolve_names(&mut entity);

        let next = entity.common().next_entity;
        sink.add_entity(&entity);
        Ok(Some(next))
    }

    /// Read the vertices of `polyline`, then drop its SEQEND.
    ///
    /// A vertex that cannot be read is logged and skipped.
    fn read_vertices(&mut self, polyline: &mut Polyline) {
        let mut walk = MemberWalk::new(&polyline.members);
        while let Some(member) = walk.next_handle() {
            match self.read_vertex(member) {
                Ok(mut vertex) => {
                    if polyline.kind == PolylineKind::Polyline2D && vertex.kind == VertexKind::Vertex2D {
                        vertex.location.z = polyline.elevation;
                    }
                    walk.advance(Some(vertex.common.next_entity));
                    polyline.vertices.push(vertex);
                }
                Err(e) => {
                    self.record_failure(e);
                    walk.advance(None);
                }
            }
        }

        if !polyline.seqend.is_null() {
            self.tracker.mark_consumed(polyline.seqend);
        }
    }

    fn read_vertex(&mut self, handle: Handle) -> Result<Vertex> {
        let mut streams = self.open(handle)?;
        let mut vertex = self.reader.read_vertex(&mut streams)?;
        streams.finish()?;
        self.resolve_common_names(&mut vertex.common);
        Ok(vertex)
    }

    // -----------------------------------------------------------------------
    // Name resolution
    // -----------------------------------------------------------------------

    fn resolve_names(&self, entity: &mut EntityType) {
        self.resolve_common_names(entity.common_mut());

        let tables = &self.tables;
        match entity {
            EntityType::Text(text) => text.style = tables.text_style_name(text.style_handle).to_string(),
            EntityType::MText(mtext) => mtext.style = tables.text_style_name(mtext.style_handle).to_string(),
            EntityType::Dimension(dim) => dim.dimstyle = tables.dim_style_name(dim.dimstyle_handle).to_string(),
            EntityType::Leader(leader) => {
                leader.dimstyle = tables.dim_style_name(leader.dimstyle_handle).to_string()
            }
            EntityType::Insert(insert) => {
                insert.block_name = tables.block_record_name(insert.block_record).to_string()
            }
            _ => {}
        }
    }

    fn resolve_common_names(&self, common: &mut EntityCommon) {
        common.layer = self.tables.layer_name(common.layer_handle).to_string();
        common.line_type = match common.line_type_flags {
            0 => "ByLayer".to_string(),
            1 => "ByBlock".to_string(),
            2 => "Continuous".to_string(),
            _ => self.tables.line_type_name(common.line_type_handle).to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = DecoderConfiguration::default();
        assert_eq!(config.debug_level, DebugLevel::None);
        assert!(config.keep_partial_tables);
        assert!(!config.walk_model_space);
    }

    #[test]
    fn test_control_handles_by_kind() {
        let controls = ControlHandles {
            layer: Handle::new(2),
            dim_style: Handle::new(0x0A),
            ..Default::default()
        };
        assert_eq!(controls.get(TableKind::Layer), Handle::new(2));
        assert_eq!(controls.get(TableKind::DimStyle), Handle::new(0x0A));
        assert!(controls.get(TableKind::AppId).is_null());
    }

    #[test]
    fn test_rejects_pre_r13() {
        let objects = ObjectMap::new();
        let classes = ClassMap::new();
        let result = DrawingDecoder::new(
            DwgVersion::AC1009,
            &[],
            &objects,
            &classes,
            ControlHandles::default(),
            TextCodec::default(),
            DecoderConfiguration::default(),
        );
        assert!(matches!(result, Err(DwgError::UnsupportedVersion(v)) if v == "AC1009"));
    }

    #[test]
    fn test_empty_drawing_fails_every_table() {
        let objects = ObjectMap::new();
        let classes = ClassMap::new();
        let mut decoder = DrawingDecoder::new(
            DwgVersion::AC1015,
            &[],
            &objects,
            &classes,
            ControlHandles::default(),
            TextCodec::default(),
            DecoderConfiguration::default(),
        )
        .unwrap();

        let mut sink = crate::sink::Drawing::new();
        assert!(!decoder.decode(&mut sink));
        assert_eq!(decoder.failures().len(), TableKind::LOAD_ORDER.len());
        assert!(decoder
            .failures()
            .iter()
            .all(|e| matches!(e, DwgError::HandleNotFound(h) if h.is_null())));
        assert_eq!(decoder.notifications().of_type(NotificationType::Warning).len(), 7);
        assert!(sink.entities.is_empty());
    }
}
