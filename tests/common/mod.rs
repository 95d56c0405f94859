//! Shared test utilities for the dwg-core integration tests.
//!
//! Builds synthetic object data (records, handle table, class table and
//! control handles) with the bit writer in [`writer`], runs a decode session
//! over it and records what reaches the sink.

#![allow(dead_code)]

pub mod writer;

use dwg_core::entities::EntityType;
use dwg_core::io::dwg::{ClassMap, DwgClass, DwgObjectType, ObjectMap, TextCodec};
use dwg_core::tables::{AppId, DimStyle, Layer, LineType, TableSet, TextStyle, VPort};
use dwg_core::types::{DwgVersion, Handle, Vector3};
use dwg_core::{
    Block, BlockEnd, ControlHandles, DecoderConfiguration, Drawing, DrawingDecoder, DrawingSink,
    DwgError, NotificationCollection,
};

pub use writer::{truncate_record, BitWriter, EntityHeader, RecordBuilder};

// ===========================================================================
// Versions
// ===========================================================================

/// One version per record layout generation.
pub const ALL_LAYOUTS: [DwgVersion; 6] = [
    DwgVersion::AC1014,
    DwgVersion::AC1015,
    DwgVersion::AC1018,
    DwgVersion::AC1021,
    DwgVersion::AC1024,
    DwgVersion::AC1032,
];

// ===========================================================================
// Handles of the standard drawing
// ===========================================================================

pub mod h {
    pub const BLOCK_CONTROL: u64 = 0x01;
    pub const LAYER_CONTROL: u64 = 0x02;
    pub const STYLE_CONTROL: u64 = 0x03;
    pub const LTYPE_CONTROL: u64 = 0x05;
    pub const VPORT_CONTROL: u64 = 0x08;
    pub const APPID_CONTROL: u64 = 0x09;
    pub const DIMSTYLE_CONTROL: u64 = 0x0A;

    pub const LAYER_0: u64 = 0x10;
    pub const STANDARD: u64 = 0x11;
    pub const ACAD: u64 = 0x12;
    pub const BYBLOCK: u64 = 0x13;
    pub const BYLAYER: u64 = 0x14;
    pub const CONTINUOUS: u64 = 0x15;
    pub const PAPER_SPACE: u64 = 0x1B;
    pub const PAPER_BLOCK: u64 = 0x1C;
    pub const PAPER_END: u64 = 0x1D;
    pub const MODEL_SPACE: u64 = 0x1F;
    pub const MODEL_BLOCK: u64 = 0x20;
    pub const MODEL_END: u64 = 0x21;
    pub const LAYER_WALLS: u64 = 0x30;

    pub const DOOR: u64 = 0x40;
    pub const DOOR_BLOCK: u64 = 0x41;
    pub const DOOR_END: u64 = 0x42;
    pub const DOOR_LINE_A: u64 = 0x43;
    pub const DOOR_LINE_B: u64 = 0x44;

    pub const WALL_LINE: u64 = 0x50;
    pub const COLUMN: u64 = 0x51;
    pub const DOOR_REF: u64 = 0x52;
}

fn code(object_type: DwgObjectType) -> i16 {
    object_type.code()
}

// ===========================================================================
// Record builders: tables
// ===========================================================================

/// Control record listing `entries`. `declared` is the stored count, which
/// normally excludes the implicit members.
pub fn control_record(
    version: DwgVersion,
    object_type: DwgObjectType,
    handle: u64,
    entries: &[u64],
    declared: usize,
) -> Vec<u8> {
    let mut record = RecordBuilder::object(version, code(object_type), handle, 0);
    record.main().write_bit_long(declared as i32);
    if object_type == DwgObjectType::DimstyleControlObj && version >= DwgVersion::AC1015 {
        record.main().write_byte(0);
    }
    if version >= DwgVersion::AC1021 {
        record.main().write_bit(false);
    }
    for &entry in entries {
        record.handle_ref(4, entry);
    }
    record.build()
}

pub fn line_type_record(version: DwgVersion, handle: u64, name: &str, description: &str) -> Vec<u8> {
    let mut record = RecordBuilder::table_entry(version, code(DwgObjectType::Ltype), handle, h::LTYPE_CONTROL, name);
    record.text(description);
    record.main().write_bit_double(0.0);
    record.main().write_byte(b'A');
    record.main().write_byte(0);
    if version < DwgVersion::AC1021 {
        record.main().write_bytes(&[0u8; 256]);
    }
    record.handle_ref(5, 0);
    record.build()
}

/// Dashed line type with two segments, the second carrying text.
pub fn dashed_line_type_record(version: DwgVersion, handle: u64, name: &str) -> Vec<u8> {
    let mut record = RecordBuilder::table_entry(version, code(DwgObjectType::Ltype), handle, h::LTYPE_CONTROL, name);
    record.text("Dashed __ __");
    let main = record.main();
    main.write_bit_double(0.75);
    main.write_byte(b'A');
    main.write_byte(2);

    // dash
    main.write_bit_double(0.5);
    main.write_bit_short(0);
    main.write_raw_double(0.0);
    main.write_raw_double(0.0);
    main.write_bit_double(1.0);
    main.write_bit_double(0.0);
    main.write_bit_short(0);

    // gap with embedded text at offset 0 of the strings area
    main.write_bit_double(-0.25);
    main.write_bit_short(0);
    main.write_raw_double(0.1);
    main.write_raw_double(-0.05);
    main.write_bit_double(1.0);
    main.write_bit_double(0.0);
    main.write_bit_short(0x02);

    let mut area = vec![0u8; if version >= DwgVersion::AC1021 { 512 } else { 256 }];
    if version >= DwgVersion::AC1021 {
        for (i, unit) in "GAS".encode_utf16().enumerate() {
            area[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
    } else {
        area[..3].copy_from_slice(b"GAS");
    }
    main.write_bytes(&area);

    record.handle_ref(5, 0);
    record.handle_ref(5, 0);
    record.handle_ref(5, h::STANDARD);
    record.build()
}

pub fn layer_record(version: DwgVersion, handle: u64, name: &str, color: i16, line_type: u64) -> Vec<u8> {
    let mut record = RecordBuilder::table_entry(version, code(DwgObjectType::Layer), handle, h::LAYER_CONTROL, name);
    if version < DwgVersion::AC1015 {
        let main = record.main();
        main.write_bit(false);
        main.write_bit(true);
        main.write_bit(false);
        main.write_bit(false);
    } else {
        // plottable, line weight index 29 (ByLayer)
        record.main().write_bit_short(0x10 | (29 << 5));
    }
    record.main().write_cm_color(color);
    record.handle_ref(5, 0);
    if version >= DwgVersion::AC1015 {
        record.handle_ref(5, 0);
    }
    if version >= DwgVersion::AC1021 {
        record.handle_ref(5, 0);
    }
    record.handle_ref(5, line_type);
    record.build()
}

pub fn text_style_record(version: DwgVersion, handle: u64, name: &str, height: f64, font: &str) -> Vec<u8> {
    let mut record = RecordBuilder::table_entry(version, code(DwgObjectType::Style), handle, h::STYLE_CONTROL, name);
    let main = record.main();
    main.write_bit(false);
    main.write_bit(false);
    main.write_bit_double(height);
    main.write_bit_double(1.0);
    main.write_bit_double(0.0);
    main.write_byte(0);
    main.write_bit_double(2.5);
    record.text(font);
    record.text("");
    record.handle_ref(5, 0);
    record.build()
}

pub fn app_id_record(version: DwgVersion, handle: u64, name: &str) -> Vec<u8> {
    let mut record = RecordBuilder::table_entry(version, code(DwgObjectType::Appid), handle, h::APPID_CONTROL, name);
    record.main().write_byte(0);
    record.handle_ref(5, 0);
    record.build()
}

/// A block definition: record, BLOCK and ENDBLK handles and members.
#[derive(Debug, Clone)]
pub struct BlockDef {
    pub record: u64,
    pub name: String,
    pub block: u64,
    pub end: u64,
    /// Model and paper space blocks store no owner on their BLOCK entity.
    pub stores_owner: bool,
    pub members: Vec<u64>,
    pub layer: u64,
}

impl BlockDef {
    pub fn new(record: u64, name: &str, block: u64, end: u64, members: &[u64]) -> Self {
        Self {
            record,
            name: name.to_string(),
            block,
            end,
            stores_owner: true,
            members: members.to_vec(),
            layer: h::LAYER_0,
        }
    }

    pub fn model_space(members: &[u64]) -> Self {
        Self {
            stores_owner: false,
            ..Self::new(h::MODEL_SPACE, "*Model_Space", h::MODEL_BLOCK, h::MODEL_END, members)
        }
    }

    pub fn paper_space() -> Self {
        Self {
            stores_owner: false,
            ..Self::new(h::PAPER_SPACE, "*Paper_Space", h::PAPER_BLOCK, h::PAPER_END, &[])
        }
    }

    /// Header for member `index` with the links of its position in the
    /// chain.
    pub fn member_header(&self, index: usize) -> EntityHeader {
        let prev = if index == 0 { 0 } else { self.members[index - 1] };
        let next = self.members.get(index + 1).copied().unwrap_or(0);
        let header = EntityHeader::on_layer(self.layer).linked(prev, next);
        if self.stores_owner {
            header.owned_by(self.record)
        } else {
            header
        }
    }
}

/// Block record for `def`. `stored_name` lets a test give the record a
/// name different from its BLOCK entity.
pub fn block_record_record(version: DwgVersion, def: &BlockDef, stored_name: &str) -> Vec<u8> {
    let mut record = RecordBuilder::table_entry(
        version,
        code(DwgObjectType::BlockHeader),
        def.record,
        h::BLOCK_CONTROL,
        stored_name,
    );
    let main = record.main();
    main.write_bit(false);
    main.write_bit(false);
    main.write_bit(false);
    main.write_bit(false);
    if version >= DwgVersion::AC1015 {
        main.write_bit(false);
    }
    if version >= DwgVersion::AC1018 {
        main.write_bit_long(def.members.len() as i32);
    }
    main.write_3bit_double(Vector3::new(1.0, 2.0, 0.0));
    record.text("");
    if version >= DwgVersion::AC1015 {
        record.main().write_byte(0);
        record.text("");
        record.main().write_bit_long(0);
    }
    if version >= DwgVersion::AC1021 {
        let main = record.main();
        main.write_bit_short(0);
        main.write_bit(true);
        main.write_byte(0);
    }

    record.handle_ref(5, 0);
    record.handle_ref(3, def.block);
    if version >= DwgVersion::AC1018 {
        for &member in &def.members {
            record.handle_ref(3, member);
        }
    } else {
        record.handle_ref(4, def.members.first().copied().unwrap_or(0));
        record.handle_ref(4, def.members.last().copied().unwrap_or(0));
    }
    record.handle_ref(3, def.end);
    if version >= DwgVersion::AC1015 {
        record.handle_ref(5, 0);
    }
    record.build()
}

pub fn block_entity_record(version: DwgVersion, def: &BlockDef) -> Vec<u8> {
    let mut header = EntityHeader::on_layer(def.layer);
    if def.stores_owner {
        header = header.owned_by(def.record);
    }
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Block), def.block, &header);
    record.text(&def.name);
    record.build()
}

pub fn end_block_record(version: DwgVersion, def: &BlockDef) -> Vec<u8> {
    let mut header = EntityHeader::on_layer(def.layer);
    if def.stores_owner {
        header = header.owned_by(def.record);
    }
    RecordBuilder::entity(version, code(DwgObjectType::Endblk), def.end, &header).build()
}

// ===========================================================================
// Record builders: entities
// ===========================================================================

pub fn line_record(version: DwgVersion, handle: u64, header: &EntityHeader, start: Vector3, end: Vector3) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Line), handle, header);
    let main = record.main();
    if version < DwgVersion::AC1015 {
        main.write_3bit_double(start);
        main.write_3bit_double(end);
    } else {
        let z_are_zero = start.z == 0.0 && end.z == 0.0;
        main.write_bit(z_are_zero);
        main.write_raw_double(start.x);
        main.write_bit_double_with_default(end.x, start.x);
        main.write_raw_double(start.y);
        main.write_bit_double_with_default(end.y, start.y);
        if !z_are_zero {
            main.write_raw_double(start.z);
            main.write_bit_double_with_default(end.z, start.z);
        }
    }
    main.write_bit_thickness(0.0);
    main.write_bit_extrusion(Vector3::UNIT_Z);
    record.build()
}

pub fn circle_record(version: DwgVersion, handle: u64, header: &EntityHeader, center: Vector3, radius: f64) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Circle), handle, header);
    let main = record.main();
    main.write_3bit_double(center);
    main.write_bit_double(radius);
    main.write_bit_thickness(0.0);
    main.write_bit_extrusion(Vector3::UNIT_Z);
    record.build()
}

pub fn insert_record(
    version: DwgVersion,
    handle: u64,
    header: &EntityHeader,
    point: Vector3,
    scale: f64,
    block_record: u64,
) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Insert), handle, header);
    let main = record.main();
    main.write_3bit_double(point);
    if version >= DwgVersion::AC1015 {
        if scale == 1.0 {
            main.write_2bits(3);
        } else {
            main.write_2bits(2);
            main.write_raw_double(scale);
        }
    } else {
        main.write_bit_double(scale);
        main.write_bit_double(scale);
        main.write_bit_double(scale);
    }
    main.write_bit_double(0.0);
    main.write_3bit_double(Vector3::UNIT_Z);
    main.write_bit(false);
    record.handle_ref(5, block_record);
    record.build()
}

/// MINSERT of `block_record`: unit scale, `columns` x `rows` copies.
pub fn minsert_record(
    version: DwgVersion,
    handle: u64,
    header: &EntityHeader,
    block_record: u64,
    grid: (i16, i16),
    spacing: (f64, f64),
) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Minsert), handle, header);
    let main = record.main();
    main.write_3bit_double(Vector3::ZERO);
    if version >= DwgVersion::AC1015 {
        main.write_2bits(3);
    } else {
        for _ in 0..3 {
            main.write_bit_double(1.0);
        }
    }
    main.write_bit_double(0.0);
    main.write_3bit_double(Vector3::UNIT_Z);
    main.write_bit(false);
    main.write_bit_short(grid.0);
    main.write_bit_short(grid.1);
    main.write_bit_double(spacing.0);
    main.write_bit_double(spacing.1);
    record.handle_ref(5, block_record);
    record.build()
}

/// EED items: a string (group 1000), a short (1070) and a point (1010).
pub fn eed_items(version: DwgVersion, text: &str, short: i16, point: Vector3) -> Vec<u8> {
    let mut items = Vec::new();
    items.push(0u8);
    if version >= DwgVersion::AC1021 {
        let units: Vec<u16> = text.encode_utf16().collect();
        items.extend_from_slice(&(units.len() as i16).to_le_bytes());
        for unit in units {
            items.extend_from_slice(&unit.to_le_bytes());
        }
    } else {
        items.push(text.len() as u8);
        items.extend_from_slice(&30i16.to_le_bytes());
        items.extend_from_slice(text.as_bytes());
    }
    items.push(70);
    items.extend_from_slice(&short.to_le_bytes());
    items.push(10);
    for v in [point.x, point.y, point.z] {
        items.extend_from_slice(&v.to_le_bytes());
    }
    items
}

pub fn text_record(
    version: DwgVersion,
    handle: u64,
    header: &EntityHeader,
    insert: (f64, f64),
    height: f64,
    value: &str,
    style: u64,
) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Text), handle, header);
    if version < DwgVersion::AC1015 {
        let main = record.main();
        main.write_bit_double(0.0);
        main.write_2raw_double(insert.0, insert.1);
        main.write_2raw_double(insert.0, insert.1);
        main.write_bit_extrusion(Vector3::UNIT_Z);
        main.write_bit_thickness(0.0);
        main.write_bit_double(0.0);
        main.write_bit_double(0.0);
        main.write_bit_double(height);
        main.write_bit_double(1.0);
        record.text(value);
        let main = record.main();
        main.write_bit_short(0);
        main.write_bit_short(0);
        main.write_bit_short(0);
    } else {
        // only the insertion point, height and value are stored
        let main = record.main();
        main.write_byte(0xFF);
        main.write_2raw_double(insert.0, insert.1);
        main.write_bit_extrusion(Vector3::UNIT_Z);
        main.write_bit_thickness(0.0);
        main.write_raw_double(height);
        record.text(value);
    }
    record.handle_ref(5, style);
    record.build()
}

/// 2D polyline owning `vertices`, closed by `seqend`.
pub fn polyline_2d_record(
    version: DwgVersion,
    handle: u64,
    header: &EntityHeader,
    elevation: f64,
    vertices: &[u64],
    seqend: u64,
) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Polyline2D), handle, header);
    let main = record.main();
    main.write_bit_short(1);
    main.write_bit_short(0);
    main.write_bit_double(0.0);
    main.write_bit_double(0.0);
    main.write_bit_thickness(0.0);
    main.write_bit_double(elevation);
    main.write_bit_extrusion(Vector3::UNIT_Z);
    owned_vertices(&mut record, version, vertices, seqend);
    record.build()
}

/// Polygon mesh of `m` x `n` vertices with no smoothing.
pub fn polygon_mesh_record(
    version: DwgVersion,
    handle: u64,
    header: &EntityHeader,
    (m, n): (i16, i16),
    vertices: &[u64],
    seqend: u64,
) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::PolylineMesh), handle, header);
    let main = record.main();
    main.write_bit_short(0);
    main.write_bit_short(0);
    main.write_bit_short(m);
    main.write_bit_short(n);
    main.write_bit_short(0);
    main.write_bit_short(0);
    owned_vertices(&mut record, version, vertices, seqend);
    record.build()
}

fn owned_vertices(record: &mut RecordBuilder, version: DwgVersion, vertices: &[u64], seqend: u64) {
    if version >= DwgVersion::AC1018 {
        record.main().write_bit_long(vertices.len() as i32);
        for &vertex in vertices {
            record.handle_ref(4, vertex);
        }
    } else {
        record.handle_ref(4, vertices.first().copied().unwrap_or(0));
        record.handle_ref(4, vertices.last().copied().unwrap_or(0));
    }
    record.handle_ref(3, seqend);
}

pub fn vertex_2d_record(version: DwgVersion, handle: u64, header: &EntityHeader, x: f64, y: f64) -> Vec<u8> {
    let mut record = RecordBuilder::entity(version, code(DwgObjectType::Vertex2D), handle, header);
    let main = record.main();
    main.write_byte(0);
    main.write_3bit_double(Vector3::new(x, y, 0.0));
    main.write_bit_double(0.0);
    main.write_bit_double(0.0);
    main.write_bit_double(0.0);
    if version >= DwgVersion::AC1024 {
        main.write_bit_long(0);
    }
    main.write_bit_double(0.0);
    record.build()
}

/// A record carrying only the common entity data (SEQEND and the like).
pub fn bare_entity_record(version: DwgVersion, object_type: DwgObjectType, handle: u64, header: &EntityHeader) -> Vec<u8> {
    RecordBuilder::entity(version, code(object_type), handle, header).build()
}

// ===========================================================================
// Fixture
// ===========================================================================

/// Synthetic object data with its handle table.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub version: DwgVersion,
    pub data: Vec<u8>,
    pub objects: ObjectMap,
    pub classes: ClassMap,
    pub controls: ControlHandles,
}

impl Fixture {
    pub fn new(version: DwgVersion) -> Self {
        Self {
            version,
            // leading filler so no record sits at offset 0
            data: vec![0u8; 16],
            objects: ObjectMap::new(),
            classes: ClassMap::new(),
            controls: ControlHandles::default(),
        }
    }

    /// Append a record (plus a CRC filler) and index it under `handle`.
    pub fn add(&mut self, handle: u64, record: Vec<u8>) -> &mut Self {
        let offset = self.data.len() as u64;
        self.data.extend_from_slice(&record);
        self.data.extend_from_slice(&[0xC0, 0xC1]);
        self.objects.insert(Handle::new(handle), offset);
        self
    }

    /// Drop `handle` from the handle table, leaving its bytes in place.
    pub fn forget(&mut self, handle: u64) -> &mut Self {
        let keep: Vec<(Handle, u64)> = self
            .objects
            .iter()
            .filter(|loc| loc.handle != Handle::new(handle))
            .map(|loc| (loc.handle, loc.offset))
            .collect();
        self.objects = keep.into_iter().collect();
        self
    }

    pub fn add_class(&mut self, class_number: i16, dxf_name: &str) -> &mut Self {
        self.classes.insert(DwgClass::new(class_number, dxf_name));
        self
    }

    /// Controls and entries of every table except the block records, plus
    /// the block control listing `block_records`.
    pub fn add_tables(&mut self, block_records: &[u64]) -> &mut Self {
        let v = self.version;
        self.controls = ControlHandles {
            line_type: Handle::new(h::LTYPE_CONTROL),
            layer: Handle::new(h::LAYER_CONTROL),
            text_style: Handle::new(h::STYLE_CONTROL),
            dim_style: Handle::new(h::DIMSTYLE_CONTROL),
            vport: Handle::new(h::VPORT_CONTROL),
            block_record: Handle::new(h::BLOCK_CONTROL),
            app_id: Handle::new(h::APPID_CONTROL),
        };

        let line_types = [h::CONTINUOUS, h::BYLAYER, h::BYBLOCK];
        self.add(
            h::LTYPE_CONTROL,
            control_record(v, DwgObjectType::LtypeControlObj, h::LTYPE_CONTROL, &line_types, 1),
        );
        self.add(h::CONTINUOUS, line_type_record(v, h::CONTINUOUS, "CONTINUOUS", "Solid line"));
        self.add(h::BYLAYER, line_type_record(v, h::BYLAYER, "ByLayer", ""));
        self.add(h::BYBLOCK, line_type_record(v, h::BYBLOCK, "ByBlock", ""));

        let layers = [h::LAYER_0, h::LAYER_WALLS];
        self.add(
            h::LAYER_CONTROL,
            control_record(v, DwgObjectType::LayerControlObj, h::LAYER_CONTROL, &layers, 2),
        );
        self.add(h::LAYER_0, layer_record(v, h::LAYER_0, "0", 7, h::CONTINUOUS));
        self.add(h::LAYER_WALLS, layer_record(v, h::LAYER_WALLS, "WALLS", 1, h::BYLAYER));

        self.add(
            h::STYLE_CONTROL,
            control_record(v, DwgObjectType::StyleControlObj, h::STYLE_CONTROL, &[h::STANDARD], 1),
        );
        self.add(h::STANDARD, text_style_record(v, h::STANDARD, "Standard", 0.0, "txt"));

        self.add(
            h::DIMSTYLE_CONTROL,
            control_record(v, DwgObjectType::DimstyleControlObj, h::DIMSTYLE_CONTROL, &[], 0),
        );
        self.add(
            h::VPORT_CONTROL,
            control_record(v, DwgObjectType::VportControlObj, h::VPORT_CONTROL, &[], 0),
        );
        self.add(
            h::APPID_CONTROL,
            control_record(v, DwgObjectType::AppidControlObj, h::APPID_CONTROL, &[h::ACAD], 1),
        );
        self.add(h::ACAD, app_id_record(v, h::ACAD, "ACAD"));

        let declared = block_records.len().saturating_sub(2);
        self.add(
            h::BLOCK_CONTROL,
            control_record(v, DwgObjectType::BlockControlObj, h::BLOCK_CONTROL, block_records, declared),
        );
        self
    }

    /// Block record, BLOCK and ENDBLK for `def`. Members are added by the
    /// caller.
    pub fn add_block(&mut self, def: &BlockDef) -> &mut Self {
        let v = self.version;
        self.add(def.record, block_record_record(v, def, &def.name));
        self.add(def.block, block_entity_record(v, def));
        self.add(def.end, end_block_record(v, def));
        self
    }

    pub fn decode(&self) -> Decoded {
        self.decode_with(DecoderConfiguration::default())
    }

    pub fn decode_with(&self, config: DecoderConfiguration) -> Decoded {
        let codec = TextCodec::with_encoding(self.version, encoding_rs::WINDOWS_1252);
        let mut decoder = DrawingDecoder::new(
            self.version,
            &self.data,
            &self.objects,
            &self.classes,
            self.controls,
            codec,
            config,
        )
        .unwrap_or_else(|e| panic!("failed to start a {} session: {e}", self.version));

        let mut sink = RecordingSink::default();
        let ok = decoder.decode(&mut sink);
        Decoded {
            ok,
            failures: decoder.failures().to_vec(),
            notifications: decoder.notifications().clone(),
            events: sink.events,
            drawing: sink.drawing,
            tables: decoder.into_tables(),
        }
    }
}

/// The standard drawing: model and paper space, a DOOR block with two
/// lines, and a line, a circle and a DOOR insert in model space.
pub fn standard_drawing(version: DwgVersion) -> Fixture {
    let mut fixture = Fixture::new(version);
    fixture.add_tables(&[h::MODEL_SPACE, h::PAPER_SPACE, h::DOOR]);

    let model = BlockDef::model_space(&[h::WALL_LINE, h::COLUMN, h::DOOR_REF]);
    fixture.add_block(&model);
    fixture.add_block(&BlockDef::paper_space());

    let door = BlockDef::new(h::DOOR, "DOOR", h::DOOR_BLOCK, h::DOOR_END, &[h::DOOR_LINE_A, h::DOOR_LINE_B]);
    fixture.add_block(&door);
    fixture.add(
        h::DOOR_LINE_A,
        line_record(version, h::DOOR_LINE_A, &door.member_header(0), Vector3::ZERO, Vector3::new(0.0, 2.0, 0.0)),
    );
    fixture.add(
        h::DOOR_LINE_B,
        line_record(
            version,
            h::DOOR_LINE_B,
            &door.member_header(1),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.9, 2.0, 0.0),
        ),
    );

    fixture.add(
        h::WALL_LINE,
        line_record(
            version,
            h::WALL_LINE,
            &EntityHeader::on_layer(h::LAYER_WALLS),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 0.0, 0.0),
        ),
    );
    fixture.add(
        h::COLUMN,
        circle_record(
            version,
            h::COLUMN,
            &EntityHeader::on_layer(h::LAYER_0).with_color(3),
            Vector3::new(5.0, 5.0, 0.0),
            0.5,
        ),
    );
    fixture.add(
        h::DOOR_REF,
        insert_record(
            version,
            h::DOOR_REF,
            &EntityHeader::on_layer(h::LAYER_WALLS),
            Vector3::new(3.0, 0.0, 0.0),
            1.0,
            h::DOOR,
        ),
    );
    fixture
}

// ===========================================================================
// Recording sink
// ===========================================================================

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LineType(String),
    Layer(String),
    TextStyle(String),
    DimStyle(String),
    VPort(String),
    AppId(String),
    BlockStart(String),
    BlockEnd(u64),
    Entity(&'static str, u64),
}

/// Sink keeping the call sequence next to a collected [`Drawing`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
    pub drawing: Drawing,
}

impl DrawingSink for RecordingSink {
    fn add_line_type(&mut self, line_type: &LineType) {
        self.events.push(Event::LineType(line_type.common.name.clone()));
        self.drawing.add_line_type(line_type);
    }

    fn add_layer(&mut self, layer: &Layer) {
        self.events.push(Event::Layer(layer.common.name.clone()));
        self.drawing.add_layer(layer);
    }

    fn add_text_style(&mut self, style: &TextStyle) {
        self.events.push(Event::TextStyle(style.common.name.clone()));
        self.drawing.add_text_style(style);
    }

    fn add_dim_style(&mut self, style: &DimStyle) {
        self.events.push(Event::DimStyle(style.common.name.clone()));
        self.drawing.add_dim_style(style);
    }

    fn add_vport(&mut self, vport: &VPort) {
        self.events.push(Event::VPort(vport.common.name.clone()));
        self.drawing.add_vport(vport);
    }

    fn add_app_id(&mut self, app_id: &AppId) {
        self.events.push(Event::AppId(app_id.common.name.clone()));
        self.drawing.add_app_id(app_id);
    }

    fn add_block(&mut self, block: &Block) {
        self.events.push(Event::BlockStart(block.name.clone()));
        self.drawing.add_block(block);
    }

    fn end_block(&mut self, end: &BlockEnd) {
        self.events.push(Event::BlockEnd(end.common.handle.value()));
        self.drawing.end_block(end);
    }

    fn add_entity(&mut self, entity: &EntityType) {
        self.events.push(Event::Entity(entity.type_name(), entity.handle().value()));
        self.drawing.add_entity(entity);
    }
}

/// Everything a decode session produced.
#[derive(Debug)]
pub struct Decoded {
    pub ok: bool,
    pub failures: Vec<DwgError>,
    pub notifications: NotificationCollection,
    pub events: Vec<Event>,
    pub drawing: Drawing,
    pub tables: TableSet,
}

impl Decoded {
    /// Handles of the entities sent outside any block, in order.
    pub fn top_level_handles(&self) -> Vec<u64> {
        self.drawing.entities.iter().map(|e| e.handle().value()).collect()
    }

    /// Handles of the members sent for block `name`, in order.
    pub fn block_handles(&self, name: &str) -> Vec<u64> {
        self.drawing
            .block(name)
            .unwrap_or_else(|| panic!("block {name} not emitted"))
            .entities
            .iter()
            .map(|e| e.handle().value())
            .collect()
    }

    pub fn entity(&self, handle: u64) -> &EntityType {
        self.drawing
            .all_entities()
            .find(|e| e.handle().value() == handle)
            .unwrap_or_else(|| panic!("entity {handle:#X} not emitted"))
    }

    /// Failures about `handle`.
    pub fn failures_for(&self, handle: u64) -> Vec<&DwgError> {
        self.failures
            .iter()
            .filter(|e| e.handle() == Some(Handle::new(handle)))
            .collect()
    }
}
