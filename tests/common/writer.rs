//! Bit-level encoder used to build synthetic object records.
//!
//! Produces the same primitives the decoder reads (B, BB, BS, BL, BD, DD,
//! MS, MC, H, TV, OT, CMC, ENC) and assembles whole records with their
//! object, string and handle streams.

use dwg_core::types::{DwgVersion, Vector3};

// ===========================================================================
// BitWriter
// ===========================================================================

/// Append-only bit stream, most significant bit first.
#[derive(Debug, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: u64,
    version: DwgVersion,
}

impl BitWriter {
    pub fn new(version: DwgVersion) -> Self {
        Self {
            bytes: Vec::new(),
            bit_len: 0,
            version,
        }
    }

    pub fn version(&self) -> DwgVersion {
        self.version
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bit_at(&self, pos: u64) -> bool {
        let byte = self.bytes[(pos / 8) as usize];
        (byte >> (7 - (pos % 8))) & 1 == 1
    }

    fn set_bit_at(&mut self, pos: u64, value: bool) {
        let mask = 0x80u8 >> (pos % 8);
        let byte = &mut self.bytes[(pos / 8) as usize];
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    // -----------------------------------------------------------------------
    // Bits and raw values
    // -----------------------------------------------------------------------

    pub fn write_bit(&mut self, value: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        let pos = self.bit_len;
        self.bit_len += 1;
        if value {
            self.set_bit_at(pos, true);
        }
    }

    /// Write the low `count` bits of `value`, high bit first.
    pub fn write_bits(&mut self, value: u64, count: u32) {
        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
    }

    pub fn write_2bits(&mut self, value: u8) {
        self.write_bits(value as u64, 2);
    }

    pub fn write_byte(&mut self, value: u8) {
        self.write_bits(value as u64, 8);
    }

    pub fn write_bytes(&mut self, values: &[u8]) {
        for &b in values {
            self.write_byte(b);
        }
    }

    pub fn write_raw_short(&mut self, value: i16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_raw_long(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_raw_double(&mut self, value: f64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Overwrite 32 bits at `pos` with `value` as an RL.
    pub fn patch_raw_long(&mut self, pos: u64, value: i32) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            for bit in 0..8u64 {
                let set = (byte >> (7 - bit)) & 1 == 1;
                self.set_bit_at(pos + i as u64 * 8 + bit, set);
            }
        }
    }

    /// Append every bit of `other`.
    pub fn append(&mut self, other: &BitWriter) {
        for pos in 0..other.bit_len {
            self.write_bit(other.bit_at(pos));
        }
    }

    /// Fill up to the next byte boundary with zero bits.
    pub fn pad_to_byte(&mut self) {
        while self.bit_len % 8 != 0 {
            self.write_bit(false);
        }
    }

    // -----------------------------------------------------------------------
    // Bit-coded values
    // -----------------------------------------------------------------------

    /// BS
    pub fn write_bit_short(&mut self, value: i16) {
        match value {
            0 => self.write_2bits(2),
            256 => self.write_2bits(3),
            1..=255 => {
                self.write_2bits(1);
                self.write_byte(value as u8);
            }
            _ => {
                self.write_2bits(0);
                self.write_raw_short(value);
            }
        }
    }

    /// BL
    pub fn write_bit_long(&mut self, value: i32) {
        match value {
            0 => self.write_2bits(2),
            1..=255 => {
                self.write_2bits(1);
                self.write_byte(value as u8);
            }
            _ => {
                self.write_2bits(0);
                self.write_raw_long(value);
            }
        }
    }

    /// BD
    pub fn write_bit_double(&mut self, value: f64) {
        if value == 1.0 {
            self.write_2bits(1);
        } else if value == 0.0 && value.is_sign_positive() {
            self.write_2bits(2);
        } else {
            self.write_2bits(0);
            self.write_raw_double(value);
        }
    }

    /// DD: the default itself, or the full double.
    pub fn write_bit_double_with_default(&mut self, value: f64, default: f64) {
        if value.to_bits() == default.to_bits() {
            self.write_2bits(0);
        } else {
            self.write_2bits(3);
            self.write_raw_double(value);
        }
    }

    pub fn write_2raw_double(&mut self, x: f64, y: f64) {
        self.write_raw_double(x);
        self.write_raw_double(y);
    }

    pub fn write_3bit_double(&mut self, value: Vector3) {
        self.write_bit_double(value.x);
        self.write_bit_double(value.y);
        self.write_bit_double(value.z);
    }

    /// BT
    pub fn write_bit_thickness(&mut self, value: f64) {
        if self.version >= DwgVersion::AC1015 {
            if value == 0.0 {
                self.write_bit(true);
                return;
            }
            self.write_bit(false);
        }
        self.write_bit_double(value);
    }

    /// BE
    pub fn write_bit_extrusion(&mut self, value: Vector3) {
        if self.version >= DwgVersion::AC1015 {
            if value == Vector3::UNIT_Z {
                self.write_bit(true);
                return;
            }
            self.write_bit(false);
        }
        self.write_3bit_double(value);
    }

    // -----------------------------------------------------------------------
    // Modular values
    // -----------------------------------------------------------------------

    /// MS
    pub fn write_modular_short(&mut self, mut value: u32) {
        loop {
            let word = value & 0x7FFF;
            value >>= 15;
            let more = if value != 0 { 0x80 } else { 0 };
            self.write_byte((word & 0xFF) as u8);
            self.write_byte(((word >> 8) as u8) | more);
            if value == 0 {
                break;
            }
        }
    }

    /// Unsigned MC
    pub fn write_umodular_char(&mut self, mut value: u64) {
        loop {
            let low = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.write_byte(low);
                break;
            }
            self.write_byte(low | 0x80);
        }
    }

    // -----------------------------------------------------------------------
    // Handles, text, type codes and colors
    // -----------------------------------------------------------------------

    /// H: code nibble, byte count nibble, value bytes big-endian.
    pub fn write_handle(&mut self, code: u8, value: u64) {
        let bytes: Vec<u8> = value
            .to_be_bytes()
            .into_iter()
            .skip_while(|&b| b == 0)
            .collect();
        self.write_byte((code << 4) | bytes.len() as u8);
        self.write_bytes(&bytes);
    }

    /// TV: UTF-16LE code units from R2007, code-page bytes before.
    pub fn write_variable_text(&mut self, value: &str) {
        if self.version >= DwgVersion::AC1021 {
            let units: Vec<u16> = value.encode_utf16().collect();
            self.write_bit_short(units.len() as i16);
            for unit in units {
                self.write_bytes(&unit.to_le_bytes());
            }
        } else {
            let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(value);
            self.write_bit_short(encoded.len() as i16);
            self.write_bytes(&encoded);
        }
    }

    /// OT
    pub fn write_object_type(&mut self, code: i16) {
        if self.version < DwgVersion::AC1024 {
            self.write_bit_short(code);
            return;
        }
        match code {
            0..=0xFF => {
                self.write_2bits(0);
                self.write_byte(code as u8);
            }
            0x1F0..=0x2EF => {
                self.write_2bits(1);
                self.write_byte((code - 0x1F0) as u8);
            }
            _ => {
                self.write_2bits(2);
                self.write_raw_short(code);
            }
        }
    }

    /// CMC for a color index (0 ByBlock, 256 ByLayer).
    pub fn write_cm_color(&mut self, index: i16) {
        if self.version < DwgVersion::AC1018 {
            self.write_bit_short(index);
            return;
        }
        let rgb: u32 = match index {
            0 => 0xC100_0000,
            256 => 0xC000_0000,
            i => 0xC300_0000 | (i as u32 & 0xFF),
        };
        self.write_bit_short(0);
        self.write_bit_long(rgb as i32);
        self.write_byte(0);
    }

    /// ENC for a color index.
    pub fn write_en_color(&mut self, index: i16) {
        if self.version < DwgVersion::AC1018 {
            self.write_bit_short(index);
        } else {
            self.write_bit_short(index & 0x0FFF);
        }
    }
}

// ===========================================================================
// Records
// ===========================================================================

/// Common entity data of a synthetic entity.
#[derive(Debug, Clone)]
pub struct EntityHeader {
    /// Stored owner; `None` writes entity mode 2 (model space).
    pub owner: Option<u64>,
    pub layer: u64,
    /// Line type handle; `None` is ByLayer.
    pub line_type: Option<u64>,
    /// Explicit (prev, next) links before R2004; `None` sets the no-links
    /// bit so the neighbours are handle - 1 and handle + 1.
    pub links: Option<(u64, u64)>,
    pub color: i16,
    /// EED blocks: application handle and the raw item bytes.
    pub eed: Vec<(u64, Vec<u8>)>,
}

impl EntityHeader {
    pub fn on_layer(layer: u64) -> Self {
        Self {
            owner: None,
            layer,
            line_type: None,
            links: None,
            color: 256,
            eed: Vec::new(),
        }
    }

    pub fn owned_by(mut self, owner: u64) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn linked(mut self, prev: u64, next: u64) -> Self {
        self.links = Some((prev, next));
        self
    }

    pub fn with_line_type(mut self, line_type: u64) -> Self {
        self.line_type = Some(line_type);
        self
    }

    pub fn with_color(mut self, color: i16) -> Self {
        self.color = color;
        self
    }

    pub fn with_eed(mut self, app: u64, items: Vec<u8>) -> Self {
        self.eed.push((app, items));
        self
    }
}

/// One object record under construction.
///
/// Fields go to the object stream through [`main`](Self::main), strings
/// through [`text`](Self::text) and references through
/// [`handle_ref`](Self::handle_ref). [`build`](Self::build) lays the
/// streams out and prefixes the size.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    version: DwgVersion,
    handle: u64,
    main: BitWriter,
    strings: BitWriter,
    handles: BitWriter,
    size_slot: Option<u64>,
}

impl RecordBuilder {
    /// Record with only its type code written.
    pub fn new(version: DwgVersion, type_code: i16, handle: u64) -> Self {
        let mut main = BitWriter::new(version);
        main.write_object_type(type_code);
        Self {
            version,
            handle,
            main,
            strings: BitWriter::new(version),
            handles: BitWriter::new(version),
            size_slot: None,
        }
    }

    /// Record with the common non-entity data (no reactors, no
    /// xdictionary).
    pub fn object(version: DwgVersion, type_code: i16, handle: u64, owner: u64) -> Self {
        let mut record = Self::new(version, type_code, handle);
        if record.r2000_plus() && !record.r2010_plus() {
            record.size_slot();
        }
        record.main.write_handle(0, handle);
        record.main.write_bit_short(0);
        if !record.r2000_plus() {
            record.size_slot();
        }
        record.main.write_bit_long(0);
        if record.r2004_plus() {
            record.main.write_bit(true);
        }
        if record.r2013_plus() {
            record.main.write_bit(false);
        }
        record.handles.write_handle(4, owner);
        if !record.r2004_plus() {
            record.handles.write_handle(3, 0);
        }
        record
    }

    /// Table entry: common data, name and xref bits.
    pub fn table_entry(version: DwgVersion, type_code: i16, handle: u64, control: u64, name: &str) -> Self {
        let mut record = Self::object(version, type_code, handle, control);
        record.text(name);
        if record.r2007_plus() {
            record.main.write_bit_short(0);
        } else {
            record.main.write_bit(false);
            record.main.write_bit_short(0);
            record.main.write_bit(false);
        }
        record
    }

    /// Record with the common entity data.
    pub fn entity(version: DwgVersion, type_code: i16, handle: u64, header: &EntityHeader) -> Self {
        let mut record = Self::new(version, type_code, handle);
        if record.r2000_plus() && !record.r2010_plus() {
            record.size_slot();
        }
        record.main.write_handle(0, handle);
        for (app, items) in &header.eed {
            record.main.write_bit_short(items.len() as i16);
            record.main.write_handle(5, *app);
            record.main.write_bytes(items);
        }
        record.main.write_bit_short(0);
        record.main.write_bit(false);
        if !record.r2000_plus() {
            record.size_slot();
        }

        match header.owner {
            Some(owner) => {
                record.main.write_2bits(0);
                record.handles.write_handle(4, owner);
            }
            None => record.main.write_2bits(2),
        }

        record.main.write_bit_long(0);
        if record.r2004_plus() {
            record.main.write_bit(true);
        }
        if record.r2013_plus() {
            record.main.write_bit(false);
        }
        if !record.r2004_plus() {
            record.handles.write_handle(3, 0);
        }

        if !record.r2000_plus() {
            record.handles.write_handle(5, header.layer);
            match header.line_type {
                Some(line_type) => {
                    record.main.write_bit(false);
                    record.handles.write_handle(5, line_type);
                }
                None => record.main.write_bit(true),
            }
        }

        if !record.r2004_plus() {
            match header.links {
                Some((prev, next)) => {
                    record.main.write_bit(false);
                    record.handles.write_handle(4, prev);
                    record.handles.write_handle(4, next);
                }
                None => record.main.write_bit(true),
            }
        }

        record.main.write_en_color(header.color);
        record.main.write_bit_double(1.0);

        if record.r2000_plus() {
            record.handles.write_handle(5, header.layer);
            match header.line_type {
                Some(line_type) => {
                    record.main.write_2bits(3);
                    record.handles.write_handle(5, line_type);
                }
                None => record.main.write_2bits(0),
            }
            if record.r2007_plus() {
                record.main.write_2bits(0);
                record.main.write_byte(0);
            }
            record.main.write_2bits(0);
            if record.r2010_plus() {
                record.main.write_bits(0, 3);
            }
        }

        record.main.write_bit_short(0);
        if record.r2000_plus() {
            record.main.write_byte(29);
        }
        record
    }

    fn size_slot(&mut self) {
        self.size_slot = Some(self.main.bit_len());
        self.main.write_raw_long(0);
    }

    pub fn version(&self) -> DwgVersion {
        self.version
    }

    pub fn handle(&self) -> u64 {
        self.handle
    }

    pub fn r2000_plus(&self) -> bool {
        self.version >= DwgVersion::AC1015
    }

    pub fn r2004_plus(&self) -> bool {
        self.version >= DwgVersion::AC1018
    }

    pub fn r2007_plus(&self) -> bool {
        self.version >= DwgVersion::AC1021
    }

    pub fn r2010_plus(&self) -> bool {
        self.version >= DwgVersion::AC1024
    }

    pub fn r2013_plus(&self) -> bool {
        self.version >= DwgVersion::AC1027
    }

    /// Object stream.
    pub fn main(&mut self) -> &mut BitWriter {
        &mut self.main
    }

    /// TV into the string stream (R2007+) or inline.
    pub fn text(&mut self, value: &str) -> &mut Self {
        if self.r2007_plus() {
            self.strings.write_variable_text(value);
        } else {
            self.main.write_variable_text(value);
        }
        self
    }

    /// Handle reference into the handle stream.
    pub fn handle_ref(&mut self, code: u8, value: u64) -> &mut Self {
        self.handles.write_handle(code, value);
        self
    }

    /// Size-prefixed record bytes, without the trailing CRC.
    pub fn build(self) -> Vec<u8> {
        let version = self.version;
        let mut body = self.main;

        if version >= DwgVersion::AC1021 {
            let string_bits = self.strings.bit_len();
            if string_bits > 0 {
                assert!(string_bits < 0x8000, "string stream too long for a test record");
                body.append(&self.strings);
                body.write_raw_short(string_bits as i16);
                body.write_bit(true);
            } else {
                body.write_bit(false);
            }
        }

        let handle_start = body.bit_len();
        if let Some(slot) = self.size_slot {
            body.patch_raw_long(slot, handle_start as i32);
        }
        body.append(&self.handles);
        body.pad_to_byte();
        body.write_byte(0);

        let bytes = body.into_bytes();
        let mut prefix = BitWriter::new(version);
        prefix.write_modular_short(bytes.len() as u32);
        if version >= DwgVersion::AC1024 {
            prefix.write_umodular_char(bytes.len() as u64 * 8 - handle_start);
        }

        let mut record = prefix.into_bytes();
        record.extend_from_slice(&bytes);
        record
    }
}

/// Replace the size prefix of a built record so that only `keep` bytes of
/// its body are declared (and kept). Versions before R2010 only.
pub fn truncate_record(record: &[u8], keep: usize) -> Vec<u8> {
    assert!(record.len() > 2 && record[1] & 0x80 == 0, "expects a one-word MS prefix");
    let body = &record[2..];
    let keep = keep.min(body.len());
    let mut out = vec![(keep & 0xFF) as u8, ((keep >> 8) & 0x7F) as u8];
    out.extend_from_slice(&body[..keep]);
    out
}
