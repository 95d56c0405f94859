//! DWG object reader: decodes single records out of the object data.
//!
//! # Architecture
//!
//! Every record is located through the handle table and starts with an MS
//! byte size (plus, from R2010, an MC with the handle stream size in bits).
//! [`ObjectReader::open`] slices the record and sets up three cursors over
//! the same bytes:
//!
//! 1. the object stream, positioned after the type code;
//! 2. the handle stream, at the end of the object data;
//! 3. the string stream (R2007+), found through the flag bit just before
//!    the handle stream. Before R2007 strings are inline in the object
//!    stream.
//!
//! Before R2010 the handle stream position is only known once the RL object
//! size has been read from the common data, see
//! [`ObjectReader::update_handle_reader`].
//!
//! Decoders never check the cursors field by field. They read the whole
//! structure and call [`StreamSet::finish`] once.

pub mod common;
pub mod read_controls;
pub mod read_entities;
pub mod read_tables;

pub use common::ObjectHeader;
pub use read_controls::ObjectControl;

use crate::error::{DwgError, Result};
use crate::io::dwg::bit_buffer::BitBuffer;
use crate::io::dwg::object_map::ObjectLocation;
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::text_codec::TextCodec;
use crate::io::dwg::version_caps::VersionCaps;
use crate::types::{Color, DwgVersion, Handle};

/// Record decoder over the object data of one drawing.
///
/// Holds no per-record state; every [`open`](Self::open) builds fresh
/// cursors, so nested decodes never share one.
#[derive(Debug, Clone)]
pub struct ObjectReader<'a> {
    data: &'a [u8],
    version: DwgVersion,
    caps: VersionCaps,
    codec: TextCodec,
}

impl<'a> ObjectReader<'a> {
    /// Create a reader over `data`, the object data addressed by the
    /// handle table offsets.
    pub fn new(data: &'a [u8], version: DwgVersion, codec: TextCodec) -> Self {
        Self {
            data,
            version,
            caps: VersionCaps::new(version),
            codec,
        }
    }

    /// Get the DWG version.
    pub fn version(&self) -> DwgVersion {
        self.version
    }

    pub fn caps(&self) -> &VersionCaps {
        &self.caps
    }

    /// Slice the record at `location` and set up its streams.
    ///
    /// Fails when the offset lies outside the data, the size prefix is
    /// unreadable or zero, or (R2010+) the handle stream size exceeds the
    /// record. A declared size larger than the data left is not an error
    /// here: the record is clamped and [`StreamSet::finish`] reports the
    /// underrun once the decoder is done.
    pub fn open(&self, location: ObjectLocation) -> Result<StreamSet<'a>> {
        let handle = location.handle;
        let offset = usize::try_from(location.offset)
            .ok()
            .filter(|&o| o < self.data.len())
            .ok_or_else(|| DwgError::InvalidRecord {
                handle,
                reason: format!("offset {} outside object data", location.offset),
            })?;

        // MS : size of object, not including the CRC.
        let mut crc_reader = self.make_reader(&self.data[offset..]);
        let size = crc_reader.read_modular_short() as u64;

        // R2010+: MC handle stream size in bits.
        let handle_size = if self.caps.has_handle_stream_size() {
            crc_reader.read_umodular_char()
        } else {
            0
        };

        if !crc_reader.is_good() {
            return Err(DwgError::BufferUnderrun(handle));
        }
        if size == 0 {
            return Err(DwgError::InvalidRecord {
                handle,
                reason: "zero record size".to_string(),
            });
        }

        let start = offset + crc_reader.position();
        let end = (start as u64).saturating_add(size).min(self.data.len() as u64) as usize;
        let record = &self.data[start.min(end)..end];
        let size_in_bits = size * 8;

        let mut object_reader = self.make_reader(record);
        let type_code = object_reader.read_object_type();

        let mut handles_reader = self.make_reader(record);
        let mut text_reader = self.make_reader(record);
        let mut has_separate_text_reader = false;

        if self.caps.has_handle_stream_size() {
            let handle_section_offset =
                size_in_bits
                    .checked_sub(handle_size)
                    .ok_or_else(|| DwgError::InvalidRecord {
                        handle,
                        reason: format!(
                            "handle stream of {handle_size} bits exceeds record of {size_in_bits} bits"
                        ),
                    })?;
            handles_reader.set_position_in_bits(handle_section_offset);
            text_reader.set_position_by_flag(handle_section_offset.saturating_sub(1));
            has_separate_text_reader = true;
        }

        Ok(StreamSet {
            object_reader,
            text_reader,
            handles_reader,
            has_separate_text_reader,
            type_code,
            location,
            current_handle: handle,
            size_in_bits,
        })
    }

    fn make_reader(&self, data: &'a [u8]) -> BitBuffer<'a> {
        BitBuffer::new(data, self.version, self.codec)
    }

    /// Position the handle stream (and the R2007 string stream) from the RL
    /// object size in bits. Used before R2010, where the common data carries
    /// that size.
    fn update_handle_reader(&self, streams: &mut StreamSet<'a>) {
        // RL: size of object data in bits, the "endbit" of the data section.
        let end_bits = streams.object_reader.read_raw_long() as u32 as u64;
        streams.handles_reader.set_position_in_bits(end_bits);

        if self.version == DwgVersion::AC1021 {
            streams
                .text_reader
                .set_position_by_flag(end_bits.saturating_sub(1));
            streams.has_separate_text_reader = true;
        }
    }
}

/// The three cursors of one record.
///
/// Reads are routed by kind: handle references go to `handles_reader`,
/// strings to `text_reader` when the record has a separate string stream,
/// everything else to `object_reader`.
#[derive(Debug, Clone)]
pub struct StreamSet<'a> {
    pub object_reader: BitBuffer<'a>,
    pub text_reader: BitBuffer<'a>,
    pub handles_reader: BitBuffer<'a>,
    /// Strings live in `text_reader` (R2007+).
    pub has_separate_text_reader: bool,
    /// Raw type code read from the start of the record.
    pub type_code: i16,
    /// Where the record was found.
    pub location: ObjectLocation,
    /// Reference for relative handle codes (0x6, 0x8, 0xA, 0xC). Replaced
    /// by the record's own handle once the common data is read.
    pub current_handle: Handle,
    /// Declared record size.
    size_in_bits: u64,
}

impl<'a> StreamSet<'a> {
    /// Read a handle reference from the handle stream, resolved against the
    /// current record handle.
    pub fn handle_ref(&mut self) -> Handle {
        self.handles_reader.read_offset_handle(self.current_handle)
    }

    /// Read variable text from the string stream or inline.
    pub fn read_text(&mut self) -> String {
        if self.has_separate_text_reader {
            self.text_reader.read_variable_text()
        } else {
            self.object_reader.read_variable_text()
        }
    }

    /// CMC with the color and book names taken from the string stream.
    pub fn read_cm_color(&mut self) -> Color {
        if !self.has_separate_text_reader {
            return self.object_reader.read_cm_color();
        }

        let index = self.object_reader.read_bit_short();
        let rgb = self.object_reader.read_bit_long() as u32;
        let color = match rgb >> 24 {
            0xC0 => Color::ByLayer,
            0xC1 => Color::ByBlock,
            0xC2 => Color::from_packed_rgb(rgb),
            0xC3 => Color::Index((rgb & 0xFF) as u8),
            _ => Color::from_index(index),
        };
        let flags = self.object_reader.read_byte();
        if flags & 1 != 0 {
            let _color_name = self.text_reader.read_variable_text();
        }
        if flags & 2 != 0 {
            let _book_name = self.text_reader.read_variable_text();
        }
        color
    }

    /// Handle of the record as listed in the handle table.
    pub fn record_handle(&self) -> Handle {
        self.location.handle
    }

    /// Fail with [`DwgError::TypeMismatch`] unless the record has type
    /// `expected`.
    pub fn expect_type(&self, expected: DwgObjectType) -> Result<()> {
        if self.type_code == expected.code() {
            Ok(())
        } else {
            Err(DwgError::TypeMismatch {
                handle: self.location.handle,
                expected: expected.code(),
                found: self.type_code,
            })
        }
    }

    /// `true` while every stream in use is live.
    pub fn is_good(&self) -> bool {
        self.object_reader.is_good()
            && self.handles_reader.is_good()
            && (!self.has_separate_text_reader || self.text_reader.is_good())
    }

    /// Check the streams after a full decode.
    ///
    /// A record whose declared size runs past the end of the data is forced
    /// to underrun here, so truncated records fail even when the decoded
    /// fields happened to fit.
    pub fn finish(&mut self) -> Result<()> {
        if self.size_in_bits > self.object_reader.len() as u64 * 8 {
            self.object_reader.set_position_in_bits(self.size_in_bits);
        }
        if self.is_good() {
            Ok(())
        } else {
            Err(DwgError::BufferUnderrun(self.location.handle))
        }
    }
}
