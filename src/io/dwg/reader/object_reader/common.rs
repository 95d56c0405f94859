//! Common entity/object data readers.
//!
//! - common entity data (handle, EED, graphics, owner, layer, line type...)
//! - common non-entity data (handle, EED, owner, reactors, xdictionary)
//! - extended entity data
//! - the xref-dependence bits of table entries

use crate::entities::{EntityCommon, ExtendedData};
use crate::error::{DwgError, Result};
use crate::tables::TableEntryCommon;
use crate::types::{DwgVersion, Handle, LineWeight};
use crate::variant::Variant;
use crate::MAX_REACTORS;

use super::{ObjectReader, StreamSet};

/// Header shared by every non-entity record (controls and table entries).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectHeader {
    pub handle: Handle,
    pub owner: Handle,
    pub reactors: Vec<Handle>,
    pub xdictionary: Handle,
    /// Set when the R2004+ flag said no xdictionary handle is stored.
    pub xdictionary_missing: bool,
    pub extended_data: Vec<ExtendedData>,
}

impl<'a> ObjectReader<'a> {
    // -----------------------------------------------------------------------
    // Common entity data
    // -----------------------------------------------------------------------

    /// Read the header shared by all entities.
    ///
    /// Leaves the object stream on the first kind-specific field. Table
    /// names are not resolved here.
    pub fn read_common_entity_data(&self, streams: &mut StreamSet<'a>) -> Result<EntityCommon> {
        let mut common = EntityCommon::new();

        // R2000-R2007: RL object size in bits ahead of the handle.
        if self.caps.r2000_plus && !self.caps.r2010_plus {
            self.update_handle_reader(streams);
        }

        common.handle = self.read_object_handle(streams);
        common.extended_data = self.read_extended_data(streams)?;

        // Graphic present flag (B), followed by the proxy graphics.
        if streams.object_reader.read_bit() {
            let graphics_size = if self.caps.r2010_plus {
                streams.object_reader.read_bit_long_long()
            } else {
                streams.object_reader.read_raw_long() as i64
            };
            if graphics_size < 0 {
                return Err(DwgError::InvalidRecord {
                    handle: common.handle,
                    reason: format!("negative graphics size {graphics_size}"),
                });
            }
            streams.object_reader.advance(graphics_size as usize);
        }

        // R13-R14: RL object size after the graphics.
        if self.caps.r13_14_only {
            self.update_handle_reader(streams);
        }

        // Entity mode (BB): 0 owner stored, 1 paper space, 2 model space.
        common.entity_mode = streams.object_reader.read_2bits();
        if common.entity_mode == 0 {
            common.owner = streams.handle_ref();
        }

        let (reactors, xdictionary) = self.read_reactors_and_dictionary_handle(streams, common.handle)?;
        common.reactors = reactors;
        common.xdictionary = xdictionary;

        // R13-R14: layer handle, then the line type unless it is ByLayer.
        if self.caps.r13_14_only {
            common.layer_handle = streams.handle_ref();
            let is_bylayer_lt = streams.object_reader.read_bit();
            if is_bylayer_lt {
                common.line_type_flags = 0;
            } else {
                common.line_type_flags = 3;
                common.line_type_handle = streams.handle_ref();
            }
        }

        // Pre-R2004: links to the neighbours in the owner's member chain.
        if !self.caps.r2004_plus {
            let no_links = streams.object_reader.read_bit();
            if no_links {
                common.prev_entity = Handle::new(common.handle.value().wrapping_sub(1));
                common.next_entity = Handle::new(common.handle.value().wrapping_add(1));
            } else {
                common.prev_entity = streams.handle_ref();
                common.next_entity = streams.handle_ref();
            }
        }

        let en_color = streams.object_reader.read_en_color();
        common.color = en_color.color;
        common.transparency = en_color.transparency;
        if self.caps.r2004_plus && en_color.has_book_color {
            let _color_book = streams.handle_ref();
        }

        common.line_type_scale = streams.object_reader.read_bit_double();

        if self.caps.r2000_plus {
            common.layer_handle = streams.handle_ref();

            // Line type flags (BB): 0 ByLayer, 1 ByBlock, 2 Continuous, 3 handle.
            common.line_type_flags = streams.object_reader.read_2bits();
            if common.line_type_flags == 3 {
                common.line_type_handle = streams.handle_ref();
            }

            if self.caps.r2007_plus {
                let material_flags = streams.object_reader.read_2bits();
                if material_flags == 3 {
                    let _material = streams.handle_ref();
                }
                let _shadow_flags = streams.object_reader.read_raw_char();
            }

            let plotstyle_flags = streams.object_reader.read_2bits();
            if plotstyle_flags == 3 {
                let _plotstyle = streams.handle_ref();
            }

            if self.caps.r2010_plus {
                let has_full_vs = streams.object_reader.read_bit();
                let has_face_vs = streams.object_reader.read_bit();
                let has_edge_vs = streams.object_reader.read_bit();
                for present in [has_full_vs, has_face_vs, has_edge_vs] {
                    if present {
                        let _visual_style = streams.handle_ref();
                    }
                }
            }
        }

        // Invisibility (BS).
        common.invisible = streams.object_reader.read_bit_short() & 1 != 0;

        if self.caps.r2000_plus {
            common.line_weight = LineWeight::from_dwg_index(streams.object_reader.read_raw_char());
        }

        Ok(common)
    }

    // -----------------------------------------------------------------------
    // Common non-entity data
    // -----------------------------------------------------------------------

    /// Read the header shared by controls and table entries.
    pub fn read_common_non_entity_data(&self, streams: &mut StreamSet<'a>) -> Result<ObjectHeader> {
        let mut header = ObjectHeader::default();

        // R2000-R2007: RL object size in bits ahead of the handle.
        if self.caps.r2000_plus && !self.caps.r2010_plus {
            self.update_handle_reader(streams);
        }

        header.handle = self.read_object_handle(streams);
        header.extended_data = self.read_extended_data(streams)?;

        // R13-R14: RL object size after the handle and EED.
        if self.caps.r13_14_only {
            self.update_handle_reader(streams);
        }

        let num_reactors = self.read_reactor_count(streams, header.handle)?;

        header.xdictionary_missing = self.caps.r2004_plus && streams.object_reader.read_bit();

        if self.caps.r2013_plus {
            let _has_ds_data = streams.object_reader.read_bit();
        }

        // Owner handle (soft pointer).
        header.owner = streams.handle_ref();

        header.reactors.reserve(num_reactors);
        for _ in 0..num_reactors {
            header.reactors.push(streams.handle_ref());
        }

        if !header.xdictionary_missing {
            header.xdictionary = streams.handle_ref();
        }

        Ok(header)
    }

    /// Common non-entity data, entry name and xref-dependence bits.
    pub fn read_table_entry_common(&self, streams: &mut StreamSet<'a>) -> Result<TableEntryCommon> {
        let header = self.read_common_non_entity_data(streams)?;
        let mut common = TableEntryCommon {
            handle: header.handle,
            owner: header.owner,
            ..Default::default()
        };

        common.name = streams.read_text();
        self.read_xref_dependant_bit(streams, &mut common);
        Ok(common)
    }

    /// Read the record's own handle from the object stream and make it the
    /// base for relative handle references.
    fn read_object_handle(&self, streams: &mut StreamSet<'a>) -> Handle {
        let handle = Handle::new(streams.object_reader.read_handle().value);
        streams.current_handle = handle;
        handle
    }

    fn read_reactor_count(&self, streams: &mut StreamSet<'a>, handle: Handle) -> Result<usize> {
        let count = streams.object_reader.read_bit_long();
        if count < 0 || count as usize > MAX_REACTORS {
            return Err(DwgError::InvalidRecord {
                handle,
                reason: format!("reactor count {count} out of range"),
            });
        }
        Ok(count as usize)
    }

    fn read_reactors_and_dictionary_handle(
        &self,
        streams: &mut StreamSet<'a>,
        handle: Handle,
    ) -> Result<(Vec<Handle>, Handle)> {
        let num_reactors = self.read_reactor_count(streams, handle)?;

        let xdict_missing = self.caps.r2004_plus && streams.object_reader.read_bit();

        if self.caps.r2013_plus {
            let _has_ds_data = streams.object_reader.read_bit();
        }

        let mut reactors = Vec::with_capacity(num_reactors);
        for _ in 0..num_reactors {
            reactors.push(streams.handle_ref());
        }

        let xdictionary = if xdict_missing {
            Handle::NULL
        } else {
            streams.handle_ref()
        };

        Ok((reactors, xdictionary))
    }

    // -----------------------------------------------------------------------
    // Extended data
    // -----------------------------------------------------------------------

    /// Read the EED blocks. Each item is returned with its DXF group code
    /// (stored code + 1000).
    fn read_extended_data(&self, streams: &mut StreamSet<'a>) -> Result<Vec<ExtendedData>> {
        let mut blocks = Vec::new();

        loop {
            // BS: size of the next application block, 0 ends the list.
            let size = streams.object_reader.read_bit_short();
            if size <= 0 || !streams.object_reader.is_good() {
                break;
            }

            let app = Handle::new(streams.object_reader.read_handle().value);
            let end = streams.object_reader.position_in_bits() + size as u64 * 8;

            let mut items = Vec::new();
            while streams.object_reader.position_in_bits() < end && streams.object_reader.is_good() {
                match self.read_extended_data_item(streams) {
                    Some(item) => items.push(item),
                    None => break,
                }
            }
            streams.object_reader.set_position_in_bits(end);

            blocks.push(ExtendedData { app, items });
        }

        Ok(blocks)
    }

    /// One EED item, or `None` for a code this reader does not know (the
    /// rest of the block is then skipped).
    fn read_extended_data_item(&self, streams: &mut StreamSet<'a>) -> Option<Variant> {
        let reader = &mut streams.object_reader;
        let code = reader.read_raw_char() as i32;
        let group = code + 1000;

        let item = match code {
            0 => {
                let value = if self.version >= DwgVersion::AC1021 {
                    let length = reader.read_raw_short().max(0) as usize;
                    let bytes = reader.read_bytes(length * 2);
                    self.codec.decode_utf16(&bytes)
                } else {
                    let length = reader.read_raw_char() as usize;
                    let _code_page = reader.read_raw_short();
                    let bytes = reader.read_bytes(length);
                    self.codec.decode(&bytes)
                };
                Variant::string(group, value)
            }
            1 => {
                let brace = if reader.read_raw_char() == 0 { "{" } else { "}" };
                Variant::string(group, brace)
            }
            2 | 5 => {
                let bytes = reader.read_bytes(8);
                let value = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
                Variant::string(group, format!("{value:X}"))
            }
            3 | 4 => {
                let length = reader.read_raw_char() as usize;
                let bytes = reader.read_bytes(length);
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                Variant::string(group, hex)
            }
            10..=13 => Variant::coord(group, reader.read_3raw_double()),
            40..=42 => Variant::double(group, reader.read_raw_double()),
            70 => Variant::integer(group, reader.read_raw_short() as i32),
            71 => Variant::integer(group, reader.read_raw_long()),
            _ => return None,
        };
        Some(item)
    }

    // -----------------------------------------------------------------------
    // Xref bits
    // -----------------------------------------------------------------------

    /// Xref-dependence of a table entry.
    ///
    /// - R2007+: BS xrefindex, 0x100 marks the entry xref dependent.
    /// - Before: B 64-flag, BS xrefindex+1, B xdep.
    fn read_xref_dependant_bit(&self, streams: &mut StreamSet<'a>, common: &mut TableEntryCommon) {
        if self.caps.r2007_plus {
            let xref_index = streams.object_reader.read_bit_short();
            common.xref_dependent = xref_index & 0x100 != 0;
        } else {
            if streams.object_reader.read_bit() {
                common.flags |= 64;
            }
            let _xref_index = streams.object_reader.read_bit_short();
            common.xref_dependent = streams.object_reader.read_bit();
        }
        if common.xref_dependent {
            common.flags |= 16;
        }
    }
}

