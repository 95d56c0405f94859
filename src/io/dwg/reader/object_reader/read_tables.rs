//! Table entry readers.
//!
//! Every entry starts with the common non-entity data, its name and the
//! xref-dependence bits. The handle stream then holds the xref block handle
//! (usually null) ahead of the entry's own references.

use crate::error::{DwgError, Result};
use crate::tables::{
    AppId, BlockFlags, BlockRecord, DimStyle, Layer, LayerFlags, LineType, LineTypeSegment,
    MemberChain, TextGenerationFlags, TextStyle, VPort,
};
use crate::types::{Color, DwgVersion, LineWeight};
use crate::MAX_ITEM_COUNT;

use super::{ObjectReader, StreamSet};

impl<'a> ObjectReader<'a> {
    // -----------------------------------------------------------------------
    // LTYPE
    // -----------------------------------------------------------------------

    pub fn read_line_type(&self, streams: &mut StreamSet<'a>) -> Result<LineType> {
        let mut ltype = LineType {
            common: self.read_table_entry_common(streams)?,
            ..Default::default()
        };

        ltype.description = streams.read_text();
        ltype.pattern_length = streams.object_reader.read_bit_double();
        ltype.alignment = streams.object_reader.read_raw_char();

        let num_dashes = streams.object_reader.read_raw_char() as usize;
        let mut has_text = false;
        for _ in 0..num_dashes {
            let mut segment = LineTypeSegment {
                length: streams.object_reader.read_bit_double(),
                shape_code: streams.object_reader.read_bit_short(),
                ..Default::default()
            };
            segment.offset.x = streams.object_reader.read_raw_double();
            segment.offset.y = streams.object_reader.read_raw_double();
            segment.scale = streams.object_reader.read_bit_double();
            segment.rotation = streams.object_reader.read_bit_double();
            segment.shape_flags = streams.object_reader.read_bit_short();
            has_text |= segment.is_text();
            ltype.segments.push(segment);
        }

        // Strings area: 256 bytes before R2007, 512 bytes (UTF-16) from
        // R2007 and only when a segment carries text. A text segment's
        // shape code is its byte offset into the area.
        let strings_area = if !self.caps.r2007_plus {
            Some(streams.object_reader.read_bytes(256))
        } else if has_text {
            Some(streams.object_reader.read_bytes(512))
        } else {
            None
        };
        if let Some(area) = strings_area {
            for segment in ltype.segments.iter_mut().filter(|s| s.is_text()) {
                segment.text = self.segment_text(&area, segment.shape_code);
            }
        }

        let _xref_block = streams.handle_ref();

        // Shape file (text style) per segment.
        for segment in ltype.segments.iter_mut() {
            segment.style = streams.handle_ref();
        }

        streams.finish()?;
        Ok(ltype)
    }

    /// Null-terminated string at `offset` of a line type strings area.
    fn segment_text(&self, area: &[u8], offset: i16) -> String {
        let Some(tail) = usize::try_from(offset).ok().and_then(|o| area.get(o..)) else {
            return String::new();
        };
        if self.version >= DwgVersion::AC1021 {
            let end = tail
                .chunks_exact(2)
                .position(|pair| pair == [0, 0])
                .map_or(tail.len() & !1, |i| i * 2);
            self.codec.decode_utf16(&tail[..end])
        } else {
            let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
            self.codec.decode(&tail[..end])
        }
    }

    // -----------------------------------------------------------------------
    // LAYER
    // -----------------------------------------------------------------------

    pub fn read_layer(&self, streams: &mut StreamSet<'a>) -> Result<Layer> {
        let mut layer = Layer {
            common: self.read_table_entry_common(streams)?,
            ..Default::default()
        };

        if self.caps.r13_14_only {
            let mut flags = LayerFlags::PLOTTABLE;
            if streams.object_reader.read_bit() {
                flags |= LayerFlags::FROZEN;
            }
            if !streams.object_reader.read_bit() {
                flags |= LayerFlags::OFF;
            }
            if streams.object_reader.read_bit() {
                flags |= LayerFlags::FROZEN_IN_NEW;
            }
            if streams.object_reader.read_bit() {
                flags |= LayerFlags::LOCKED;
            }
            layer.flags = flags;
        }

        // R2000+: one BS with the flags and the line weight index.
        if self.caps.r2000_plus {
            let values = streams.object_reader.read_bit_short();
            layer.flags = LayerFlags::from_bits_truncate(values & 0x1F);
            layer.line_weight = LineWeight::from_dwg_index(((values & 0x3E0) >> 5) as u8);
        }

        layer.color = streams.read_cm_color();

        let _xref_block = streams.handle_ref();
        if self.caps.r2000_plus {
            layer.plot_style = streams.handle_ref();
        }
        if self.caps.r2007_plus {
            layer.material = streams.handle_ref();
        }
        layer.line_type_handle = streams.handle_ref();

        streams.finish()?;
        Ok(layer)
    }

    // -----------------------------------------------------------------------
    // STYLE
    // -----------------------------------------------------------------------

    pub fn read_text_style(&self, streams: &mut StreamSet<'a>) -> Result<TextStyle> {
        let mut style = TextStyle {
            common: self.read_table_entry_common(streams)?,
            ..Default::default()
        };

        style.is_vertical = streams.object_reader.read_bit();
        style.is_shape_file = streams.object_reader.read_bit();
        if style.is_shape_file {
            style.common.flags |= 1;
        }
        if style.is_vertical {
            style.common.flags |= 4;
        }

        style.height = streams.object_reader.read_bit_double();
        style.width_factor = streams.object_reader.read_bit_double();
        style.oblique_angle = streams.object_reader.read_bit_double();
        style.generation = TextGenerationFlags::from_bits_truncate(streams.object_reader.read_raw_char());
        style.last_height = streams.object_reader.read_bit_double();
        style.font_file = streams.read_text();
        style.big_font_file = streams.read_text();

        let _xref_block = streams.handle_ref();

        streams.finish()?;
        Ok(style)
    }

    // -----------------------------------------------------------------------
    // DIMSTYLE
    // -----------------------------------------------------------------------

    pub fn read_dim_style(&self, streams: &mut StreamSet<'a>) -> Result<DimStyle> {
        let mut dim = DimStyle {
            common: self.read_table_entry_common(streams)?,
            ..Default::default()
        };

        if self.caps.r13_14_only {
            self.read_dim_style_r13(streams, &mut dim);
        } else {
            self.read_dim_style_r2000(streams, &mut dim);
        }

        let _xref_block = streams.handle_ref();

        // 340: DIMTXSTY
        dim.dimtxsty = streams.handle_ref();

        if self.caps.r2000_plus {
            dim.dimldrblk = streams.handle_ref();
            dim.dimblk = streams.handle_ref();
            dim.dimblk1 = streams.handle_ref();
            dim.dimblk2 = streams.handle_ref();
        }

        if self.caps.r2007_plus {
            let _dimltype = streams.handle_ref();
            let _dimltex1 = streams.handle_ref();
            let _dimltex2 = streams.handle_ref();
        }

        streams.finish()?;
        Ok(dim)
    }

    fn read_dim_style_r13(&self, streams: &mut StreamSet<'a>, dim: &mut DimStyle) {
        let r = &mut streams.object_reader;
        dim.dimtol = r.read_bit();
        dim.dimlim = r.read_bit();
        dim.dimtih = r.read_bit();
        dim.dimtoh = r.read_bit();
        dim.dimse1 = r.read_bit();
        dim.dimse2 = r.read_bit();
        dim.dimalt = r.read_bit();
        dim.dimtofl = r.read_bit();
        dim.dimsah = r.read_bit();
        dim.dimtix = r.read_bit();
        dim.dimsoxd = r.read_bit();
        dim.dimaltd = r.read_raw_char() as i16;
        dim.dimzin = r.read_raw_char() as i16;
        dim.dimsd1 = r.read_bit();
        dim.dimsd2 = r.read_bit();
        let _dimtolj = r.read_raw_char();
        dim.dimjust = r.read_raw_char() as i16;
        let _dimfit = r.read_raw_char();
        dim.dimupt = r.read_bit();
        let _dimtzin = r.read_raw_char();
        let _dimaltz = r.read_raw_char();
        let _dimalttz = r.read_raw_char();
        dim.dimtad = r.read_raw_char() as i16;
        dim.dimlunit = r.read_bit_short();
        dim.dimaunit = r.read_bit_short();
        dim.dimdec = r.read_bit_short();
        dim.dimtdec = r.read_bit_short();
        let _dimaltu = r.read_bit_short();
        let _dimalttd = r.read_bit_short();
        dim.dimscale = r.read_bit_double();
        dim.dimasz = r.read_bit_double();
        dim.dimexo = r.read_bit_double();
        dim.dimdli = r.read_bit_double();
        dim.dimexe = r.read_bit_double();
        dim.dimrnd = r.read_bit_double();
        dim.dimdle = r.read_bit_double();
        dim.dimtp = r.read_bit_double();
        dim.dimtm = r.read_bit_double();
        dim.dimtxt = r.read_bit_double();
        dim.dimcen = r.read_bit_double();
        dim.dimtsz = r.read_bit_double();
        dim.dimaltf = r.read_bit_double();
        dim.dimlfac = r.read_bit_double();
        dim.dimtvp = r.read_bit_double();
        dim.dimtfac = r.read_bit_double();
        dim.dimgap = r.read_bit_double();

        dim.dimpost = streams.read_text();
        dim.dimapost = streams.read_text();
        let _dimblk_name = streams.read_text();
        let _dimblk1_name = streams.read_text();
        let _dimblk2_name = streams.read_text();

        let r = &mut streams.object_reader;
        dim.dimclrd = Color::from_index(r.read_bit_short());
        dim.dimclre = Color::from_index(r.read_bit_short());
        dim.dimclrt = Color::from_index(r.read_bit_short());
    }

    fn read_dim_style_r2000(&self, streams: &mut StreamSet<'a>, dim: &mut DimStyle) {
        dim.dimpost = streams.read_text();
        dim.dimapost = streams.read_text();

        let r = &mut streams.object_reader;
        dim.dimscale = r.read_bit_double();
        dim.dimasz = r.read_bit_double();
        dim.dimexo = r.read_bit_double();
        dim.dimdli = r.read_bit_double();
        dim.dimexe = r.read_bit_double();
        dim.dimrnd = r.read_bit_double();
        dim.dimdle = r.read_bit_double();
        dim.dimtp = r.read_bit_double();
        dim.dimtm = r.read_bit_double();

        if self.caps.r2007_plus {
            let _dimfxl = streams.object_reader.read_bit_double();
            let _dimjogang = streams.object_reader.read_bit_double();
            let _dimtfill = streams.object_reader.read_bit_short();
            let _dimtfillclr = streams.read_cm_color();
        }

        let r = &mut streams.object_reader;
        dim.dimtol = r.read_bit();
        dim.dimlim = r.read_bit();
        dim.dimtih = r.read_bit();
        dim.dimtoh = r.read_bit();
        dim.dimse1 = r.read_bit();
        dim.dimse2 = r.read_bit();
        dim.dimtad = r.read_bit_short();
        dim.dimzin = r.read_bit_short();
        let _dimazin = r.read_bit_short();

        if self.caps.r2007_plus {
            let _dimarcsym = r.read_bit_short();
        }

        dim.dimtxt = r.read_bit_double();
        dim.dimcen = r.read_bit_double();
        dim.dimtsz = r.read_bit_double();
        dim.dimaltf = r.read_bit_double();
        dim.dimlfac = r.read_bit_double();
        dim.dimtvp = r.read_bit_double();
        dim.dimtfac = r.read_bit_double();
        dim.dimgap = r.read_bit_double();
        let _dimaltrnd = r.read_bit_double();
        dim.dimalt = r.read_bit();
        dim.dimaltd = r.read_bit_short();
        dim.dimtofl = r.read_bit();
        dim.dimsah = r.read_bit();
        dim.dimtix = r.read_bit();
        dim.dimsoxd = r.read_bit();

        dim.dimclrd = streams.read_cm_color();
        dim.dimclre = streams.read_cm_color();
        dim.dimclrt = streams.read_cm_color();

        let r = &mut streams.object_reader;
        let _dimadec = r.read_bit_short();
        dim.dimdec = r.read_bit_short();
        dim.dimtdec = r.read_bit_short();
        let _dimaltu = r.read_bit_short();
        let _dimalttd = r.read_bit_short();
        dim.dimaunit = r.read_bit_short();
        let _dimfrac = r.read_bit_short();
        dim.dimlunit = r.read_bit_short();
        let _dimdsep = r.read_bit_short();
        let _dimtmove = r.read_bit_short();
        dim.dimjust = r.read_bit_short();
        dim.dimsd1 = r.read_bit();
        dim.dimsd2 = r.read_bit();
        let _dimtolj = r.read_bit_short();
        let _dimtzin = r.read_bit_short();
        let _dimaltz = r.read_bit_short();
        let _dimalttz = r.read_bit_short();
        dim.dimupt = r.read_bit();
        let _dimatfit = r.read_bit_short();

        if self.caps.r2007_plus {
            let _dimfxlon = streams.object_reader.read_bit();
        }

        if self.caps.r2010_plus {
            let _dimtxtdirection = streams.object_reader.read_bit();
            let _dimaltmzf = streams.object_reader.read_bit_double();
            let _dimaltmzs = streams.read_text();
            let _dimmzf = streams.object_reader.read_bit_double();
            let _dimmzs = streams.read_text();
        }

        let _dimlwd = streams.object_reader.read_bit_short();
        let _dimlwe = streams.object_reader.read_bit_short();
    }

    // -----------------------------------------------------------------------
    // VPORT
    // -----------------------------------------------------------------------

    pub fn read_vport(&self, streams: &mut StreamSet<'a>) -> Result<VPort> {
        let mut vport = VPort {
            common: self.read_table_entry_common(streams)?,
            ..Default::default()
        };

        let r = &mut streams.object_reader;
        vport.view_height = r.read_bit_double();
        vport.aspect_ratio = r.read_bit_double();
        vport.view_center = r.read_2raw_double();
        vport.view_target = r.read_3bit_double();
        vport.view_direction = r.read_3bit_double();
        vport.twist_angle = r.read_bit_double();
        vport.lens_length = r.read_bit_double();
        vport.front_clip = r.read_bit_double();
        vport.back_clip = r.read_bit_double();

        // View mode: UCSFOLLOW, perspective, front clip, back clip.
        let mut view_mode = 0u8;
        for bit in 0..4 {
            if r.read_bit() {
                view_mode |= 1 << bit;
            }
        }
        vport.view_mode = view_mode;

        if self.caps.r2000_plus {
            vport.render_mode = r.read_raw_char();
        }

        if self.caps.r2007_plus {
            let _use_default_lights = streams.object_reader.read_bit();
            let _default_lighting_type = streams.object_reader.read_raw_char();
            let _brightness = streams.object_reader.read_bit_double();
            let _contrast = streams.object_reader.read_bit_double();
            let _ambient_color = streams.read_cm_color();
        }

        let r = &mut streams.object_reader;
        vport.lower_left = r.read_2raw_double();
        vport.upper_right = r.read_2raw_double();
        vport.ucs_follow = r.read_bit();
        vport.circle_zoom = r.read_bit_short();
        vport.fast_zoom = r.read_bit();
        vport.ucs_icon = r.read_2bits();
        vport.grid_on = r.read_bit();
        vport.grid_spacing = r.read_2raw_double();
        vport.snap_on = r.read_bit();
        vport.snap_style = r.read_bit();
        vport.snap_isopair = r.read_bit_short();
        vport.snap_rotation = r.read_bit_double();
        vport.snap_base = r.read_2raw_double();
        vport.snap_spacing = r.read_2raw_double();

        if self.caps.r2000_plus {
            let _unknown = r.read_bit();
            vport.ucs_per_viewport = r.read_bit();
            vport.ucs_origin = r.read_3bit_double();
            vport.ucs_x_axis = r.read_3bit_double();
            vport.ucs_y_axis = r.read_3bit_double();
            vport.ucs_elevation = r.read_bit_double();
            vport.ucs_ortho_type = r.read_bit_short();
        }

        if self.caps.r2007_plus {
            let _grid_flags = r.read_bit_short();
            let _grid_major = r.read_bit_short();
        }

        let _xref_block = streams.handle_ref();

        if self.caps.r2007_plus {
            let _background = streams.handle_ref();
            let _visual_style = streams.handle_ref();
            let _sun = streams.handle_ref();
        }

        if self.caps.r2000_plus {
            vport.named_ucs = streams.handle_ref();
            vport.base_ucs = streams.handle_ref();
        }

        streams.finish()?;
        Ok(vport)
    }

    // -----------------------------------------------------------------------
    // APPID
    // -----------------------------------------------------------------------

    pub fn read_app_id(&self, streams: &mut StreamSet<'a>) -> Result<AppId> {
        let app = AppId {
            common: self.read_table_entry_common(streams)?,
        };

        let _unknown = streams.object_reader.read_raw_char();
        let _xref_block = streams.handle_ref();

        streams.finish()?;
        Ok(app)
    }

    // -----------------------------------------------------------------------
    // BLOCK_HEADER
    // -----------------------------------------------------------------------

    pub fn read_block_record(&self, streams: &mut StreamSet<'a>) -> Result<BlockRecord> {
        let mut record = BlockRecord {
            common: self.read_table_entry_common(streams)?,
            explodable: true,
            ..Default::default()
        };

        let mut flags = BlockFlags::empty();
        let r = &mut streams.object_reader;
        if r.read_bit() {
            flags |= BlockFlags::ANONYMOUS;
        }
        if r.read_bit() {
            flags |= BlockFlags::HAS_ATTRIBUTES;
        }
        let is_xref = r.read_bit();
        let is_xref_overlay = r.read_bit();
        if is_xref {
            flags |= BlockFlags::XREF;
        }
        if is_xref_overlay {
            flags |= BlockFlags::XREF_OVERLAY;
        }
        if record.common.xref_dependent {
            flags |= BlockFlags::EXTERNALLY_DEPENDENT;
        }

        if self.caps.r2000_plus {
            let _loaded_xref = r.read_bit();
        }

        let has_members = !is_xref && !is_xref_overlay;

        // R2004+: owned object count.
        let owned_count = if self.caps.r2004_plus && has_members {
            let count = r.read_bit_long();
            if count < 0 || count as usize > MAX_ITEM_COUNT {
                return Err(DwgError::InvalidRecord {
                    handle: record.common.handle,
                    reason: format!("block record owns {count} objects"),
                });
            }
            count as usize
        } else {
            0
        };

        record.base_point = r.read_3bit_double();
        record.xref_path = streams.read_text();

        let mut insert_count = 0usize;
        if self.caps.r2000_plus {
            // Insert count: non-zero RCs up to a terminating 0.
            loop {
                let rc = streams.object_reader.read_raw_char();
                if rc == 0 || !streams.object_reader.is_good() {
                    break;
                }
                insert_count += 1;
            }

            record.description = streams.read_text();

            let preview_size = streams.object_reader.read_bit_long();
            if preview_size > 0 {
                streams.object_reader.advance(preview_size as usize);
            }
        }

        if self.caps.r2007_plus {
            record.units = streams.object_reader.read_bit_short();
            record.explodable = streams.object_reader.read_bit();
            record.scale_uniformly = streams.object_reader.read_raw_char() != 0;
        }

        record.flags = flags;

        let _xref_block = streams.handle_ref();
        record.block_entity = streams.handle_ref();

        if has_members {
            record.members = if self.caps.r2004_plus {
                let mut owned = Vec::with_capacity(owned_count);
                for _ in 0..owned_count {
                    owned.push(streams.handle_ref());
                }
                MemberChain::Ordered(owned)
            } else {
                let first = streams.handle_ref();
                let last = streams.handle_ref();
                MemberChain::Linked { first, last }
            };
        }

        record.end_block = streams.handle_ref();

        if self.caps.r2000_plus {
            for _ in 0..insert_count {
                let _insert = streams.handle_ref();
            }
            record.layout = streams.handle_ref();
        }

        streams.finish()?;
        Ok(record)
    }
}
