//! Entity readers.
//!
//! Each reader decodes the common entity data followed by the kind-specific
//! fields and returns the entity with its handles as stored. Names are
//! resolved and the streams checked by the caller.

use crate::entities::{
    Arc, Block, BlockEnd, BoundaryEdge, BoundaryPath, Circle, Dimension, DimensionKind, Ellipse,
    EntityType, Face3D, GradientColor, Hatch, HatchGradient, InvisibleEdgeFlags, Insert, Leader,
    Line, LwPolyline, LwVertex, MText, PatternLine, Point, Polyline, PolylineKind, Ray, Solid,
    Spline, Text, Vertex, VertexKind, Viewport, XLine,
};
use crate::error::{DwgError, Result};
use crate::io::dwg::bit_buffer::BitBuffer;
use crate::io::dwg::object_type::DwgObjectType;
use crate::tables::MemberChain;
use crate::types::{DwgVersion, Handle, Vector2, Vector3};
use crate::MAX_ITEM_COUNT;

use super::{ObjectReader, StreamSet};

/// Validate a stored list count.
fn checked_count(handle: Handle, count: i64, what: &str) -> Result<usize> {
    if count < 0 || count as u64 > MAX_ITEM_COUNT as u64 {
        return Err(DwgError::InvalidRecord {
            handle,
            reason: format!("{what} count {count} out of range"),
        });
    }
    Ok(count as usize)
}

impl<'a> ObjectReader<'a> {
    // -----------------------------------------------------------------------
    // TEXT
    // -----------------------------------------------------------------------

    pub fn read_text_entity(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut text = Text {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };

        if self.caps.r13_14_only {
            let r = &mut streams.object_reader;
            let elevation = r.read_bit_double();
            text.insert_point = r.read_2raw_double().with_z(elevation);
            text.alignment_point = r.read_2raw_double().with_z(elevation);
            text.normal = r.read_bit_extrusion();
            text.thickness = r.read_bit_thickness();
            text.oblique_angle = r.read_bit_double();
            text.rotation = r.read_bit_double();
            text.height = r.read_bit_double();
            text.width_factor = r.read_bit_double();
            text.value = streams.read_text();
            text.generation = streams.object_reader.read_bit_short();
            text.horizontal_alignment = streams.object_reader.read_bit_short();
            text.vertical_alignment = streams.object_reader.read_bit_short();
        } else {
            // Data flags (RC): a set bit means the field is absent.
            let r = &mut streams.object_reader;
            let data_flags = r.read_raw_char();

            let elevation = if data_flags & 0x01 == 0 { r.read_raw_double() } else { 0.0 };
            let insert = r.read_2raw_double();
            text.insert_point = insert.with_z(elevation);

            // Alignment point (2DD) defaults to the insertion point.
            let alignment = if data_flags & 0x02 == 0 {
                r.read_2bit_double_with_default(insert)
            } else {
                insert
            };
            text.alignment_point = alignment.with_z(elevation);

            text.normal = r.read_bit_extrusion();
            text.thickness = r.read_bit_thickness();
            if data_flags & 0x04 == 0 {
                text.oblique_angle = r.read_raw_double();
            }
            if data_flags & 0x08 == 0 {
                text.rotation = r.read_raw_double();
            }
            text.height = r.read_raw_double();
            if data_flags & 0x10 == 0 {
                text.width_factor = r.read_raw_double();
            }

            text.value = streams.read_text();

            let r = &mut streams.object_reader;
            if data_flags & 0x20 == 0 {
                text.generation = r.read_bit_short();
            }
            if data_flags & 0x40 == 0 {
                text.horizontal_alignment = r.read_bit_short();
            }
            if data_flags & 0x80 == 0 {
                text.vertical_alignment = r.read_bit_short();
            }
        }

        text.style_handle = streams.handle_ref();
        Ok(EntityType::Text(text))
    }

    // -----------------------------------------------------------------------
    // BLOCK / ENDBLK
    // -----------------------------------------------------------------------

    pub fn read_block(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let name = streams.read_text();
        Ok(EntityType::Block(Block {
            common,
            name,
            ..Default::default()
        }))
    }

    pub fn read_end_block(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        Ok(EntityType::BlockEnd(BlockEnd { common }))
    }

    // -----------------------------------------------------------------------
    // INSERT / MINSERT
    // -----------------------------------------------------------------------

    pub fn read_insert(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_insert_common_data(streams, false).map(EntityType::Insert)
    }

    pub fn read_minsert(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_insert_common_data(streams, true).map(EntityType::Insert)
    }

    fn read_insert_common_data(&self, streams: &mut StreamSet<'a>, multiple: bool) -> Result<Insert> {
        let mut insert = Insert {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let handle = insert.common.handle;

        let r = &mut streams.object_reader;
        insert.insert_point = r.read_3bit_double();

        if self.caps.r2000_plus {
            // Data flags (BB) select how much of the scale is stored.
            match r.read_2bits() {
                3 => {}
                1 => {
                    insert.x_scale = 1.0;
                    insert.y_scale = r.read_bit_double_with_default(1.0);
                    insert.z_scale = r.read_bit_double_with_default(1.0);
                }
                2 => {
                    let scale = r.read_raw_double();
                    insert.x_scale = scale;
                    insert.y_scale = scale;
                    insert.z_scale = scale;
                }
                _ => {
                    let x = r.read_raw_double();
                    insert.x_scale = x;
                    insert.y_scale = r.read_bit_double_with_default(x);
                    insert.z_scale = r.read_bit_double_with_default(x);
                }
            }
        } else {
            insert.x_scale = r.read_bit_double();
            insert.y_scale = r.read_bit_double();
            insert.z_scale = r.read_bit_double();
        }

        insert.rotation = r.read_bit_double();
        insert.normal = r.read_3bit_double();
        insert.has_attributes = r.read_bit();

        let owned_count = if insert.has_attributes {
            self.read_owned_count(streams, handle)?
        } else {
            0
        };

        if multiple {
            let r = &mut streams.object_reader;
            insert.column_count = r.read_bit_short() as u16;
            insert.row_count = r.read_bit_short() as u16;
            insert.column_spacing = r.read_bit_double();
            insert.row_spacing = r.read_bit_double();
        }

        insert.block_record = streams.handle_ref();

        if insert.has_attributes {
            insert.attributes = self.read_owned_members(streams, owned_count);
            insert.seqend = streams.handle_ref();
        }

        Ok(insert)
    }

    /// R2004+: BL number of owned members. Zero before R2004.
    fn read_owned_count(&self, streams: &mut StreamSet<'a>, handle: Handle) -> Result<usize> {
        if !self.caps.r2004_plus {
            return Ok(0);
        }
        let count = streams.object_reader.read_bit_long();
        checked_count(handle, count as i64, "owned object")
    }

    /// Owned member handles: first and last before R2004, the full list
    /// after.
    fn read_owned_members(&self, streams: &mut StreamSet<'a>, count: usize) -> MemberChain {
        if self.caps.r2004_plus {
            MemberChain::Ordered((0..count).map(|_| streams.handle_ref()).collect())
        } else {
            let first = streams.handle_ref();
            let last = streams.handle_ref();
            MemberChain::Linked { first, last }
        }
    }

    // -----------------------------------------------------------------------
    // VERTEX
    // -----------------------------------------------------------------------

    /// Decode any of the five vertex records. A 2D vertex leaves Z at zero;
    /// the owning polyline's elevation applies.
    pub fn read_vertex(&self, streams: &mut StreamSet<'a>) -> Result<Vertex> {
        let kind = match DwgObjectType::from_raw(streams.type_code) {
            Some(DwgObjectType::Vertex2D) => VertexKind::Vertex2D,
            Some(DwgObjectType::Vertex3D) => VertexKind::Vertex3D,
            Some(DwgObjectType::VertexMesh) => VertexKind::MeshVertex,
            Some(DwgObjectType::VertexPface) => VertexKind::PolyfaceVertex,
            Some(DwgObjectType::VertexPfaceFace) => VertexKind::PolyfaceFace,
            _ => {
                return Err(DwgError::TypeMismatch {
                    handle: streams.record_handle(),
                    expected: DwgObjectType::Vertex2D.code(),
                    found: streams.type_code,
                })
            }
        };

        let mut vertex = Vertex {
            common: self.read_common_entity_data(streams)?,
            kind,
            ..Default::default()
        };

        let r = &mut streams.object_reader;
        match kind {
            VertexKind::Vertex2D => {
                vertex.flags = r.read_raw_char();
                let point = r.read_3bit_double();
                vertex.location = Vector3::new(point.x, point.y, 0.0);

                // A negative start width stands for both widths.
                let start_width = r.read_bit_double();
                if start_width < 0.0 {
                    vertex.start_width = start_width.abs();
                    vertex.end_width = start_width.abs();
                } else {
                    vertex.start_width = start_width;
                    vertex.end_width = r.read_bit_double();
                }
                vertex.bulge = r.read_bit_double();
                if self.caps.r2010_plus {
                    vertex.id = r.read_bit_long();
                }
                vertex.tangent_direction = r.read_bit_double();
            }
            VertexKind::PolyfaceFace => {
                vertex.flags = 128;
                for index in vertex.indices.iter_mut() {
                    *index = r.read_bit_short();
                }
            }
            _ => {
                vertex.flags = r.read_raw_char();
                vertex.location = r.read_3bit_double();
            }
        }

        Ok(vertex)
    }

    // -----------------------------------------------------------------------
    // POLYLINE (2D, 3D, PFACE, MESH)
    // -----------------------------------------------------------------------

    pub fn read_polyline_2d(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut pline = Polyline {
            common: self.read_common_entity_data(streams)?,
            ..Polyline::new(PolylineKind::Polyline2D)
        };

        let r = &mut streams.object_reader;
        pline.flags = r.read_bit_short();
        pline.curve_type = r.read_bit_short();
        pline.start_width = r.read_bit_double();
        pline.end_width = r.read_bit_double();
        pline.thickness = r.read_bit_thickness();
        pline.elevation = r.read_bit_double();
        pline.normal = r.read_bit_extrusion();

        self.read_polyline_members(streams, &mut pline)?;
        Ok(EntityType::Polyline(pline))
    }

    pub fn read_polyline_3d(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut pline = Polyline {
            common: self.read_common_entity_data(streams)?,
            ..Polyline::new(PolylineKind::Polyline3D)
        };

        let r = &mut streams.object_reader;
        let spline_flags = r.read_raw_char();
        let closed_flags = r.read_raw_char();
        pline.curve_type = spline_flags as i16;
        pline.flags = (closed_flags & 1) as i16 | 8;

        self.read_polyline_members(streams, &mut pline)?;
        Ok(EntityType::Polyline(pline))
    }

    pub fn read_polyface_mesh(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut pline = Polyline {
            common: self.read_common_entity_data(streams)?,
            ..Polyline::new(PolylineKind::PolyfaceMesh)
        };

        pline.flags = 64;
        pline.m_count = streams.object_reader.read_bit_short();
        pline.n_count = streams.object_reader.read_bit_short();

        self.read_polyline_members(streams, &mut pline)?;
        Ok(EntityType::Polyline(pline))
    }

    pub fn read_polygon_mesh(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut pline = Polyline {
            common: self.read_common_entity_data(streams)?,
            ..Polyline::new(PolylineKind::PolygonMesh)
        };

        let r = &mut streams.object_reader;
        pline.flags = r.read_bit_short() | 16;
        pline.curve_type = r.read_bit_short();
        pline.m_count = r.read_bit_short();
        pline.n_count = r.read_bit_short();
        pline.m_density = r.read_bit_short();
        pline.n_density = r.read_bit_short();

        self.read_polyline_members(streams, &mut pline)?;
        Ok(EntityType::Polyline(pline))
    }

    /// Owned vertex chain and SEQEND of any polyline kind.
    fn read_polyline_members(&self, streams: &mut StreamSet<'a>, pline: &mut Polyline) -> Result<()> {
        let count = self.read_owned_count(streams, pline.common.handle)?;
        pline.members = self.read_owned_members(streams, count);
        pline.seqend = streams.handle_ref();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // ARC / CIRCLE / LINE / POINT
    // -----------------------------------------------------------------------

    pub fn read_arc(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;
        Ok(EntityType::Arc(Arc {
            common,
            center: r.read_3bit_double(),
            radius: r.read_bit_double(),
            thickness: r.read_bit_thickness(),
            normal: r.read_bit_extrusion(),
            start_angle: r.read_bit_double(),
            end_angle: r.read_bit_double(),
        }))
    }

    pub fn read_circle(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;
        Ok(EntityType::Circle(Circle {
            common,
            center: r.read_3bit_double(),
            radius: r.read_bit_double(),
            thickness: r.read_bit_thickness(),
            normal: r.read_bit_extrusion(),
        }))
    }

    pub fn read_line(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;

        let (start, end) = if self.caps.r13_14_only {
            (r.read_3bit_double(), r.read_3bit_double())
        } else {
            // R2000+: Z omitted when both are zero, end point as DD.
            let z_are_zero = r.read_bit();
            let x1 = r.read_raw_double();
            let x2 = r.read_bit_double_with_default(x1);
            let y1 = r.read_raw_double();
            let y2 = r.read_bit_double_with_default(y1);
            let (z1, z2) = if z_are_zero {
                (0.0, 0.0)
            } else {
                let z1 = r.read_raw_double();
                (z1, r.read_bit_double_with_default(z1))
            };
            (Vector3::new(x1, y1, z1), Vector3::new(x2, y2, z2))
        };

        Ok(EntityType::Line(Line {
            common,
            start,
            end,
            thickness: r.read_bit_thickness(),
            normal: r.read_bit_extrusion(),
        }))
    }

    pub fn read_point(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;
        Ok(EntityType::Point(Point {
            common,
            location: r.read_3bit_double(),
            thickness: r.read_bit_thickness(),
            normal: r.read_bit_extrusion(),
            x_axis_angle: r.read_bit_double(),
        }))
    }

    // -----------------------------------------------------------------------
    // 3DFACE / SOLID / TRACE
    // -----------------------------------------------------------------------

    pub fn read_3d_face(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut face = Face3D {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let r = &mut streams.object_reader;

        let invisible = if self.caps.r2000_plus {
            let has_no_flags = r.read_bit();
            let z_is_zero = r.read_bit();

            let x = r.read_raw_double();
            let y = r.read_raw_double();
            let z = if z_is_zero { 0.0 } else { r.read_raw_double() };
            face.first_corner = Vector3::new(x, y, z);
            face.second_corner = r.read_3bit_double_with_default(face.first_corner);
            face.third_corner = r.read_3bit_double_with_default(face.second_corner);
            face.fourth_corner = r.read_3bit_double_with_default(face.third_corner);

            if has_no_flags {
                0
            } else {
                r.read_bit_short()
            }
        } else {
            face.first_corner = r.read_3bit_double();
            face.second_corner = r.read_3bit_double();
            face.third_corner = r.read_3bit_double();
            face.fourth_corner = r.read_3bit_double();
            r.read_bit_short()
        };
        face.invisible_edges = InvisibleEdgeFlags::from_bits_truncate(invisible as u16);

        Ok(EntityType::Face3D(face))
    }

    pub fn read_solid(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_solid_common_data(streams).map(EntityType::Solid)
    }

    pub fn read_trace(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_solid_common_data(streams).map(EntityType::Trace)
    }

    fn read_solid_common_data(&self, streams: &mut StreamSet<'a>) -> Result<Solid> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;

        let thickness = r.read_bit_thickness();
        let elevation = r.read_bit_double();
        let first_corner = r.read_2raw_double().with_z(elevation);
        let second_corner = r.read_2raw_double().with_z(elevation);
        let third_corner = r.read_2raw_double().with_z(elevation);
        let fourth_corner = r.read_2raw_double().with_z(elevation);

        Ok(Solid {
            common,
            first_corner,
            second_corner,
            third_corner,
            fourth_corner,
            thickness,
            normal: r.read_bit_extrusion(),
        })
    }

    // -----------------------------------------------------------------------
    // DIMENSIONS
    // -----------------------------------------------------------------------

    pub fn read_dim_ordinate(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| {
            let definition_point = r.read_3bit_double();
            let feature_location = r.read_3bit_double();
            let leader_endpoint = r.read_3bit_double();
            let flags2 = r.read_raw_char();
            DimensionKind::Ordinate {
                definition_point,
                feature_location,
                leader_endpoint,
                is_x_type: flags2 & 1 != 0,
            }
        })
    }

    pub fn read_dim_linear(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| DimensionKind::Linear {
            first_point: r.read_3bit_double(),
            second_point: r.read_3bit_double(),
            definition_point: r.read_3bit_double(),
            ext_line_rotation: r.read_bit_double(),
            rotation: r.read_bit_double(),
        })
    }

    pub fn read_dim_aligned(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| DimensionKind::Aligned {
            first_point: r.read_3bit_double(),
            second_point: r.read_3bit_double(),
            definition_point: r.read_3bit_double(),
            ext_line_rotation: r.read_bit_double(),
        })
    }

    pub fn read_dim_angular_3pt(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| DimensionKind::Angular3Pt {
            definition_point: r.read_3bit_double(),
            first_point: r.read_3bit_double(),
            second_point: r.read_3bit_double(),
            angle_vertex: r.read_3bit_double(),
        })
    }

    pub fn read_dim_angular_2ln(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| DimensionKind::Angular2Ln {
            arc_point: r.read_2raw_double(),
            first_point: r.read_3bit_double(),
            second_point: r.read_3bit_double(),
            angle_vertex: r.read_3bit_double(),
            definition_point: r.read_3bit_double(),
        })
    }

    pub fn read_dim_radius(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| DimensionKind::Radius {
            definition_point: r.read_3bit_double(),
            chord_point: r.read_3bit_double(),
            leader_length: r.read_bit_double(),
        })
    }

    pub fn read_dim_diameter(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        self.read_dimension(streams, |r| DimensionKind::Diameter {
            definition_point: r.read_3bit_double(),
            chord_point: r.read_3bit_double(),
            leader_length: r.read_bit_double(),
        })
    }

    /// Common dimension data, the kind-specific points read by `read_kind`,
    /// then the dimstyle and block handles.
    fn read_dimension<F>(&self, streams: &mut StreamSet<'a>, read_kind: F) -> Result<EntityType>
    where
        F: FnOnce(&mut BitBuffer<'a>) -> DimensionKind,
    {
        let common = self.read_common_entity_data(streams)?;
        let mut dim = Dimension::new(DimensionKind::Radius {
            definition_point: Vector3::ZERO,
            chord_point: Vector3::ZERO,
            leader_length: 0.0,
        });
        dim.common = common;

        let r = &mut streams.object_reader;
        if self.caps.r2010_plus {
            dim.version = r.read_raw_char();
        }
        dim.normal = r.read_3bit_double();
        dim.text_midpoint = r.read_2raw_double();
        dim.elevation = r.read_bit_double();
        dim.flags = r.read_raw_char();

        dim.user_text = streams.read_text();

        let r = &mut streams.object_reader;
        dim.text_rotation = r.read_bit_double();
        dim.horizontal_direction = r.read_bit_double();
        dim.insertion_scale = r.read_3bit_double();
        dim.insertion_rotation = r.read_bit_double();

        if self.caps.r2000_plus {
            dim.attachment = r.read_bit_short();
            dim.line_spacing_style = r.read_bit_short();
            dim.line_spacing_factor = r.read_bit_double();
            dim.actual_measurement = r.read_bit_double();
        }
        if self.caps.r2007_plus {
            let _unknown = r.read_bit();
            dim.flip_arrow1 = r.read_bit();
            dim.flip_arrow2 = r.read_bit();
        }
        dim.clone_insertion = r.read_2raw_double();

        dim.kind = read_kind(r);

        dim.dimstyle_handle = streams.handle_ref();
        dim.block_handle = streams.handle_ref();

        Ok(EntityType::Dimension(dim))
    }

    // -----------------------------------------------------------------------
    // VIEWPORT
    // -----------------------------------------------------------------------

    pub fn read_viewport(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut vp = Viewport {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let handle = vp.common.handle;

        let r = &mut streams.object_reader;
        vp.center = r.read_3bit_double();
        vp.width = r.read_bit_double();
        vp.height = r.read_bit_double();

        if !self.caps.r2000_plus {
            let _viewport_header = streams.handle_ref();
            return Ok(EntityType::Viewport(vp));
        }

        vp.view_target = r.read_3bit_double();
        vp.view_direction = r.read_3bit_double();
        vp.twist_angle = r.read_bit_double();
        vp.view_height = r.read_bit_double();
        vp.lens_length = r.read_bit_double();
        vp.front_clip = r.read_bit_double();
        vp.back_clip = r.read_bit_double();
        vp.snap_angle = r.read_bit_double();
        vp.view_center = r.read_2raw_double();
        vp.snap_base = r.read_2raw_double();
        vp.snap_spacing = r.read_2raw_double();
        vp.grid_spacing = r.read_2raw_double();
        vp.circle_zoom = r.read_bit_short();

        if self.caps.r2007_plus {
            vp.grid_major = r.read_bit_short();
        }

        let frozen_count = checked_count(handle, r.read_bit_long() as i64, "frozen layer")?;
        vp.status_flags = streams.object_reader.read_bit_long();
        vp.style_sheet = streams.read_text();

        let r = &mut streams.object_reader;
        vp.render_mode = r.read_raw_char();
        vp.ucs_at_origin = r.read_bit();
        vp.ucs_per_viewport = r.read_bit();
        vp.ucs_origin = r.read_3bit_double();
        vp.ucs_x_axis = r.read_3bit_double();
        vp.ucs_y_axis = r.read_3bit_double();
        vp.elevation = r.read_bit_double();
        vp.ortho_type = r.read_bit_short();

        if self.caps.r2004_plus {
            vp.shade_plot_mode = r.read_bit_short();
        }

        if self.caps.r2007_plus {
            vp.default_lighting = r.read_bit();
            vp.default_lighting_type = r.read_raw_char();
            vp.brightness = r.read_bit_double();
            vp.contrast = r.read_bit_double();
            vp.ambient_color = streams.read_cm_color();
        }

        vp.frozen_layers = (0..frozen_count).map(|_| streams.handle_ref()).collect();
        vp.clip_boundary = streams.handle_ref();

        if self.version == DwgVersion::AC1015 {
            let _viewport_header = streams.handle_ref();
        }

        vp.named_ucs = streams.handle_ref();
        vp.base_ucs = streams.handle_ref();

        if self.caps.r2007_plus {
            let _background = streams.handle_ref();
            let _visual_style = streams.handle_ref();
            let _shade_plot = streams.handle_ref();
            let _sun = streams.handle_ref();
        }

        Ok(EntityType::Viewport(vp))
    }

    // -----------------------------------------------------------------------
    // ELLIPSE / SPLINE / RAY / XLINE
    // -----------------------------------------------------------------------

    pub fn read_ellipse(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;
        Ok(EntityType::Ellipse(Ellipse {
            common,
            center: r.read_3bit_double(),
            major_axis: r.read_3bit_double(),
            normal: r.read_3bit_double(),
            ratio: r.read_bit_double(),
            start_parameter: r.read_bit_double(),
            end_parameter: r.read_bit_double(),
        }))
    }

    pub fn read_spline(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut spline = Spline {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let handle = spline.common.handle;
        let r = &mut streams.object_reader;

        spline.scenario = r.read_bit_long();
        if self.caps.r2013_plus {
            spline.spline_flags = r.read_bit_long();
            spline.knot_parameter = r.read_bit_long();
            if spline.spline_flags & 1 != 0 {
                spline.scenario = 2;
            }
            if spline.knot_parameter == 15 {
                spline.scenario = 1;
            }
        }
        spline.degree = r.read_bit_long();

        if spline.scenario == 2 {
            // Fit data.
            spline.fit_tolerance = r.read_bit_double();
            spline.start_tangent = r.read_3bit_double();
            spline.end_tangent = r.read_3bit_double();
            let num_fit_points = checked_count(handle, r.read_bit_long() as i64, "fit point")?;
            spline.fit_points = (0..num_fit_points).map(|_| r.read_3bit_double()).collect();
        } else {
            // Control data.
            spline.rational = r.read_bit();
            spline.closed = r.read_bit();
            spline.periodic = r.read_bit();
            spline.knot_tolerance = r.read_bit_double();
            spline.control_tolerance = r.read_bit_double();
            let num_knots = checked_count(handle, r.read_bit_long() as i64, "knot")?;
            let num_control_points = checked_count(handle, r.read_bit_long() as i64, "control point")?;
            let weighted = r.read_bit();

            spline.knots = (0..num_knots).map(|_| r.read_bit_double()).collect();
            spline.control_points.reserve(num_control_points);
            for _ in 0..num_control_points {
                spline.control_points.push(r.read_3bit_double());
                if weighted {
                    spline.weights.push(r.read_bit_double());
                }
            }
        }

        Ok(EntityType::Spline(spline))
    }

    pub fn read_ray(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;
        Ok(EntityType::Ray(Ray {
            common,
            base_point: r.read_3bit_double(),
            direction: r.read_3bit_double(),
        }))
    }

    pub fn read_xline(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let common = self.read_common_entity_data(streams)?;
        let r = &mut streams.object_reader;
        Ok(EntityType::XLine(XLine {
            common,
            base_point: r.read_3bit_double(),
            direction: r.read_3bit_double(),
        }))
    }

    // -----------------------------------------------------------------------
    // MTEXT
    // -----------------------------------------------------------------------

    pub fn read_mtext(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut mtext = MText {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };

        let r = &mut streams.object_reader;
        mtext.insert_point = r.read_3bit_double();
        mtext.normal = r.read_3bit_double();
        mtext.x_direction = r.read_3bit_double();
        mtext.rect_width = r.read_bit_double();
        if self.caps.r2007_plus {
            mtext.rect_height = r.read_bit_double();
        }
        mtext.text_height = r.read_bit_double();
        mtext.attachment = r.read_bit_short();
        mtext.drawing_direction = r.read_bit_short();
        mtext.extents_height = r.read_bit_double();
        mtext.extents_width = r.read_bit_double();

        mtext.value = streams.read_text();

        let r = &mut streams.object_reader;
        if self.caps.r2000_plus {
            mtext.line_spacing_style = r.read_bit_short();
            mtext.line_spacing_factor = r.read_bit_double();
            let _unknown = r.read_bit();
        }

        if self.caps.r2004_plus {
            mtext.background_flags = r.read_bit_long();
            let has_fill = mtext.background_flags & 0x01 != 0
                || (self.caps.r2018_plus && mtext.background_flags & 0x10 != 0);
            if has_fill {
                mtext.background_scale = r.read_bit_double();
                mtext.background_color = streams.read_cm_color();
                mtext.background_transparency = streams.object_reader.read_bit_long();
            }
        }

        if self.caps.r2018_plus {
            self.read_mtext_annotative_data(streams, mtext.common.handle)?;
        }

        mtext.style_handle = streams.handle_ref();
        Ok(EntityType::MText(mtext))
    }

    /// R2018+ block repeating the geometry for non-annotative text, plus the
    /// column layout. Nothing here is kept.
    fn read_mtext_annotative_data(&self, streams: &mut StreamSet<'a>, handle: Handle) -> Result<()> {
        let is_not_annotative = streams.object_reader.read_bit();
        if !is_not_annotative {
            return Ok(());
        }

        let r = &mut streams.object_reader;
        let _version = r.read_bit_short();
        let _default_flag = r.read_bit();

        let _app = streams.handle_ref();

        let r = &mut streams.object_reader;
        let _attachment = r.read_bit_long();
        let _x_direction = r.read_3bit_double();
        let _insert_point = r.read_3bit_double();
        let _rect_width = r.read_bit_double();
        let _rect_height = r.read_bit_double();
        let _extents_width = r.read_bit_double();
        let _extents_height = r.read_bit_double();

        let column_type = r.read_bit_short();
        if column_type != 0 {
            let column_count = checked_count(handle, r.read_bit_long() as i64, "column")?;
            let _column_width = r.read_bit_double();
            let _gutter = r.read_bit_double();
            let auto_height = r.read_bit();
            let _flow_reversed = r.read_bit();
            if !auto_height && column_type == 2 {
                for _ in 0..column_count {
                    let _height = r.read_bit_double();
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // LEADER
    // -----------------------------------------------------------------------

    pub fn read_leader(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut leader = Leader {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let handle = leader.common.handle;
        let r = &mut streams.object_reader;

        let _unknown = r.read_bit();
        leader.annotation_type = r.read_bit_short();
        leader.path_type = r.read_bit_short();

        let num_points = checked_count(handle, r.read_bit_long() as i64, "leader point")?;
        leader.vertices = (0..num_points).map(|_| r.read_3bit_double()).collect();

        leader.origin = r.read_3bit_double();
        leader.normal = r.read_3bit_double();
        leader.horizontal_direction = r.read_3bit_double();
        leader.block_offset = r.read_3bit_double();

        if self.version >= DwgVersion::AC1014 {
            leader.end_point_projection = r.read_3bit_double();
        }
        if self.caps.r13_14_only {
            leader.dimension_gap = r.read_bit_double();
        }

        leader.box_height = r.read_bit_double();
        leader.box_width = r.read_bit_double();
        leader.hookline_on_x_direction = r.read_bit();
        leader.arrow_head_on = r.read_bit();

        if self.caps.r13_14_only {
            leader.arrow_head_type = r.read_bit_short();
            leader.arrow_head_size = r.read_bit_double();
            let _unknown = r.read_bit();
            let _unknown = r.read_bit();
            let _unknown = r.read_bit_short();
            leader.by_block_color = r.read_bit_short();
            leader.hookline_on = r.read_bit();
            let _unknown = r.read_bit();
        } else {
            let _unknown = r.read_bit_short();
            leader.hookline_on = r.read_bit();
            let _unknown = r.read_bit();
        }

        leader.annotation_handle = streams.handle_ref();
        leader.dimstyle_handle = streams.handle_ref();

        Ok(EntityType::Leader(leader))
    }

    // -----------------------------------------------------------------------
    // LWPOLYLINE
    // -----------------------------------------------------------------------

    pub fn read_lwpolyline(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut lw = LwPolyline {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let handle = lw.common.handle;
        let r = &mut streams.object_reader;

        let flags = r.read_bit_short();
        lw.flags = flags;

        if flags & 0x4 != 0 {
            lw.constant_width = r.read_bit_double();
        }
        if flags & 0x8 != 0 {
            lw.elevation = r.read_bit_double();
        }
        if flags & 0x2 != 0 {
            lw.thickness = r.read_bit_double();
        }
        if flags & 0x1 != 0 {
            lw.normal = r.read_3bit_double();
        }

        let num_points = checked_count(handle, r.read_bit_long() as i64, "vertex")?;
        let num_bulges = if flags & 0x10 != 0 {
            checked_count(handle, r.read_bit_long() as i64, "bulge")?
        } else {
            0
        };
        let num_ids = if self.caps.r2010_plus && flags & 0x400 != 0 {
            checked_count(handle, r.read_bit_long() as i64, "vertex id")?
        } else {
            0
        };
        let num_widths = if flags & 0x20 != 0 {
            checked_count(handle, r.read_bit_long() as i64, "width")?
        } else {
            0
        };

        // Points: all RD before R2000, then the first RD and the rest DD
        // against the previous point.
        let mut vertices: Vec<LwVertex> = Vec::with_capacity(num_points);
        let mut previous = Vector2::ZERO;
        for i in 0..num_points {
            let location = if i == 0 || self.caps.r13_14_only {
                r.read_2raw_double()
            } else {
                r.read_2bit_double_with_default(previous)
            };
            previous = location;
            vertices.push(LwVertex {
                location,
                start_width: lw.constant_width,
                end_width: lw.constant_width,
                ..Default::default()
            });
        }

        for i in 0..num_bulges {
            let bulge = r.read_bit_double();
            if let Some(v) = vertices.get_mut(i) {
                v.bulge = bulge;
            }
        }
        for i in 0..num_ids {
            let id = r.read_bit_long();
            if let Some(v) = vertices.get_mut(i) {
                v.id = id;
            }
        }
        for i in 0..num_widths {
            let start_width = r.read_bit_double();
            let end_width = r.read_bit_double();
            if let Some(v) = vertices.get_mut(i) {
                v.start_width = start_width;
                v.end_width = end_width;
            }
        }

        lw.vertices = vertices;
        Ok(EntityType::LwPolyline(lw))
    }

    // -----------------------------------------------------------------------
    // HATCH
    // -----------------------------------------------------------------------

    pub fn read_hatch(&self, streams: &mut StreamSet<'a>) -> Result<EntityType> {
        let mut hatch = Hatch {
            common: self.read_common_entity_data(streams)?,
            ..Default::default()
        };
        let handle = hatch.common.handle;

        if self.caps.r2004_plus {
            hatch.gradient = self.read_hatch_gradient(streams, handle)?;
        }

        let r = &mut streams.object_reader;
        hatch.elevation = r.read_bit_double();
        hatch.normal = r.read_3bit_double();
        hatch.pattern_name = streams.read_text();

        let r = &mut streams.object_reader;
        hatch.is_solid = r.read_bit();
        hatch.is_associative = r.read_bit();

        let num_paths = checked_count(handle, r.read_bit_long() as i64, "boundary path")?;
        let mut handle_counts = Vec::with_capacity(num_paths);
        let mut has_derived = false;
        for _ in 0..num_paths {
            let (path, handle_count) = self.read_boundary_path(&mut streams.object_reader, handle)?;
            has_derived |= path.flags & 0x4 != 0;
            handle_counts.push(handle_count);
            hatch.paths.push(path);
        }

        let r = &mut streams.object_reader;
        hatch.style = r.read_bit_short();
        hatch.pattern_type = r.read_bit_short();

        if !hatch.is_solid {
            hatch.pattern_angle = r.read_bit_double();
            hatch.pattern_scale = r.read_bit_double();
            hatch.is_double = r.read_bit();
            let num_lines = checked_count(handle, r.read_bit_short() as i64, "pattern line")?;
            for _ in 0..num_lines {
                let angle = r.read_bit_double();
                let base_point = r.read_2bit_double();
                let offset = r.read_2bit_double();
                let num_dashes = checked_count(handle, r.read_bit_short() as i64, "dash")?;
                let dashes = (0..num_dashes).map(|_| r.read_bit_double()).collect();
                hatch.pattern_lines.push(PatternLine {
                    angle,
                    base_point,
                    offset,
                    dashes,
                });
            }
        }

        if has_derived {
            hatch.pixel_size = r.read_bit_double();
        }

        let num_seeds = checked_count(handle, r.read_bit_long() as i64, "seed point")?;
        hatch.seed_points = (0..num_seeds).map(|_| r.read_2raw_double()).collect();

        for (path, count) in hatch.paths.iter_mut().zip(handle_counts) {
            path.boundary_handles = (0..count).map(|_| streams.handle_ref()).collect();
        }

        Ok(EntityType::Hatch(hatch))
    }

    fn read_hatch_gradient(&self, streams: &mut StreamSet<'a>, handle: Handle) -> Result<HatchGradient> {
        let r = &mut streams.object_reader;
        let mut gradient = HatchGradient {
            enabled: r.read_bit_long() != 0,
            reserved: r.read_bit_long(),
            angle: r.read_bit_double(),
            shift: r.read_bit_double(),
            single_color: r.read_bit_long() != 0,
            tint: r.read_bit_double(),
            ..Default::default()
        };

        let num_colors = checked_count(handle, r.read_bit_long() as i64, "gradient color")?;
        for _ in 0..num_colors {
            let value = r.read_bit_double();
            let _unknown = r.read_bit_short();
            let rgb = r.read_bit_long() as u32 & 0x00FF_FFFF;
            let _ignored = r.read_raw_char();
            gradient.colors.push(GradientColor { value, rgb });
        }

        gradient.name = streams.read_text();
        Ok(gradient)
    }

    /// One boundary path and the number of boundary object handles it
    /// stores in the handle stream.
    fn read_boundary_path(&self, r: &mut BitBuffer<'a>, handle: Handle) -> Result<(BoundaryPath, usize)> {
        let mut path = BoundaryPath {
            flags: r.read_bit_long() as u32,
            ..Default::default()
        };

        if path.is_polyline() {
            let has_bulge = r.read_bit();
            path.polyline_closed = r.read_bit();
            let num_vertices = checked_count(handle, r.read_bit_long() as i64, "path vertex")?;
            for _ in 0..num_vertices {
                let point = r.read_2raw_double();
                let bulge = if has_bulge { r.read_bit_double() } else { 0.0 };
                path.polyline.push(point.with_z(bulge));
            }
        } else {
            let num_edges = checked_count(handle, r.read_bit_long() as i64, "path edge")?;
            for _ in 0..num_edges {
                let edge_type = r.read_raw_char();
                let edge = match edge_type {
                    1 => BoundaryEdge::Line {
                        start: r.read_2raw_double(),
                        end: r.read_2raw_double(),
                    },
                    2 => BoundaryEdge::CircularArc {
                        center: r.read_2raw_double(),
                        radius: r.read_bit_double(),
                        start_angle: r.read_bit_double(),
                        end_angle: r.read_bit_double(),
                        counter_clockwise: r.read_bit(),
                    },
                    3 => BoundaryEdge::EllipticArc {
                        center: r.read_2raw_double(),
                        major_axis: r.read_2raw_double(),
                        minor_ratio: r.read_bit_double(),
                        start_angle: r.read_bit_double(),
                        end_angle: r.read_bit_double(),
                        counter_clockwise: r.read_bit(),
                    },
                    4 => self.read_spline_edge(r, handle)?,
                    other => {
                        return Err(DwgError::InvalidRecord {
                            handle,
                            reason: format!("unknown hatch edge type {other}"),
                        })
                    }
                };
                path.edges.push(edge);
            }
        }

        let num_handles = checked_count(handle, r.read_bit_long() as i64, "boundary handle")?;
        Ok((path, num_handles))
    }

    fn read_spline_edge(&self, r: &mut BitBuffer<'a>, handle: Handle) -> Result<BoundaryEdge> {
        let degree = r.read_bit_long();
        let rational = r.read_bit();
        let periodic = r.read_bit();
        let num_knots = checked_count(handle, r.read_bit_long() as i64, "edge knot")?;
        let num_control_points = checked_count(handle, r.read_bit_long() as i64, "edge control point")?;

        let knots = (0..num_knots).map(|_| r.read_bit_double()).collect();
        let mut control_points = Vec::with_capacity(num_control_points);
        for _ in 0..num_control_points {
            let point = r.read_2raw_double();
            let weight = if rational { r.read_bit_double() } else { 1.0 };
            control_points.push(point.with_z(weight));
        }

        let mut fit_points = Vec::new();
        let mut start_tangent = Vector2::ZERO;
        let mut end_tangent = Vector2::ZERO;
        if self.caps.r2010_plus {
            let num_fit_points = checked_count(handle, r.read_bit_long() as i64, "edge fit point")?;
            if num_fit_points > 0 {
                fit_points = (0..num_fit_points).map(|_| r.read_2raw_double()).collect();
                start_tangent = r.read_2raw_double();
                end_tangent = r.read_2raw_double();
            }
        }

        Ok(BoundaryEdge::Spline {
            degree,
            rational,
            periodic,
            knots,
            control_points,
            fit_points,
            start_tangent,
            end_tangent,
        })
    }
}
