//! Type code → entity decoder table.
//!
//! Only drawable kinds that are emitted on their own are listed. Block
//! brackets and vertices are decoded by the walks that own them, and every
//! other code is skipped by the caller.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::entities::EntityType;
use crate::error::Result;
use crate::io::dwg::object_type::DwgObjectType;

use super::object_reader::{ObjectReader, StreamSet};

/// Decodes one entity record from its streams.
pub type EntityDecoder = for<'a> fn(&ObjectReader<'a>, &mut StreamSet<'a>) -> Result<EntityType>;

static REGISTRY: Lazy<AHashMap<i16, EntityDecoder>> = Lazy::new(|| {
    let mut map: AHashMap<i16, EntityDecoder> = AHashMap::with_capacity(40);

    register(&mut map, DwgObjectType::Text, |r, s| r.read_text_entity(s));
    register(&mut map, DwgObjectType::Insert, |r, s| r.read_insert(s));
    register(&mut map, DwgObjectType::Minsert, |r, s| r.read_minsert(s));
    register(&mut map, DwgObjectType::Polyline2D, |r, s| r.read_polyline_2d(s));
    register(&mut map, DwgObjectType::Polyline3D, |r, s| r.read_polyline_3d(s));
    register(&mut map, DwgObjectType::PolylinePface, |r, s| r.read_polyface_mesh(s));
    register(&mut map, DwgObjectType::PolylineMesh, |r, s| r.read_polygon_mesh(s));
    register(&mut map, DwgObjectType::Arc, |r, s| r.read_arc(s));
    register(&mut map, DwgObjectType::Circle, |r, s| r.read_circle(s));
    register(&mut map, DwgObjectType::Line, |r, s| r.read_line(s));
    register(&mut map, DwgObjectType::DimensionOrdinate, |r, s| r.read_dim_ordinate(s));
    register(&mut map, DwgObjectType::DimensionLinear, |r, s| r.read_dim_linear(s));
    register(&mut map, DwgObjectType::DimensionAligned, |r, s| r.read_dim_aligned(s));
    register(&mut map, DwgObjectType::DimensionAng3Pt, |r, s| r.read_dim_angular_3pt(s));
    register(&mut map, DwgObjectType::DimensionAng2Ln, |r, s| r.read_dim_angular_2ln(s));
    register(&mut map, DwgObjectType::DimensionRadius, |r, s| r.read_dim_radius(s));
    register(&mut map, DwgObjectType::DimensionDiameter, |r, s| r.read_dim_diameter(s));
    register(&mut map, DwgObjectType::Point, |r, s| r.read_point(s));
    register(&mut map, DwgObjectType::Face3D, |r, s| r.read_3d_face(s));
    register(&mut map, DwgObjectType::Solid, |r, s| r.read_solid(s));
    register(&mut map, DwgObjectType::Trace, |r, s| r.read_trace(s));
    register(&mut map, DwgObjectType::Viewport, |r, s| r.read_viewport(s));
    register(&mut map, DwgObjectType::Ellipse, |r, s| r.read_ellipse(s));
    register(&mut map, DwgObjectType::Spline, |r, s| r.read_spline(s));
    register(&mut map, DwgObjectType::Ray, |r, s| r.read_ray(s));
    register(&mut map, DwgObjectType::Xline, |r, s| r.read_xline(s));
    register(&mut map, DwgObjectType::Mtext, |r, s| r.read_mtext(s));
    register(&mut map, DwgObjectType::Leader, |r, s| r.read_leader(s));
    register(&mut map, DwgObjectType::LwPolyline, |r, s| r.read_lwpolyline(s));
    register(&mut map, DwgObjectType::Hatch, |r, s| r.read_hatch(s));

    map
});

fn register(map: &mut AHashMap<i16, EntityDecoder>, object_type: DwgObjectType, decoder: EntityDecoder) {
    map.insert(object_type.code(), decoder);
}

/// Decoder for a (class-resolved) type code.
pub fn decoder_for(type_code: i16) -> Option<EntityDecoder> {
    REGISTRY.get(&type_code).copied()
}

/// `true` when `type_code` has a decoder.
pub fn is_registered(type_code: i16) -> bool {
    REGISTRY.contains_key(&type_code)
}
