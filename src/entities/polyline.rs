//! Heavy polylines (2D, 3D, polyface and polygon mesh) and their vertices
//!
//! The polyline record only lists its vertex handles; the vertices are
//! separate records decoded by the member walk and collected here in order.

use super::EntityCommon;
use crate::tables::MemberChain;
use crate::types::{Handle, Vector3};

/// Which flavour of heavy polyline a record is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolylineKind {
    #[default]
    Polyline2D,
    Polyline3D,
    PolyfaceMesh,
    PolygonMesh,
}

/// Vertex record flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexKind {
    #[default]
    Vertex2D,
    Vertex3D,
    MeshVertex,
    PolyfaceVertex,
    /// Face record of a polyface mesh; `indices` holds its corners
    PolyfaceFace,
}

/// A polyline vertex (or polyface face) record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    pub common: EntityCommon,
    pub kind: VertexKind,
    pub flags: u8,
    pub location: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
    /// Vertex id (R2010+ 2D vertices)
    pub id: i32,
    pub tangent_direction: f64,
    /// 1-based corner indices of a polyface face, negative when the edge
    /// is invisible
    pub indices: [i16; 4],
}

impl Vertex {
    pub fn new(kind: VertexKind, location: Vector3) -> Self {
        Vertex {
            kind,
            location,
            ..Default::default()
        }
    }
}

/// A heavy polyline with its vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub common: EntityCommon,
    pub kind: PolylineKind,
    pub flags: i16,
    /// Curve/surface fit type
    pub curve_type: i16,
    pub start_width: f64,
    pub end_width: f64,
    pub thickness: f64,
    pub elevation: f64,
    pub normal: Vector3,
    /// Declared vertex count (polyface) or M count (mesh)
    pub m_count: i16,
    /// Declared face count (polyface) or N count (mesh)
    pub n_count: i16,
    pub m_density: i16,
    pub n_density: i16,
    pub members: MemberChain,
    pub seqend: Handle,
    pub vertices: Vec<Vertex>,
}

impl Polyline {
    pub fn new(kind: PolylineKind) -> Self {
        Polyline {
            common: EntityCommon::new(),
            kind,
            flags: 0,
            curve_type: 0,
            start_width: 0.0,
            end_width: 0.0,
            thickness: 0.0,
            elevation: 0.0,
            normal: Vector3::UNIT_Z,
            m_count: 0,
            n_count: 0,
            m_density: 0,
            n_density: 0,
            members: MemberChain::default(),
            seqend: Handle::NULL,
            vertices: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags & 1 != 0
    }

    /// Face records of a polyface mesh
    pub fn faces(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices
            .iter()
            .filter(|v| v.kind == VertexKind::PolyfaceFace)
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new(PolylineKind::Polyline2D)
    }
}
