//! Fixed DWG record type codes.
//!
//! Only the codes the object decoder acts on are listed. Everything else,
//! including class-based codes from 500 up, maps to `None` and is resolved
//! through the class table or ignored.

/// Built-in type codes of the records this decoder reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum DwgObjectType {
    Text = 1,
    Attrib = 2,
    Attdef = 3,
    Block = 4,
    Endblk = 5,
    Seqend = 6,
    Insert = 7,
    Minsert = 8,
    Vertex2D = 0x0A,
    Vertex3D = 0x0B,
    VertexMesh = 0x0C,
    VertexPface = 0x0D,
    VertexPfaceFace = 0x0E,
    Polyline2D = 0x0F,
    Polyline3D = 0x10,
    Arc = 0x11,
    Circle = 0x12,
    Line = 0x13,
    DimensionOrdinate = 0x14,
    DimensionLinear = 0x15,
    DimensionAligned = 0x16,
    DimensionAng3Pt = 0x17,
    DimensionAng2Ln = 0x18,
    DimensionRadius = 0x19,
    DimensionDiameter = 0x1A,
    Point = 0x1B,
    Face3D = 0x1C,
    PolylinePface = 0x1D,
    PolylineMesh = 0x1E,
    Solid = 0x1F,
    Trace = 0x20,
    Viewport = 0x22,
    Ellipse = 0x23,
    Spline = 0x24,
    Ray = 0x28,
    Xline = 0x29,
    Mtext = 0x2C,
    Leader = 0x2D,
    BlockControlObj = 0x30,
    BlockHeader = 0x31,
    LayerControlObj = 0x32,
    Layer = 0x33,
    StyleControlObj = 0x34,
    Style = 0x35,
    LtypeControlObj = 0x38,
    Ltype = 0x39,
    VportControlObj = 0x40,
    Vport = 0x41,
    AppidControlObj = 0x42,
    Appid = 0x43,
    DimstyleControlObj = 0x44,
    Dimstyle = 0x45,
    LwPolyline = 0x4D,
    Hatch = 0x4E,
}

impl DwgObjectType {
    /// Map a raw code to a known type. Unlisted codes give `None`.
    pub fn from_raw(value: i16) -> Option<Self> {
        use DwgObjectType::*;
        let t = match value {
            1 => Text,
            2 => Attrib,
            3 => Attdef,
            4 => Block,
            5 => Endblk,
            6 => Seqend,
            7 => Insert,
            8 => Minsert,
            0x0A => Vertex2D,
            0x0B => Vertex3D,
            0x0C => VertexMesh,
            0x0D => VertexPface,
            0x0E => VertexPfaceFace,
            0x0F => Polyline2D,
            0x10 => Polyline3D,
            0x11 => Arc,
            0x12 => Circle,
            0x13 => Line,
            0x14 => DimensionOrdinate,
            0x15 => DimensionLinear,
            0x16 => DimensionAligned,
            0x17 => DimensionAng3Pt,
            0x18 => DimensionAng2Ln,
            0x19 => DimensionRadius,
            0x1A => DimensionDiameter,
            0x1B => Point,
            0x1C => Face3D,
            0x1D => PolylinePface,
            0x1E => PolylineMesh,
            0x1F => Solid,
            0x20 => Trace,
            0x22 => Viewport,
            0x23 => Ellipse,
            0x24 => Spline,
            0x28 => Ray,
            0x29 => Xline,
            0x2C => Mtext,
            0x2D => Leader,
            0x30 => BlockControlObj,
            0x31 => BlockHeader,
            0x32 => LayerControlObj,
            0x33 => Layer,
            0x34 => StyleControlObj,
            0x35 => Style,
            0x38 => LtypeControlObj,
            0x39 => Ltype,
            0x40 => VportControlObj,
            0x41 => Vport,
            0x42 => AppidControlObj,
            0x43 => Appid,
            0x44 => DimstyleControlObj,
            0x45 => Dimstyle,
            0x4D => LwPolyline,
            0x4E => Hatch,
            _ => return None,
        };
        Some(t)
    }

    /// Raw code as stored.
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Whether a record of this type carries the entity common data.
    pub fn is_entity(self) -> bool {
        let c = self.code();
        (1..=0x2D).contains(&c) || c == 0x4D || c == 0x4E
    }

    /// Whether this is one of the polyline vertex types.
    pub fn is_vertex(self) -> bool {
        (0x0A..=0x0E).contains(&self.code())
    }
}
