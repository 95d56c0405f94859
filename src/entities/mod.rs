//! Decoded drawing entities
//!
//! Every kind embeds an [`EntityCommon`] with the header fields shared by all
//! entity records. Handles to table records are kept as stored; the
//! matching names are filled in by the decoder once the tables are loaded.

use crate::types::{Color, Handle, LineWeight};
use crate::variant::Variant;

pub mod arc;
pub mod block;
pub mod circle;
pub mod dimension;
pub mod ellipse;
pub mod face3d;
pub mod hatch;
pub mod insert;
pub mod leader;
pub mod line;
pub mod lwpolyline;
pub mod mtext;
pub mod point;
pub mod polyline;
pub mod ray;
pub mod solid;
pub mod spline;
pub mod text;
pub mod viewport;
pub mod xline;

pub use arc::Arc;
pub use block::{Block, BlockEnd};
pub use circle::Circle;
pub use dimension::{Dimension, DimensionKind};
pub use ellipse::Ellipse;
pub use face3d::{Face3D, InvisibleEdgeFlags};
pub use hatch::{BoundaryEdge, BoundaryPath, GradientColor, Hatch, HatchGradient, PatternLine};
pub use insert::Insert;
pub use leader::Leader;
pub use line::Line;
pub use lwpolyline::{LwPolyline, LwVertex};
pub use mtext::MText;
pub use point::Point;
pub use polyline::{Polyline, PolylineKind, Vertex, VertexKind};
pub use ray::Ray;
pub use solid::Solid;
pub use spline::Spline;
pub use text::Text;
pub use viewport::Viewport;
pub use xline::XLine;

/// Extended entity data registered by one application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedData {
    /// APPID record owning the data
    pub app: Handle,
    pub items: Vec<Variant>,
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    pub handle: Handle,
    /// Owning block record (or polyline for vertices). Null when the record
    /// does not store one.
    pub owner: Handle,
    /// 0 owner stored, 1 paper space, 2 model space
    pub entity_mode: u8,
    pub layer_handle: Handle,
    pub layer: String,
    /// 0 ByLayer, 1 ByBlock, 2 Continuous, 3 stored handle
    pub line_type_flags: u8,
    pub line_type_handle: Handle,
    pub line_type: String,
    pub color: Color,
    pub transparency: Option<u32>,
    pub line_type_scale: f64,
    pub line_weight: LineWeight,
    pub invisible: bool,
    pub reactors: Vec<Handle>,
    pub xdictionary: Handle,
    pub extended_data: Vec<ExtendedData>,
    /// Previous entity of a linked member chain (pre-R2004)
    pub prev_entity: Handle,
    /// Next entity of a linked member chain (pre-R2004)
    pub next_entity: Handle,
}

impl EntityCommon {
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            entity_mode: 2,
            layer_handle: Handle::NULL,
            layer: String::new(),
            line_type_flags: 0,
            line_type_handle: Handle::NULL,
            line_type: String::new(),
            color: Color::ByLayer,
            transparency: None,
            line_type_scale: 1.0,
            line_weight: LineWeight::ByLayer,
            invisible: false,
            reactors: Vec::new(),
            xdictionary: Handle::NULL,
            extended_data: Vec::new(),
            prev_entity: Handle::NULL,
            next_entity: Handle::NULL,
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Access to the shared header of an entity.
pub trait Entity {
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// DXF record name of the kind
    fn entity_type(&self) -> &'static str;

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }
}

macro_rules! impl_entity {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl Entity for $ty {
                fn common(&self) -> &EntityCommon {
                    &self.common
                }

                fn common_mut(&mut self) -> &mut EntityCommon {
                    &mut self.common
                }

                fn entity_type(&self) -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_entity!(
    Point => "POINT",
    Line => "LINE",
    Circle => "CIRCLE",
    Arc => "ARC",
    Ellipse => "ELLIPSE",
    Insert => "INSERT",
    Polyline => "POLYLINE",
    Vertex => "VERTEX",
    LwPolyline => "LWPOLYLINE",
    Text => "TEXT",
    MText => "MTEXT",
    Dimension => "DIMENSION",
    Leader => "LEADER",
    Hatch => "HATCH",
    Solid => "SOLID",
    Viewport => "VIEWPORT",
    Spline => "SPLINE",
    Ray => "RAY",
    XLine => "XLINE",
    Face3D => "3DFACE",
    Block => "BLOCK",
    BlockEnd => "ENDBLK",
);

/// Closed set of entity kinds the decoder produces.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Insert(Insert),
    Polyline(Polyline),
    LwPolyline(LwPolyline),
    Text(Text),
    MText(MText),
    Dimension(Dimension),
    Leader(Leader),
    Hatch(Hatch),
    Solid(Solid),
    /// Same layout as a solid
    Trace(Solid),
    Viewport(Viewport),
    Spline(Spline),
    Ray(Ray),
    XLine(XLine),
    Face3D(Face3D),
    Block(Block),
    BlockEnd(BlockEnd),
}

impl EntityType {
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Ellipse(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Leader(e) => e,
            EntityType::Hatch(e) => e,
            EntityType::Solid(e) | EntityType::Trace(e) => e,
            EntityType::Viewport(e) => e,
            EntityType::Spline(e) => e,
            EntityType::Ray(e) => e,
            EntityType::XLine(e) => e,
            EntityType::Face3D(e) => e,
            EntityType::Block(e) => e,
            EntityType::BlockEnd(e) => e,
        }
    }

    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Ellipse(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Leader(e) => e,
            EntityType::Hatch(e) => e,
            EntityType::Solid(e) | EntityType::Trace(e) => e,
            EntityType::Viewport(e) => e,
            EntityType::Spline(e) => e,
            EntityType::Ray(e) => e,
            EntityType::XLine(e) => e,
            EntityType::Face3D(e) => e,
            EntityType::Block(e) => e,
            EntityType::BlockEnd(e) => e,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    /// DXF record name of the kind
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityType::Trace(_) => "TRACE",
            other => other.as_entity().entity_type(),
        }
    }
}
