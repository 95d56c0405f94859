//! Receivers of decoded drawing content.
//!
//! The decoder pushes tables, block brackets and entities into a
//! [`DrawingSink`] in traversal order. Every method has an empty default,
//! so a sink only implements what it needs. [`Drawing`] is a ready-made
//! sink that keeps everything.

use crate::entities::{
    Arc, Block, BlockEnd, Circle, Dimension, Ellipse, EntityType, Face3D, Hatch, Insert, Leader,
    Line, LwPolyline, MText, Point, Polyline, Ray, Solid, Spline, Text, Viewport, XLine,
};
use crate::tables::{AppId, DimStyle, Layer, LineType, TextStyle, VPort};

/// Callbacks for decoded content. Arguments are borrowed; clone what you
/// keep.
#[allow(unused_variables)]
pub trait DrawingSink {
    fn add_line_type(&mut self, line_type: &LineType) {}
    fn add_layer(&mut self, layer: &Layer) {}
    fn add_text_style(&mut self, style: &TextStyle) {}
    fn add_dim_style(&mut self, style: &DimStyle) {}
    fn add_vport(&mut self, vport: &VPort) {}
    fn add_app_id(&mut self, app_id: &AppId) {}

    /// Start of a block definition. Entities up to the matching
    /// [`end_block`](Self::end_block) belong to it.
    fn add_block(&mut self, block: &Block) {}
    fn end_block(&mut self, end: &BlockEnd) {}

    fn add_point(&mut self, point: &Point) {}
    fn add_line(&mut self, line: &Line) {}
    fn add_circle(&mut self, circle: &Circle) {}
    fn add_arc(&mut self, arc: &Arc) {}
    fn add_ellipse(&mut self, ellipse: &Ellipse) {}
    fn add_insert(&mut self, insert: &Insert) {}
    fn add_polyline(&mut self, polyline: &Polyline) {}
    fn add_lw_polyline(&mut self, polyline: &LwPolyline) {}
    fn add_text(&mut self, text: &Text) {}
    fn add_mtext(&mut self, mtext: &MText) {}
    fn add_dimension(&mut self, dimension: &Dimension) {}
    fn add_leader(&mut self, leader: &Leader) {}
    fn add_hatch(&mut self, hatch: &Hatch) {}
    fn add_solid(&mut self, solid: &Solid) {}
    fn add_trace(&mut self, trace: &Solid) {}
    fn add_viewport(&mut self, viewport: &Viewport) {}
    fn add_spline(&mut self, spline: &Spline) {}
    fn add_ray(&mut self, ray: &Ray) {}
    fn add_xline(&mut self, xline: &XLine) {}
    fn add_face3d(&mut self, face: &Face3D) {}

    /// Route an entity to the method of its kind.
    fn add_entity(&mut self, entity: &EntityType) {
        match entity {
            EntityType::Point(e) => self.add_point(e),
            EntityType::Line(e) => self.add_line(e),
            EntityType::Circle(e) => self.add_circle(e),
            EntityType::Arc(e) => self.add_arc(e),
            EntityType::Ellipse(e) => self.add_ellipse(e),
            EntityType::Insert(e) => self.add_insert(e),
            EntityType::Polyline(e) => self.add_polyline(e),
            EntityType::LwPolyline(e) => self.add_lw_polyline(e),
            EntityType::Text(e) => self.add_text(e),
            EntityType::MText(e) => self.add_mtext(e),
            EntityType::Dimension(e) => self.add_dimension(e),
            EntityType::Leader(e) => self.add_leader(e),
            EntityType::Hatch(e) => self.add_hatch(e),
            EntityType::Solid(e) => self.add_solid(e),
            EntityType::Trace(e) => self.add_trace(e),
            EntityType::Viewport(e) => self.add_viewport(e),
            EntityType::Spline(e) => self.add_spline(e),
            EntityType::Ray(e) => self.add_ray(e),
            EntityType::XLine(e) => self.add_xline(e),
            EntityType::Face3D(e) => self.add_face3d(e),
            EntityType::Block(e) => self.add_block(e),
            EntityType::BlockEnd(e) => self.end_block(e),
        }
    }
}

/// A block definition collected by [`Drawing`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDefinition {
    pub block: Block,
    pub entities: Vec<EntityType>,
    pub end: Option<BlockEnd>,
}

/// Sink that keeps everything it is given.
///
/// Entities sent between `add_block` and `end_block` go to that block;
/// everything else is top level.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    pub line_types: Vec<LineType>,
    pub layers: Vec<Layer>,
    pub text_styles: Vec<TextStyle>,
    pub dim_styles: Vec<DimStyle>,
    pub vports: Vec<VPort>,
    pub app_ids: Vec<AppId>,
    pub blocks: Vec<BlockDefinition>,
    pub entities: Vec<EntityType>,
    open_block: Option<usize>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block definition by name.
    pub fn block(&self, name: &str) -> Option<&BlockDefinition> {
        self.blocks.iter().find(|b| b.block.name == name)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.common.name == name)
    }

    /// Top-level entities and every block's members.
    pub fn all_entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities
            .iter()
            .chain(self.blocks.iter().flat_map(|b| b.entities.iter()))
    }
}

impl DrawingSink for Drawing {
    fn add_line_type(&mut self, line_type: &LineType) {
        self.line_types.push(line_type.clone());
    }

    fn add_layer(&mut self, layer: &Layer) {
        self.layers.push(layer.clone());
    }

    fn add_text_style(&mut self, style: &TextStyle) {
        self.text_styles.push(style.clone());
    }

    fn add_dim_style(&mut self, style: &DimStyle) {
        self.dim_styles.push(style.clone());
    }

    fn add_vport(&mut self, vport: &VPort) {
        self.vports.push(vport.clone());
    }

    fn add_app_id(&mut self, app_id: &AppId) {
        self.app_ids.push(app_id.clone());
    }

    fn add_block(&mut self, block: &Block) {
        self.blocks.push(BlockDefinition {
            block: block.clone(),
            entities: Vec::new(),
            end: None,
        });
        self.open_block = Some(self.blocks.len() - 1);
    }

    fn end_block(&mut self, end: &BlockEnd) {
        if let Some(index) = self.open_block.take() {
            self.blocks[index].end = Some(end.clone());
        }
    }

    fn add_entity(&mut self, entity: &EntityType) {
        match entity {
            EntityType::Block(block) => self.add_block(block),
            EntityType::BlockEnd(end) => self.end_block(end),
            other => match self.open_block {
                Some(index) => self.blocks[index].entities.push(other.clone()),
                None => self.entities.push(other.clone()),
            },
        }
    }
}
