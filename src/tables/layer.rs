//! Layer table entry

use super::TableEntryCommon;
use crate::types::{Color, Handle, LineWeight};

bitflags::bitflags! {
    // Layer state bits as packed in the R2000+ values short
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: i16 {
        const FROZEN = 0x01;
        const OFF = 0x02;
        const FROZEN_IN_NEW = 0x04;
        const LOCKED = 0x08;
        const PLOTTABLE = 0x10;
    }
}

/// A layer table entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub common: TableEntryCommon,
    pub flags: LayerFlags,
    pub color: Color,
    pub line_weight: LineWeight,
    pub line_type_handle: Handle,
    /// Name of the line type at `line_type_handle`, filled by the cross-link pass
    pub line_type: String,
    pub plot_style: Handle,
    pub material: Handle,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
            flags: LayerFlags::PLOTTABLE,
            color: Color::Index(7),
            ..Default::default()
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn is_off(&self) -> bool {
        self.flags.contains(LayerFlags::OFF)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    pub fn is_plottable(&self) -> bool {
        self.flags.contains(LayerFlags::PLOTTABLE)
    }
}
