//! Viewport table entry

use super::TableEntryCommon;
use crate::types::{Handle, Vector2, Vector3};

/// A viewport table entry
#[derive(Debug, Clone, PartialEq)]
pub struct VPort {
    pub common: TableEntryCommon,

    pub view_height: f64,
    /// Width / height
    pub aspect_ratio: f64,
    pub view_center: Vector2,
    pub view_target: Vector3,
    pub view_direction: Vector3,
    pub twist_angle: f64,
    pub lens_length: f64,
    pub front_clip: f64,
    pub back_clip: f64,
    /// VIEWMODE bits
    pub view_mode: u8,
    pub render_mode: u8,

    /// Lower-left corner in screen units (0..1)
    pub lower_left: Vector2,
    pub upper_right: Vector2,
    pub ucs_follow: bool,
    pub circle_zoom: i16,
    pub fast_zoom: bool,
    /// UCSICON bits
    pub ucs_icon: u8,

    pub grid_on: bool,
    pub grid_spacing: Vector2,
    pub snap_on: bool,
    /// Isometric snap style
    pub snap_style: bool,
    pub snap_isopair: i16,
    pub snap_rotation: f64,
    pub snap_base: Vector2,
    pub snap_spacing: Vector2,

    pub ucs_per_viewport: bool,
    pub ucs_origin: Vector3,
    pub ucs_x_axis: Vector3,
    pub ucs_y_axis: Vector3,
    pub ucs_elevation: f64,
    pub ucs_ortho_type: i16,
    pub named_ucs: Handle,
    pub base_ucs: Handle,
}

impl Default for VPort {
    fn default() -> Self {
        VPort {
            common: TableEntryCommon::default(),
            view_height: 10.0,
            aspect_ratio: 1.0,
            view_center: Vector2::ZERO,
            view_target: Vector3::ZERO,
            view_direction: Vector3::UNIT_Z,
            twist_angle: 0.0,
            lens_length: 50.0,
            front_clip: 0.0,
            back_clip: 0.0,
            view_mode: 0,
            render_mode: 0,
            lower_left: Vector2::ZERO,
            upper_right: Vector2::new(1.0, 1.0),
            ucs_follow: false,
            circle_zoom: 1000,
            fast_zoom: true,
            ucs_icon: 3,
            grid_on: false,
            grid_spacing: Vector2::new(10.0, 10.0),
            snap_on: false,
            snap_style: false,
            snap_isopair: 0,
            snap_rotation: 0.0,
            snap_base: Vector2::ZERO,
            snap_spacing: Vector2::new(0.5, 0.5),
            ucs_per_viewport: false,
            ucs_origin: Vector3::ZERO,
            ucs_x_axis: Vector3::new(1.0, 0.0, 0.0),
            ucs_y_axis: Vector3::new(0.0, 1.0, 0.0),
            ucs_elevation: 0.0,
            ucs_ortho_type: 0,
            named_ucs: Handle::NULL,
            base_ucs: Handle::NULL,
        }
    }
}

impl VPort {
    pub fn new(name: impl Into<String>) -> Self {
        VPort {
            common: TableEntryCommon {
                name: name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// The "*Active" viewport is the one shown in model space.
    pub fn is_active(&self) -> bool {
        self.common.name.eq_ignore_ascii_case("*Active")
    }
}
