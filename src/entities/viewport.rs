//! Viewport entity (paper space window onto model space)

use super::EntityCommon;
use crate::types::{Color, Handle, Vector2, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub common: EntityCommon,
    pub center: Vector3,
    pub width: f64,
    pub height: f64,
    pub view_target: Vector3,
    pub view_direction: Vector3,
    pub twist_angle: f64,
    pub view_height: f64,
    pub lens_length: f64,
    pub front_clip: f64,
    pub back_clip: f64,
    pub snap_angle: f64,
    pub view_center: Vector2,
    pub snap_base: Vector2,
    pub snap_spacing: Vector2,
    pub grid_spacing: Vector2,
    pub circle_zoom: i16,
    pub grid_major: i16,
    pub status_flags: i32,
    pub style_sheet: String,
    pub render_mode: u8,
    pub ucs_at_origin: bool,
    pub ucs_per_viewport: bool,
    pub ucs_origin: Vector3,
    pub ucs_x_axis: Vector3,
    pub ucs_y_axis: Vector3,
    pub elevation: f64,
    pub ortho_type: i16,
    pub shade_plot_mode: i16,
    pub default_lighting: bool,
    pub default_lighting_type: u8,
    pub brightness: f64,
    pub contrast: f64,
    pub ambient_color: Color,
    pub frozen_layers: Vec<Handle>,
    pub clip_boundary: Handle,
    pub named_ucs: Handle,
    pub base_ucs: Handle,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            width: 0.0,
            height: 0.0,
            view_target: Vector3::ZERO,
            view_direction: Vector3::UNIT_Z,
            twist_angle: 0.0,
            view_height: 0.0,
            lens_length: 50.0,
            front_clip: 0.0,
            back_clip: 0.0,
            snap_angle: 0.0,
            view_center: Vector2::ZERO,
            snap_base: Vector2::ZERO,
            snap_spacing: Vector2::ZERO,
            grid_spacing: Vector2::ZERO,
            circle_zoom: 100,
            grid_major: 5,
            status_flags: 0,
            style_sheet: String::new(),
            render_mode: 0,
            ucs_at_origin: false,
            ucs_per_viewport: false,
            ucs_origin: Vector3::ZERO,
            ucs_x_axis: Vector3::new(1.0, 0.0, 0.0),
            ucs_y_axis: Vector3::new(0.0, 1.0, 0.0),
            elevation: 0.0,
            ortho_type: 0,
            shade_plot_mode: 0,
            default_lighting: true,
            default_lighting_type: 1,
            brightness: 0.0,
            contrast: 0.0,
            ambient_color: Color::ByLayer,
            frozen_layers: Vec::new(),
            clip_boundary: Handle::NULL,
            named_ucs: Handle::NULL,
            base_ucs: Handle::NULL,
        }
    }
}
