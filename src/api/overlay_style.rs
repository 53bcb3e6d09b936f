use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Visual weights of committed trendlines, the drawing preview and the
/// endpoint handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub selected_width_bonus_px: f64,
    pub dragging_width_bonus_px: f64,
    /// Alpha of a trendline while it is dragged.
    pub dragging_alpha: f64,
    pub preview_alpha: f64,
    pub preview_dash_px: f64,
    pub preview_gap_px: f64,
    pub endpoint_radius_px: f64,
    pub selected_endpoint_radius_px: f64,
    pub dragging_endpoint_radius_px: f64,
    pub endpoint_outline_color: Color,
    pub endpoint_outline_width_px: f64,
    /// Fill of the grab handle drawn on selected, idle endpoints.
    pub accent_color: Color,
    pub grab_handle_outer_radius_px: f64,
    pub grab_handle_outer_alpha: f64,
    pub grab_handle_inner_radius_px: f64,
    pub grab_handle_outline_width_px: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            selected_width_bonus_px: 1.0,
            dragging_width_bonus_px: 2.0,
            dragging_alpha: f64::from(0xDD_u8) / 255.0,
            preview_alpha: 0.5,
            preview_dash_px: 5.0,
            preview_gap_px: 5.0,
            endpoint_radius_px: 4.0,
            selected_endpoint_radius_px: 6.0,
            dragging_endpoint_radius_px: 7.0,
            endpoint_outline_color: Color::WHITE,
            endpoint_outline_width_px: 2.0,
            accent_color: Color::rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0),
            grab_handle_outer_radius_px: 8.0,
            grab_handle_outer_alpha: 0.25,
            grab_handle_inner_radius_px: 4.0,
            grab_handle_outline_width_px: 2.0,
        }
    }
}
