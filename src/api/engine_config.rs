use serde::{Deserialize, Serialize};

use crate::core::PaneId;
use crate::error::{ChartError, ChartResult};
use crate::extensions::AxisMarkerStyle;
use crate::interaction::HitTolerance;
use crate::render::Color;

use super::OverlayStyle;
use super::validation::validate_engine_config;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load overlay
/// setup without inventing their own ad-hoc format. Every field has a
/// default, so partial JSON documents are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendlineEngineConfig {
    /// Pane whose series carries trendlines and axis markers.
    pub main_pane: PaneId,
    /// Hit radii for clicks and drags.
    pub hover_tolerance: HitTolerance,
    /// Hit radii for deciding whether hovering captures the pointer.
    pub strict_tolerance: HitTolerance,
    /// Damping applied to whole-line drag deltas, in `(0, 1]`.
    pub drag_sensitivity: f64,
    pub default_color: Color,
    pub default_line_width: f64,
    /// Slack below the main pane bottom that still counts as main pane.
    pub pane_hit_buffer_px: f64,
    /// Extra room below the main pane bottom before trendlines are clipped.
    pub pane_clip_margin_px: f64,
    /// Delay before redrawing after a cosmetic container mutation.
    pub cosmetic_redraw_delay_ms: u64,
    pub overlay_style: OverlayStyle,
    pub axis_marker_style: AxisMarkerStyle,
}

impl Default for TrendlineEngineConfig {
    fn default() -> Self {
        Self {
            main_pane: PaneId::MAIN,
            hover_tolerance: HitTolerance::HOVER,
            strict_tolerance: HitTolerance::STRICT,
            drag_sensitivity: 0.8,
            default_color: Color::rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0),
            default_line_width: 2.0,
            pane_hit_buffer_px: 10.0,
            pane_clip_margin_px: 0.0,
            cosmetic_redraw_delay_ms: 10,
            overlay_style: OverlayStyle::default(),
            axis_marker_style: AxisMarkerStyle::default(),
        }
    }
}

impl TrendlineEngineConfig {
    #[must_use]
    pub fn with_main_pane(mut self, pane: PaneId) -> Self {
        self.main_pane = pane;
        self
    }

    #[must_use]
    pub fn with_hover_tolerance(mut self, tolerance: HitTolerance) -> Self {
        self.hover_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_strict_tolerance(mut self, tolerance: HitTolerance) -> Self {
        self.strict_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_drag_sensitivity(mut self, sensitivity: f64) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    /// Sets color and width for newly drawn trendlines.
    #[must_use]
    pub fn with_default_stroke(mut self, color: Color, line_width: f64) -> Self {
        self.default_color = color;
        self.default_line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_pane_hit_buffer_px(mut self, buffer_px: f64) -> Self {
        self.pane_hit_buffer_px = buffer_px;
        self
    }

    #[must_use]
    pub fn with_pane_clip_margin_px(mut self, margin_px: f64) -> Self {
        self.pane_clip_margin_px = margin_px;
        self
    }

    #[must_use]
    pub fn with_cosmetic_redraw_delay_ms(mut self, delay_ms: u64) -> Self {
        self.cosmetic_redraw_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.overlay_style = style;
        self
    }

    #[must_use]
    pub fn with_axis_marker_style(mut self, style: AxisMarkerStyle) -> Self {
        self.axis_marker_style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_engine_config(self).map(|_| ())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
