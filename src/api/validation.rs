use crate::error::{ChartError, ChartResult};
use crate::interaction::HitTolerance;
use crate::render::Color;

use super::{OverlayStyle, TrendlineEngineConfig};

pub(super) fn validate_engine_config(
    config: &TrendlineEngineConfig,
) -> ChartResult<&TrendlineEngineConfig> {
    validate_tolerance("hover_tolerance", config.hover_tolerance)?;
    validate_tolerance("strict_tolerance", config.strict_tolerance)?;

    if !config.drag_sensitivity.is_finite()
        || config.drag_sensitivity <= 0.0
        || config.drag_sensitivity > 1.0
    {
        return Err(ChartError::InvalidConfig(
            "drag sensitivity must be finite and in (0, 1]".to_owned(),
        ));
    }

    validate_color("default_color", config.default_color)?;
    validate_positive("default_line_width", config.default_line_width)?;
    validate_non_negative("pane_hit_buffer_px", config.pane_hit_buffer_px)?;
    validate_non_negative("pane_clip_margin_px", config.pane_clip_margin_px)?;
    validate_overlay_style(config.overlay_style)?;
    config.axis_marker_style.validate()?;

    Ok(config)
}

fn validate_tolerance(name: &str, tolerance: HitTolerance) -> ChartResult<HitTolerance> {
    if !tolerance.is_valid() {
        return Err(ChartError::InvalidConfig(format!(
            "{name} radii must be finite and >= 0"
        )));
    }
    Ok(tolerance)
}

fn validate_overlay_style(style: OverlayStyle) -> ChartResult<OverlayStyle> {
    for (name, value) in [
        ("selected_width_bonus_px", style.selected_width_bonus_px),
        ("dragging_width_bonus_px", style.dragging_width_bonus_px),
        ("preview_gap_px", style.preview_gap_px),
    ] {
        validate_non_negative(name, value)?;
    }
    for (name, value) in [
        ("preview_dash_px", style.preview_dash_px),
        ("endpoint_radius_px", style.endpoint_radius_px),
        ("selected_endpoint_radius_px", style.selected_endpoint_radius_px),
        ("dragging_endpoint_radius_px", style.dragging_endpoint_radius_px),
        ("endpoint_outline_width_px", style.endpoint_outline_width_px),
        ("grab_handle_outer_radius_px", style.grab_handle_outer_radius_px),
        ("grab_handle_inner_radius_px", style.grab_handle_inner_radius_px),
        ("grab_handle_outline_width_px", style.grab_handle_outline_width_px),
    ] {
        validate_positive(name, value)?;
    }
    for (name, value) in [
        ("dragging_alpha", style.dragging_alpha),
        ("preview_alpha", style.preview_alpha),
        ("grab_handle_outer_alpha", style.grab_handle_outer_alpha),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ChartError::InvalidConfig(format!(
                "overlay style {name} must be finite and in [0, 1]"
            )));
        }
    }
    validate_color("endpoint_outline_color", style.endpoint_outline_color)?;
    validate_color("accent_color", style.accent_color)?;
    Ok(style)
}

fn validate_color(name: &str, color: Color) -> ChartResult<Color> {
    color
        .validate()
        .map_err(|err| ChartError::InvalidConfig(format!("{name}: {err}")))?;
    Ok(color)
}

fn validate_positive(name: &str, value: f64) -> ChartResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(value)
}

fn validate_non_negative(name: &str, value: f64) -> ChartResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(value)
}
