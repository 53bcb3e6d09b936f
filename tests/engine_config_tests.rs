use chart_trendlines::ChartError;
use chart_trendlines::api::{OverlayStyle, TrendlineEngineConfig};
use chart_trendlines::core::PaneId;
use chart_trendlines::extensions::AxisMarkerStyle;
use chart_trendlines::interaction::HitTolerance;
use chart_trendlines::render::Color;

#[test]
fn default_config_is_valid_and_matches_documented_values() {
    let config = TrendlineEngineConfig::default();
    config.validate().expect("default config");
    assert_eq!(config.main_pane, PaneId::MAIN);
    assert_eq!(config.hover_tolerance, HitTolerance::HOVER);
    assert_eq!(config.strict_tolerance, HitTolerance::STRICT);
    assert_eq!(config.default_color, Color::from_hex("#3b82f6").expect("hex"));
    assert!((config.drag_sensitivity - 0.8).abs() <= 1e-12);
    assert!((config.pane_hit_buffer_px - 10.0).abs() <= 1e-12);
    assert_eq!(config.cosmetic_redraw_delay_ms, 10);
}

#[test]
fn config_json_round_trip() {
    let config = TrendlineEngineConfig::default()
        .with_main_pane(PaneId::new(2))
        .with_drag_sensitivity(0.5)
        .with_default_stroke(Color::rgb(1.0, 0.0, 0.0), 3.0)
        .with_pane_clip_margin_px(4.0);
    let json = config.to_json_pretty().expect("serialize");
    let restored = TrendlineEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = TrendlineEngineConfig::from_json_str(r#"{ "drag_sensitivity": 1.0 }"#)
        .expect("partial config");
    assert!((config.drag_sensitivity - 1.0).abs() <= 1e-12);
    assert_eq!(config.hover_tolerance, HitTolerance::HOVER);
    assert_eq!(config.overlay_style, OverlayStyle::default());
    assert_eq!(config.axis_marker_style, AxisMarkerStyle::default());
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = TrendlineEngineConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn out_of_range_values_are_invalid_config() {
    let cases = [
        TrendlineEngineConfig::default().with_drag_sensitivity(0.0),
        TrendlineEngineConfig::default().with_drag_sensitivity(1.5),
        TrendlineEngineConfig::default().with_drag_sensitivity(f64::NAN),
        TrendlineEngineConfig::default().with_hover_tolerance(HitTolerance {
            point_radius_px: -1.0,
            line_tolerance_px: 8.0,
        }),
        TrendlineEngineConfig::default().with_default_stroke(Color::WHITE, 0.0),
        TrendlineEngineConfig::default().with_pane_hit_buffer_px(f64::INFINITY),
        TrendlineEngineConfig::default().with_overlay_style(OverlayStyle {
            preview_alpha: 1.5,
            ..OverlayStyle::default()
        }),
        TrendlineEngineConfig::default().with_axis_marker_style(AxisMarkerStyle {
            line_width: 0.0,
            ..AxisMarkerStyle::default()
        }),
    ];
    for config in cases {
        let err = config.validate().expect_err("must be rejected");
        assert!(matches!(err, ChartError::InvalidConfig(_)), "{err}");
    }
}

#[test]
fn json_with_invalid_values_is_rejected() {
    let err = TrendlineEngineConfig::from_json_str(r#"{ "default_line_width": -2.0 }"#)
        .expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}
