use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{HostChart, PaneId, PriceLineId, PriceLineOptions, PriceLineStyle};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Trendline;
use crate::render::Color;

/// Appearance of the price-axis markers mirroring trendline endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisMarkerStyle {
    /// Alpha applied to the trendline color for the horizontal line.
    pub line_alpha: f64,
    /// Alpha applied to the trendline color for the axis label background.
    pub label_alpha: f64,
    pub line_width: f64,
    pub line_style: PriceLineStyle,
    pub axis_label_visible: bool,
    pub axis_label_text_color: Color,
}

impl Default for AxisMarkerStyle {
    fn default() -> Self {
        Self {
            line_alpha: 0.5,
            label_alpha: 0.25,
            line_width: 1.0,
            line_style: PriceLineStyle::Dotted,
            axis_label_visible: true,
            axis_label_text_color: Color::rgb(0.82, 0.83, 0.86),
        }
    }
}

impl AxisMarkerStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, alpha) in [("line_alpha", self.line_alpha), ("label_alpha", self.label_alpha)] {
            if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
                return Err(ChartError::InvalidConfig(format!(
                    "axis marker {name} must be finite and in [0, 1]"
                )));
            }
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "axis marker line width must be finite and > 0".to_owned(),
            ));
        }
        self.axis_label_text_color
            .validate()
            .map_err(|err| ChartError::InvalidConfig(format!("axis label text color: {err}")))?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    fn suffix(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
        }
    }
}

/// Axis label title for one endpoint, e.g. `T0042 Start`.
#[must_use]
pub fn axis_marker_title(trendline: &Trendline, start: bool) -> String {
    let endpoint = if start { Endpoint::Start } else { Endpoint::End };
    format!("T{} {}", trendline.id.short_label(), endpoint.suffix())
}

fn marker_options(
    trendline: &Trendline,
    pane: PaneId,
    style: &AxisMarkerStyle,
    endpoint: Endpoint,
) -> PriceLineOptions {
    let price = match endpoint {
        Endpoint::Start => trendline.start_point.price,
        Endpoint::End => trendline.end_point.price,
    };
    PriceLineOptions {
        pane,
        price,
        color: trendline.color.with_alpha(style.line_alpha),
        line_width: style.line_width,
        line_style: style.line_style,
        axis_label_visible: style.axis_label_visible,
        title: axis_marker_title(trendline, endpoint == Endpoint::Start),
        axis_label_color: trendline.color.with_alpha(style.label_alpha),
        axis_label_text_color: style.axis_label_text_color,
    }
}

/// Creates the start and end price-axis markers of a freshly committed
/// trendline. A marker the host refuses is left unset.
pub fn attach_axis_markers<H: HostChart + ?Sized>(
    host: &mut H,
    pane: PaneId,
    trendline: &mut Trendline,
    style: &AxisMarkerStyle,
) {
    trendline.start_axis_marker = create_marker(host, pane, trendline, style, Endpoint::Start);
    trendline.end_axis_marker = create_marker(host, pane, trendline, style, Endpoint::End);
    debug!(
        trendline = %trendline.id,
        start = trendline.start_axis_marker.is_some(),
        end = trendline.end_axis_marker.is_some(),
        "axis markers attached"
    );
}

fn create_marker<H: HostChart + ?Sized>(
    host: &mut H,
    pane: PaneId,
    trendline: &Trendline,
    style: &AxisMarkerStyle,
    endpoint: Endpoint,
) -> Option<PriceLineId> {
    let options = marker_options(trendline, pane, style, endpoint);
    match host.create_price_line(&options) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!(
                trendline = %trendline.id,
                endpoint = endpoint.suffix(),
                error = %err,
                "failed to create axis marker"
            );
            None
        }
    }
}

/// Moves both markers to the trendline's current endpoint prices.
pub fn sync_axis_markers<H: HostChart + ?Sized>(host: &mut H, trendline: &Trendline) {
    for (marker, endpoint, price) in [
        (trendline.start_axis_marker, Endpoint::Start, trendline.start_point.price),
        (trendline.end_axis_marker, Endpoint::End, trendline.end_point.price),
    ] {
        let Some(marker) = marker else {
            continue;
        };
        let title = axis_marker_title(trendline, endpoint == Endpoint::Start);
        if let Err(err) = host.update_price_line(marker, price, &title) {
            warn!(
                trendline = %trendline.id,
                endpoint = endpoint.suffix(),
                error = %err,
                "failed to update axis marker"
            );
        }
    }
}

/// Removes both markers through the host and clears the handles.
pub fn release_axis_markers<H: HostChart + ?Sized>(host: &mut H, trendline: &mut Trendline) {
    for (marker, endpoint) in [
        (trendline.start_axis_marker.take(), Endpoint::Start),
        (trendline.end_axis_marker.take(), Endpoint::End),
    ] {
        let Some(marker) = marker else {
            continue;
        };
        if let Err(err) = host.remove_price_line(marker) {
            warn!(
                trendline = %trendline.id,
                endpoint = endpoint.suffix(),
                error = %err,
                "failed to remove axis marker"
            );
        }
    }
}
