//! Host chart bridge.
//!
//! The overlay never owns chart scales. Everything it knows about the
//! underlying chart (coordinate conversion, visible windows, pane geometry,
//! price-axis annotations) goes through [`HostChart`].

use serde::{Deserialize, Serialize};

use crate::core::{PaneId, PaneLayoutRegion, Viewport};
use crate::error::ChartResult;
use crate::render::Color;

/// Handle of a host-native price line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceLineId(u64);

impl PriceLineId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PriceLineStyle {
    Solid,
    #[default]
    Dotted,
    Dashed,
}

/// Options for a horizontal price-axis marker tied to a pane's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineOptions {
    pub pane: PaneId,
    pub price: f64,
    pub color: Color,
    pub line_width: f64,
    pub line_style: PriceLineStyle,
    pub axis_label_visible: bool,
    pub title: String,
    pub axis_label_color: Color,
    pub axis_label_text_color: Color,
}

/// Primitives the trendline engine requires from the chart it decorates.
///
/// Conversions return `None` when the host cannot resolve the value, typically
/// because it lies outside the loaded data or visible window. Pixel values
/// are CSS pixels relative to the top-left corner of the plot area.
pub trait HostChart {
    fn time_to_pixel(&self, time: f64) -> Option<f64>;
    fn pixel_to_time(&self, x: f64) -> Option<f64>;
    fn price_to_pixel(&self, pane: PaneId, price: f64) -> Option<f64>;
    fn pixel_to_price(&self, pane: PaneId, y: f64) -> Option<f64>;

    /// Visible time window as `(from, to)`, if the chart has one yet.
    fn visible_time_range(&self) -> Option<(f64, f64)>;
    /// Visible price window of `pane` as `(from, to)` with `from` at the bottom.
    fn visible_price_range(&self, pane: PaneId) -> Option<(f64, f64)>;
    fn pane_region(&self, pane: PaneId) -> Option<PaneLayoutRegion>;

    fn plot_size(&self) -> Viewport;
    fn device_pixel_ratio(&self) -> f64;

    fn create_price_line(&mut self, options: &PriceLineOptions) -> ChartResult<PriceLineId>;
    fn update_price_line(&mut self, id: PriceLineId, price: f64, title: &str) -> ChartResult<()>;
    fn remove_price_line(&mut self, id: PriceLineId) -> ChartResult<()>;
}
