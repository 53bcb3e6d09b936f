use indexmap::IndexMap;
use tracing::trace;

use crate::core::host::{HostChart, PriceLineId, PriceLineOptions};
use crate::core::{PaneCollection, PaneId, PaneLayoutRegion, PriceScale, TimeScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// Headless in-memory host chart.
///
/// Behaves like a lightweight-charts style host: time conversion resolves
/// only inside the loaded bar range, price conversion only inside each pane's
/// visible window. Used by tests, benches and tooling that exercise the
/// trendline engine without a real chart.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    viewport: Viewport,
    device_pixel_ratio: f64,
    time_scale: Option<TimeScale>,
    panes: PaneCollection,
    price_scales: IndexMap<PaneId, PriceScale>,
    price_lines: IndexMap<PriceLineId, PriceLineOptions>,
    next_price_line_id: u64,
    reject_price_lines: bool,
}

impl SimulatedHost {
    /// Creates an empty host with a single main pane and no data yet.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            device_pixel_ratio: 1.0,
            time_scale: None,
            panes: PaneCollection::default(),
            price_scales: IndexMap::new(),
            price_lines: IndexMap::new(),
            next_price_line_id: 1,
            reject_price_lines: false,
        }
    }

    #[must_use]
    pub fn with_time_scale(mut self, time_scale: TimeScale) -> Self {
        self.time_scale = Some(time_scale);
        self
    }

    #[must_use]
    pub fn with_price_scale(mut self, pane: PaneId, price_scale: PriceScale) -> Self {
        self.price_scales.insert(pane, price_scale);
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Adds an indicator sub-pane below the existing panes.
    pub fn add_indicator_pane(
        &mut self,
        stretch_factor: f64,
        price_scale: PriceScale,
    ) -> ChartResult<PaneId> {
        let pane = self.panes.create_pane(stretch_factor)?;
        self.price_scales.insert(pane, price_scale);
        Ok(pane)
    }

    #[must_use]
    pub fn time_scale(&self) -> Option<TimeScale> {
        self.time_scale
    }

    pub fn time_scale_mut(&mut self) -> Option<&mut TimeScale> {
        self.time_scale.as_mut()
    }

    pub fn price_scale_mut(&mut self, pane: PaneId) -> Option<&mut PriceScale> {
        self.price_scales.get_mut(&pane)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// Makes every subsequent price-line call fail, to exercise recovery paths.
    pub fn set_reject_price_lines(&mut self, reject: bool) {
        self.reject_price_lines = reject;
    }

    #[must_use]
    pub fn price_lines(&self) -> &IndexMap<PriceLineId, PriceLineOptions> {
        &self.price_lines
    }

    #[must_use]
    pub fn price_line(&self, id: PriceLineId) -> Option<&PriceLineOptions> {
        self.price_lines.get(&id)
    }

    fn width_px(&self) -> f64 {
        f64::from(self.viewport.width)
    }

    fn ensure_price_lines_accepted(&self) -> ChartResult<()> {
        if self.reject_price_lines {
            return Err(ChartError::HostBridge(
                "price lines are not accepted by this host".to_owned(),
            ));
        }
        Ok(())
    }
}

impl HostChart for SimulatedHost {
    fn time_to_pixel(&self, time: f64) -> Option<f64> {
        self.time_scale?.time_to_pixel(time, self.width_px())
    }

    fn pixel_to_time(&self, x: f64) -> Option<f64> {
        self.time_scale?.pixel_to_time(x, self.width_px())
    }

    fn price_to_pixel(&self, pane: PaneId, price: f64) -> Option<f64> {
        let region = self.pane_region(pane)?;
        self.price_scales.get(&pane)?.price_to_pixel(price, region)
    }

    fn pixel_to_price(&self, pane: PaneId, y: f64) -> Option<f64> {
        let region = self.pane_region(pane)?;
        self.price_scales.get(&pane)?.pixel_to_price(y, region)
    }

    fn visible_time_range(&self) -> Option<(f64, f64)> {
        self.time_scale.map(TimeScale::visible_range)
    }

    fn visible_price_range(&self, pane: PaneId) -> Option<(f64, f64)> {
        self.price_scales.get(&pane).map(|scale| scale.visible_range())
    }

    fn pane_region(&self, pane: PaneId) -> Option<PaneLayoutRegion> {
        if !self.viewport.is_valid() {
            return None;
        }
        self.panes
            .region_of(pane, 0.0, f64::from(self.viewport.height))
    }

    fn plot_size(&self) -> Viewport {
        self.viewport
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn create_price_line(&mut self, options: &PriceLineOptions) -> ChartResult<PriceLineId> {
        self.ensure_price_lines_accepted()?;
        if !self.panes.contains(options.pane) {
            return Err(ChartError::HostBridge(format!(
                "pane {} has no series to attach a price line to",
                options.pane.raw()
            )));
        }
        let id = PriceLineId::new(self.next_price_line_id);
        self.next_price_line_id += 1;
        self.price_lines.insert(id, options.clone());
        trace!(id = id.raw(), price = options.price, "price line created");
        Ok(id)
    }

    fn update_price_line(&mut self, id: PriceLineId, price: f64, title: &str) -> ChartResult<()> {
        self.ensure_price_lines_accepted()?;
        let line = self.price_lines.get_mut(&id).ok_or_else(|| {
            ChartError::HostBridge(format!("unknown price line {}", id.raw()))
        })?;
        line.price = price;
        title.clone_into(&mut line.title);
        Ok(())
    }

    fn remove_price_line(&mut self, id: PriceLineId) -> ChartResult<()> {
        self.ensure_price_lines_accepted()?;
        self.price_lines
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| ChartError::HostBridge(format!("unknown price line {}", id.raw())))
    }
}
