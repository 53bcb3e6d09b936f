use crate::core::{LinearScale, PaneLayoutRegion};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Visible price window of one pane, laid out top (max) to bottom (min).
///
/// Native conversions only resolve inside the visible window and the pane's
/// pixel region; anything outside is left to the caller to extrapolate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    visible_min: f64,
    visible_max: f64,
}

impl PriceScale {
    pub fn new(price_min: f64, price_max: f64) -> ChartResult<Self> {
        if !price_min.is_finite() || !price_max.is_finite() || price_min == price_max {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        Ok(Self {
            visible_min: price_min.min(price_max),
            visible_max: price_min.max(price_max),
        })
    }

    /// Visible range as `(from, to)` with `from < to`.
    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_min, self.visible_max)
    }

    pub fn set_visible_range(&mut self, price_min: f64, price_max: f64) -> ChartResult<()> {
        *self = Self::new(price_min, price_max)?;
        Ok(())
    }

    #[must_use]
    pub fn price_to_pixel(self, price: f64, region: PaneLayoutRegion) -> Option<f64> {
        let linear = self.linear(region)?;
        if !linear.contains_domain(price) {
            return None;
        }
        linear.domain_to_pixel(price).ok()
    }

    #[must_use]
    pub fn pixel_to_price(self, pixel: f64, region: PaneLayoutRegion) -> Option<f64> {
        let linear = self.linear(region)?;
        if !linear.contains_pixel(pixel) {
            return None;
        }
        linear.pixel_to_domain(pixel).ok()
    }

    fn linear(self, region: PaneLayoutRegion) -> Option<LinearScale> {
        LinearScale::new(
            self.visible_max,
            self.visible_min,
            region.plot_top,
            region.plot_bottom,
        )
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::PriceScale;
    use crate::core::{PaneId, PaneLayoutRegion};

    fn region() -> PaneLayoutRegion {
        PaneLayoutRegion {
            pane_id: PaneId::new(0),
            plot_top: 0.0,
            plot_bottom: 300.0,
        }
    }

    #[test]
    fn conversion_resolves_only_inside_visible_window() {
        let scale = PriceScale::new(100.0, 200.0).expect("scale");
        assert!((scale.price_to_pixel(150.0, region()).expect("px") - 150.0).abs() <= 1e-9);
        assert!((scale.price_to_pixel(100.0, region()).expect("px") - 300.0).abs() <= 1e-9);
        assert!(scale.price_to_pixel(250.0, region()).is_none());
        assert!(scale.pixel_to_price(-10.0, region()).is_none());
    }

    #[test]
    fn moving_the_window_changes_native_resolution() {
        let mut scale = PriceScale::new(200.0, 100.0).expect("scale");
        assert_eq!(scale.visible_range(), (100.0, 200.0));
        scale.set_visible_range(200.0, 300.0).expect("visible");
        assert!(scale.price_to_pixel(150.0, region()).is_none());
        assert!((scale.pixel_to_price(0.0, region()).expect("price") - 300.0).abs() <= 1e-9);
        assert!(scale.set_visible_range(5.0, 5.0).is_err());
    }
}
