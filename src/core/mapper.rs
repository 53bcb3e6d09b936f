use tracing::warn;

use crate::core::host::HostChart;
use crate::core::{DomainPoint, LinearScale, PaneId, PixelPoint};

/// Price window assumed when the host has not laid out a price scale yet.
pub const DEFAULT_PRICE_WINDOW: (f64, f64) = (0.0, 200.0);
/// Price reported for any pixel when neither a price range nor a pane height
/// is available.
pub const PLACEHOLDER_PRICE: f64 = 100.0;

/// Bidirectional domain ↔ pixel conversion for one pane of the host chart.
///
/// Native host conversions are tried first. When the host declines (the
/// point is outside loaded data or the visible window) the mapper projects
/// linearly from the visible window so trendline endpoints keep moving with
/// the chart instead of snapping or disappearing.
///
/// Nothing is cached: every call re-reads the host's current scales.
#[derive(Clone, Copy)]
pub struct CoordinateMapper<'a, H: HostChart + ?Sized> {
    host: &'a H,
    pane: PaneId,
}

impl<'a, H: HostChart + ?Sized> CoordinateMapper<'a, H> {
    #[must_use]
    pub fn new(host: &'a H, pane: PaneId) -> Self {
        Self { host, pane }
    }

    #[must_use]
    pub fn pane(&self) -> PaneId {
        self.pane
    }

    /// Projects a domain point to overlay pixels.
    ///
    /// Returns `None` only when the point itself is not finite.
    #[must_use]
    pub fn to_pixel(&self, point: DomainPoint) -> Option<PixelPoint> {
        if !point.is_finite() {
            return None;
        }
        let x = self
            .host
            .time_to_pixel(point.time)
            .filter(|x| x.is_finite())
            .unwrap_or_else(|| self.extrapolate_x(point.time));
        let y = self
            .host
            .price_to_pixel(self.pane, point.price)
            .filter(|y| y.is_finite())
            .unwrap_or_else(|| self.extrapolate_y(point.price));
        Some(PixelPoint::new(x, y))
    }

    /// Maps an overlay pixel back to domain space. Always yields a point.
    #[must_use]
    pub fn to_domain(&self, pixel: PixelPoint) -> DomainPoint {
        let time = self
            .host
            .pixel_to_time(pixel.x)
            .filter(|time| time.is_finite())
            .unwrap_or_else(|| self.extrapolate_time(pixel.x));
        let price = self
            .host
            .pixel_to_price(self.pane, pixel.y)
            .filter(|price| price.is_finite())
            .unwrap_or_else(|| self.extrapolate_price(pixel.y));
        DomainPoint::new(time, price)
    }

    /// Pixel y of the bottom edge of the pane's visible price window.
    #[must_use]
    pub fn visible_price_floor_y(&self) -> Option<f64> {
        let (from, _) = self.host.visible_price_range(self.pane)?;
        if !from.is_finite() {
            return None;
        }
        let y = self
            .host
            .price_to_pixel(self.pane, from)
            .filter(|y| y.is_finite())
            .unwrap_or_else(|| self.extrapolate_y(from));
        Some(y)
    }

    fn time_scale(&self) -> Option<LinearScale> {
        let (from, to) = self.host.visible_time_range()?;
        let width = f64::from(self.host.plot_size().width);
        LinearScale::new(from, to, 0.0, width).ok()
    }

    fn price_scale(&self) -> Option<LinearScale> {
        let (top, bottom) = self.pane_bounds()?;
        let (from, to) = self
            .host
            .visible_price_range(self.pane)
            .filter(|(from, to)| from.is_finite() && to.is_finite() && from != to)
            .unwrap_or_else(|| {
                warn!(
                    pane = self.pane.raw(),
                    "no visible price range; assuming default price window"
                );
                DEFAULT_PRICE_WINDOW
            });
        LinearScale::new(to, from, top, bottom).ok()
    }

    fn pane_bounds(&self) -> Option<(f64, f64)> {
        if let Some(region) = self.host.pane_region(self.pane) {
            if region.height() > 0.0 {
                return Some((region.plot_top, region.plot_bottom));
            }
        }
        let height = f64::from(self.host.plot_size().height);
        (height > 0.0).then_some((0.0, height))
    }

    fn extrapolate_x(&self, time: f64) -> f64 {
        match self.time_scale().and_then(|scale| scale.domain_to_pixel(time).ok()) {
            Some(x) => x,
            None => {
                warn!(time, "no usable visible time range; placing point at x=0");
                0.0
            }
        }
    }

    fn extrapolate_time(&self, x: f64) -> f64 {
        match self.time_scale().and_then(|scale| scale.pixel_to_domain(x).ok()) {
            Some(time) => time,
            None => {
                warn!(x, "no usable visible time range; resolving time as 0");
                0.0
            }
        }
    }

    fn extrapolate_y(&self, price: f64) -> f64 {
        match self.price_scale().and_then(|scale| scale.domain_to_pixel(price).ok()) {
            Some(y) => y,
            None => {
                warn!(price, pane = self.pane.raw(), "pane has no height; placing point at y=0");
                0.0
            }
        }
    }

    fn extrapolate_price(&self, y: f64) -> f64 {
        match self.price_scale().and_then(|scale| scale.pixel_to_domain(y).ok()) {
            Some(price) => price,
            None => {
                warn!(y, pane = self.pane.raw(), "pane has no height; using placeholder price");
                PLACEHOLDER_PRICE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoordinateMapper;
    use crate::core::{
        DomainPoint, PaneId, PixelPoint, PriceScale, SimulatedHost, TimeScale, Viewport,
    };

    fn host() -> SimulatedHost {
        let mut time = TimeScale::new(1000.0, 1500.0).expect("time scale");
        time.set_visible_range(1000.0, 2000.0).expect("visible");
        SimulatedHost::new(Viewport::new(500, 400))
            .with_time_scale(time)
            .with_price_scale(PaneId::MAIN, PriceScale::new(100.0, 200.0).expect("price"))
    }

    #[test]
    fn extrapolates_time_past_loaded_data() {
        let host = host();
        let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
        let right = mapper.to_pixel(DomainPoint::new(1750.0, 150.0)).expect("pixel");
        assert!((right.x - 375.0).abs() <= 1e-9);
        let left = mapper.to_pixel(DomainPoint::new(500.0, 150.0)).expect("pixel");
        assert!((left.x + 250.0).abs() <= 1e-9);
        assert!((mapper.to_domain(PixelPoint::new(750.0, 0.0)).time - 2500.0).abs() <= 1e-9);
    }

    #[test]
    fn extrapolates_price_above_and_below_window() {
        let host = host();
        let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
        let above = mapper.to_pixel(DomainPoint::new(1200.0, 250.0)).expect("pixel");
        assert!((above.y + 200.0).abs() <= 1e-9);
        let below = mapper.to_domain(PixelPoint::new(10.0, 600.0));
        assert!((below.price - 50.0).abs() <= 1e-9);
    }

    #[test]
    fn empty_host_falls_back_to_placeholders() {
        let host = SimulatedHost::new(Viewport::new(0, 0));
        let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
        let pixel = mapper.to_pixel(DomainPoint::new(1.0, 2.0)).expect("pixel");
        assert_eq!(pixel, PixelPoint::new(0.0, 0.0));
        let domain = mapper.to_domain(PixelPoint::new(40.0, 40.0));
        assert_eq!(domain, DomainPoint::new(0.0, 100.0));
    }

    #[test]
    fn missing_price_scale_uses_default_window() {
        let host = SimulatedHost::new(Viewport::new(500, 400));
        let mapper = CoordinateMapper::new(&host, PaneId::MAIN);
        let domain = mapper.to_domain(PixelPoint::new(0.0, 200.0));
        assert!((domain.price - 100.0).abs() <= 1e-9);
        assert!(mapper.to_pixel(DomainPoint::new(f64::NAN, 1.0)).is_none());
    }
}
