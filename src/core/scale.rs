use crate::error::{ChartError, ChartResult};

/// Linear mapping between a domain interval and a pixel interval.
///
/// `domain_start` maps to `pixel_start` and `domain_end` to `pixel_end`, so a
/// price axis is expressed by passing the visible maximum as `domain_start`
/// and the pane top as `pixel_start`. Projection is unbounded on both sides,
/// which is what trendline extrapolation relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    /// Signed domain units covered by one pixel.
    #[must_use]
    pub fn units_per_pixel(self) -> f64 {
        (self.domain_end - self.domain_start) / (self.pixel_end - self.pixel_start)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        Ok(self.pixel_start + (value - self.domain_start) / self.units_per_pixel())
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        Ok(self.domain_start + (pixel - self.pixel_start) * self.units_per_pixel())
    }

    #[must_use]
    pub fn contains_domain(self, value: f64) -> bool {
        let (low, high) = ordered(self.domain_start, self.domain_end);
        value >= low && value <= high
    }

    #[must_use]
    pub fn contains_pixel(self, pixel: f64) -> bool {
        let (low, high) = ordered(self.pixel_start, self.pixel_end);
        pixel >= low && pixel <= high
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
