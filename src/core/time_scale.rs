use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Time axis model with separate loaded and visible ranges.
///
/// `loaded_*` is the span of bars the host actually holds. Native conversions
/// only resolve inside it, mirroring hosts that return "no coordinate" for
/// times without data. `visible_*` is the window currently laid out across
/// the plot width and may extend past the loaded data on either side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    loaded_start: f64,
    loaded_end: f64,
    visible_start: f64,
    visible_end: f64,
}

impl TimeScale {
    /// Creates a scale with matching loaded and visible ranges.
    pub fn new(time_start: f64, time_end: f64) -> ChartResult<Self> {
        let normalized = normalize_range(time_start, time_end, 1.0)?;
        Ok(Self {
            loaded_start: normalized.0,
            loaded_end: normalized.1,
            visible_start: normalized.0,
            visible_end: normalized.1,
        })
    }

    #[must_use]
    pub fn loaded_range(self) -> (f64, f64) {
        (self.loaded_start, self.loaded_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    /// Overrides the visible range without modifying the loaded range.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let normalized = normalize_range(start, end, 1e-9)?;
        self.visible_start = normalized.0;
        self.visible_end = normalized.1;
        Ok(())
    }

    /// Pans the visible range by an additive time delta.
    pub fn pan_visible_by_delta(&mut self, delta_time: f64) -> ChartResult<()> {
        if !delta_time.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }

        self.visible_start += delta_time;
        self.visible_end += delta_time;
        Ok(())
    }

    /// Native time → x conversion; `None` outside the loaded range.
    #[must_use]
    pub fn time_to_pixel(self, time: f64, width_px: f64) -> Option<f64> {
        if !time.is_finite() || time < self.loaded_start || time > self.loaded_end {
            return None;
        }
        self.visible_linear(width_px)?.domain_to_pixel(time).ok()
    }

    /// Native x → time conversion; `None` when the pixel resolves outside the
    /// loaded range.
    #[must_use]
    pub fn pixel_to_time(self, pixel: f64, width_px: f64) -> Option<f64> {
        let time = self.visible_linear(width_px)?.pixel_to_domain(pixel).ok()?;
        if time < self.loaded_start || time > self.loaded_end {
            return None;
        }
        Some(time)
    }

    fn visible_linear(self, width_px: f64) -> Option<LinearScale> {
        LinearScale::new(self.visible_start, self.visible_end, 0.0, width_px).ok()
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
