use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive};

/// Backend-agnostic scene for one overlay draw pass.
///
/// Coordinates are CSS pixels. Backends size their backing store to
/// `viewport × device_pixel_ratio` and apply one uniform scale before
/// drawing. Lines are drawn first, then circles, each in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub viewport: Viewport,
    pub device_pixel_ratio: f64,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
}

impl OverlayFrame {
    #[must_use]
    pub fn new(viewport: Viewport, device_pixel_ratio: f64) -> Self {
        Self {
            viewport,
            device_pixel_ratio,
            lines: Vec::new(),
            circles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    /// Backing-store size in device pixels.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        self.viewport.scaled(self.device_pixel_ratio)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }

        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.circles.is_empty()
    }
}
