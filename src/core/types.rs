use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

/// Plot-area size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Backing-store size for a device pixel ratio, rounded up.
    #[must_use]
    pub fn scaled(self, device_pixel_ratio: f64) -> (u32, u32) {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        (
            (f64::from(self.width) * ratio).ceil() as u32,
            (f64::from(self.height) * ratio).ceil() as u32,
        )
    }
}

/// Location in chart domain space.
///
/// `time` uses the host's horizontal scalar (unix seconds in this crate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainPoint {
    pub time: f64,
    pub price: f64,
}

impl DomainPoint {
    #[must_use]
    pub const fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> ChartResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            price: decimal_to_f64(price, "price")?,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.time.is_finite() && self.price.is_finite()
    }
}

/// Location in overlay pixel space. Always derived, never stored as truth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn offset_by(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use super::{DomainPoint, PixelPoint, Viewport};

    #[test]
    fn decimal_time_point_uses_unix_seconds() {
        let time = chrono::Utc
            .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let point = DomainPoint::from_decimal_time(time, Decimal::new(15025, 2)).expect("point");
        assert!((point.time - 1_704_153_600.0).abs() <= 1e-9);
        assert!((point.price - 150.25).abs() <= 1e-9);
    }

    #[test]
    fn scaled_viewport_rounds_up_backing_size() {
        assert_eq!(Viewport::new(101, 50).scaled(1.5), (152, 75));
        assert_eq!(Viewport::new(100, 50).scaled(f64::NAN), (100, 50));
    }

    #[test]
    fn pixel_distance_is_euclidean() {
        let a = PixelPoint::new(0.0, 0.0);
        assert!((a.distance_to(PixelPoint::new(3.0, 4.0)) - 5.0).abs() <= 1e-12);
    }
}
