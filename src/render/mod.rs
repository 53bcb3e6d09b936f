mod clip;
mod frame;
mod null_surface;
mod primitives;

pub use clip::clip_segment_to_bottom;
pub use frame::OverlayFrame;
pub use null_surface::NullSurface;
pub use primitives::{CircleOutline, CirclePrimitive, Color, LinePrimitive, LineStrokeStyle};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Whether the overlay should receive pointer events or let them fall
/// through to the chart underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerPolicy {
    Intercept,
    #[default]
    PassThrough,
}

/// Cursor hint pushed alongside the pointer policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Grab,
    Grabbing,
}

/// Contract implemented by any overlay backend.
///
/// Backends receive a fully materialized `OverlayFrame`; each `render` call
/// replaces the previous overlay content entirely.
pub trait OverlaySurface {
    /// Resizes the backing store to `viewport × device_pixel_ratio`.
    fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f64) -> ChartResult<()>;
    fn render(&mut self, frame: &OverlayFrame) -> ChartResult<()>;
    fn set_pointer_policy(&mut self, policy: PointerPolicy, cursor: CursorStyle);
    /// Releases the surface. No further calls follow.
    fn detach(&mut self);
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoOverlayRenderer, CairoRenderStats};
