use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CursorStyle, OverlayFrame, OverlaySurface, PointerPolicy};

/// Headless overlay surface used by tests and host-less engine usage.
///
/// It still validates frame content so tests catch invalid geometry, and it
/// keeps the last frame plus the pointer state the engine pushed.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub size: Option<(Viewport, f64)>,
    pub last_frame: Option<OverlayFrame>,
    pub render_count: usize,
    pub resize_count: usize,
    pub pointer_policy: PointerPolicy,
    pub cursor: CursorStyle,
    pub pointer_policy_changes: usize,
    pub detached: bool,
}

impl NullSurface {
    #[must_use]
    pub fn last_line_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.lines.len())
    }

    #[must_use]
    pub fn last_circle_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.circles.len())
    }
}

impl OverlaySurface for NullSurface {
    fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f64) -> ChartResult<()> {
        if self.detached {
            return Err(ChartError::Surface("surface is detached".to_owned()));
        }
        self.size = Some((viewport, device_pixel_ratio));
        self.resize_count += 1;
        Ok(())
    }

    fn render(&mut self, frame: &OverlayFrame) -> ChartResult<()> {
        if self.detached {
            return Err(ChartError::Surface("surface is detached".to_owned()));
        }
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.render_count += 1;
        Ok(())
    }

    fn set_pointer_policy(&mut self, policy: PointerPolicy, cursor: CursorStyle) {
        self.pointer_policy = policy;
        self.cursor = cursor;
        self.pointer_policy_changes += 1;
    }

    fn detach(&mut self) {
        self.detached = true;
        self.last_frame = None;
    }
}
