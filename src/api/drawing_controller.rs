use chrono::Utc;
use tracing::{debug, trace, warn};

use crate::core::{DomainPoint, HostChart, PixelPoint};
use crate::extensions::attach_axis_markers;
use crate::interaction::{PendingTrendline, TrendlineId};
use crate::render::{CursorStyle, OverlaySurface, PointerPolicy};

use super::TrendlineEngine;

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Enters drawing mode: the next two clicks in the main pane define a
    /// trendline. Clears the current selection.
    pub fn start_drawing(&mut self) {
        if !self.enter() {
            return;
        }
        self.is_drawing = true;
        self.current_trendline = None;
        self.preview_end_point = None;
        self.context_menu = None;
        self.clear_selection();
        self.push_pointer_state(PointerPolicy::Intercept, CursorStyle::Crosshair);
        debug!("drawing mode started");
        self.commit();
    }

    /// Leaves drawing mode, discarding any half-drawn trendline.
    ///
    /// Pointer capture is left to hover detection so existing trendlines
    /// stay draggable.
    pub fn stop_drawing(&mut self) {
        if !self.enter() {
            return;
        }
        if !self.is_drawing && self.current_trendline.is_none() && self.preview_end_point.is_none()
        {
            return;
        }
        self.is_drawing = false;
        self.current_trendline = None;
        self.preview_end_point = None;
        debug!("drawing mode stopped");
        self.commit();
    }

    /// First click records the start point, second click commits the
    /// trendline and leaves drawing mode.
    pub(super) fn drawing_pointer_down(&mut self, point: DomainPoint) {
        match self.current_trendline.take() {
            None => {
                let pending = PendingTrendline {
                    id: self.ids.next_id(Utc::now()),
                    start_point: point,
                    color: self.config.default_color,
                    line_width: self.config.default_line_width,
                };
                debug!(trendline = %pending.id, time = point.time, price = point.price, "trendline started");
                self.current_trendline = Some(pending);
                self.preview_end_point = None;
            }
            Some(pending) if pending.start_point.is_finite() => {
                let mut trendline = pending.commit(point);
                attach_axis_markers(
                    &mut self.host,
                    self.config.main_pane,
                    &mut trendline,
                    &self.config.axis_marker_style,
                );
                debug!(
                    trendline = %trendline.id,
                    total = self.trendlines.len() + 1,
                    "trendline committed; leaving drawing mode"
                );
                self.trendlines.insert(trendline.id.clone(), trendline);
                self.preview_end_point = None;
                self.is_drawing = false;
            }
            Some(pending) => {
                warn!(trendline = %pending.id, "unexpected pending trendline; resetting");
                self.preview_end_point = None;
            }
        }
        self.commit();
    }

    /// Updates the dashed preview while waiting for the end point.
    pub(super) fn drawing_pointer_move(&mut self, pixel: PixelPoint) -> bool {
        if !self.is_drawing || self.current_trendline.is_none() {
            return false;
        }
        let point = self.mapper().to_domain(pixel);
        trace!(time = point.time, price = point.price, "preview updated");
        self.preview_end_point = Some(point);
        self.redraw();
        true
    }

    /// Id the next drawn trendline will carry, if a draw is in progress.
    #[must_use]
    pub fn pending_trendline_id(&self) -> Option<&TrendlineId> {
        self.current_trendline.as_ref().map(|pending| &pending.id)
    }
}
