use tracing::{debug, trace};

use crate::core::{HostChart, PixelPoint};
use crate::extensions::sync_axis_markers;
use crate::interaction::{DragMode, HitTarget, TrendlineHit};
use crate::render::{CursorStyle, OverlaySurface, PointerPolicy};

use super::TrendlineEngine;

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Selects the hit trendline and starts dragging the hit part.
    pub(super) fn begin_drag(&mut self, hit: TrendlineHit, pixel: PixelPoint) {
        let offset = match hit.target {
            // Keeps the grab point under the cursor instead of snapping the
            // start point to it.
            HitTarget::Line => self
                .trendlines
                .get(&hit.trendline_id)
                .and_then(|trendline| self.mapper().to_pixel(trendline.start_point))
                .map_or(PixelPoint::default(), |start| {
                    PixelPoint::new(pixel.x - start.x, pixel.y - start.y)
                }),
            HitTarget::Start | HitTarget::End => PixelPoint::default(),
        };

        self.drag_mode = hit.target.into();
        self.drag_start_pos = Some(pixel);
        self.drag_offset = Some(offset);
        for trendline in self.trendlines.values_mut() {
            let is_hit = trendline.id == hit.trendline_id;
            trendline.is_selected = is_hit;
            trendline.is_dragging = is_hit;
        }
        debug!(trendline = %hit.trendline_id, mode = ?self.drag_mode, "drag started");
        self.selected_trendline_id = Some(hit.trendline_id);
        self.push_pointer_state(PointerPolicy::Intercept, CursorStyle::Grabbing);
        self.commit();
    }

    /// Applies pointer motion to the dragged trendline.
    ///
    /// Endpoint drags move the endpoint to the pointer. Line drags translate
    /// both endpoints by the same pixel delta, damped by
    /// `drag_sensitivity`, so the on-screen length and angle are kept.
    pub(super) fn drag_pointer_move(&mut self, pixel: PixelPoint) -> bool {
        if self.drag_mode == DragMode::None || self.drag_start_pos.is_none() {
            return false;
        }
        let Some(id) = self.selected_trendline_id.clone() else {
            return false;
        };
        let Some(current) = self.trendlines.get(&id) else {
            return false;
        };

        let mapper = self.mapper();
        let (start_point, end_point) = match self.drag_mode {
            DragMode::None => return false,
            DragMode::Start => (mapper.to_domain(pixel), current.end_point),
            DragMode::End => (current.start_point, mapper.to_domain(pixel)),
            DragMode::Line => {
                let Some(offset) = self.drag_offset else {
                    return false;
                };
                let Some((start_px, end_px)) = self.resolve_pixels(current) else {
                    return false;
                };
                let sensitivity = self.config.drag_sensitivity;
                let dx = (pixel.x - offset.x - start_px.x) * sensitivity;
                let dy = (pixel.y - offset.y - start_px.y) * sensitivity;
                trace!(dx, dy, "line drag delta");
                (
                    mapper.to_domain(start_px.offset_by(dx, dy)),
                    mapper.to_domain(end_px.offset_by(dx, dy)),
                )
            }
        };

        let Some(trendline) = self.trendlines.get_mut(&id) else {
            return false;
        };
        trendline.start_point = start_point;
        trendline.end_point = end_point;
        sync_axis_markers(&mut self.host, trendline);
        self.commit();
        true
    }

    /// Ends an active drag, keeping the trendline selected.
    pub(super) fn end_drag(&mut self) -> bool {
        if self.drag_mode == DragMode::None {
            return false;
        }
        debug!(mode = ?self.drag_mode, "drag finished");
        self.end_drag_state();
        for trendline in self.trendlines.values_mut() {
            trendline.is_dragging = false;
        }
        self.commit();
        true
    }
}
