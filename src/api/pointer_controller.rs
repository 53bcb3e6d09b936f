use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{HostChart, PixelPoint};
use crate::interaction::{
    ContextMenuRequest, DragMode, HitTarget, HitTolerance, PointerButton, PointerEvent,
    TrendlineHit, distance_to_segment, hit_test,
};
use crate::render::{CursorStyle, OverlaySurface, PointerPolicy};

use super::TrendlineEngine;

/// What the engine did with one routed pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerOutcome {
    /// The overlay handled the event; the host should not forward it to the
    /// chart.
    pub consumed: bool,
    pub policy: PointerPolicy,
    pub cursor: CursorStyle,
    pub context_menu: Option<ContextMenuRequest>,
}

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    #[must_use]
    pub fn pointer_policy(&self) -> PointerPolicy {
        self.pointer_state.0
    }

    #[must_use]
    pub fn cursor_style(&self) -> CursorStyle {
        self.pointer_state.1
    }

    /// Primary button press. Returns whether the overlay consumed it.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if !self.enter() {
            return false;
        }
        self.context_menu = None;
        if !self.is_in_main_pane(y) {
            debug!(y, "pointer down below main pane ignored");
            return false;
        }
        let pixel = PixelPoint::new(x, y);

        if self.is_drawing {
            let point = self.mapper().to_domain(pixel);
            self.drawing_pointer_down(point);
            if !self.is_drawing {
                self.refresh_pointer_state(x, y);
            }
            return true;
        }

        match self.hit_at(pixel, self.config.hover_tolerance) {
            Some(hit) => {
                self.begin_drag(hit, pixel);
                true
            }
            None => {
                if self.selected_trendline_id.is_some() || self.drag_mode != DragMode::None {
                    self.clear_selection();
                    self.commit();
                }
                false
            }
        }
    }

    /// Pointer motion over the overlay: drawing preview or drag update.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.enter() || !self.is_in_main_pane(y) {
            return false;
        }
        let pixel = PixelPoint::new(x, y);
        if self.drawing_pointer_move(pixel) {
            return true;
        }
        self.drag_pointer_move(pixel)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        if !self.enter() {
            return false;
        }
        let ended = self.end_drag();
        if ended {
            self.refresh_pointer_state(x, y);
        }
        ended
    }

    /// Double click cancels drawing mode.
    pub fn double_click(&mut self, _x: f64, _y: f64) -> bool {
        if !self.enter() || !self.is_drawing {
            return false;
        }
        self.stop_drawing();
        true
    }

    /// Pointer motion over the chart container, used to decide whether the
    /// overlay should capture the pointer. Outside the main pane the overlay
    /// always lets events through.
    pub fn container_pointer_move(&mut self, x: f64, y: f64) -> PointerPolicy {
        if !self.enter() {
            return PointerPolicy::PassThrough;
        }
        self.refresh_pointer_state(x, y);
        self.pointer_state.0
    }

    /// Pointer left the chart. Drops capture unless a gesture is running.
    pub fn pointer_leave(&mut self) {
        if !self.enter() {
            return;
        }
        if self.is_drawing || self.drag_mode != DragMode::None {
            return;
        }
        self.push_pointer_state(PointerPolicy::PassThrough, CursorStyle::Default);
    }

    /// Routes a raw pointer event to the matching handler.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> PointerOutcome {
        let mut context_menu = None;
        let consumed = match event {
            PointerEvent::Down {
                x,
                y,
                button: PointerButton::Primary,
            } => self.pointer_down(x, y),
            PointerEvent::Down {
                x,
                y,
                button: PointerButton::Secondary,
            } => {
                context_menu = self.context_click(x, y);
                context_menu.is_some()
            }
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up { x, y } => self.pointer_up(x, y),
            PointerEvent::DoubleClick { x, y } => self.double_click(x, y),
            PointerEvent::ContainerMove { x, y } => {
                self.container_pointer_move(x, y);
                false
            }
            PointerEvent::Leave => {
                self.pointer_leave();
                false
            }
        };
        PointerOutcome {
            consumed,
            policy: self.pointer_state.0,
            cursor: self.pointer_state.1,
            context_menu,
        }
    }

    /// Topmost trendline under `pixel` for the given radii.
    pub(super) fn hit_at(&self, pixel: PixelPoint, tolerance: HitTolerance) -> Option<TrendlineHit> {
        hit_test(pixel, self.trendlines.values(), tolerance, |trendline| {
            self.resolve_pixels(trendline)
        })
    }

    /// Whether hovering at `pixel` is a deliberate reach for a trendline:
    /// the hover hit must also lie within the strict radius for the part it
    /// hit.
    #[must_use]
    pub fn is_intentional_hit(&self, x: f64, y: f64) -> bool {
        let pixel = PixelPoint::new(x, y);
        let Some(hit) = self.hit_at(pixel, self.config.hover_tolerance) else {
            return false;
        };
        let Some((start, end)) = self
            .trendlines
            .get(&hit.trendline_id)
            .and_then(|trendline| self.resolve_pixels(trendline))
        else {
            return false;
        };
        let strict = self.config.strict_tolerance;
        match hit.target {
            HitTarget::Start => pixel.distance_to(start) <= strict.point_radius_px,
            HitTarget::End => pixel.distance_to(end) <= strict.point_radius_px,
            HitTarget::Line => distance_to_segment(pixel, start, end) <= strict.line_tolerance_px,
        }
    }

    fn refresh_pointer_state(&mut self, x: f64, y: f64) {
        let (policy, cursor) = self.evaluate_pointer_state(x, y);
        self.push_pointer_state(policy, cursor);
    }

    fn evaluate_pointer_state(&self, x: f64, y: f64) -> (PointerPolicy, CursorStyle) {
        if !self.is_in_main_pane(y) {
            return (PointerPolicy::PassThrough, CursorStyle::Default);
        }
        let dragging = self.drag_mode != DragMode::None;
        let near = !dragging && !self.is_drawing && self.is_intentional_hit(x, y);
        let policy = if dragging || self.is_drawing || near {
            PointerPolicy::Intercept
        } else {
            PointerPolicy::PassThrough
        };
        let cursor = if dragging {
            CursorStyle::Grabbing
        } else if self.is_drawing {
            CursorStyle::Crosshair
        } else if near {
            CursorStyle::Grab
        } else {
            CursorStyle::Default
        };
        (policy, cursor)
    }

    /// Stores and forwards the pointer state when it changed.
    pub(super) fn push_pointer_state(&mut self, policy: PointerPolicy, cursor: CursorStyle) {
        if self.pointer_state == (policy, cursor) {
            return;
        }
        trace!(?policy, ?cursor, "pointer state changed");
        self.pointer_state = (policy, cursor);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_pointer_policy(policy, cursor);
        }
    }
}
