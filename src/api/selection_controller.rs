use tracing::debug;

use crate::core::{HostChart, PixelPoint};
use crate::extensions::release_axis_markers;
use crate::interaction::{ContextMenuRequest, DragMode, KeyCode, TrendlineId};
use crate::render::OverlaySurface;

use super::TrendlineEngine;

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    #[must_use]
    pub fn selected_trendline_id(&self) -> Option<&TrendlineId> {
        self.selected_trendline_id.as_ref()
    }

    /// Open context-menu request, if any.
    #[must_use]
    pub fn context_menu(&self) -> Option<&ContextMenuRequest> {
        self.context_menu.as_ref()
    }

    /// Removes one trendline and its axis markers. Returns `false` when no
    /// trendline has that id.
    pub fn remove_trendline(&mut self, id: &TrendlineId) -> bool {
        if !self.enter() {
            return false;
        }
        let Some(mut trendline) = self.trendlines.shift_remove(id) else {
            return false;
        };
        release_axis_markers(&mut self.host, &mut trendline);
        if self.selected_trendline_id.as_ref() == Some(id) {
            self.clear_selection();
        }
        if self
            .context_menu
            .as_ref()
            .is_some_and(|menu| &menu.trendline_id == id)
        {
            self.context_menu = None;
        }
        debug!(trendline = %id, remaining = self.trendlines.len(), "trendline removed");
        self.commit();
        true
    }

    /// Removes every trendline, cancels drawing and clears the selection.
    pub fn clear_all(&mut self) {
        if !self.enter() {
            return;
        }
        self.clear_all_unchecked();
    }

    /// Commits only when something changed, so repeated clears notify once.
    pub(super) fn clear_all_unchecked(&mut self) {
        let already_clear = self.trendlines.is_empty()
            && !self.is_drawing
            && self.current_trendline.is_none()
            && self.preview_end_point.is_none()
            && self.context_menu.is_none()
            && self.selected_trendline_id.is_none()
            && self.drag_mode == DragMode::None;
        if already_clear {
            return;
        }
        for (_, mut trendline) in self.trendlines.drain(..) {
            release_axis_markers(&mut self.host, &mut trendline);
        }
        self.current_trendline = None;
        self.preview_end_point = None;
        self.is_drawing = false;
        self.context_menu = None;
        self.clear_selection();
        debug!("all trendlines cleared");
        self.commit();
    }

    /// Keyboard input. Delete removes the selected trendline.
    /// Returns whether the key was consumed.
    pub fn key_down(&mut self, key: KeyCode) -> bool {
        if !self.enter() {
            return false;
        }
        match (key, self.selected_trendline_id.clone()) {
            (KeyCode::Delete, Some(id)) => {
                debug!(trendline = %id, "delete key");
                self.remove_trendline(&id)
            }
            _ => false,
        }
    }

    /// Right-click: selects the trendline under the pointer and asks the host
    /// to show a context menu for it.
    pub fn context_click(&mut self, x: f64, y: f64) -> Option<ContextMenuRequest> {
        if !self.enter() || !self.is_in_main_pane(y) {
            return None;
        }
        let hit = self.hit_at(PixelPoint::new(x, y), self.config.hover_tolerance)?;
        self.clear_selection();
        for trendline in self.trendlines.values_mut() {
            trendline.is_selected = trendline.id == hit.trendline_id;
        }
        self.selected_trendline_id = Some(hit.trendline_id.clone());
        let request = ContextMenuRequest {
            trendline_id: hit.trendline_id,
            x,
            y,
        };
        debug!(trendline = %request.trendline_id, "context menu requested");
        self.context_menu = Some(request.clone());
        self.commit();
        Some(request)
    }

    /// "Delete trendline" chosen in the context menu.
    pub fn confirm_context_menu_delete(&mut self) -> bool {
        if !self.enter() {
            return false;
        }
        match self.context_menu.take() {
            Some(request) => self.remove_trendline(&request.trendline_id),
            None => false,
        }
    }

    /// Closes the context menu without side effects.
    pub fn dismiss_context_menu(&mut self) {
        self.context_menu = None;
    }
}
