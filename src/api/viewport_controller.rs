use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::HostChart;
use crate::render::OverlaySurface;

use super::TrendlineEngine;

/// Host notifications that change where domain points land on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportEvent {
    VisibleTimeRangeChanged,
    VisibleLogicalRangeChanged,
    PriceScaleChanged,
    /// Plot size or device pixel ratio changed.
    Resized,
    /// The chart container's DOM/widget tree changed; the host may still be
    /// settling, so the redraw is deferred briefly.
    ContainerMutated,
}

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    pub fn handle_viewport_event(&mut self, event: ViewportEvent) {
        self.handle_viewport_event_at(event, Instant::now());
    }

    /// Like [`Self::handle_viewport_event`] with an explicit clock, so deferred
    /// redraws can be driven deterministically.
    pub fn handle_viewport_event_at(&mut self, event: ViewportEvent, now: Instant) {
        if !self.enter() {
            return;
        }
        trace!(?event, "viewport event");
        match event {
            ViewportEvent::ContainerMutated => {
                let delay = Duration::from_millis(self.config.cosmetic_redraw_delay_ms);
                // A burst of mutations collapses into one redraw.
                if self.deferred_redraw_due.is_none() {
                    self.deferred_redraw_due = Some(now + delay);
                }
            }
            ViewportEvent::Resized => {
                if let Err(err) = self.sync_surface_size() {
                    warn!(error = %err, "overlay resize failed");
                }
                self.redraw();
            }
            ViewportEvent::VisibleTimeRangeChanged
            | ViewportEvent::VisibleLogicalRangeChanged
            | ViewportEvent::PriceScaleChanged => self.redraw(),
        }
    }

    /// Runs a deferred cosmetic redraw once it is due. Returns whether a
    /// redraw happened.
    pub fn poll_deferred_redraw(&mut self, now: Instant) -> bool {
        if !self.enter() {
            return false;
        }
        match self.deferred_redraw_due {
            Some(due) if now >= due => {
                self.deferred_redraw_due = None;
                self.redraw();
                true
            }
            _ => false,
        }
    }

    /// When the pending deferred redraw is due, if any.
    #[must_use]
    pub fn deferred_redraw_due(&self) -> Option<Instant> {
        self.deferred_redraw_due
    }
}
