use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{CoordinateMapper, DomainPoint, HostChart, PixelPoint, Viewport};
use crate::error::ChartResult;
use crate::extensions::{
    BroadcastBus, BroadcastSubscription, CLEAR_ALL_TRENDLINES_SIGNAL, release_axis_markers,
};
use crate::interaction::{
    ContextMenuRequest, DragMode, PendingTrendline, Trendline, TrendlineId, TrendlineIdGenerator,
    TrendlineState,
};
use crate::render::{CursorStyle, OverlaySurface, PointerPolicy};

use super::TrendlineEngineConfig;
use super::observer::{ObserverId, StateObservers};

/// Share of the plot height treated as main pane when the host cannot
/// describe the main pane at all.
const FALLBACK_MAIN_PANE_RATIO: f64 = 0.75;

/// Engine handle shared between the owner, UI callbacks and the broadcast bus.
pub type SharedTrendlineEngine<H, S> = Rc<RefCell<TrendlineEngine<H, S>>>;

/// Interactive trendline overlay bound to one host chart.
///
/// `TrendlineEngine` owns the trendline collection and the interaction state
/// machine (idle, drawing, dragging). It reads the chart's scales through
/// [`HostChart`] on every call and pushes fully materialized frames to an
/// [`OverlaySurface`]. All entry points are infallible: unresolvable
/// coordinates fall back to extrapolation, host and surface failures are
/// logged and skipped.
pub struct TrendlineEngine<H: HostChart, S: OverlaySurface> {
    pub(super) host: H,
    pub(super) surface: Option<S>,
    pub(super) config: TrendlineEngineConfig,
    pub(super) trendlines: IndexMap<TrendlineId, Trendline>,
    pub(super) is_drawing: bool,
    pub(super) current_trendline: Option<PendingTrendline>,
    pub(super) preview_end_point: Option<DomainPoint>,
    pub(super) selected_trendline_id: Option<TrendlineId>,
    pub(super) drag_mode: DragMode,
    pub(super) drag_start_pos: Option<PixelPoint>,
    pub(super) drag_offset: Option<PixelPoint>,
    pub(super) context_menu: Option<ContextMenuRequest>,
    pub(super) pointer_state: (PointerPolicy, CursorStyle),
    pub(super) deferred_redraw_due: Option<Instant>,
    pub(super) surface_size: Option<(Viewport, f64)>,
    pub(super) ids: TrendlineIdGenerator,
    pub(super) observers: StateObservers,
    pub(super) broadcast: Option<BroadcastSubscription>,
    pub(super) destroyed: bool,
}

impl<H: HostChart, S: OverlaySurface> TrendlineEngine<H, S> {
    /// Creates an engine, sizes the surface to the host plot and draws the
    /// (empty) overlay once.
    pub fn new(host: H, surface: S, config: TrendlineEngineConfig) -> ChartResult<Self> {
        config.validate()?;

        let mut engine = Self {
            host,
            surface: Some(surface),
            config,
            trendlines: IndexMap::new(),
            is_drawing: false,
            current_trendline: None,
            preview_end_point: None,
            selected_trendline_id: None,
            drag_mode: DragMode::None,
            drag_start_pos: None,
            drag_offset: None,
            context_menu: None,
            pointer_state: (PointerPolicy::PassThrough, CursorStyle::Default),
            deferred_redraw_due: None,
            surface_size: None,
            ids: TrendlineIdGenerator::default(),
            observers: StateObservers::default(),
            broadcast: None,
            destroyed: false,
        };
        engine.sync_surface_size()?;
        engine.redraw();
        debug!(pane = engine.config.main_pane.raw(), "trendline engine attached");
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> &TrendlineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to scroll the chart in tests or tooling.
    /// Follow up with `handle_viewport_event` so the overlay catches up.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Owned snapshot of the current interaction state.
    #[must_use]
    pub fn state(&self) -> TrendlineState {
        TrendlineState {
            trendlines: self.trendlines.values().cloned().collect(),
            is_drawing: self.is_drawing,
            current_trendline: self.current_trendline.clone(),
            preview_end_point: self.preview_end_point,
            selected_trendline_id: self.selected_trendline_id.clone(),
            drag_mode: self.drag_mode,
            drag_start_pos: self.drag_start_pos,
            drag_offset: self.drag_offset,
        }
    }

    #[must_use]
    pub fn trendline(&self, id: &TrendlineId) -> Option<&Trendline> {
        self.trendlines.get(id)
    }

    /// Trendlines in insertion order.
    pub fn trendlines(&self) -> impl DoubleEndedIterator<Item = &Trendline> {
        self.trendlines.values()
    }

    #[must_use]
    pub fn trendline_count(&self) -> usize {
        self.trendlines.len()
    }

    /// Registers a callback invoked with a fresh snapshot after every
    /// committed state change.
    pub fn subscribe_state<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&TrendlineState) + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe_state(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Applies clear-all signals that arrived while the engine was borrowed
    /// and its waker could not run. Returns whether anything was applied.
    pub fn process_broadcasts(&mut self) -> bool {
        !self.destroyed && self.apply_pending_broadcasts()
    }

    /// Detaches from the host and surface. Safe to call more than once;
    /// afterwards every entry point is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        for trendline in self.trendlines.values_mut() {
            release_axis_markers(&mut self.host, trendline);
        }
        self.broadcast = None;
        self.observers.clear();
        self.context_menu = None;
        self.deferred_redraw_due = None;
        if let Some(mut surface) = self.surface.take() {
            surface.detach();
        }
        debug!(trendlines = self.trendlines.len(), "trendline engine destroyed");
    }

    /// Common prologue of every entry point: refuses work after `destroy`
    /// and applies pending broadcast signals first.
    pub(super) fn enter(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.apply_pending_broadcasts();
        true
    }

    fn apply_pending_broadcasts(&mut self) -> bool {
        let pending = self
            .broadcast
            .as_ref()
            .map_or(0, BroadcastSubscription::drain);
        if pending == 0 {
            return false;
        }
        debug!(pending, "clear-all broadcast received");
        self.clear_all_unchecked();
        true
    }

    pub(super) fn mapper(&self) -> CoordinateMapper<'_, H> {
        CoordinateMapper::new(&self.host, self.config.main_pane)
    }

    /// Bottom pixel of the main pane as the visible price floor, if known.
    pub(super) fn main_pane_floor_y(&self) -> Option<f64> {
        self.mapper().visible_price_floor_y()
    }

    /// Whether pointer input at `y` belongs to the main pane rather than an
    /// indicator pane below it. Upward is unbounded.
    pub(super) fn is_in_main_pane(&self, y: f64) -> bool {
        if !y.is_finite() {
            return false;
        }
        let buffer = self.config.pane_hit_buffer_px;
        if let Some(floor) = self.main_pane_floor_y() {
            return y <= floor + buffer;
        }
        if let Some(region) = self
            .host
            .pane_region(self.config.main_pane)
            .filter(|region| region.height() > 0.0)
        {
            return y <= region.plot_bottom + buffer;
        }
        let height = f64::from(self.host.plot_size().height);
        height > 0.0 && y <= height * FALLBACK_MAIN_PANE_RATIO
    }

    /// Pixel endpoints of a trendline under the current scales.
    pub(super) fn resolve_pixels(&self, trendline: &Trendline) -> Option<(PixelPoint, PixelPoint)> {
        let mapper = self.mapper();
        Some((
            mapper.to_pixel(trendline.start_point)?,
            mapper.to_pixel(trendline.end_point)?,
        ))
    }

    /// Selection plus drag reset; trendline flags follow.
    pub(super) fn clear_selection(&mut self) {
        self.selected_trendline_id = None;
        self.end_drag_state();
        for trendline in self.trendlines.values_mut() {
            trendline.is_selected = false;
            trendline.is_dragging = false;
        }
    }

    pub(super) fn end_drag_state(&mut self) {
        self.drag_mode = DragMode::None;
        self.drag_start_pos = None;
        self.drag_offset = None;
    }

    /// Redraws and notifies observers after a committed mutation.
    pub(super) fn commit(&mut self) {
        self.redraw();
        self.notify_observers();
    }

    pub(super) fn notify_observers(&mut self) {
        if !self.observers.is_empty() {
            let snapshot = self.state();
            self.observers.notify(&snapshot);
        }
        // An observer that broadcasts finds this engine borrowed.
        if !self.destroyed {
            self.apply_pending_broadcasts();
        }
    }

    /// Resizes the surface when the host plot size or pixel ratio changed.
    pub(super) fn sync_surface_size(&mut self) -> ChartResult<()> {
        let viewport = self.host.plot_size();
        let ratio = sanitize_ratio(self.host.device_pixel_ratio());
        if !viewport.is_valid() || self.surface_size == Some((viewport, ratio)) {
            return Ok(());
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport, ratio)?;
            self.surface_size = Some((viewport, ratio));
        }
        Ok(())
    }

    pub(super) fn redraw(&mut self) {
        if self.surface.is_none() {
            return;
        }
        if let Err(err) = self.sync_surface_size() {
            warn!(error = %err, "overlay resize failed");
            return;
        }
        let Some(frame) = self.build_overlay_frame() else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            if let Err(err) = surface.render(&frame) {
                warn!(error = %err, "overlay render failed");
            }
        }
    }
}

impl<H: HostChart + 'static, S: OverlaySurface + 'static> TrendlineEngine<H, S> {
    /// Creates a shared engine that clears itself as soon as
    /// [`CLEAR_ALL_TRENDLINES_SIGNAL`] is broadcast on `bus`.
    pub fn with_broadcast_bus(
        host: H,
        surface: S,
        config: TrendlineEngineConfig,
        bus: &BroadcastBus,
    ) -> ChartResult<SharedTrendlineEngine<H, S>> {
        let engine = Rc::new(RefCell::new(Self::new(host, surface, config)?));
        Self::connect_broadcast_bus(&engine, bus);
        Ok(engine)
    }

    /// Subscribes a shared engine to clear-all signals on `bus`, replacing any
    /// earlier subscription. A signal broadcast while the engine is borrowed
    /// is applied once the running operation notifies its observers, or at
    /// the next entry point or `process_broadcasts` call.
    pub fn connect_broadcast_bus(engine: &SharedTrendlineEngine<H, S>, bus: &BroadcastBus) {
        let weak = Rc::downgrade(engine);
        let subscription = bus.subscribe_with(CLEAR_ALL_TRENDLINES_SIGNAL, move || {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            if let Ok(mut engine) = engine.try_borrow_mut() {
                engine.process_broadcasts();
            }
        });
        match engine.try_borrow_mut() {
            Ok(mut engine) if !engine.destroyed => engine.broadcast = Some(subscription),
            Ok(_) => {}
            Err(_) => warn!("engine busy, broadcast subscription dropped"),
        }
    }
}

impl<H: HostChart, S: OverlaySurface> Drop for TrendlineEngine<H, S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

pub(super) fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}
