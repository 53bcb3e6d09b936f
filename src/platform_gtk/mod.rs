//! GTK4 embedding for the trendline overlay.
//!
//! The adapter owns a transparent `DrawingArea` meant to sit above the chart
//! widget inside a `gtk::Overlay`. Pointer capture follows the engine's
//! pointer policy through `set_can_target`, so the chart underneath keeps
//! receiving pans and zooms whenever the overlay passes events through.
//!
//! Every committed engine change queues a redraw of the area, including
//! clear-all broadcasts delivered while no input is happening. Viewport
//! changes are forwarded through [`GtkTrendlineOverlay::handle_viewport_event`],
//! which also drives the deferred redraw from the GLib main loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gtk4 as gtk;
use gtk::prelude::*;
use gtk::{gdk, glib};
use tracing::warn;

use crate::api::{PointerOutcome, SharedTrendlineEngine, TrendlineEngine, ViewportEvent};
use crate::core::HostChart;
use crate::extensions::BroadcastBus;
use crate::interaction::{KeyCode, PointerButton, PointerEvent};
use crate::render::{CairoOverlayRenderer, CursorStyle, PointerPolicy};

type SharedEngine<H> = SharedTrendlineEngine<H, CairoOverlayRenderer>;

pub struct GtkTrendlineOverlay<H: HostChart + 'static> {
    engine: SharedEngine<H>,
    area: gtk::DrawingArea,
}

impl<H: HostChart + 'static> GtkTrendlineOverlay<H> {
    #[must_use]
    pub fn new(engine: TrendlineEngine<H, CairoOverlayRenderer>) -> Self {
        Self::from_shared(Rc::new(RefCell::new(engine)))
    }

    /// Wraps an engine that is already shared, e.g. one built with
    /// [`TrendlineEngine::with_broadcast_bus`].
    #[must_use]
    pub fn from_shared(engine: SharedEngine<H>) -> Self {
        let area = gtk::DrawingArea::new();
        area.set_hexpand(true);
        area.set_vexpand(true);
        area.set_focusable(true);
        area.set_can_target(false);

        let draw_engine = Rc::clone(&engine);
        area.set_draw_func(move |_, context, _, _| {
            if let Err(err) = draw_engine.borrow_mut().render_on_cairo_context(context) {
                warn!(error = %err, "gtk overlay draw failed");
            }
        });

        let weak_area = area.downgrade();
        match engine.try_borrow_mut() {
            Ok(mut engine) => {
                engine.subscribe_state(move |_| {
                    if let Some(area) = weak_area.upgrade() {
                        area.queue_draw();
                    }
                });
            }
            Err(_) => warn!("engine busy, overlay will not redraw on state changes"),
        }

        let resize_engine = Rc::clone(&engine);
        area.connect_resize(move |area, _, _| {
            resize_engine
                .borrow_mut()
                .handle_viewport_event(ViewportEvent::Resized);
            area.queue_draw();
        });

        let overlay = Self { engine, area };
        overlay.install_click_controller();
        overlay.install_motion_controller();
        overlay.install_key_controller();
        overlay
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine<H> {
        Rc::clone(&self.engine)
    }

    /// Subscribes the engine to clear-all signals on `bus`.
    pub fn connect_broadcast_bus(&self, bus: &BroadcastBus) {
        TrendlineEngine::connect_broadcast_bus(&self.engine, bus);
    }

    /// Forwards a host viewport change. A deferred redraw requested by the
    /// engine is run from a GLib timeout once it is due.
    pub fn handle_viewport_event(&self, event: ViewportEvent) {
        let due = {
            let mut engine = self.engine.borrow_mut();
            let already_scheduled = engine.deferred_redraw_due().is_some();
            engine.handle_viewport_event(event);
            engine.deferred_redraw_due().filter(|_| !already_scheduled)
        };
        self.area.queue_draw();
        if let Some(due) = due {
            self.schedule_deferred_redraw(due);
        }
    }

    fn schedule_deferred_redraw(&self, due: Instant) {
        let engine = Rc::downgrade(&self.engine);
        let area = self.area.downgrade();
        // GLib timeouts have millisecond resolution; never fire before `due`.
        let delay = due.saturating_duration_since(Instant::now()) + Duration::from_millis(1);
        glib::timeout_add_local_once(delay, move || {
            let Some(engine) = engine.upgrade() else {
                return;
            };
            let Ok(mut engine) = engine.try_borrow_mut() else {
                warn!("engine busy, deferred overlay redraw skipped");
                return;
            };
            if engine.poll_deferred_redraw(Instant::now()) {
                if let Some(area) = area.upgrade() {
                    area.queue_draw();
                }
            }
        });
    }

    /// Watches pointer motion on the chart container so the overlay can
    /// start capturing when the pointer nears a trendline.
    pub fn track_container(&self, container: &impl IsA<gtk::Widget>) {
        let motion = gtk::EventControllerMotion::new();
        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        motion.connect_motion(move |_, x, y| {
            let outcome = engine
                .borrow_mut()
                .handle_pointer_event(PointerEvent::ContainerMove { x, y });
            apply_outcome(&area, &outcome);
        });
        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        motion.connect_leave(move |_| {
            let outcome = engine.borrow_mut().handle_pointer_event(PointerEvent::Leave);
            apply_outcome(&area, &outcome);
        });
        container.add_controller(motion);
    }

    fn install_click_controller(&self) {
        let click = gtk::GestureClick::new();
        click.set_button(0);

        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        click.connect_pressed(move |gesture, presses, x, y| {
            let event = if presses >= 2 {
                PointerEvent::DoubleClick { x, y }
            } else {
                let button = if gesture.current_button() == gdk::BUTTON_SECONDARY {
                    PointerButton::Secondary
                } else {
                    PointerButton::Primary
                };
                PointerEvent::Down { x, y, button }
            };
            area.grab_focus();
            let outcome = engine.borrow_mut().handle_pointer_event(event);
            apply_outcome(&area, &outcome);
        });

        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        click.connect_released(move |_, _, x, y| {
            let outcome = engine
                .borrow_mut()
                .handle_pointer_event(PointerEvent::Up { x, y });
            apply_outcome(&area, &outcome);
        });

        self.area.add_controller(click);
    }

    fn install_motion_controller(&self) {
        let motion = gtk::EventControllerMotion::new();
        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        motion.connect_motion(move |_, x, y| {
            let mut engine = engine.borrow_mut();
            let moved = engine.handle_pointer_event(PointerEvent::Move { x, y });
            // Hover detection only matters when no preview or drag took the move.
            let outcome = if moved.consumed {
                moved
            } else {
                engine.handle_pointer_event(PointerEvent::ContainerMove { x, y })
            };
            apply_outcome(&area, &outcome);
        });
        self.area.add_controller(motion);
    }

    fn install_key_controller(&self) {
        let keys = gtk::EventControllerKey::new();
        let engine = Rc::clone(&self.engine);
        let area = self.area.clone();
        keys.connect_key_pressed(move |_, key, _, _| {
            let code = if key == gdk::Key::Delete {
                KeyCode::Delete
            } else {
                KeyCode::Other
            };
            if engine.borrow_mut().key_down(code) {
                area.queue_draw();
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        self.area.add_controller(keys);
    }
}

fn apply_outcome(area: &gtk::DrawingArea, outcome: &PointerOutcome) {
    area.set_can_target(outcome.policy == PointerPolicy::Intercept);
    area.set_cursor_from_name(Some(cursor_name(outcome.cursor)));
    area.queue_draw();
}

fn cursor_name(cursor: CursorStyle) -> &'static str {
    match cursor {
        CursorStyle::Default => "default",
        CursorStyle::Crosshair => "crosshair",
        CursorStyle::Grab => "grab",
        CursorStyle::Grabbing => "grabbing",
    }
}
