//! Public engine facade.
//!
//! `TrendlineEngine` is defined in `engine.rs`; its behavior is split across
//! the `*_controller.rs` files by concern (drawing, dragging, selection,
//! pointer gating, viewport sync) and rendered by `overlay_frame_builder.rs`.

mod drag_controller;
mod drawing_controller;
mod engine;
mod engine_config;
mod observer;
mod overlay_frame_builder;
mod overlay_style;
mod pointer_controller;
mod selection_controller;
mod validation;
mod viewport_controller;

pub use engine::{SharedTrendlineEngine, TrendlineEngine};
pub use engine_config::TrendlineEngineConfig;
pub use observer::ObserverId;
pub use overlay_style::OverlayStyle;
pub use pointer_controller::PointerOutcome;
pub use viewport_controller::ViewportEvent;
