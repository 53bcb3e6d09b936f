//! chart-trendlines: interactive trendline overlay for financial charts.
//!
//! The crate keeps trendlines in chart domain space (time, price), maps them
//! to overlay pixels through a [`core::HostChart`] bridge on every draw, and
//! turns pointer/keyboard input into draw, select, drag and delete gestures.
//! Rendering goes through backend-agnostic [`render::OverlayFrame`]s.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{TrendlineEngine, TrendlineEngineConfig};
pub use error::{ChartError, ChartResult};
