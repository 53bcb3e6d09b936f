//! Collaborators of the trendline engine that talk to the outside world:
//! host price-axis markers and the application broadcast bus.

pub mod axis_markers;
pub mod broadcast;

pub use axis_markers::{
    AxisMarkerStyle, attach_axis_markers, axis_marker_title, release_axis_markers,
    sync_axis_markers,
};
pub use broadcast::{BroadcastBus, BroadcastSubscription, CLEAR_ALL_TRENDLINES_SIGNAL};
