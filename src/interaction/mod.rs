mod trendline;

use serde::{Deserialize, Serialize};

pub use hit_test::{HitTarget, HitTolerance, TrendlineHit, distance_to_segment, hit_test};
pub use trendline::{
    PendingTrendline, Trendline, TrendlineId, TrendlineIdGenerator, TrendlineState,
};

/// Which part of the selected trendline an active drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragMode {
    #[default]
    None,
    Start,
    End,
    /// Whole-line translation.
    Line,
}

impl From<HitTarget> for DragMode {
    fn from(target: HitTarget) -> Self {
        match target {
            HitTarget::Start => Self::Start,
            HitTarget::End => Self::End,
            HitTarget::Line => Self::Line,
        }
    }
}

/// Phase of a drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawingPhase {
    AwaitingStart,
    AwaitingEnd,
}

/// Coarse interaction state derived from a [`TrendlineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Drawing(DrawingPhase),
    Dragging(DragMode),
}

impl TrendlineState {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        if self.drag_mode != DragMode::None {
            InteractionMode::Dragging(self.drag_mode)
        } else if self.is_drawing && self.current_trendline.is_some() {
            InteractionMode::Drawing(DrawingPhase::AwaitingEnd)
        } else if self.is_drawing {
            InteractionMode::Drawing(DrawingPhase::AwaitingStart)
        } else {
            InteractionMode::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    Delete,
    Other,
}

/// Raw pointer input in overlay CSS pixels, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f64, y: f64, button: PointerButton },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    /// Movement over the chart container while the overlay is passing
    /// events through.
    ContainerMove { x: f64, y: f64 },
    Leave,
}

/// Right-click request for a per-trendline context menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMenuRequest {
    pub trendline_id: TrendlineId,
    pub x: f64,
    pub y: f64,
}
