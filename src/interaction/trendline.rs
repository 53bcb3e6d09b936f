use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DomainPoint, PixelPoint, PriceLineId};
use crate::interaction::DragMode;
use crate::render::Color;

/// Unique trendline identifier: `trendline_<epoch-ms>_<seq>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrendlineId(String);

impl TrendlineId {
    /// Wraps an externally produced id.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four characters, used in axis labels.
    #[must_use]
    pub fn short_label(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(index, _)| index);
        &self.0[start..]
    }
}

impl fmt::Display for TrendlineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces ids that stay unique within one engine even when several are
/// minted in the same millisecond.
#[derive(Debug, Default)]
pub struct TrendlineIdGenerator {
    sequence: u32,
}

impl TrendlineIdGenerator {
    pub fn next_id(&mut self, now: DateTime<Utc>) -> TrendlineId {
        self.sequence = self.sequence.wrapping_add(1);
        TrendlineId(format!(
            "trendline_{}_{:06}",
            now.timestamp_millis(),
            self.sequence
        ))
    }
}

/// A committed trendline between two domain points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trendline {
    pub id: TrendlineId,
    pub start_point: DomainPoint,
    pub end_point: DomainPoint,
    pub color: Color,
    pub line_width: f64,
    pub is_selected: bool,
    pub is_dragging: bool,
    pub start_axis_marker: Option<PriceLineId>,
    pub end_axis_marker: Option<PriceLineId>,
}

/// First endpoint of a trendline still being drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTrendline {
    pub id: TrendlineId,
    pub start_point: DomainPoint,
    pub color: Color,
    pub line_width: f64,
}

impl PendingTrendline {
    /// Completes the draw, producing an unselected trendline without markers.
    #[must_use]
    pub fn commit(self, end_point: DomainPoint) -> Trendline {
        Trendline {
            id: self.id,
            start_point: self.start_point,
            end_point,
            color: self.color,
            line_width: self.line_width,
            is_selected: false,
            is_dragging: false,
            start_axis_marker: None,
            end_axis_marker: None,
        }
    }
}

/// Owned snapshot of the engine's interaction state, handed to observers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendlineState {
    pub trendlines: Vec<Trendline>,
    pub is_drawing: bool,
    pub current_trendline: Option<PendingTrendline>,
    pub preview_end_point: Option<DomainPoint>,
    pub selected_trendline_id: Option<TrendlineId>,
    pub drag_mode: DragMode,
    pub drag_start_pos: Option<PixelPoint>,
    pub drag_offset: Option<PixelPoint>,
}

impl TrendlineState {
    #[must_use]
    pub fn trendline(&self, id: &TrendlineId) -> Option<&Trendline> {
        self.trendlines.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Trendline> {
        self.selected_trendline_id
            .as_ref()
            .and_then(|id| self.trendline(id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::{TrendlineId, TrendlineIdGenerator};

    #[test]
    fn generated_ids_are_unique_within_one_millisecond() {
        let now = chrono::Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("timestamp");
        let mut ids = TrendlineIdGenerator::default();
        let first = ids.next_id(now);
        let second = ids.next_id(now);
        assert_ne!(first, second);
        assert_eq!(first.as_str(), "trendline_1700000000123_000001");
        assert_eq!(second.short_label(), "0002");
    }

    #[test]
    fn short_label_handles_short_ids() {
        assert_eq!(TrendlineId::new("ab").short_label(), "ab");
        assert_eq!(TrendlineId::new("abcdef").short_label(), "cdef");
    }
}
