use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneId(u32);

impl PaneId {
    /// The price pane hosting the candlestick series.
    pub const MAIN: PaneId = PaneId(0);

    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for PaneId {
    fn default() -> Self {
        Self::MAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneDescriptor {
    pub id: PaneId,
    pub is_main: bool,
    pub stretch_factor: f64,
}

/// Vertical pixel band a pane occupies on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneLayoutRegion {
    pub pane_id: PaneId,
    pub plot_top: f64,
    pub plot_bottom: f64,
}

impl PaneLayoutRegion {
    #[must_use]
    pub fn height(self) -> f64 {
        (self.plot_bottom - self.plot_top).max(0.0)
    }

    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y >= self.plot_top && y <= self.plot_bottom
    }
}

/// Stack of panes sharing the time axis: main price pane on top, indicator
/// sub-panes below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneCollection {
    panes: Vec<PaneDescriptor>,
    next_id: u32,
}

impl Default for PaneCollection {
    fn default() -> Self {
        Self {
            panes: vec![PaneDescriptor {
                id: PaneId::MAIN,
                is_main: true,
                stretch_factor: 1.0,
            }],
            next_id: 1,
        }
    }
}

impl PaneCollection {
    #[must_use]
    pub fn panes(&self) -> &[PaneDescriptor] {
        &self.panes
    }

    #[must_use]
    pub fn main_pane_id(&self) -> PaneId {
        // Invariant: `default()` always creates one main pane and removal
        // of main pane is forbidden.
        self.panes
            .iter()
            .find(|pane| pane.is_main)
            .map(|pane| pane.id)
            .unwrap_or(PaneId::MAIN)
    }

    #[must_use]
    pub fn contains(&self, pane_id: PaneId) -> bool {
        self.panes.iter().any(|pane| pane.id == pane_id)
    }

    /// Appends an indicator sub-pane below the existing ones.
    pub fn create_pane(&mut self, stretch_factor: f64) -> ChartResult<PaneId> {
        validate_stretch_factor(stretch_factor)?;
        let pane_id = PaneId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.panes.push(PaneDescriptor {
            id: pane_id,
            is_main: false,
            stretch_factor,
        });
        Ok(pane_id)
    }

    /// Splits `[plot_top, plot_bottom]` between panes by stretch factor.
    #[must_use]
    pub fn layout_regions(&self, plot_top: f64, plot_bottom: f64) -> Vec<PaneLayoutRegion> {
        let safe_top = if plot_top.is_finite() {
            plot_top.max(0.0)
        } else {
            0.0
        };
        let safe_bottom = if plot_bottom.is_finite() {
            plot_bottom.max(safe_top)
        } else {
            safe_top
        };
        let total_height = safe_bottom - safe_top;

        let weight_sum: f64 = self.panes.iter().map(|pane| pane.stretch_factor).sum();
        let mut regions = Vec::with_capacity(self.panes.len());
        let mut cursor = safe_top;
        let last_index = self.panes.len().saturating_sub(1);
        for (index, pane) in self.panes.iter().enumerate() {
            let next_bottom = if index == last_index {
                safe_bottom
            } else {
                (cursor + total_height * pane.stretch_factor / weight_sum)
                    .clamp(cursor, safe_bottom)
            };
            regions.push(PaneLayoutRegion {
                pane_id: pane.id,
                plot_top: cursor,
                plot_bottom: next_bottom,
            });
            cursor = next_bottom;
        }
        regions
    }

    #[must_use]
    pub fn region_of(
        &self,
        pane_id: PaneId,
        plot_top: f64,
        plot_bottom: f64,
    ) -> Option<PaneLayoutRegion> {
        self.layout_regions(plot_top, plot_bottom)
            .into_iter()
            .find(|region| region.pane_id == pane_id)
    }
}

fn validate_stretch_factor(stretch_factor: f64) -> ChartResult<()> {
    if !stretch_factor.is_finite() || stretch_factor <= 0.0 {
        return Err(ChartError::InvalidData(
            "pane stretch factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
