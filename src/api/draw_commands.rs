use serde::{Deserialize, Serialize};

use crate::core::StepVariant;
use crate::error::{GanttError, GanttResult};

use super::label_fit::LabelFitState;
use super::tick_formatter::TickGranularity;

/// One labelled tick on the time axis, in plot-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub x: f64,
    pub time_millis: i64,
    pub label: String,
}

/// Rectangle of one step's bar, in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub variant: StepVariant,
}

impl BarGeometry {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Text drawn for one step, anchored at its left baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLabel {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub text_width_px: f64,
    pub state: LabelFitState,
}

/// Everything the rendering surface needs for one pass.
///
/// Produced by the render pass; equal inputs always produce equal commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommands {
    pub granularity: TickGranularity,
    pub visible_start_millis: f64,
    pub visible_end_millis: f64,
    pub ticks: Vec<AxisTick>,
    pub bars: Vec<BarGeometry>,
    pub labels: Vec<StepLabel>,
    /// Total height of all rows, for hosts that size a scroll container.
    pub content_height_px: f64,
}

impl DrawCommands {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.labels.is_empty()
    }

    /// Row whose bar or label covers the plot-local point, if any.
    #[must_use]
    pub fn row_at(&self, x: f64, y: f64) -> Option<usize> {
        for (bar, label) in self.bars.iter().zip(&self.labels) {
            if bar.contains(x, y) {
                return Some(bar.row);
            }
            let in_row_band = y >= bar.y && y <= bar.y + bar.height;
            if in_row_band && x >= label.x && x <= label.x + label.text_width_px {
                return Some(label.row);
            }
        }
        None
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize draw commands: {e}"))
        })
    }
}
