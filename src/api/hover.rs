use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::core::WorkflowStep;

/// Screen offset between the pointer and the tooltip's top-left corner.
pub const TOOLTIP_OFFSET_PX: f64 = 10.0;

const TOOLTIP_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Data shown for a hovered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverPayload {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub retry_count: u32,
}

impl HoverPayload {
    #[must_use]
    pub fn from_step(step: &WorkflowStep) -> Self {
        Self {
            name: step.name.clone(),
            start_time: step.start_time,
            end_time: step.end_time,
            retry_count: step.retry_count,
        }
    }

    /// Tooltip text block, times shown in `offset`. The first line is the
    /// bare step name, meant to be drawn as a heading.
    #[must_use]
    pub fn tooltip_lines(&self, offset: FixedOffset) -> Vec<String> {
        vec![
            self.name.clone(),
            format!(
                "Start: {}",
                self.start_time.with_timezone(&offset).format(TOOLTIP_TIME_FORMAT)
            ),
            format!(
                "End: {}",
                self.end_time.with_timezone(&offset).format(TOOLTIP_TIME_FORMAT)
            ),
            format!("Retries: {}", self.retry_count),
        ]
    }
}

/// Hover transitions emitted as the pointer crosses bars and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HoverEvent {
    Enter {
        row: usize,
        payload: HoverPayload,
        screen_x: f64,
        screen_y: f64,
    },
    Move {
        row: usize,
        screen_x: f64,
        screen_y: f64,
    },
    Leave {
        row: usize,
    },
}

/// Tooltip presentation state owned by one engine instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipContext {
    payload: Option<HoverPayload>,
    x: f64,
    y: f64,
}

impl TooltipContext {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.payload.is_some()
    }

    #[must_use]
    pub fn payload(&self) -> Option<&HoverPayload> {
        self.payload.as_ref()
    }

    /// Top-left tooltip corner, already offset from the pointer.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        self.payload.as_ref().map(|_| (self.x, self.y))
    }

    pub fn apply(&mut self, event: &HoverEvent) {
        match event {
            HoverEvent::Enter {
                payload,
                screen_x,
                screen_y,
                ..
            } => {
                self.payload = Some(payload.clone());
                self.move_to(*screen_x, *screen_y);
            }
            HoverEvent::Move {
                screen_x, screen_y, ..
            } => self.move_to(*screen_x, *screen_y),
            HoverEvent::Leave { .. } => self.payload = None,
        }
    }

    fn move_to(&mut self, screen_x: f64, screen_y: f64) {
        self.x = screen_x + TOOLTIP_OFFSET_PX;
        self.y = screen_y + TOOLTIP_OFFSET_PX;
    }
}

/// Tracks which row the pointer is over and emits transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct HoverTracker {
    hovered_row: Option<usize>,
}

impl HoverTracker {
    pub(super) fn update(
        &mut self,
        hit_row: Option<usize>,
        steps: &[WorkflowStep],
        screen_x: f64,
        screen_y: f64,
    ) -> Vec<HoverEvent> {
        let mut events = Vec::new();
        match (self.hovered_row, hit_row) {
            (Some(previous), Some(current)) if previous == current => {
                events.push(HoverEvent::Move {
                    row: current,
                    screen_x,
                    screen_y,
                });
            }
            (previous, current) => {
                if let Some(row) = previous {
                    events.push(HoverEvent::Leave { row });
                }
                if let Some(row) = current {
                    if let Some(step) = steps.get(row) {
                        events.push(HoverEvent::Enter {
                            row,
                            payload: HoverPayload::from_step(step),
                            screen_x,
                            screen_y,
                        });
                    }
                }
            }
        }
        self.hovered_row = hit_row.filter(|row| *row < steps.len());
        events
    }

    pub(super) fn leave(&mut self) -> Option<HoverEvent> {
        self.hovered_row.take().map(|row| HoverEvent::Leave { row })
    }
}
