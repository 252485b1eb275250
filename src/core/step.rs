use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::datetime_to_unix_millis;
use crate::error::{GanttError, GanttResult};

/// One visualized workflow interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub retry_count: u32,
}

impl WorkflowStep {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        retry_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time,
            retry_count,
        }
    }

    #[must_use]
    pub fn variant(&self) -> StepVariant {
        if self.retry_count > 0 {
            StepVariant::Retried
        } else {
            StepVariant::Normal
        }
    }

    #[must_use]
    pub fn is_zero_width(&self) -> bool {
        self.start_time == self.end_time
    }

    #[must_use]
    pub fn start_millis(&self) -> f64 {
        datetime_to_unix_millis(self.start_time)
    }

    #[must_use]
    pub fn end_millis(&self) -> f64 {
        datetime_to_unix_millis(self.end_time)
    }
}

/// Visual variant of a bar. Only affects styling, never geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepVariant {
    Normal,
    Retried,
}

/// How ingestion treats a step whose `end_time` precedes its `start_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntervalPolicy {
    /// Fail the whole ingestion with `GanttError::InvalidInterval`.
    #[default]
    Reject,
    /// Collapse the step to a zero-width interval at `start_time`.
    ClampToZeroWidth,
}

/// Validates a step list once, at ingestion time.
///
/// Rendering never sees a reversed interval: either the list is rejected or the
/// offending steps are collapsed, depending on `policy`.
pub fn ingest_steps(
    mut steps: Vec<WorkflowStep>,
    policy: IntervalPolicy,
) -> GanttResult<Vec<WorkflowStep>> {
    for (index, step) in steps.iter_mut().enumerate() {
        if step.end_time >= step.start_time {
            continue;
        }
        match policy {
            IntervalPolicy::Reject => {
                return Err(GanttError::InvalidInterval {
                    index,
                    name: step.name.clone(),
                });
            }
            IntervalPolicy::ClampToZeroWidth => {
                warn!(
                    index,
                    name = %step.name,
                    "clamping reversed step interval to zero width"
                );
                step.end_time = step.start_time;
            }
        }
    }
    Ok(steps)
}

/// Returns `(min start, max end)` in unix millis, or `None` for an empty list.
#[must_use]
pub fn steps_time_extent(steps: &[WorkflowStep]) -> Option<(f64, f64)> {
    let first = steps.first()?;
    let mut min = first.start_millis();
    let mut max = first.end_millis();
    for step in &steps[1..] {
        min = min.min(step.start_millis());
        max = max.max(step.end_millis());
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{IntervalPolicy, StepVariant, WorkflowStep, ingest_steps, steps_time_extent};
    use crate::error::GanttError;

    fn step(name: &str, start_min: i64, end_min: i64, retry: u32) -> WorkflowStep {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        WorkflowStep::new(
            name,
            base + Duration::minutes(start_min),
            base + Duration::minutes(end_min),
            retry,
        )
    }

    #[test]
    fn reversed_interval_is_rejected_with_index() {
        let steps = vec![step("ok", 0, 10, 0), step("bad", 20, 5, 0)];
        let err = ingest_steps(steps, IntervalPolicy::Reject).expect_err("must reject");
        match err {
            GanttError::InvalidInterval { index, name } => {
                assert_eq!(index, 1);
                assert_eq!(name, "bad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reversed_interval_can_be_clamped_to_zero_width() {
        let steps = vec![step("bad", 20, 5, 0)];
        let steps = ingest_steps(steps, IntervalPolicy::ClampToZeroWidth).expect("clamped");
        assert!(steps[0].is_zero_width());
        assert_eq!(steps[0].start_time, steps[0].end_time);
    }

    #[test]
    fn zero_width_interval_is_legal_under_reject() {
        let steps = vec![step("instant", 5, 5, 0)];
        assert!(ingest_steps(steps, IntervalPolicy::Reject).is_ok());
    }

    #[test]
    fn retry_count_selects_variant() {
        assert_eq!(step("a", 0, 1, 0).variant(), StepVariant::Normal);
        assert_eq!(step("a", 0, 1, 2).variant(), StepVariant::Retried);
    }

    #[test]
    fn extent_covers_unordered_steps() {
        let steps = vec![step("late", 30, 40, 0), step("early", 0, 10, 0)];
        let (min, max) = steps_time_extent(&steps).expect("extent");
        assert_eq!(min, steps[1].start_millis());
        assert_eq!(max, steps[0].end_millis());
        assert!(steps_time_extent(&[]).is_none());
    }
}
