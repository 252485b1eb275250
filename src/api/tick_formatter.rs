use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimeScale;
use crate::error::{GanttError, GanttResult};

use super::TimeAxisConfig;
use super::draw_commands::AxisTick;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// 1970-01-04, the first Sunday after the epoch.
const FIRST_SUNDAY_MS: f64 = 3.0 * DAY_MS;
const MAX_TICKS: usize = 1_000;

/// Label granularity of the time axis, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickGranularity {
    Year,
    Month,
    Day,
    DayTime,
}

impl TickGranularity {
    /// Picks the granularity for a visible span, evaluated top-down with
    /// strictly-greater thresholds.
    #[must_use]
    pub fn for_span_millis(span_millis: f64) -> Self {
        if span_millis > YEAR_MS {
            Self::Year
        } else if span_millis > 6.0 * MONTH_MS {
            Self::Month
        } else if span_millis > WEEK_MS {
            Self::Day
        } else {
            Self::DayTime
        }
    }

    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%b %y",
            Self::Day => "%d %b %y",
            Self::DayTime => "%d %b %y %H:%M",
        }
    }

    #[must_use]
    pub fn format(self, time: DateTime<FixedOffset>) -> String {
        time.format(self.pattern()).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TickUnit {
    fn fixed_duration_ms(self) -> Option<f64> {
        match self {
            Self::Millisecond => Some(1.0),
            Self::Second => Some(SECOND_MS),
            Self::Minute => Some(MINUTE_MS),
            Self::Hour => Some(HOUR_MS),
            Self::Day => Some(DAY_MS),
            Self::Week => Some(WEEK_MS),
            Self::Month | Self::Year => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TickInterval {
    unit: TickUnit,
    step: u32,
}

const TICK_INTERVALS: [(TickUnit, u32, f64); 18] = [
    (TickUnit::Second, 1, SECOND_MS),
    (TickUnit::Second, 5, 5.0 * SECOND_MS),
    (TickUnit::Second, 15, 15.0 * SECOND_MS),
    (TickUnit::Second, 30, 30.0 * SECOND_MS),
    (TickUnit::Minute, 1, MINUTE_MS),
    (TickUnit::Minute, 5, 5.0 * MINUTE_MS),
    (TickUnit::Minute, 15, 15.0 * MINUTE_MS),
    (TickUnit::Minute, 30, 30.0 * MINUTE_MS),
    (TickUnit::Hour, 1, HOUR_MS),
    (TickUnit::Hour, 3, 3.0 * HOUR_MS),
    (TickUnit::Hour, 6, 6.0 * HOUR_MS),
    (TickUnit::Hour, 12, 12.0 * HOUR_MS),
    (TickUnit::Day, 1, DAY_MS),
    (TickUnit::Day, 2, 2.0 * DAY_MS),
    (TickUnit::Week, 1, WEEK_MS),
    (TickUnit::Month, 1, MONTH_MS),
    (TickUnit::Month, 3, 3.0 * MONTH_MS),
    (TickUnit::Year, 1, YEAR_MS),
];

/// Builds the axis ticks for the currently visible domain of `scale`.
pub fn build_axis_ticks(
    scale: TimeScale,
    config: TimeAxisConfig,
) -> GanttResult<(TickGranularity, Vec<AxisTick>)> {
    let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60).ok_or_else(|| {
        GanttError::InvalidData(format!(
            "utc offset of {} minutes is out of range",
            config.utc_offset_minutes
        ))
    })?;

    let (domain_start, domain_end) = scale.domain();
    let (start, end) = (domain_start.min(domain_end), domain_start.max(domain_end));
    let granularity = TickGranularity::for_span_millis(end - start);

    let instants = if end > start {
        let interval = select_tick_interval(start, end, config.target_tick_count);
        tick_instants(start, end, interval, offset)
    } else {
        vec![start]
    };

    let mut ticks = Vec::with_capacity(instants.len());
    for time_millis in instants {
        let Some(instant) = DateTime::<Utc>::from_timestamp_millis(time_millis.round() as i64)
        else {
            continue;
        };
        ticks.push(AxisTick {
            x: scale.time_to_pixel(time_millis),
            time_millis: instant.timestamp_millis(),
            label: granularity.format(instant.with_timezone(&offset)),
        });
    }
    Ok((granularity, ticks))
}

fn select_tick_interval(start: f64, end: f64, count: usize) -> TickInterval {
    let span = end - start;
    let target = span / count.max(1) as f64;
    let index = TICK_INTERVALS.partition_point(|(_, _, duration)| *duration <= target);

    if index == TICK_INTERVALS.len() {
        let step = nice_step(span / YEAR_MS, count).max(1.0);
        return TickInterval {
            unit: TickUnit::Year,
            step: step.min(f64::from(u32::MAX)) as u32,
        };
    }
    if index == 0 {
        let step = nice_step(span, count).max(1.0);
        return TickInterval {
            unit: TickUnit::Millisecond,
            step: step as u32,
        };
    }

    let (below_unit, below_step, below_duration) = TICK_INTERVALS[index - 1];
    let (above_unit, above_step, above_duration) = TICK_INTERVALS[index];
    if target / below_duration < above_duration / target {
        TickInterval {
            unit: below_unit,
            step: below_step,
        }
    } else {
        TickInterval {
            unit: above_unit,
            step: above_step,
        }
    }
}

/// 1/2/5 x 10^n step covering `span` in roughly `count` pieces.
fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let power = raw.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

fn tick_instants(start: f64, end: f64, interval: TickInterval, offset: FixedOffset) -> Vec<f64> {
    let offset_ms = f64::from(offset.local_minus_utc()) * SECOND_MS;
    match interval.unit.fixed_duration_ms() {
        Some(unit_ms) => {
            let step_ms = unit_ms * f64::from(interval.step);
            let origin = if interval.unit == TickUnit::Week {
                FIRST_SUNDAY_MS
            } else {
                0.0
            };
            let local_start = start + offset_ms - origin;
            let mut local = (local_start / step_ms).ceil() * step_ms + origin;
            let mut out = Vec::new();
            while local - offset_ms <= end && out.len() < MAX_TICKS {
                out.push(local - offset_ms);
                local += step_ms;
            }
            out
        }
        None => calendar_tick_instants(start, end, interval, offset),
    }
}

fn calendar_tick_instants(
    start: f64,
    end: f64,
    interval: TickInterval,
    offset: FixedOffset,
) -> Vec<f64> {
    let Some(start_utc) = DateTime::<Utc>::from_timestamp_millis(start.floor() as i64) else {
        return Vec::new();
    };
    let local_start = start_utc.with_timezone(&offset);
    let step = interval.step.max(1) as i32;

    // Month index counted from year 0 so stepping across years stays linear.
    let (mut month_index, month_stride) = match interval.unit {
        TickUnit::Year => {
            let year = local_start.year();
            (align_up(year, step) * 12, step * 12)
        }
        _ => {
            let index = local_start.year() * 12 + local_start.month0() as i32;
            (align_up(index, step), step)
        }
    };

    let mut out = Vec::new();
    // Back off one stride so a boundary exactly at `start` is not skipped.
    month_index -= month_stride;
    while out.len() < MAX_TICKS {
        let Some(millis) = month_start_millis(month_index, offset) else {
            break;
        };
        if millis > end {
            break;
        }
        if millis >= start {
            out.push(millis);
        }
        month_index += month_stride;
    }
    out
}

fn align_up(value: i32, step: i32) -> i32 {
    value.div_euclid(step) * step + if value.rem_euclid(step) == 0 { 0 } else { step }
}

fn month_start_millis(month_index: i32, offset: FixedOffset) -> Option<f64> {
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    let naive = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let local = offset.from_local_datetime(&naive).single()?;
    Some(local.timestamp_millis() as f64)
}
