use chrono::{DateTime, Utc};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::{LinearScale, Timespan};
use crate::error::{GanttError, GanttResult};

/// Wall-clock time axis mapped onto `[0, width]` pixels.
///
/// Time is carried as unix milliseconds so the mapping stays a plain linear
/// function; `DateTime<Utc>` helpers sit on top for callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain_millis: (f64, f64), range_width_px: f64) -> GanttResult<Self> {
        if !range_width_px.is_finite() || range_width_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "time scale range width must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            linear: LinearScale::new(domain_millis, (0.0, range_width_px))?,
        })
    }

    pub fn from_timespan(timespan: Timespan, range_width_px: f64) -> GanttResult<Self> {
        Self::new(timespan.as_millis(), range_width_px)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range_width(self) -> f64 {
        self.linear.range().1
    }

    /// Length of the visible domain in milliseconds.
    #[must_use]
    pub fn span_millis(self) -> f64 {
        let (start, end) = self.linear.domain();
        (end - start).abs()
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.linear.is_degenerate()
    }

    #[must_use]
    pub fn time_to_pixel(self, time_millis: f64) -> f64 {
        self.linear.apply(time_millis)
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn datetime_to_pixel(self, time: DateTime<Utc>) -> f64 {
        self.time_to_pixel(datetime_to_unix_millis(time))
    }

    pub fn pixel_to_datetime(self, pixel: f64) -> GanttResult<DateTime<Utc>> {
        unix_millis_to_datetime(self.pixel_to_time(pixel))
    }

    /// Returns the same scale over a different domain, keeping the pixel range.
    pub fn with_domain(self, domain_millis: (f64, f64)) -> GanttResult<Self> {
        Self::new(domain_millis, self.range_width())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::TimeScale;
    use crate::core::Timespan;

    #[test]
    fn timespan_edges_map_to_range_edges() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let span = Timespan::new(start, end).expect("span");
        let scale = TimeScale::from_timespan(span, 750.0).expect("scale");

        assert_eq!(scale.datetime_to_pixel(start), 0.0);
        assert!((scale.datetime_to_pixel(end) - 750.0).abs() <= 1e-9);
        assert_eq!(scale.pixel_to_datetime(0.0).expect("time"), start);
    }

    #[test]
    fn zero_width_range_is_rejected() {
        assert!(TimeScale::new((0.0, 1.0), 0.0).is_err());
        assert!(TimeScale::new((0.0, 1.0), f64::NAN).is_err());
    }
}
