use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;
use crate::error::{GanttError, GanttResult};

/// Pixel size of the drawing surface handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Outer spacing between the surface edges and the plotted area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> GanttResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 25.0, 20.0, 25.0)
    }
}

/// Ordered wall-clock interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Timespan {
    /// Builds a timespan, rejecting `end < start`.
    ///
    /// `start == end` is accepted; the scale treats it as a degenerate domain.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GanttResult<Self> {
        if end < start {
            return Err(GanttError::InvalidData(
                "timespan end must not precede start".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The hour leading up to `now`.
    #[must_use]
    pub fn last_hour_until(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::hours(1),
            end: now,
        }
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn as_millis(self) -> (f64, f64) {
        (
            datetime_to_unix_millis(self.start),
            datetime_to_unix_millis(self.end),
        )
    }
}
