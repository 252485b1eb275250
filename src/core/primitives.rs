use chrono::{DateTime, Utc};

use crate::error::{GanttError, GanttResult};

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> GanttResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(GanttError::InvalidData(
            "timestamp millis must be finite".to_owned(),
        ));
    }
    let rounded = millis.round();
    if rounded > (i64::MAX as f64) || rounded < (i64::MIN as f64) {
        return Err(GanttError::InvalidData(
            "timestamp millis out of range".to_owned(),
        ));
    }
    DateTime::<Utc>::from_timestamp_millis(rounded as i64).ok_or_else(|| {
        GanttError::InvalidData(format!("timestamp {rounded}ms cannot be represented"))
    })
}
