use crate::error::{GanttError, GanttResult};

/// Continuous linear mapping from a numeric domain onto a pixel range.
///
/// A degenerate domain (`start == end`) is accepted: every value maps to the
/// range start and `invert` returns the domain start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> GanttResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(GanttError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(GanttError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if self.is_degenerate() || range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn maps_domain_edges_to_range_edges() {
        let scale = LinearScale::new((10.0, 110.0), (0.0, 500.0)).expect("scale");
        assert_eq!(scale.apply(10.0), 0.0);
        assert_eq!(scale.apply(110.0), 500.0);
        assert_eq!(scale.apply(60.0), 250.0);
    }

    #[test]
    fn degenerate_domain_collapses_to_range_start() {
        let scale = LinearScale::new((42.0, 42.0), (0.0, 500.0)).expect("scale");
        assert_eq!(scale.apply(42.0), 0.0);
        assert_eq!(scale.apply(1_000.0), 0.0);
        assert_eq!(scale.invert(250.0), 42.0);
    }

    #[test]
    fn non_finite_domain_is_rejected() {
        assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, 1.0), (0.0, f64::INFINITY)).is_err());
    }
}
