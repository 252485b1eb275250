use serde::{Deserialize, Serialize};

use crate::core::TimeScale;
use crate::error::{GanttError, GanttResult};

/// Zoom factor `k` and horizontal pan offset `x` applied on top of a base scale.
///
/// A base-scale pixel `p` lands at `k * p + x` on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    pub fn new(k: f64, x: f64) -> GanttResult<Self> {
        let transform = Self { k, x };
        transform.validate()?;
        Ok(transform)
    }

    pub fn validate(self) -> GanttResult<()> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(GanttError::InvalidData(
                "transform scale factor must be finite and > 0".to_owned(),
            ));
        }
        if !self.x.is_finite() {
            return Err(GanttError::InvalidData(
                "transform translation must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn apply_x(self, base_px: f64) -> f64 {
        self.k * base_px + self.x
    }

    #[must_use]
    pub fn invert_x(self, screen_px: f64) -> f64 {
        (screen_px - self.x) / self.k
    }

    #[must_use]
    pub fn translated_by(self, dx: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
        }
    }

    /// Rescales by `factor` while keeping the screen pixel `anchor_px` fixed.
    #[must_use]
    pub fn scaled_around(self, factor: f64, anchor_px: f64) -> Self {
        let base_anchor = self.invert_x(anchor_px);
        let k = self.k * factor;
        Self {
            k,
            x: anchor_px - base_anchor * k,
        }
    }

    /// Visible window of base-scale pixels for a screen range `[0, width]`.
    #[must_use]
    pub fn visible_base_window(self, width: f64) -> (f64, f64) {
        (self.invert_x(0.0), self.invert_x(width))
    }

    /// Derives the effective scale: same pixel range, domain re-projected
    /// through this transform. Pure in `(self, base)`.
    pub fn rescale(self, base: TimeScale) -> GanttResult<TimeScale> {
        self.validate()?;
        let (left, right) = self.visible_base_window(base.range_width());
        base.with_domain((base.pixel_to_time(left), base.pixel_to_time(right)))
    }
}
