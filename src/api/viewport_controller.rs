use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{TimeScale, WorkflowStep, ZoomTransform, steps_time_extent};
use crate::error::{GanttError, GanttResult};

use super::ZoomBehavior;

const WHEEL_STEP_UNITS: f64 = 120.0;

/// Base-scale pixel limits the visible window may not leave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub min_pixel: f64,
    pub max_pixel: f64,
}

impl ViewportBounds {
    /// Bounds spanning the steps' time extent plus a trailing margin.
    ///
    /// An empty step list falls back to the base scale's own range.
    #[must_use]
    pub fn from_steps(base: TimeScale, steps: &[WorkflowStep], trailing_margin_px: f64) -> Self {
        match steps_time_extent(steps) {
            Some((min_start, max_end)) => Self {
                min_pixel: base.time_to_pixel(min_start),
                max_pixel: base.time_to_pixel(max_end) + trailing_margin_px,
            },
            None => Self {
                min_pixel: 0.0,
                max_pixel: base.range_width(),
            },
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_pixel - self.min_pixel
    }
}

/// Owns the current zoom/pan transform and keeps it inside the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    base: TimeScale,
    bounds: ViewportBounds,
    zoom: ZoomBehavior,
    transform: ZoomTransform,
}

impl ViewportController {
    #[must_use]
    pub fn new(base: TimeScale, bounds: ViewportBounds, zoom: ZoomBehavior) -> Self {
        Self {
            base,
            bounds,
            zoom,
            transform: ZoomTransform::IDENTITY,
        }
    }

    #[must_use]
    pub fn base_scale(&self) -> TimeScale {
        self.base
    }

    #[must_use]
    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Visible window in base-scale pixels for the current transform.
    #[must_use]
    pub fn visible_window(&self) -> (f64, f64) {
        self.transform.visible_base_window(self.base.range_width())
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
    }

    /// Clamps `raw` into the zoom extent and the bounds, then stores it.
    ///
    /// Out-of-range requests are clamped, never rejected; only non-finite
    /// input is an error. Rebuilds leave the identity transform unclamped, so
    /// when the bounds are narrower than the axis the first gesture after a
    /// rebuild jumps `k` up to the zoom that fits the bounds.
    pub fn apply_gesture(&mut self, raw: ZoomTransform) -> GanttResult<ZoomTransform> {
        raw.validate()?;
        let clamped = self.clamp(raw);
        trace!(
            raw_k = raw.k,
            raw_x = raw.x,
            k = clamped.k,
            x = clamped.x,
            "apply gesture"
        );
        self.transform = clamped;
        Ok(clamped)
    }

    /// Nearest valid transform to `raw`. Pure.
    #[must_use]
    pub fn clamp(&self, raw: ZoomTransform) -> ZoomTransform {
        let width = self.base.range_width();
        let bounds = self.bounds;
        let fit_k = if bounds.width() > 0.0 {
            width / bounds.width()
        } else {
            f64::INFINITY
        };
        let min_k = self.zoom.min_scale_factor.max(fit_k);
        let max_k = self.zoom.max_scale_factor;

        if min_k > max_k {
            // Bounds narrower than the window even at max zoom: center them.
            let k = max_k;
            let center = (bounds.min_pixel + bounds.max_pixel) / 2.0;
            return ZoomTransform {
                k,
                x: width / 2.0 - k * center,
            };
        }

        let k = raw.k.clamp(min_k, max_k);
        // Window left edge >= min_pixel and right edge <= max_pixel.
        let x_low = width - k * bounds.max_pixel;
        let x_high = -k * bounds.min_pixel;
        let x = if x_low <= x_high {
            raw.x.clamp(x_low, x_high)
        } else {
            (x_low + x_high) / 2.0
        };
        ZoomTransform { k, x }
    }

    /// Current transform composed onto the base scale.
    pub fn effective_scale(&self) -> GanttResult<TimeScale> {
        self.transform.rescale(self.base)
    }

    pub fn pan_by_pixels(&mut self, dx: f64) -> GanttResult<ZoomTransform> {
        if !dx.is_finite() {
            return Err(GanttError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        self.apply_gesture(self.transform.translated_by(dx))
    }

    /// Zooms by `factor` keeping `anchor_px` (plot-local) fixed on screen.
    pub fn zoom_at(&mut self, factor: f64, anchor_px: f64) -> GanttResult<ZoomTransform> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GanttError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor_px.is_finite() {
            return Err(GanttError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        self.apply_gesture(self.transform.scaled_around(factor, anchor_px))
    }

    pub fn wheel_zoom(&mut self, delta_y: f64, anchor_px: f64) -> GanttResult<ZoomTransform> {
        match resolve_wheel_zoom_factor(delta_y, self.zoom.wheel_zoom_step_ratio)? {
            Some(factor) => self.zoom_at(factor, anchor_px),
            None => Ok(self.transform),
        }
    }

    pub fn wheel_pan(&mut self, delta_x: f64) -> GanttResult<ZoomTransform> {
        let dx = -(delta_x / WHEEL_STEP_UNITS)
            * self.base.range_width()
            * self.zoom.wheel_pan_step_ratio;
        self.pan_by_pixels(dx)
    }
}

/// Wheel delta to multiplicative zoom factor; negative deltas zoom in.
pub(super) fn resolve_wheel_zoom_factor(
    wheel_delta_y: f64,
    zoom_step_ratio: f64,
) -> GanttResult<Option<f64>> {
    if wheel_delta_y == 0.0 {
        return Ok(None);
    }

    let normalized_steps = wheel_delta_y / WHEEL_STEP_UNITS;
    let base = 1.0 + zoom_step_ratio;
    let factor = base.powf(-normalized_steps);
    if !factor.is_finite() || factor <= 0.0 {
        return Err(GanttError::InvalidData(
            "computed wheel zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(Some(factor))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{ViewportBounds, ViewportController, resolve_wheel_zoom_factor};
    use crate::api::ZoomBehavior;
    use crate::core::{TimeScale, ZoomTransform};

    fn controller(bounds: ViewportBounds) -> ViewportController {
        let base = TimeScale::new((0.0, 1_000.0), 500.0).expect("scale");
        ViewportController::new(base, bounds, ZoomBehavior::default())
    }

    fn wide_bounds() -> ViewportBounds {
        ViewportBounds {
            min_pixel: 0.0,
            max_pixel: 515.0,
        }
    }

    #[test]
    fn identity_fits_when_bounds_cover_window() {
        let mut ctl = controller(wide_bounds());
        let stored = ctl.apply_gesture(ZoomTransform::IDENTITY).expect("apply");
        assert_eq!(stored, ZoomTransform::IDENTITY);
    }

    #[test]
    fn pan_past_start_is_clamped() {
        let mut ctl = controller(wide_bounds());
        let stored = ctl.pan_by_pixels(200.0).expect("pan");
        assert_eq!(stored.x, 0.0);
        let (left, _) = ctl.visible_window();
        assert!(left >= 0.0);
    }

    #[test]
    fn pan_past_end_stops_at_trailing_margin() {
        let mut ctl = controller(wide_bounds());
        let stored = ctl.pan_by_pixels(-200.0).expect("pan");
        assert_relative_eq!(stored.x, -15.0);
        let (_, right) = ctl.visible_window();
        assert_relative_eq!(right, 515.0);
    }

    #[test]
    fn zoom_is_bounded_by_scale_extent() {
        let mut ctl = controller(wide_bounds());
        let stored = ctl.zoom_at(1e9, 250.0).expect("zoom");
        assert_eq!(stored.k, 5_000.0);
        let stored = ctl.zoom_at(1e-9, 250.0).expect("zoom");
        assert_eq!(stored.k, 1.0);
    }

    #[test]
    fn narrow_bounds_force_minimum_zoom() {
        let mut ctl = controller(ViewportBounds {
            min_pixel: 100.0,
            max_pixel: 200.0,
        });
        let stored = ctl.apply_gesture(ZoomTransform::IDENTITY).expect("apply");
        assert_relative_eq!(stored.k, 5.0);
        let (left, right) = ctl.visible_window();
        assert_relative_eq!(left, 100.0);
        assert_relative_eq!(right, 200.0);
    }

    #[test]
    fn first_gesture_over_narrow_bounds_snaps_to_fit_zoom() {
        // 100px of data on a 500px axis.
        let mut ctl = controller(ViewportBounds {
            min_pixel: 0.0,
            max_pixel: 100.0,
        });
        assert_eq!(ctl.transform(), ZoomTransform::IDENTITY);

        let stored = ctl.pan_by_pixels(-1.0).expect("pan");
        assert_relative_eq!(stored.k, 5.0);
        assert_relative_eq!(stored.x, 0.0);
    }

    #[test]
    fn wheel_pan_moves_one_step_ratio_of_the_axis() {
        let mut ctl = controller(wide_bounds());
        ctl.zoom_at(2.0, 0.0).expect("zoom");

        // 120 units = one step of 10% of 500px, scrolling right moves content left.
        let stored = ctl.wheel_pan(120.0).expect("wheel pan");
        assert_relative_eq!(stored.x, -50.0);
        let stored = ctl.wheel_pan(-60.0).expect("wheel pan");
        assert_relative_eq!(stored.x, -25.0);
    }

    #[test]
    fn repeated_small_pans_cannot_escape() {
        let mut ctl = controller(wide_bounds());
        ctl.zoom_at(4.0, 250.0).expect("zoom");
        for _ in 0..10_000 {
            ctl.pan_by_pixels(3.0).expect("pan");
        }
        let (left, _) = ctl.visible_window();
        assert!(left >= -1e-9);
        for _ in 0..10_000 {
            ctl.pan_by_pixels(-3.0).expect("pan");
        }
        let (_, right) = ctl.visible_window();
        assert!(right <= 515.0 + 1e-9);
    }

    #[test]
    fn effective_scale_reflects_zoom() {
        let mut ctl = controller(wide_bounds());
        ctl.zoom_at(2.0, 0.0).expect("zoom");
        let effective = ctl.effective_scale().expect("scale");
        let (start, end) = effective.domain();
        assert_relative_eq!(start, 0.0);
        assert_relative_eq!(end, 500.0);
    }

    #[test]
    fn non_finite_gesture_is_an_error() {
        let mut ctl = controller(wide_bounds());
        assert!(ctl.pan_by_pixels(f64::NAN).is_err());
        assert!(ctl.zoom_at(0.0, 10.0).is_err());
        assert_eq!(ctl.transform(), ZoomTransform::IDENTITY);
    }

    #[test]
    fn wheel_zoom_factor_direction() {
        let zoom_in = resolve_wheel_zoom_factor(-120.0, 0.2)
            .expect("factor")
            .expect("some");
        assert!(zoom_in > 1.0);
        assert!(resolve_wheel_zoom_factor(0.0, 0.2).expect("factor").is_none());
    }
}
