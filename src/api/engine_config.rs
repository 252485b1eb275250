use serde::{Deserialize, Serialize};

use crate::core::{IntervalPolicy, Margins, Timespan, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::interaction::GestureFilter;
use crate::render::Color;

use super::label_fit::LabelFitConfig;

pub const ENGINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist chart setup. Every field
/// except `viewport` falls back to its default when missing from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    pub viewport: Viewport,
    /// Seeds the base scale. `None` means "the hour leading up to now".
    #[serde(default)]
    pub initial_timespan: Option<Timespan>,
    #[serde(default)]
    pub margins: Margins,
    /// Height reserved above the rows for the time axis.
    #[serde(default = "default_axis_height_px")]
    pub axis_height_px: f64,
    #[serde(default)]
    pub bar_layout: BarLayout,
    #[serde(default)]
    pub style: StepStyle,
    #[serde(default)]
    pub zoom: ZoomBehavior,
    #[serde(default)]
    pub gesture_filter: GestureFilter,
    #[serde(default)]
    pub label_fit: LabelFitConfig,
    #[serde(default)]
    pub time_axis: TimeAxisConfig,
    #[serde(default)]
    pub interval_policy: IntervalPolicy,
    /// When set, gesture-driven render passes are coalesced with this delay.
    #[serde(default)]
    pub render_debounce_ms: Option<u64>,
}

/// Static vertical layout and bar geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarLayout {
    pub bar_height_px: f64,
    pub bar_spacing_px: f64,
    pub corner_radius_px: f64,
    pub border_width_px: f64,
    /// Width used for zero-length (or sub-pixel) intervals.
    pub min_bar_width_px: f64,
    /// Horizontal offset of the label from the bar start.
    pub label_inset_px: f64,
    pub font_size_px: f64,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            bar_height_px: 30.0,
            bar_spacing_px: 10.0,
            corner_radius_px: 12.0,
            border_width_px: 3.0,
            min_bar_width_px: 1.0,
            label_inset_px: 10.0,
            font_size_px: 15.0,
        }
    }
}

impl BarLayout {
    #[must_use]
    pub fn row_pitch_px(self) -> f64 {
        self.bar_height_px + self.bar_spacing_px
    }

    #[must_use]
    pub fn row_top_px(self, row: usize) -> f64 {
        row as f64 * self.row_pitch_px()
    }

    /// Label baseline inside a row.
    #[must_use]
    pub fn label_baseline_px(self) -> f64 {
        self.bar_height_px / 1.5
    }
}

/// Colors for the two bar variants and the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepStyle {
    pub step_color: Color,
    pub inner_step_color: Color,
    pub retry_step_color: Color,
    pub inner_retry_step_color: Color,
    pub axis_color: Color,
    pub axis_label_color: Color,
}

impl Default for StepStyle {
    fn default() -> Self {
        Self {
            step_color: Color::rgb8(0x19, 0x7c, 0x3b),
            inner_step_color: Color::rgb8(0xd2, 0xf1, 0xdd),
            retry_step_color: Color::rgb8(0x1e, 0x4c, 0xcf),
            inner_retry_step_color: Color::rgb8(0xd1, 0xdf, 0xf2),
            axis_color: Color::rgb(0.0, 0.0, 0.0),
            axis_label_color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

/// Zoom/pan limits and wheel tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomBehavior {
    pub min_scale_factor: f64,
    pub max_scale_factor: f64,
    /// Extra room after the latest step end when deriving pan bounds.
    pub bounds_trailing_margin_px: f64,
    /// Zoom ratio applied per 120 wheel units.
    pub wheel_zoom_step_ratio: f64,
    /// Fraction of the axis width panned per 120 horizontal wheel units.
    pub wheel_pan_step_ratio: f64,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            min_scale_factor: 1.0,
            max_scale_factor: 5_000.0,
            bounds_trailing_margin_px: 15.0,
            wheel_zoom_step_ratio: 0.2,
            wheel_pan_step_ratio: 0.1,
        }
    }
}

/// Tick density and label timezone of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeAxisConfig {
    pub target_tick_count: usize,
    /// Fixed offset east of UTC used for tick alignment and labels.
    pub utc_offset_minutes: i32,
    pub font_size_px: f64,
    pub tick_length_px: f64,
}

impl Default for TimeAxisConfig {
    fn default() -> Self {
        Self {
            target_tick_count: 10,
            utc_offset_minutes: 0,
            font_size_px: 11.0,
            tick_length_px: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: GanttEngineConfig,
}

impl GanttEngineConfig {
    /// Creates a config with the default layout and a "last hour" timespan.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            initial_timespan: None,
            margins: Margins::default(),
            axis_height_px: default_axis_height_px(),
            bar_layout: BarLayout::default(),
            style: StepStyle::default(),
            zoom: ZoomBehavior::default(),
            gesture_filter: GestureFilter::default(),
            label_fit: LabelFitConfig::default(),
            time_axis: TimeAxisConfig::default(),
            interval_policy: IntervalPolicy::default(),
            render_debounce_ms: None,
        }
    }

    #[must_use]
    pub fn with_initial_timespan(mut self, timespan: Timespan) -> Self {
        self.initial_timespan = Some(timespan);
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_bar_layout(mut self, bar_layout: BarLayout) -> Self {
        self.bar_layout = bar_layout;
        self
    }

    #[must_use]
    pub fn with_zoom_behavior(mut self, zoom: ZoomBehavior) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_label_fit(mut self, label_fit: LabelFitConfig) -> Self {
        self.label_fit = label_fit;
        self
    }

    #[must_use]
    pub fn with_interval_policy(mut self, policy: IntervalPolicy) -> Self {
        self.interval_policy = policy;
        self
    }

    #[must_use]
    pub fn with_render_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.render_debounce_ms = Some(delay_ms);
        self
    }

    /// Plot width left for the time axis once horizontal margins are removed.
    #[must_use]
    pub fn axis_width_px(&self) -> f64 {
        f64::from(self.viewport.width) - self.margins.left - self.margins.right
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margins.validate()?;
        if self.axis_width_px() <= 0.0 {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.axis_height_px.is_finite() || self.axis_height_px < 0.0 {
            return Err(GanttError::InvalidData(
                "axis height must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(span) = self.initial_timespan {
            Timespan::new(span.start(), span.end())?;
        }
        validate_bar_layout(self.bar_layout)?;
        validate_zoom_behavior(self.zoom)?;
        self.label_fit.validate()?;
        validate_time_axis(self.time_axis)?;
        for color in [
            self.style.step_color,
            self.style.inner_step_color,
            self.style.retry_step_color,
            self.style.inner_retry_step_color,
            self.style.axis_color,
            self.style.axis_label_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }

    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = EngineConfigJsonContractV1 {
            schema_version: ENGINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize engine config contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        let config = match serde_json::from_str::<Self>(input) {
            Ok(config) => config,
            Err(_) => {
                let payload: EngineConfigJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        GanttError::InvalidData(format!("failed to parse engine config json: {e}"))
                    })?;
                if payload.schema_version != ENGINE_CONFIG_JSON_SCHEMA_V1 {
                    return Err(GanttError::InvalidData(format!(
                        "unsupported engine config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_axis_height_px() -> f64 {
    50.0
}

fn validate_bar_layout(layout: BarLayout) -> GanttResult<()> {
    if !layout.bar_height_px.is_finite() || layout.bar_height_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "bar height must be finite and > 0".to_owned(),
        ));
    }
    for (field, value) in [
        ("bar spacing", layout.bar_spacing_px),
        ("corner radius", layout.corner_radius_px),
        ("border width", layout.border_width_px),
        ("label inset", layout.label_inset_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GanttError::InvalidData(format!(
                "{field} must be finite and >= 0"
            )));
        }
    }
    if !layout.min_bar_width_px.is_finite() || layout.min_bar_width_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "min bar width must be finite and > 0".to_owned(),
        ));
    }
    if !layout.font_size_px.is_finite() || layout.font_size_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "bar font size must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_zoom_behavior(zoom: ZoomBehavior) -> GanttResult<()> {
    if !zoom.min_scale_factor.is_finite() || zoom.min_scale_factor <= 0.0 {
        return Err(GanttError::InvalidData(
            "min scale factor must be finite and > 0".to_owned(),
        ));
    }
    if !zoom.max_scale_factor.is_finite() || zoom.max_scale_factor < zoom.min_scale_factor {
        return Err(GanttError::InvalidData(
            "max scale factor must be finite and >= min scale factor".to_owned(),
        ));
    }
    if !zoom.bounds_trailing_margin_px.is_finite() || zoom.bounds_trailing_margin_px < 0.0 {
        return Err(GanttError::InvalidData(
            "bounds trailing margin must be finite and >= 0".to_owned(),
        ));
    }
    if !zoom.wheel_zoom_step_ratio.is_finite() || zoom.wheel_zoom_step_ratio <= 0.0 {
        return Err(GanttError::InvalidData(
            "wheel zoom step ratio must be finite and > 0".to_owned(),
        ));
    }
    if !zoom.wheel_pan_step_ratio.is_finite() || zoom.wheel_pan_step_ratio < 0.0 {
        return Err(GanttError::InvalidData(
            "wheel pan step ratio must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_time_axis(axis: TimeAxisConfig) -> GanttResult<()> {
    if axis.target_tick_count == 0 {
        return Err(GanttError::InvalidData(
            "target tick count must be > 0".to_owned(),
        ));
    }
    // chrono::FixedOffset accepts strictly less than one day.
    if axis.utc_offset_minutes.abs() >= 24 * 60 {
        return Err(GanttError::InvalidData(
            "utc offset must be within (-24h, 24h)".to_owned(),
        ));
    }
    if !axis.font_size_px.is_finite() || axis.font_size_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "axis font size must be finite and > 0".to_owned(),
        ));
    }
    if !axis.tick_length_px.is_finite() || axis.tick_length_px < 0.0 {
        return Err(GanttError::InvalidData(
            "tick length must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}
