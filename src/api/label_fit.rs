use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Display state of one step label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelFitState {
    Full,
    Truncated,
}

/// Where the ellipsis marker goes relative to the kept prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EllipsisPlacement {
    /// `prefix...`
    #[default]
    Trailing,
    /// `...prefix`
    Leading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFitConfig {
    /// Width estimate per character when no measurer answers.
    pub char_width_px: f64,
    /// Gap between the shrink and grow thresholds.
    pub hysteresis_margin_px: f64,
    /// Characters kept from the name when truncated. Independent of bar width.
    pub prefix_chars: usize,
    pub ellipsis: String,
    pub ellipsis_placement: EllipsisPlacement,
}

impl Default for LabelFitConfig {
    fn default() -> Self {
        Self {
            char_width_px: 8.0,
            hysteresis_margin_px: 20.0,
            prefix_chars: 10,
            ellipsis: "...".to_owned(),
            ellipsis_placement: EllipsisPlacement::Trailing,
        }
    }
}

impl LabelFitConfig {
    pub fn validate(&self) -> GanttResult<()> {
        if !self.char_width_px.is_finite() || self.char_width_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "label char width must be finite and > 0".to_owned(),
            ));
        }
        if !self.hysteresis_margin_px.is_finite() || self.hysteresis_margin_px < 0.0 {
            return Err(GanttError::InvalidData(
                "label hysteresis margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Measures rendered text width. Returning `None` falls back to the
/// character-count estimate.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> Option<f64>;
}

/// Measurer that never measures, so every label uses the char-count estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCountEstimator;

impl TextMeasurer for CharCountEstimator {
    fn measure(&self, _text: &str, _font_size_px: f64) -> Option<f64> {
        None
    }
}

/// Shrink/grow thresholds for one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitThresholds {
    pub shrink_px: f64,
    pub grow_px: f64,
}

/// Full-vs-truncated decision with hysteresis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelFitPolicy {
    config: LabelFitConfig,
}

impl LabelFitPolicy {
    pub fn new(config: LabelFitConfig) -> GanttResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &LabelFitConfig {
        &self.config
    }

    #[must_use]
    pub fn estimate_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.config.char_width_px
    }

    #[must_use]
    pub fn natural_width(
        &self,
        text: &str,
        font_size_px: f64,
        measurer: &dyn TextMeasurer,
    ) -> f64 {
        measurer
            .measure(text, font_size_px)
            .filter(|width| width.is_finite() && *width >= 0.0)
            .unwrap_or_else(|| self.estimate_width(text))
    }

    #[must_use]
    pub fn thresholds(&self, natural_width_px: f64) -> FitThresholds {
        FitThresholds {
            shrink_px: natural_width_px,
            grow_px: natural_width_px + self.config.hysteresis_margin_px,
        }
    }

    /// Decides the next state for a bar of `bar_width_px`.
    ///
    /// Without a previous state the label truncates iff it does not fit.
    /// A truncated label only grows back at `grow_px`; a full label only
    /// truncates below `shrink_px`.
    #[must_use]
    pub fn decide(
        &self,
        previous: Option<LabelFitState>,
        bar_width_px: f64,
        natural_width_px: f64,
    ) -> LabelFitState {
        let thresholds = self.thresholds(natural_width_px);
        match previous {
            None | Some(LabelFitState::Full) => {
                if bar_width_px < thresholds.shrink_px {
                    LabelFitState::Truncated
                } else {
                    LabelFitState::Full
                }
            }
            Some(LabelFitState::Truncated) => {
                if bar_width_px >= thresholds.grow_px {
                    LabelFitState::Full
                } else {
                    LabelFitState::Truncated
                }
            }
        }
    }

    #[must_use]
    pub fn truncate(&self, name: &str) -> String {
        let prefix: String = name.chars().take(self.config.prefix_chars).collect();
        match self.config.ellipsis_placement {
            EllipsisPlacement::Trailing => format!("{prefix}{}", self.config.ellipsis),
            EllipsisPlacement::Leading => format!("{}{prefix}", self.config.ellipsis),
        }
    }

    #[must_use]
    pub fn display_text(&self, name: &str, state: LabelFitState) -> String {
        match state {
            LabelFitState::Full => name.to_owned(),
            LabelFitState::Truncated => self.truncate(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CharCountEstimator, EllipsisPlacement, LabelFitConfig, LabelFitPolicy, LabelFitState,
        TextMeasurer,
    };

    struct FixedMeasurer(f64);

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, _text: &str, _font_size_px: f64) -> Option<f64> {
            Some(self.0)
        }
    }

    #[test]
    fn unmeasured_width_is_proportional_to_chars() {
        let policy = LabelFitPolicy::default();
        let width = policy.natural_width("abcde", 15.0, &CharCountEstimator);
        assert_eq!(width, 40.0);
    }

    #[test]
    fn measured_width_wins_over_estimate() {
        let policy = LabelFitPolicy::default();
        assert_eq!(policy.natural_width("abcde", 15.0, &FixedMeasurer(12.5)), 12.5);
        assert_eq!(
            policy.natural_width("abcde", 15.0, &FixedMeasurer(f64::NAN)),
            40.0
        );
    }

    #[test]
    fn fresh_label_truncates_only_when_too_narrow() {
        let policy = LabelFitPolicy::default();
        assert_eq!(policy.decide(None, 99.0, 100.0), LabelFitState::Truncated);
        assert_eq!(policy.decide(None, 100.0, 100.0), LabelFitState::Full);
    }

    #[test]
    fn truncated_label_waits_for_grow_threshold() {
        let policy = LabelFitPolicy::default();
        let state = Some(LabelFitState::Truncated);
        assert_eq!(policy.decide(state, 100.0, 100.0), LabelFitState::Truncated);
        assert_eq!(policy.decide(state, 119.9, 100.0), LabelFitState::Truncated);
        assert_eq!(policy.decide(state, 120.0, 100.0), LabelFitState::Full);
    }

    #[test]
    fn full_label_holds_until_below_shrink_threshold() {
        let policy = LabelFitPolicy::default();
        let state = Some(LabelFitState::Full);
        assert_eq!(policy.decide(state, 100.0, 100.0), LabelFitState::Full);
        assert_eq!(policy.decide(state, 99.99, 100.0), LabelFitState::Truncated);
    }

    #[test]
    fn truncation_keeps_fixed_prefix() {
        let policy = LabelFitPolicy::default();
        assert_eq!(policy.truncate("extract-transform-load-nightly"), "extract-tr...");
        assert_eq!(policy.truncate("short"), "short...");
    }

    #[test]
    fn leading_ellipsis_placement() {
        let policy = LabelFitPolicy::new(LabelFitConfig {
            ellipsis_placement: EllipsisPlacement::Leading,
            ..LabelFitConfig::default()
        })
        .expect("policy");
        assert_eq!(policy.truncate("extract-transform"), "...extract-tr");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let policy = LabelFitPolicy::default();
        assert_eq!(policy.truncate("überprüfung-läuft"), "überprüfun...");
    }
}
