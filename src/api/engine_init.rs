use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{TimeScale, Timespan, WorkflowStep, ingest_steps};
use crate::error::GanttResult;
use crate::interaction::{Debouncer, InteractionState};
use crate::render::Renderer;

use super::hover::{HoverTracker, TooltipContext};
use super::label_fit::{CharCountEstimator, LabelFitPolicy};
use super::viewport_controller::{ViewportBounds, ViewportController};
use super::{GanttEngine, GanttEngineConfig};

impl<R: Renderer> GanttEngine<R> {
    /// Creates an unmounted engine. Without an initial timespan in `config`
    /// the base scale covers the hour leading up to the current time.
    pub fn new(
        renderer: R,
        config: GanttEngineConfig,
        steps: Vec<WorkflowStep>,
    ) -> GanttResult<Self> {
        Self::new_at(renderer, config, steps, Utc::now())
    }

    /// Same as [`GanttEngine::new`] with an explicit "now" for the default
    /// timespan.
    pub fn new_at(
        renderer: R,
        config: GanttEngineConfig,
        steps: Vec<WorkflowStep>,
        now: DateTime<Utc>,
    ) -> GanttResult<Self> {
        config.validate()?;
        let steps = ingest_steps(steps, config.interval_policy)?;
        let timespan = config
            .initial_timespan
            .unwrap_or_else(|| Timespan::last_hour_until(now));
        let label_policy = LabelFitPolicy::new(config.label_fit.clone())?;
        let controller = build_controller(&config, &steps, timespan)?;
        let debouncer = config.render_debounce_ms.map(Debouncer::new);

        debug!(
            steps = steps.len(),
            width = config.viewport.width,
            height = config.viewport.height,
            "create gantt engine"
        );

        Ok(Self {
            renderer,
            config,
            steps,
            timespan,
            controller,
            label_policy,
            measurer: Box::new(CharCountEstimator),
            label_states: Vec::new(),
            last_commands: None,
            interaction: InteractionState::default(),
            hover: HoverTracker::default(),
            tooltip: None,
            debouncer,
            mounted: false,
        })
    }

    /// Rebuilds base scale and bounds after a data or size change.
    ///
    /// The transform returns to identity, label and hover state are dropped
    /// and a mounted engine re-renders. Row indices may now name different
    /// steps, so a visible tooltip is hidden until the pointer enters again.
    pub(super) fn rebuild(&mut self) -> GanttResult<()> {
        self.controller = build_controller(&self.config, &self.steps, self.timespan)?;
        self.label_states.clear();
        self.last_commands = None;
        self.hover = HoverTracker::default();
        if let Some(tooltip) = self.tooltip.as_mut() {
            *tooltip = TooltipContext::default();
        }
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
        let (start, end) = self.timespan.as_millis();
        debug!(
            steps = self.steps.len(),
            start_millis = start,
            end_millis = end,
            "rebuild base scale"
        );
        if self.mounted {
            self.render()?;
        }
        Ok(())
    }
}

fn build_controller(
    config: &GanttEngineConfig,
    steps: &[WorkflowStep],
    timespan: Timespan,
) -> GanttResult<ViewportController> {
    let base = TimeScale::from_timespan(timespan, config.axis_width_px())?;
    let bounds = ViewportBounds::from_steps(base, steps, config.zoom.bounds_trailing_margin_px);
    Ok(ViewportController::new(base, bounds, config.zoom))
}
