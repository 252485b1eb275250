use crate::core::primitives::unix_millis_to_datetime;
use crate::core::{Timespan, Viewport, WorkflowStep, ZoomTransform, ingest_steps};
use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;

use super::draw_commands::DrawCommands;
use super::hover::TooltipContext;
use super::label_fit::{LabelFitState, TextMeasurer};
use super::viewport_controller::ViewportBounds;
use super::{GanttEngine, GanttEngineConfig};

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn config(&self) -> &GanttEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    #[must_use]
    pub fn initial_timespan(&self) -> Timespan {
        self.timespan
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.controller.transform()
    }

    #[must_use]
    pub fn viewport_bounds(&self) -> ViewportBounds {
        self.controller.bounds()
    }

    /// Per-row label states from the last render pass.
    #[must_use]
    pub fn label_states(&self) -> &[LabelFitState] {
        &self.label_states
    }

    /// Draw commands of the last render pass, if any since the last rebuild.
    #[must_use]
    pub fn draw_commands(&self) -> Option<&DrawCommands> {
        self.last_commands.as_ref()
    }

    /// Tooltip state; `None` while unmounted.
    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipContext> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Replaces the text measurer. Label states are recomputed from scratch
    /// because previous decisions were based on other widths.
    pub fn set_text_measurer(&mut self, measurer: Box<dyn TextMeasurer>) -> GanttResult<()> {
        self.measurer = measurer;
        self.label_states.clear();
        if self.mounted {
            self.render()?;
        }
        Ok(())
    }

    /// Currently visible timespan, derived from the transform.
    pub fn visible_timespan(&self) -> GanttResult<Timespan> {
        let (start, end) = self.controller.effective_scale()?.domain();
        Timespan::new(
            unix_millis_to_datetime(start)?,
            unix_millis_to_datetime(end)?,
        )
    }

    /// Replaces the step list and rebuilds scale and bounds.
    ///
    /// On ingestion failure the engine keeps its previous steps.
    pub fn set_steps(&mut self, steps: Vec<WorkflowStep>) -> GanttResult<()> {
        self.steps = ingest_steps(steps, self.config.interval_policy)?;
        self.rebuild()
    }

    /// Resizes the container.
    pub fn set_viewport(&mut self, viewport: Viewport) -> GanttResult<()> {
        let mut candidate = self.config.clone();
        candidate.viewport = viewport;
        if !viewport.is_valid() || candidate.axis_width_px() <= 0.0 {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config = candidate;
        self.rebuild()
    }

    pub fn set_initial_timespan(&mut self, timespan: Timespan) -> GanttResult<()> {
        self.config.initial_timespan = Some(timespan);
        self.timespan = timespan;
        self.rebuild()
    }
}
