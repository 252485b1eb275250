use tracing::{debug, warn};

use crate::core::{Timespan, WorkflowStep};
use crate::error::GanttResult;
use crate::interaction::{Debouncer, InteractionState};
use crate::render::{RenderFrame, Renderer};

use super::GanttEngineConfig;
use super::draw_commands::DrawCommands;
use super::frame_builder::build_render_frame;
use super::hover::{HoverTracker, TooltipContext};
use super::label_fit::{LabelFitPolicy, LabelFitState, TextMeasurer};
use super::render_sync::{RenderPassInput, render_pass};
use super::viewport_controller::ViewportController;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `GanttEngine` owns the step list, the viewport controller, per-row label
/// state and the renderer. Frames reach the renderer only while mounted.
pub struct GanttEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: GanttEngineConfig,
    pub(super) steps: Vec<WorkflowStep>,
    /// Resolved initial timespan; reused by rebuilds until replaced.
    pub(super) timespan: Timespan,
    pub(super) controller: ViewportController,
    pub(super) label_policy: LabelFitPolicy,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) label_states: Vec<LabelFitState>,
    pub(super) last_commands: Option<DrawCommands>,
    pub(super) interaction: InteractionState,
    pub(super) hover: HoverTracker,
    pub(super) tooltip: Option<TooltipContext>,
    pub(super) debouncer: Option<Debouncer>,
    pub(super) mounted: bool,
}

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Creates the tooltip context and draws the first frame.
    ///
    /// Mounting an already mounted engine just re-renders.
    pub fn mount(&mut self) -> GanttResult<()> {
        if !self.mounted {
            debug!(steps = self.steps.len(), "mount gantt engine");
            self.mounted = true;
            self.tooltip = Some(TooltipContext::default());
        }
        self.render()
    }

    /// Removes everything drawn since `mount`, drops the tooltip context and
    /// cancels any pending debounced render.
    pub fn unmount(&mut self) -> GanttResult<()> {
        if !self.mounted {
            return Ok(());
        }
        debug!("unmount gantt engine");
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
        self.mounted = false;
        self.tooltip = None;
        self.hover = HoverTracker::default();
        self.interaction.on_pointer_leave();
        self.interaction.on_pan_end();
        self.renderer.clear()
    }

    /// Runs one render pass against the current transform.
    ///
    /// Draw commands and label states are always refreshed; the frame is only
    /// handed to the renderer while mounted.
    pub fn render(&mut self) -> GanttResult<()> {
        let commands = self.compute_draw_commands()?;
        if self.mounted {
            let frame = build_render_frame(&commands, &self.config, self.config.viewport);
            self.renderer.render(&frame)?;
        }
        self.last_commands = Some(commands);
        Ok(())
    }

    /// Builds the frame for the current state without touching the renderer.
    pub fn build_render_frame(&self) -> GanttResult<RenderFrame> {
        let commands = match &self.last_commands {
            Some(commands) => commands.clone(),
            None => self.peek_draw_commands()?,
        };
        Ok(build_render_frame(
            &commands,
            &self.config,
            self.config.viewport,
        ))
    }

    /// Renders the current state into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> GanttResult<()>
    where
        R: CairoContextRenderer,
    {
        let commands = self.compute_draw_commands()?;
        let frame = build_render_frame(&commands, &self.config, self.config.viewport);
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.last_commands = Some(commands);
        Ok(())
    }

    /// Runs the pass and commits the new label states.
    fn compute_draw_commands(&mut self) -> GanttResult<DrawCommands> {
        let output = render_pass(self.render_pass_input()?)?;
        self.label_states = output.label_states;
        Ok(output.commands)
    }

    /// Runs the pass without committing label states.
    fn peek_draw_commands(&self) -> GanttResult<DrawCommands> {
        Ok(render_pass(self.render_pass_input()?)?.commands)
    }

    fn render_pass_input(&self) -> GanttResult<RenderPassInput<'_>> {
        Ok(RenderPassInput {
            steps: &self.steps,
            scale: self.controller.effective_scale()?,
            bar_layout: self.config.bar_layout,
            time_axis: self.config.time_axis,
            label_policy: &self.label_policy,
            measurer: self.measurer.as_ref(),
            previous_label_states: &self.label_states,
        })
    }
}

impl<R: Renderer> Drop for GanttEngine<R> {
    fn drop(&mut self) {
        if let Err(err) = self.unmount() {
            warn!(error = %err, "failed to unmount gantt engine on drop");
        }
    }
}
