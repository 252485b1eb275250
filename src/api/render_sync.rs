use tracing::trace;

use crate::core::{TimeScale, WorkflowStep};
use crate::error::GanttResult;

use super::draw_commands::{BarGeometry, DrawCommands, StepLabel};
use super::label_fit::{LabelFitPolicy, LabelFitState, TextMeasurer};
use super::tick_formatter::build_axis_ticks;
use super::{BarLayout, TimeAxisConfig};

/// Inputs of one render pass. Nothing here is mutated by the pass.
pub struct RenderPassInput<'a> {
    pub steps: &'a [WorkflowStep],
    /// Effective (zoomed/panned) scale.
    pub scale: TimeScale,
    pub bar_layout: BarLayout,
    pub time_axis: TimeAxisConfig,
    pub label_policy: &'a LabelFitPolicy,
    pub measurer: &'a dyn TextMeasurer,
    /// Label states from the previous pass, indexed by row. Empty after a
    /// data rebuild.
    pub previous_label_states: &'a [LabelFitState],
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPassOutput {
    pub commands: DrawCommands,
    pub label_states: Vec<LabelFitState>,
}

/// Recomputes ticks, bar geometry and label states in one consistent pass.
///
/// Vertical placement only depends on the row index, so zoom and pan never
/// move bars up or down.
pub fn render_pass(input: RenderPassInput<'_>) -> GanttResult<RenderPassOutput> {
    let scale = input.scale;
    let layout = input.bar_layout;
    let (granularity, ticks) = build_axis_ticks(scale, input.time_axis)?;
    let (visible_start_millis, visible_end_millis) = scale.domain();

    let mut bars = Vec::with_capacity(input.steps.len());
    let mut labels = Vec::with_capacity(input.steps.len());
    let mut label_states = Vec::with_capacity(input.steps.len());

    for (row, step) in input.steps.iter().enumerate() {
        let x = scale.time_to_pixel(step.start_millis());
        let end_x = scale.time_to_pixel(step.end_millis());
        let width = (end_x - x).max(layout.min_bar_width_px);
        let y = layout.row_top_px(row);

        bars.push(BarGeometry {
            row,
            x,
            y,
            width,
            height: layout.bar_height_px,
            variant: step.variant(),
        });

        let natural_width =
            input
                .label_policy
                .natural_width(&step.name, layout.font_size_px, input.measurer);
        let previous = input.previous_label_states.get(row).copied();
        let state = input.label_policy.decide(previous, width, natural_width);
        let text = input.label_policy.display_text(&step.name, state);
        let text_width_px = match state {
            LabelFitState::Full => natural_width,
            LabelFitState::Truncated => {
                input
                    .label_policy
                    .natural_width(&text, layout.font_size_px, input.measurer)
            }
        };

        labels.push(StepLabel {
            row,
            x: x + layout.label_inset_px,
            y: y + layout.label_baseline_px(),
            text,
            text_width_px,
            state,
        });
        label_states.push(state);
    }

    trace!(
        bars = bars.len(),
        ticks = ticks.len(),
        ?granularity,
        "render pass"
    );

    Ok(RenderPassOutput {
        commands: DrawCommands {
            granularity,
            visible_start_millis,
            visible_end_millis,
            ticks,
            bars,
            labels,
            content_height_px: layout.row_top_px(input.steps.len()),
        },
        label_states,
    })
}
