use crate::core::{StepVariant, Viewport};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::draw_commands::DrawCommands;
use super::{GanttEngineConfig, StepStyle};

const AXIS_LINE_WIDTH_PX: f64 = 1.0;
const AXIS_LABEL_GAP_PX: f64 = 3.0;

/// Materializes backend-agnostic primitives for one draw pass.
///
/// `commands` are plot-local; the axis sits at the top margin and rows start
/// below it, both offset by the left margin.
#[must_use]
pub fn build_render_frame(
    commands: &DrawCommands,
    config: &GanttEngineConfig,
    viewport: Viewport,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    let margins = config.margins;
    let style = config.style;
    let axis = config.time_axis;
    let axis_width = config.axis_width_px();
    let axis_y = margins.top;

    frame = frame.with_line(LinePrimitive::new(
        margins.left,
        axis_y,
        margins.left + axis_width,
        axis_y,
        AXIS_LINE_WIDTH_PX,
        style.axis_color,
    ));

    for tick in &commands.ticks {
        let x = margins.left + tick.x;
        frame = frame.with_line(LinePrimitive::new(
            x,
            axis_y,
            x,
            axis_y + axis.tick_length_px,
            AXIS_LINE_WIDTH_PX,
            style.axis_color,
        ));
        if !tick.label.is_empty() {
            frame = frame.with_text(TextPrimitive::new(
                tick.label.clone(),
                x,
                axis_y + axis.tick_length_px + AXIS_LABEL_GAP_PX + axis.font_size_px,
                axis.font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
            ));
        }
    }

    let rows_top = margins.top + config.axis_height_px;
    let layout = config.bar_layout;
    for bar in &commands.bars {
        let (stroke, fill) = variant_colors(style, bar.variant);
        let radius = layout
            .corner_radius_px
            .min(bar.width / 2.0)
            .min(bar.height / 2.0)
            .max(0.0);
        frame = frame.with_rect(
            RectPrimitive::new(
                margins.left + bar.x,
                rows_top + bar.y,
                bar.width,
                bar.height,
                fill,
            )
            .with_border(layout.border_width_px, stroke)
            .with_corner_radius(radius),
        );
    }

    for (label, bar) in commands.labels.iter().zip(&commands.bars) {
        if label.text.is_empty() {
            continue;
        }
        let (stroke, _) = variant_colors(style, bar.variant);
        frame = frame.with_text(
            TextPrimitive::new(
                label.text.clone(),
                margins.left + label.x,
                rows_top + label.y,
                layout.font_size_px,
                stroke,
                TextHAlign::Left,
            )
            .bold(),
        );
    }

    frame
}

/// `(stroke, fill)` for a bar variant.
fn variant_colors(style: StepStyle, variant: StepVariant) -> (Color, Color) {
    match variant {
        StepVariant::Normal => (style.step_color, style.inner_step_color),
        StepVariant::Retried => (style.retry_step_color, style.inner_retry_step_color),
    }
}
