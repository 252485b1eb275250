use chrono::{Duration, TimeZone, Utc};
use gantt_rs::api::{GanttEngine, GanttEngineConfig, StepStyle};
use gantt_rs::core::{Timespan, Viewport, WorkflowStep};
use gantt_rs::render::{Color, NullRenderer, RenderFrame, Renderer, TextHAlign, TextPrimitive};

fn engine() -> GanttEngine<NullRenderer> {
    let start = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
    let steps = vec![
        WorkflowStep::new("lint", start, start + Duration::minutes(15), 0),
        WorkflowStep::new(
            "integration-tests",
            start + Duration::minutes(15),
            start + Duration::minutes(55),
            2,
        ),
    ];
    let config = GanttEngineConfig::new(Viewport::new(800, 300)).with_initial_timespan(
        Timespan::new(start, start + Duration::hours(1)).expect("timespan"),
    );
    GanttEngine::new(NullRenderer::default(), config, steps).expect("engine init")
}

#[test]
fn build_render_frame_contains_bars_labels_and_axis() {
    let engine = engine();
    let frame = engine.build_render_frame().expect("build frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.rects.len(), 2);
    let style = StepStyle::default();
    assert_eq!(frame.rects[0].fill_color, style.inner_step_color);
    assert_eq!(frame.rects[1].fill_color, style.inner_retry_step_color);
    assert_eq!(frame.rects[1].border_color, style.retry_step_color);

    let bold_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.bold)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(bold_labels, vec!["lint", "integration-tests"]);

    let ticks = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .count();
    // axis baseline plus one mark per tick label
    assert_eq!(frame.lines.len(), ticks + 1);
}

#[test]
fn building_a_frame_does_not_render() {
    let engine = engine();
    engine.build_render_frame().expect("build frame");
    assert_eq!(engine.renderer().render_count, 0);
    assert!(engine.label_states().is_empty());
}

#[test]
fn null_renderer_rejects_invalid_frames() {
    let mut renderer = NullRenderer::default();
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_text(TextPrimitive::new(
        "",
        0.0,
        0.0,
        12.0,
        Color::rgb(0.0, 0.0, 0.0),
        TextHAlign::Left,
    ));
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.render_count, 0);
    assert_eq!(renderer.live_element_count(), 0);
}
