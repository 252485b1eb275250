use chrono::{DateTime, Duration, TimeZone, Utc};
use gantt_rs::api::{GanttEngine, GanttEngineConfig, LabelFitState, TickGranularity};
use gantt_rs::core::{StepVariant, Timespan, Viewport, WorkflowStep};
use gantt_rs::render::NullRenderer;

fn jan_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn mar_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

fn quarter_steps() -> Vec<WorkflowStep> {
    let jan_20 = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
    let feb_10 = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
    vec![
        WorkflowStep::new("extract", jan_first(), jan_20, 0),
        WorkflowStep::new("transform", jan_20, feb_10, 2),
        WorkflowStep::new("load", feb_10, mar_first(), 0),
    ]
}

fn quarter_engine() -> GanttEngine<NullRenderer> {
    let config = GanttEngineConfig::new(Viewport::new(800, 300))
        .with_initial_timespan(Timespan::new(jan_first(), mar_first()).expect("timespan"));
    GanttEngine::new(NullRenderer::default(), config, quarter_steps()).expect("engine init")
}

#[test]
fn three_steps_over_two_months_render_in_list_order() {
    let mut engine = quarter_engine();
    engine.mount().expect("mount");

    let commands = engine.draw_commands().expect("commands after mount");
    assert_eq!(commands.bars.len(), 3);
    assert!(commands.bars[0].x.abs() <= 1e-9);
    assert!((commands.bars[2].x + commands.bars[2].width - 750.0).abs() <= 1e-6);

    let rows: Vec<f64> = commands.bars.iter().map(|bar| bar.y).collect();
    assert_eq!(rows, vec![0.0, 40.0, 80.0]);
    assert_eq!(commands.bars[1].variant, StepVariant::Retried);

    // 60 days sits between the 7-day and 180-day thresholds.
    assert_eq!(commands.granularity, TickGranularity::Day);
    assert!(!commands.ticks.is_empty());
    assert!(commands.ticks.iter().all(|tick| tick.label.len() == "01 Jan 24".len()));

    let frame = engine
        .renderer()
        .last_frame
        .as_ref()
        .expect("frame after mount");
    assert_eq!(frame.rects.len(), 3);
    assert_eq!(frame.rects[0].x, 25.0);
}

#[test]
fn empty_dataset_renders_axis_only() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let config = GanttEngineConfig::new(Viewport::new(800, 300));
    let mut engine =
        GanttEngine::new_at(NullRenderer::default(), config, Vec::new(), now).expect("engine init");
    engine.mount().expect("mount");

    let commands = engine.draw_commands().expect("commands");
    assert!(commands.bars.is_empty());
    assert!(commands.labels.is_empty());
    assert!(!commands.ticks.is_empty());
    assert_eq!(commands.granularity, TickGranularity::DayTime);

    let visible = engine.visible_timespan().expect("visible timespan");
    assert_eq!(visible.end(), now);
    assert_eq!(visible.start(), now - Duration::hours(1));

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.rects.is_empty());
    assert!(!frame.lines.is_empty());
}

#[test]
fn degenerate_timespan_renders_minimum_width_bars() {
    let instant = jan_first();
    let config = GanttEngineConfig::new(Viewport::new(800, 300))
        .with_initial_timespan(Timespan::new(instant, instant).expect("timespan"));
    let steps = vec![WorkflowStep::new("flash", instant, instant, 0)];
    let mut engine = GanttEngine::new(NullRenderer::default(), config, steps).expect("engine");
    engine.mount().expect("mount");

    let commands = engine.draw_commands().expect("commands");
    assert_eq!(commands.bars[0].x, 0.0);
    assert_eq!(commands.bars[0].width, 1.0);
    assert_eq!(commands.ticks.len(), 1);
}

#[test]
fn render_pass_is_idempotent() {
    let mut engine = quarter_engine();
    engine.mount().expect("mount");
    engine.zoom_at(3.0, 200.0).expect("zoom");

    let first = engine
        .draw_commands()
        .expect("commands")
        .to_json_pretty()
        .expect("json");
    engine.render().expect("render again");
    let second = engine
        .draw_commands()
        .expect("commands")
        .to_json_pretty()
        .expect("json");
    assert_eq!(first, second);
}

#[test]
fn unmount_removes_every_drawn_element() {
    let mut engine = quarter_engine();
    engine.mount().expect("mount");
    assert!(engine.renderer().live_element_count() > 0);
    assert!(engine.tooltip().is_some());

    engine.unmount().expect("unmount");
    assert!(!engine.is_mounted());
    assert_eq!(engine.renderer().live_element_count(), 0);
    assert!(engine.tooltip().is_none());

    // remounting draws exactly one frame's worth again
    engine.mount().expect("remount");
    let frame_elements = engine
        .build_render_frame()
        .expect("frame")
        .element_count();
    assert_eq!(engine.renderer().live_element_count(), frame_elements);
    engine.unmount().expect("unmount again");
    assert_eq!(engine.renderer().clear_count, 2);
}

#[test]
fn unmounted_engine_never_reaches_renderer() {
    let mut engine = quarter_engine();
    engine.render().expect("headless render");
    engine.pan_by_pixels(-50.0).expect("pan");
    assert_eq!(engine.renderer().render_count, 0);
    assert!(engine.renderer().last_frame.is_none());
}

#[test]
fn set_steps_rebuilds_and_resets_transform() {
    let mut engine = quarter_engine();
    engine.mount().expect("mount");
    engine.zoom_at(4.0, 100.0).expect("zoom");
    assert!(!engine.transform().is_identity());

    let mut steps = quarter_steps();
    steps.truncate(1);
    engine.set_steps(steps).expect("set steps");

    assert!(engine.transform().is_identity());
    assert_eq!(engine.label_states(), &[LabelFitState::Full]);
    let commands = engine.draw_commands().expect("commands");
    assert_eq!(commands.bars.len(), 1);
}

#[test]
fn resize_rebuilds_base_scale() {
    let mut engine = quarter_engine();
    engine.mount().expect("mount");
    engine
        .set_viewport(Viewport::new(1050, 300))
        .expect("resize");

    let commands = engine.draw_commands().expect("commands");
    let last = commands.bars[2];
    assert!((last.x + last.width - 1_000.0).abs() <= 1e-6);

    assert!(engine.set_viewport(Viewport::new(0, 300)).is_err());
    assert!(engine.set_viewport(Viewport::new(40, 300)).is_err());
    assert_eq!(engine.viewport(), Viewport::new(1050, 300));
}
