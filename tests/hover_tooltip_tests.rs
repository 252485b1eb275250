use chrono::{DateTime, Duration, TimeZone, Utc};
use gantt_rs::api::{GanttEngine, GanttEngineConfig, HoverEvent};
use gantt_rs::core::{Timespan, Viewport, WorkflowStep};
use gantt_rs::render::NullRenderer;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

fn mounted_engine() -> GanttEngine<NullRenderer> {
    let steps = vec![
        WorkflowStep::new("checkout", start(), start() + Duration::minutes(30), 0),
        WorkflowStep::new(
            "build",
            start() + Duration::minutes(30),
            start() + Duration::hours(1),
            4,
        ),
    ];
    let config = GanttEngineConfig::new(Viewport::new(800, 300)).with_initial_timespan(
        Timespan::new(start(), start() + Duration::hours(1)).expect("timespan"),
    );
    let mut engine = GanttEngine::new(NullRenderer::default(), config, steps).expect("engine init");
    engine.mount().expect("mount");
    engine
}

// Rows start at margin top (20) + axis height (50); plot x starts at 25.
const ROW_0_Y: f64 = 85.0;
const ROW_1_Y: f64 = 125.0;

#[test]
fn hovering_a_bar_delivers_payload_and_positions_tooltip() {
    let mut engine = mounted_engine();

    let events = engine.pointer_move(500.0, ROW_1_Y);
    let [HoverEvent::Enter { row, payload, .. }] = events.as_slice() else {
        panic!("expected a single enter event, got {events:?}");
    };
    assert_eq!(*row, 1);
    assert_eq!(payload.name, "build");
    assert_eq!(payload.retry_count, 4);
    assert_eq!(payload.end_time, start() + Duration::hours(1));

    let tooltip = engine.tooltip().expect("tooltip while mounted");
    assert!(tooltip.is_visible());
    assert_eq!(tooltip.position(), Some((510.0, ROW_1_Y + 10.0)));

    let events = engine.pointer_move(505.0, ROW_1_Y);
    assert!(matches!(events.as_slice(), [HoverEvent::Move { row: 1, .. }]));
}

#[test]
fn moving_between_rows_and_leaving_updates_tooltip() {
    let mut engine = mounted_engine();
    engine.pointer_move(100.0, ROW_0_Y);

    let events = engine.pointer_move(500.0, ROW_1_Y);
    assert!(matches!(
        events.as_slice(),
        [HoverEvent::Leave { row: 0 }, HoverEvent::Enter { row: 1, .. }]
    ));

    let leave = engine.pointer_leave();
    assert_eq!(leave, Some(HoverEvent::Leave { row: 1 }));
    assert!(!engine.tooltip().expect("tooltip").is_visible());
}

#[test]
fn gap_between_rows_is_not_a_hit() {
    let mut engine = mounted_engine();
    // row 0 spans y 70..100, row 1 spans 110..140
    let events = engine.pointer_move(100.0, 105.0);
    assert!(events.is_empty());
}

#[test]
fn tooltip_contexts_are_per_engine() {
    let mut first = mounted_engine();
    let second = mounted_engine();

    first.pointer_move(100.0, ROW_0_Y);
    assert!(first.tooltip().expect("tooltip").is_visible());
    assert!(!second.tooltip().expect("tooltip").is_visible());
}

#[test]
fn unmounted_engine_reports_no_hover() {
    let mut engine = mounted_engine();
    engine.unmount().expect("unmount");
    assert!(engine.pointer_move(100.0, ROW_0_Y).is_empty());
    assert!(engine.tooltip().is_none());
}

#[test]
fn replacing_steps_resets_hover_and_tooltip() {
    let mut engine = mounted_engine();
    engine.pointer_move(500.0, ROW_1_Y);
    assert_eq!(
        engine
            .tooltip()
            .and_then(|tooltip| tooltip.payload())
            .map(|payload| payload.name.as_str()),
        Some("build")
    );

    engine
        .set_steps(vec![
            WorkflowStep::new("lint", start(), start() + Duration::minutes(30), 0),
            WorkflowStep::new(
                "deploy",
                start() + Duration::minutes(30),
                start() + Duration::hours(1),
                0,
            ),
        ])
        .expect("set steps");
    assert!(!engine.tooltip().expect("tooltip").is_visible());

    // Same row index, different step: a fresh enter, not a move.
    let events = engine.pointer_move(500.0, ROW_1_Y);
    let [HoverEvent::Enter { row: 1, payload, .. }] = events.as_slice() else {
        panic!("expected a single enter event, got {events:?}");
    };
    assert_eq!(payload.name, "deploy");
    assert_eq!(
        engine.tooltip().and_then(|tooltip| tooltip.payload()),
        Some(payload)
    );

    engine
        .set_steps(vec![WorkflowStep::new("only", start(), start() + Duration::hours(1), 0)])
        .expect("set steps");
    assert!(!engine.tooltip().expect("tooltip").is_visible());
    assert!(engine.pointer_move(500.0, ROW_1_Y).is_empty());
    assert_eq!(engine.pointer_leave(), None);
}
