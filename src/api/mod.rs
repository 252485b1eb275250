mod draw_commands;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod frame_builder;
mod hover;
mod interaction_controller;
mod label_fit;
mod render_sync;
mod tick_formatter;
mod viewport_controller;

pub use draw_commands::{AxisTick, BarGeometry, DrawCommands, StepLabel};
pub use engine::GanttEngine;
pub use engine_config::{
    BarLayout, ENGINE_CONFIG_JSON_SCHEMA_V1, EngineConfigJsonContractV1, GanttEngineConfig,
    StepStyle, TimeAxisConfig, ZoomBehavior,
};
pub use frame_builder::build_render_frame;
pub use hover::{HoverEvent, HoverPayload, TOOLTIP_OFFSET_PX, TooltipContext};
pub use interaction_controller::InputOutcome;
pub use label_fit::{
    CharCountEstimator, EllipsisPlacement, FitThresholds, LabelFitConfig, LabelFitPolicy,
    LabelFitState, TextMeasurer,
};
pub use render_sync::{RenderPassInput, RenderPassOutput, render_pass};
pub use tick_formatter::{TickGranularity, build_axis_ticks};
pub use viewport_controller::{ViewportBounds, ViewportController};
