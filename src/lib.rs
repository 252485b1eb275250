//! gantt-rs: scaled workflow-timeline rendering engine.
//!
//! Workflow steps become horizontal bars on a zoomable, pannable time axis.
//! The crate owns the time/pixel mapping, transform clamping, tick
//! granularity and label fitting; drawing goes through a `Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig};
pub use error::{GanttError, GanttResult};
