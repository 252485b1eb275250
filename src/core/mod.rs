pub mod primitives;
pub mod scale;
pub mod step;
pub mod time_scale;
pub mod transform;
pub mod types;

pub use scale::LinearScale;
pub use step::{IntervalPolicy, StepVariant, WorkflowStep, ingest_steps, steps_time_extent};
pub use time_scale::TimeScale;
pub use transform::ZoomTransform;
pub use types::{Margins, Timespan, Viewport};
