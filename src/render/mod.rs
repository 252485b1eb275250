mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::GanttResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from timeline and interaction logic.
pub trait Renderer {
    /// Replaces whatever the previous frame drew with `frame`.
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()>;

    /// Removes every element drawn by earlier `render` calls.
    fn clear(&mut self) -> GanttResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
