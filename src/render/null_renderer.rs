use crate::error::GanttResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content and keeps the last accepted frame so tests
/// can inspect geometry and confirm teardown leaves nothing behind.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_frame: Option<RenderFrame>,
    pub render_count: usize,
    pub clear_count: usize,
}

impl NullRenderer {
    /// Number of primitives currently "on screen".
    #[must_use]
    pub fn live_element_count(&self) -> usize {
        self.last_frame
            .as_ref()
            .map_or(0, RenderFrame::element_count)
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()> {
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.render_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> GanttResult<()> {
        self.last_frame = None;
        self.clear_count += 1;
        Ok(())
    }
}
