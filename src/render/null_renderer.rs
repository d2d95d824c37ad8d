use crate::error::ChartResult;
use crate::render::{Geometry, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_mark_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_mark_count = frame.marks.len();
        self.last_text_count = frame
            .marks
            .iter()
            .filter(|mark| matches!(mark.geometry, Geometry::Text(_)))
            .count();
        Ok(())
    }
}
