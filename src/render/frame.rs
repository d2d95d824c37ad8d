use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Mark;

/// Backend-agnostic, paint-ordered snapshot of one chart's scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    /// Translation applied to every mark (the plot origin inside the viewport).
    pub origin: (f64, f64),
    /// Element id of the chart container, e.g. `chart-1`.
    pub container_id: String,
    pub marks: Vec<Mark>,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.origin.0.is_finite() || !self.origin.1.is_finite() {
            return Err(ChartError::InvalidData(
                "frame origin must be finite".to_owned(),
            ));
        }

        for mark in &self.marks {
            mark.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
