mod frame;
mod null_renderer;
mod primitives;
mod scene;
mod svg_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Geometry, Layer, Mark, MarkId, MarkRole, Paint, Style, TextAnchor, TextGeometry,
};
pub use scene::Scene;
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, paint-ordered `RenderFrame` so
/// drawing code stays isolated from chart data and step logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
