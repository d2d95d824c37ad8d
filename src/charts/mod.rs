//! The three story charts.
//!
//! Each chart owns a context (records, scales, scene) and a step dispatcher
//! built from an explicit transition table. Handlers receive the context as
//! `&mut` and rewrite every attribute their chart's steps govern.

mod axis;
mod bar_chart;
mod line_chart;
mod radial_chart;

pub use bar_chart::{BarChart, BarChartConfig, BarChartContext, BarHighlight};
pub use line_chart::{LineChart, LineChartConfig, LineChartContext, PriceHighlight, PriceView};
pub use radial_chart::{
    CityStep, CityView, RadialChart, RadialChartConfig, RadialChartContext,
};

use crate::core::PlotArea;
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer, Scene};
use crate::story::{ChartId, Step};

pub(crate) const DEFAULT_TRANSITION_MS: u32 = 250;

pub(crate) fn default_transition_ms() -> u32 {
    DEFAULT_TRANSITION_MS
}

/// Shared surface of the story charts.
pub trait ScrollyChart {
    fn chart_id(&self) -> ChartId;

    fn plot_area(&self) -> PlotArea;

    fn scene(&self) -> &Scene;

    /// Steps with a registered handler, in narrative order.
    fn steps(&self) -> Vec<Step>;

    /// Fires `step`. Returns `Ok(false)` when this chart has no handler for it.
    fn fire(&mut self, step: Step) -> ChartResult<bool>;

    /// Last step whose handler ran.
    fn current_step(&self) -> Option<Step>;

    fn frame(&self) -> RenderFrame {
        self.scene()
            .frame(self.plot_area(), self.chart_id().container_id())
    }

    fn render(&self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        renderer.render(&self.frame())
    }
}

pub(crate) fn parse_config_json<T: serde::de::DeserializeOwned>(
    input: &str,
    what: &str,
) -> ChartResult<T> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse {what} json: {e}")))
}
