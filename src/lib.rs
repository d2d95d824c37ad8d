//! scrolly-charts: scroll-driven narrative charts.
//!
//! Three charts (life expectancy bars, regional housing price lines and a
//! radial city temperature band) are built from CSV data into keyed scenes.
//! Named scroll steps restyle each scene through an explicit transition
//! table; renderers turn scenes into SVG.

pub mod charts;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod story;
pub mod telemetry;

pub use charts::{BarChart, LineChart, RadialChart, ScrollyChart};
pub use error::{ChartError, ChartResult};
pub use story::{ChartId, Step};
