pub mod band_scale;
pub mod color;
pub mod primitives;
pub mod scale;
pub mod shapes;
pub mod stats;
pub mod ticks;
pub mod types;

pub use band_scale::{BandScale, PointScale};
pub use color::{Color, LinearColorScale, OrdinalColorScale, parse_palette};
pub use primitives::normalize_class_name;
pub use scale::LinearScale;
pub use shapes::{RadialSample, line_path, radial_area_path};
pub use types::{Margin, PlotArea, Viewport};
