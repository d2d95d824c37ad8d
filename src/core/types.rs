use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer size of a chart's SVG element in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plotting area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Inner drawing rectangle: the viewport minus its margins.
///
/// Mark geometry is expressed relative to the plot origin; the renderer
/// translates by `(margin.left, margin.top)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub viewport: Viewport,
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(viewport: Viewport, margin: Margin) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        if !viewport.is_valid() {
            return Err(invalid());
        }
        for value in [margin.top, margin.right, margin.bottom, margin.left] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(
                    "margins must be finite and >= 0".to_owned(),
                ));
            }
        }

        let width = f64::from(viewport.width) - margin.left - margin.right;
        let height = f64::from(viewport.height) - margin.top - margin.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            viewport,
            margin,
            width,
            height,
        })
    }

    #[must_use]
    pub fn origin(self) -> (f64, f64) {
        (self.margin.left, self.margin.top)
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
