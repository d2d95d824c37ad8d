use std::fmt;

use smallvec::SmallVec;

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// What a mark represents; the first half of its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkRole {
    Bar,
    AxisDomain,
    AxisTick,
    AxisLabel,
    Note,
    Title,
    PriceLine,
    PriceCircle,
    RegionLabel,
    WinterHighlight,
    GuideRing,
    GuideLabel,
    TemperatureArea,
    CityName,
    CityChip,
    CityChipLabel,
}

impl MarkRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::AxisDomain => "axis-domain",
            Self::AxisTick => "axis-tick",
            Self::AxisLabel => "axis-label",
            Self::Note => "note",
            Self::Title => "title",
            Self::PriceLine => "price-line",
            Self::PriceCircle => "price-circle",
            Self::RegionLabel => "region-text",
            Self::WinterHighlight => "winter-highlight",
            Self::GuideRing => "bands",
            Self::GuideLabel => "temp-notes",
            Self::TemperatureArea => "temp",
            Self::CityName => "city-name",
            Self::CityChip => "city-chip",
            Self::CityChipLabel => "city-chip-label",
        }
    }
}

/// Stable identity of a mark inside a scene: role plus a record-derived key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId {
    pub role: MarkRole,
    pub key: String,
}

impl MarkId {
    #[must_use]
    pub fn new(role: MarkRole, key: impl Into<String>) -> Self {
        Self {
            role,
            key: key.into(),
        }
    }
}

impl fmt::Display for MarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.role.as_str(), self.key)
    }
}

/// Paint order bucket; lower layers are drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Layer {
    Background,
    Axis,
    #[default]
    Marks,
    Labels,
}

/// Fill or stroke paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    None,
    Solid(Color),
}

impl Paint {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::None => None,
            Self::Solid(color) => Some(color),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

/// Presentation attributes rewritten by step handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Paint,
    pub stroke_width: Option<f64>,
    pub opacity: f64,
    pub font_weight: Option<u16>,
    /// Set when the last change should be animated by the renderer.
    pub transition_ms: Option<u32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::Solid(Color::BLACK),
            stroke: Paint::None,
            stroke_width: None,
            opacity: 1.0,
            font_weight: None,
            transition_ms: None,
        }
    }
}

impl Style {
    #[must_use]
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Paint::Solid(color),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::Solid(color),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_font_weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for paint in [self.fill, self.stroke] {
            if let Some(color) = paint.color() {
                color.validate()?;
            }
        }
        if let Some(width) = self.stroke_width {
            if !width.is_finite() || width < 0.0 {
                return Err(ChartError::InvalidData(
                    "stroke width must be finite and >= 0".to_owned(),
                ));
            }
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to the text anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Label content and placement in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub font_size_px: f64,
    pub anchor: TextAnchor,
}

impl TextGeometry {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size_px: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            font_size_px,
            anchor: TextAnchor::Start,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Shape of a mark in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Path {
        d: String,
    },
    Text(TextGeometry),
}

impl Geometry {
    pub fn validate(&self) -> ChartResult<()> {
        let finite = |values: &[f64]| values.iter().all(|value| value.is_finite());
        let ok = match self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => finite(&[*x, *y, *width, *height]),
            Self::Line { x1, y1, x2, y2 } => finite(&[*x1, *y1, *x2, *y2]),
            Self::Circle { cx, cy, r } => finite(&[*cx, *cy, *r]) && *r >= 0.0,
            Self::Path { .. } => true,
            Self::Text(text) => {
                finite(&[text.x, text.y, text.dx, text.dy, text.font_size_px])
                    && text.font_size_px > 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(ChartError::InvalidData(
                "mark geometry must be finite".to_owned(),
            ))
        }
    }
}

/// A keyed visual primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub id: MarkId,
    pub classes: SmallVec<[String; 2]>,
    pub layer: Layer,
    pub geometry: Geometry,
    pub style: Style,
}

impl Mark {
    #[must_use]
    pub fn new(id: MarkId, layer: Layer, geometry: Geometry) -> Self {
        Self {
            id,
            classes: SmallVec::new(),
            layer,
            geometry,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|entry| entry == class)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.geometry
            .validate()
            .and_then(|()| self.style.validate())
            .map_err(|err| ChartError::InvalidData(format!("mark `{}`: {err}", self.id)))
    }
}
