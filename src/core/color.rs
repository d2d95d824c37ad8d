use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// CSS `gray`.
    pub const GRAY: Self = Self::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    /// CSS `lightgrey`.
    pub const LIGHT_GREY: Self = Self::rgb(211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0);
    /// CSS `lightblue`.
    pub const LIGHT_BLUE: Self = Self::rgb(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` or `#rgb`.
    pub fn from_hex(value: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidData(format!("invalid hex color `{value}`"));
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |text: &str| u8::from_str_radix(text, 16).map_err(|_| invalid());

        let (red, green, blue) = match digits.len() {
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            3 => {
                let expand = |index: usize| channel(&digits[index..=index]).map(|v| v * 17);
                (expand(0)?, expand(1)?, expand(2)?)
            }
            _ => return Err(invalid()),
        };

        Ok(Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        ))
    }

    /// `#rrggbb`, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    /// Per-channel RGB interpolation; `t` outside `[0, 1]` extrapolates and
    /// the resulting channels are clamped to the valid range.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| (a + (b - a) * t).clamp(0.0, 1.0);
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Parses a list of hex colors, used for palette configuration.
pub fn parse_palette<S: AsRef<str>>(values: &[S]) -> ChartResult<Vec<Color>> {
    values
        .iter()
        .map(|value| Color::from_hex(value.as_ref()))
        .collect()
}

/// Categorical color scale with a fixed domain.
///
/// Domain entries take palette colors in order, cycling when the domain is
/// longer than the palette. Keys outside the domain get the fallback color.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColorScale {
    assignments: IndexMap<String, Color>,
    fallback: Color,
}

impl OrdinalColorScale {
    pub fn new<I, S>(domain: I, palette: &[Color]) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if palette.is_empty() {
            return Err(ChartError::InvalidData(
                "ordinal color palette must not be empty".to_owned(),
            ));
        }

        let mut assignments = IndexMap::new();
        for key in domain {
            let next = palette[assignments.len() % palette.len()];
            assignments.entry(key.into()).or_insert(next);
        }

        Ok(Self {
            assignments,
            fallback: Color::GRAY,
        })
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Color) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn color(&self, key: &str) -> Color {
        self.assignments.get(key).copied().unwrap_or(self.fallback)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Continuous color scale interpolating between two colors in RGB space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColorScale {
    domain_start: f64,
    domain_end: f64,
    start: Color,
    end: Color,
}

impl LinearColorScale {
    pub fn new(domain_start: f64, domain_end: f64, start: Color, end: Color) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "color scale domain must be finite and non-zero".to_owned(),
            ));
        }
        start.validate()?;
        end.validate()?;
        Ok(Self {
            domain_start,
            domain_end,
            start,
            end,
        })
    }

    pub fn color(self, value: f64) -> ChartResult<Color> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "color scale value must be finite".to_owned(),
            ));
        }
        let t = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.start.lerp(self.end, t))
    }
}
