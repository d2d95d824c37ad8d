use crate::error::{ChartError, ChartResult};

/// Continuous domain-to-pixel mapping.
///
/// Values outside the domain extrapolate linearly unless clamping is enabled.
/// The range may be replaced (e.g. on resize) without touching the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
            clamp: false,
        })
    }

    /// Builds a scale whose domain is the min/max of `values`.
    ///
    /// A single distinct value gives a zero-width domain; every value then
    /// maps to the middle of the range.
    pub fn from_extent(values: impl IntoIterator<Item = f64>) -> ChartResult<Self> {
        let (min, max) = crate::core::stats::extent(values).ok_or_else(|| {
            ChartError::InvalidData("scale cannot be built from empty data".to_owned())
        })?;
        if min == max && min.is_finite() {
            return Ok(Self {
                domain_start: min,
                domain_end: max,
                range_start: 0.0,
                range_end: 1.0,
                clamp: false,
            });
        }
        Self::new(min, max)
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        self.set_range(range_start, range_end)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn set_range(&mut self, range_start: f64, range_end: f64) -> ChartResult<()> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(())
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let mut normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a scale with an empty range".to_owned(),
            ));
        }
        let mut normalized = (pixel - self.range_start) / span;
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round tick values inside the domain, approximately `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        crate::core::ticks::linear_ticks(self.domain_start, self.domain_end, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn maps_inverted_pixel_axis() {
        let scale = LinearScale::new(0.0, 85.0)
            .and_then(|s| s.with_range(340.0, 0.0))
            .expect("scale");
        assert_relative_eq!(scale.domain_to_pixel(0.0).expect("px"), 340.0);
        assert_relative_eq!(scale.domain_to_pixel(85.0).expect("px"), 0.0);
        assert_relative_eq!(scale.pixel_to_domain(170.0).expect("value"), 42.5);
    }

    #[test]
    fn out_of_domain_values_extrapolate_unless_clamped() {
        let scale = LinearScale::new(0.0, 85.0)
            .and_then(|s| s.with_range(340.0, 0.0))
            .expect("scale");
        assert_relative_eq!(scale.domain_to_pixel(170.0).expect("px"), -340.0);

        let clamped = scale.with_clamp(true);
        assert_relative_eq!(clamped.domain_to_pixel(170.0).expect("px"), 0.0);
        assert_relative_eq!(clamped.domain_to_pixel(-10.0).expect("px"), 340.0);
    }

    #[test]
    fn rejects_degenerate_domain_and_empty_extent() {
        assert!(LinearScale::new(3.0, 3.0).is_err());
        assert!(LinearScale::new(f64::NAN, 3.0).is_err());
        assert!(LinearScale::from_extent(Vec::<f64>::new()).is_err());
    }

    #[test]
    fn single_value_extent_maps_to_the_range_midpoint() {
        let scale = LinearScale::from_extent([200.0, 200.0, 200.0])
            .and_then(|s| s.with_range(570.0, 0.0))
            .expect("scale");
        assert_eq!(scale.domain(), (200.0, 200.0));
        assert_relative_eq!(scale.domain_to_pixel(200.0).expect("px"), 285.0);
        assert_relative_eq!(scale.domain_to_pixel(-40.0).expect("px"), 285.0);
        assert_relative_eq!(scale.pixel_to_domain(10.0).expect("value"), 200.0);
        assert_eq!(scale.ticks(10), vec![200.0]);
    }

    #[test]
    fn extent_domain_follows_data() {
        let scale = LinearScale::from_extent([4.0, -2.0, 9.5]).expect("scale");
        assert_eq!(scale.domain(), (-2.0, 9.5));
    }
}
