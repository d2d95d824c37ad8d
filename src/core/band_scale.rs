use indexmap::IndexSet;

use crate::error::{ChartError, ChartResult};

/// Categorical scale mapping each distinct category to an equal-width band.
///
/// Categories keep the order they were supplied in; a repeated category keeps
/// its first position. Bands are centered in the range, so the outer padding
/// is split evenly between both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    pub fn new<I, S>(categories: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        if domain.is_empty() {
            return Err(ChartError::InvalidData(
                "band scale domain must not be empty".to_owned(),
            ));
        }

        let mut scale = Self {
            domain,
            range_start: 0.0,
            range_end: 1.0,
            padding_inner: 0.0,
            padding_outer: 0.0,
            step: 0.0,
            bandwidth: 0.0,
            offset: 0.0,
        };
        scale.rescale();
        Ok(scale)
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        self.set_range(range_start, range_end)?;
        Ok(self)
    }

    /// Sets inner and outer padding as fractions of one step.
    pub fn with_padding(mut self, padding_inner: f64, padding_outer: f64) -> ChartResult<Self> {
        for (name, value) in [("inner", padding_inner), ("outer", padding_outer)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "band scale {name} padding must be finite and in [0, 1]"
                )));
            }
        }
        self.padding_inner = padding_inner;
        self.padding_outer = padding_outer;
        self.rescale();
        Ok(self)
    }

    pub fn set_range(&mut self, range_start: f64, range_end: f64) -> ChartResult<()> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        self.rescale();
        Ok(())
    }

    fn rescale(&mut self) {
        let count = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        let slots = (count - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        self.step = span / slots;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
        self.offset = (span - self.step * (count - self.padding_inner)) * 0.5;
    }

    /// Start of the band for `category`, or `None` when it is not in the domain.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .get_index_of(category)
            .map(|index| self.range_start + self.offset + self.step * index as f64)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

/// Categorical scale mapping categories to evenly spaced points.
///
/// With no outer padding the first category sits on `range_start` and the
/// last on `range_end`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    bands: BandScale,
}

impl PointScale {
    pub fn new<I, S>(categories: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bands = BandScale::new(categories)?.with_padding(1.0, 0.0)?;
        Ok(Self { bands })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        self.bands.set_range(range_start, range_end)?;
        Ok(self)
    }

    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.bands.position(category)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.bands.step()
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.bands.domain.contains(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unpadded_bands_tile_the_range() {
        let scale = BandScale::new(["a", "b", "c"])
            .and_then(|s| s.with_range(0.0, 630.0))
            .expect("scale");
        assert_relative_eq!(scale.bandwidth(), 210.0);
        assert_eq!(scale.position("a"), Some(0.0));
        assert_eq!(scale.position("c"), Some(420.0));
        assert_eq!(scale.position("zzz"), None);
    }

    #[test]
    fn duplicate_categories_keep_first_position() {
        let scale = BandScale::new(["a", "b", "a"])
            .and_then(|s| s.with_range(0.0, 100.0))
            .expect("scale");
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.position("a"), Some(0.0));
    }

    #[test]
    fn padding_is_split_between_inner_gaps_and_outer_edges() {
        let scale = BandScale::new(["a", "b"])
            .and_then(|s| s.with_range(0.0, 100.0))
            .and_then(|s| s.with_padding(0.5, 0.5))
            .expect("scale");
        // slots = 2 - 0.5 + 1 = 2.5, step = 40, bandwidth = 20
        assert_relative_eq!(scale.step(), 40.0);
        assert_relative_eq!(scale.bandwidth(), 20.0);
        assert_relative_eq!(scale.position("a").expect("a"), 20.0);
        assert_relative_eq!(scale.position("b").expect("b"), 60.0);
    }

    #[test]
    fn point_scale_spans_full_turn() {
        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
            "Blah",
        ];
        let scale = PointScale::new(months)
            .and_then(|s| s.with_range(0.0, std::f64::consts::TAU))
            .expect("scale");
        assert_relative_eq!(scale.position("Jan").expect("jan"), 0.0);
        assert_relative_eq!(
            scale.position("Dec").expect("dec"),
            std::f64::consts::TAU * 11.0 / 12.0
        );
        assert_relative_eq!(scale.position("Blah").expect("blah"), std::f64::consts::TAU);
    }

    #[test]
    fn rejects_invalid_construction() {
        assert!(BandScale::new(Vec::<String>::new()).is_err());
        assert!(
            BandScale::new(["a"])
                .and_then(|s| s.with_padding(1.5, 0.0))
                .is_err()
        );
    }
}
