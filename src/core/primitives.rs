use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Midnight UTC of `date` as unix seconds, the continuous time axis unit.
#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64
}

/// Lowercases `name` and drops every character outside `a-z`.
///
/// Used to derive mark classes from category names, so `"N. America"`
/// becomes `"namerica"`.
#[must_use]
pub fn normalize_class_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}
