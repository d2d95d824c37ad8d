use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::loader::{log_loaded, open, read_records, row_number};
use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// One row of the regional housing price dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingRecord {
    pub region: String,
    /// First day of the sampled month.
    pub month: NaiveDate,
    pub price: f64,
}

impl HousingRecord {
    #[must_use]
    pub fn new(region: impl Into<String>, month: NaiveDate, price: f64) -> Self {
        Self {
            region: region.into(),
            month,
            price,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHousingRow {
    region: String,
    month: String,
    price: String,
}

/// Parses a `Month-yy` label such as `November-16` into the first of that month.
///
/// Abbreviated month names (`Nov-16`) are accepted too.
pub fn parse_month_label(label: &str) -> ChartResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1-{}", label.trim()), "%d-%B-%y").map_err(|err| {
        ChartError::InvalidData(format!("invalid month label `{label}`: {err}"))
    })
}

/// Parses `region,month,price` rows.
pub fn parse_housing_csv<R: Read>(reader: R) -> ChartResult<Vec<HousingRecord>> {
    let rows: Vec<RawHousingRow> = read_records(reader)?;
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let month = parse_month_label(&row.month).map_err(|err| {
                ChartError::InvalidData(format!("row {}: {err}", row_number(index)))
            })?;
            let price = Decimal::from_str(&row.price).map_err(|err| {
                ChartError::InvalidData(format!(
                    "row {}: invalid price `{}`: {err}",
                    row_number(index),
                    row.price
                ))
            })?;
            Ok(HousingRecord {
                region: row.region,
                month,
                price: decimal_to_f64(price, "price")?,
            })
        })
        .collect()
}

pub fn load_housing_csv(path: impl AsRef<Path>) -> ChartResult<Vec<HousingRecord>> {
    let path = path.as_ref();
    let records = parse_housing_csv(open(path)?)?;
    log_loaded("housing", path, records.len());
    Ok(records)
}
