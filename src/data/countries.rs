use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::loader::{log_loaded, open, read_records, row_number};
use crate::error::{ChartError, ChartResult};

/// One row of the life expectancy dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub continent: String,
    pub life_expectancy: f64,
    pub gdp_per_capita: f64,
}

impl CountryRecord {
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        continent: impl Into<String>,
        life_expectancy: f64,
        gdp_per_capita: f64,
    ) -> Self {
        Self {
            country: country.into(),
            continent: continent.into(),
            life_expectancy,
            gdp_per_capita,
        }
    }
}

/// Parses `country,continent,life_expectancy,gdp_per_capita` rows.
pub fn parse_countries_csv<R: Read>(reader: R) -> ChartResult<Vec<CountryRecord>> {
    let records: Vec<CountryRecord> = read_records(reader)?;
    for (index, record) in records.iter().enumerate() {
        if !record.life_expectancy.is_finite() || !record.gdp_per_capita.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "row {}: life_expectancy and gdp_per_capita must be finite",
                row_number(index)
            )));
        }
    }
    Ok(records)
}

pub fn load_countries_csv(path: impl AsRef<Path>) -> ChartResult<Vec<CountryRecord>> {
    let path = path.as_ref();
    let records = parse_countries_csv(open(path)?)?;
    log_loaded("countries", path, records.len());
    Ok(records)
}
