use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::loader::{log_loaded, open, read_records, row_number};
use crate::error::{ChartError, ChartResult};

/// One month of one city's temperature dataset, in degrees Fahrenheit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemperatureRecord {
    pub city: String,
    pub month_name: String,
    pub high_temp: f64,
    pub low_temp: f64,
}

impl TemperatureRecord {
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        month_name: impl Into<String>,
        high_temp: f64,
        low_temp: f64,
    ) -> Self {
        Self {
            city: city.into(),
            month_name: month_name.into(),
            high_temp,
            low_temp,
        }
    }
}

/// Parses `city,month_name,high_temp,low_temp` rows.
pub fn parse_temperatures_csv<R: Read>(reader: R) -> ChartResult<Vec<TemperatureRecord>> {
    let records: Vec<TemperatureRecord> = read_records(reader)?;
    for (index, record) in records.iter().enumerate() {
        if !record.high_temp.is_finite() || !record.low_temp.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "row {}: temperatures must be finite",
                row_number(index)
            )));
        }
    }
    Ok(records)
}

pub fn load_temperatures_csv(path: impl AsRef<Path>) -> ChartResult<Vec<TemperatureRecord>> {
    let path = path.as_ref();
    let records = parse_temperatures_csv(open(path)?)?;
    log_loaded("temperatures", path, records.len());
    Ok(records)
}
