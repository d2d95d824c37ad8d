use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Deserializes every row of a headed CSV stream into `T`.
///
/// Columns are matched by header name; extra columns are ignored and
/// surrounding whitespace is trimmed.
pub fn read_records<T, R>(reader: R) -> ChartResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

pub(super) fn open(path: &Path) -> ChartResult<File> {
    File::open(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn log_loaded(dataset: &'static str, path: &Path, count: usize) {
    debug!(dataset, path = %path.display(), count, "loaded csv dataset");
}

/// 1-based data row number (the header is row 0) for error messages.
pub(super) fn row_number(index: usize) -> usize {
    index + 1
}
