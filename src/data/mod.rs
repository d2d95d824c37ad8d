//! CSV loading for the three chart datasets.
//!
//! Every loader is all-or-nothing: one malformed row fails the whole load.

mod countries;
mod housing;
mod loader;
mod temperatures;

pub use countries::{CountryRecord, load_countries_csv, parse_countries_csv};
pub use housing::{HousingRecord, load_housing_csv, parse_housing_csv, parse_month_label};
pub use loader::read_records;
pub use temperatures::{TemperatureRecord, load_temperatures_csv, parse_temperatures_csv};
