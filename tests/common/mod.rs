#![allow(dead_code)]

use chrono::NaiveDate;
use scrolly_charts::data::{CountryRecord, HousingRecord, TemperatureRecord};

pub fn countries() -> Vec<CountryRecord> {
    vec![
        CountryRecord::new("Japan", "Asia", 84.0, 39_000.0),
        CountryRecord::new("Chad", "Africa", 54.0, 1_700.0),
        CountryRecord::new("Canada", "N. America", 82.0, 45_000.0),
        CountryRecord::new("India", "Asia", 69.0, 2_100.0),
        CountryRecord::new("Mexico", "N. America", 75.0, 9_900.0),
        CountryRecord::new("Kenya", "Africa", 66.0, 3_000.0),
    ]
}

pub fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

/// Two years of monthly prices for each region, with a winter dip.
pub fn housing() -> Vec<HousingRecord> {
    let regions = [
        ("U.S.", 250.0),
        ("Pacific", 400.0),
        ("New England", 320.0),
        ("Mountain", 280.0),
    ];
    let mut records = Vec::new();
    for (region, base) in regions {
        for year in [2016, 2017] {
            for m in 1..=12 {
                let winter = if m == 12 || m <= 2 { -20.0 } else { 0.0 };
                let trend = f64::from(year - 2016) * 12.0 + f64::from(m);
                records.push(HousingRecord::new(
                    region,
                    month(year, m),
                    base + trend + winter,
                ));
            }
        }
    }
    records
}

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

pub fn city(name: &str, highs: [f64; 12], spread: f64) -> Vec<TemperatureRecord> {
    MONTHS
        .iter()
        .zip(highs)
        .map(|(month, high)| TemperatureRecord::new(name, *month, high, high - spread))
        .collect()
}

pub fn temperatures() -> Vec<TemperatureRecord> {
    let mut records = city(
        "NYC",
        [39.0, 42.0, 50.0, 61.0, 71.0, 79.0, 84.0, 83.0, 76.0, 64.0, 54.0, 44.0],
        12.0,
    );
    records.extend(city(
        "Beijing",
        [35.0, 41.0, 53.0, 68.0, 79.0, 86.0, 88.0, 86.0, 79.0, 66.0, 50.0, 38.0],
        20.0,
    ));
    records.extend(city(
        "Lima",
        [79.0, 80.0, 80.0, 77.0, 73.0, 69.0, 67.0, 66.0, 67.0, 69.0, 72.0, 76.0],
        8.0,
    ));
    records
}
