use chrono::{Datelike, Months, NaiveDate};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Round tick values covering `[start, stop]`, using 1/2/5 × 10^k steps.
///
/// Returns ticks in the direction of the domain (descending when
/// `start > stop`).
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let raw_step = (hi - lo) / count as f64;
    let power = raw_step.log10().floor();
    let error = raw_step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let mut ticks = Vec::new();
    if power < 0.0 {
        // Divide by an integer inverse step to keep decimal ticks exact.
        let inverse = 10f64.powf(-power) / factor;
        let mut first = (lo * inverse).round();
        let mut last = (hi * inverse).round();
        if first / inverse < lo {
            first += 1.0;
        }
        if last / inverse > hi {
            last -= 1.0;
        }
        let mut index = first;
        while index <= last {
            ticks.push(index / inverse);
            index += 1.0;
        }
    } else {
        let step = 10f64.powf(power) * factor;
        let mut first = (lo / step).round();
        let mut last = (hi / step).round();
        if first * step < lo {
            first += 1.0;
        }
        if last * step > hi {
            last -= 1.0;
        }
        let mut index = first;
        while index <= last {
            ticks.push(index * step);
            index += 1.0;
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Formats a tick with thousands separators and as many decimals as the tick
/// spacing `step` needs (`0.2` → one decimal, `20_000` → none).
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    let text = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) if rest.chars().any(|ch| ch != '0' && ch != '.') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

const MONTH_STEPS: [u32; 5] = [1, 2, 3, 6, 12];

/// Month-aligned ticks between two dates, approximately `count` of them.
///
/// The step is whichever of 1, 2, 3, 6 or 12 months lands closest to the
/// requested density; ticks fall on the first of every month whose index is
/// a multiple of the step.
#[must_use]
pub fn month_ticks(start: NaiveDate, end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    if count == 0 {
        return Vec::new();
    }

    let month_index = |date: NaiveDate| date.year() * 12 + date.month0() as i32;
    let span_months = (month_index(end) - month_index(start)).max(1) as f64;
    let target = span_months / count as f64;
    let step = MONTH_STEPS
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (f64::from(*a) / target).ln().abs();
            let db = (f64::from(*b) / target).ln().abs();
            da.total_cmp(&db)
        })
        .unwrap_or(1);

    let Some(mut cursor) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return Vec::new();
    };
    if cursor < start {
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }

    let mut ticks = Vec::new();
    while cursor <= end {
        if cursor.month0() % step == 0 {
            ticks.push(cursor);
        }
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    ticks
}
