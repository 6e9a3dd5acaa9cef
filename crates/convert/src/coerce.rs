//! Lenient value coercion. Values that fail to parse become null; nothing
//! in here returns an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::frame::ColumnData;

/// Parse a lap time such as `1:23.456` into milliseconds.
///
/// The value must split on `:` into exactly two parts and the second part on
/// `.` into exactly two parts, each an integer. The trailing part is taken as
/// a whole number of milliseconds, so `1:23.4` is 83004.
pub fn lap_time_to_millis(value: &str) -> Option<f64> {
    let (minutes, rest) = split_exactly_two(value, ':')?;
    let (seconds, millis) = split_exactly_two(rest, '.')?;

    let minutes: i64 = minutes.trim().parse().ok()?;
    let seconds: i64 = seconds.trim().parse().ok()?;
    let millis: i64 = millis.trim().parse().ok()?;

    let total = minutes
        .checked_mul(60_000)?
        .checked_add(seconds.checked_mul(1_000)?)?
        .checked_add(millis)?;
    Some(total as f64)
}

fn split_exactly_two(value: &str, sep: char) -> Option<(&str, &str)> {
    let mut parts = value.split(sep);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

/// Parse a timestamp string into naive epoch milliseconds.
///
/// Accepted forms:
/// 1. RFC 3339: `2009-03-29T06:00:00Z` (converted to UTC)
/// 2. `2009-03-29 06:00:00`, optionally with fractional seconds
/// 3. `2009-03-29 06:00`
/// 4. Date only: `1985-01-07` (midnight)
pub fn parse_timestamp_ms(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }
    if let Ok(nd) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(nd.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

/// Result of coercing one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub data: ColumnData,
    /// Values that were present before coercion and null after.
    pub nulled: usize,
}

impl Coerced {
    fn new(before: &ColumnData, data: ColumnData) -> Self {
        let nulled = data.null_count().saturating_sub(before.null_count());
        Self { data, nulled }
    }
}

/// Numeric coercion: Int64 when every surviving value is an integer,
/// otherwise Float64. NaN is treated as null.
pub fn to_numeric(data: &ColumnData) -> Coerced {
    let out = match data {
        ColumnData::Int64(_) | ColumnData::Float64(_) => data.clone(),
        ColumnData::Boolean(v) => ColumnData::Int64(v.iter().map(|b| b.map(i64::from)).collect()),
        other => {
            let text = other.to_text();
            let ints: Vec<Option<i64>> = text
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.trim().parse().ok()))
                .collect();
            let floats: Vec<Option<f64>> = text
                .iter()
                .map(|v| {
                    v.as_deref()
                        .and_then(|s| s.trim().parse::<f64>().ok())
                        .filter(|f| !f.is_nan())
                })
                .collect();

            let all_integral = ints.iter().zip(&floats).all(|(i, f)| i.is_some() || f.is_none());
            if all_integral {
                ColumnData::Int64(ints)
            } else {
                ColumnData::Float64(floats)
            }
        }
    };
    Coerced::new(data, out)
}

pub fn to_datetime(data: &ColumnData) -> Coerced {
    let out = match data {
        ColumnData::Timestamp(_) => data.clone(),
        other => ColumnData::Timestamp(map_text(other, parse_timestamp_ms)),
    };
    Coerced::new(data, out)
}

pub fn lap_times_to_millis(data: &ColumnData) -> Coerced {
    Coerced::new(data, ColumnData::Float64(map_text(data, lap_time_to_millis)))
}

/// Join `date` and `time` with a space and parse the result. Null when
/// either side is null.
pub fn combine_datetime(date: &ColumnData, time: &ColumnData) -> Coerced {
    let mut nulled = 0;
    let parsed: Vec<Option<i64>> = date
        .to_text()
        .into_iter()
        .zip(time.to_text())
        .map(|(d, t)| {
            let (d, t) = (d?, t?);
            let ms = parse_timestamp_ms(&format!("{d} {t}"));
            if ms.is_none() {
                nulled += 1;
            }
            ms
        })
        .collect();

    Coerced {
        data: ColumnData::Timestamp(parsed),
        nulled,
    }
}

fn map_text<T>(data: &ColumnData, parse: impl Fn(&str) -> Option<T>) -> Vec<Option<T>> {
    data.to_text()
        .iter()
        .map(|v| v.as_deref().and_then(&parse))
        .collect()
}
