//! Conversion of Polars DataFrames into inline Vega-Lite values

use chrono::{DateTime, NaiveDate, NaiveTime};
use polars::prelude::{AnyValue, Column, DataFrame, TimeUnit};
use serde_json::{Map, Value};

use super::Row;
use crate::Result;

/// Convert a DataFrame to an array of row objects
pub fn to_rows(df: &DataFrame) -> Result<Vec<Row>> {
    let columns = df.get_columns();
    let rows = (0..df.height())
        .map(|idx| {
            columns
                .iter()
                .map(|column| (column.name().to_string(), column_value_to_json(column, idx)))
                .collect::<Map<String, Value>>()
        })
        .collect();
    Ok(rows)
}

/// Convert a single value from a Polars Column to JSON.
///
/// Dates and times are formatted as ISO-8601 strings so Vega-Lite parses them
/// as temporal values.
fn column_value_to_json(column: &Column, idx: usize) -> Value {
    let any_value = match column.get(idx) {
        Ok(v) => v,
        Err(_) => return Value::Null,
    };

    match any_value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::Number(v.into()),
        AnyValue::Int16(v) => Value::Number(v.into()),
        AnyValue::Int32(v) => Value::Number(v.into()),
        AnyValue::Int64(v) => Value::Number(v.into()),
        AnyValue::UInt8(v) => Value::Number(v.into()),
        AnyValue::UInt16(v) => Value::Number(v.into()),
        AnyValue::UInt32(v) => Value::Number(v.into()),
        AnyValue::UInt64(v) => Value::Number(v.into()),
        AnyValue::Float32(v) => serde_json::Number::from_f64(v as f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Date(days) => date_to_json(days),
        AnyValue::Datetime(value, unit, _) => datetime_to_json(value, unit),
        AnyValue::Time(nanos) => time_to_json(nanos),
        other => {
            tracing::debug!("Converting unsupported Polars type to string: {:?}", other);
            Value::String(format!("{}", other))
        }
    }
}

fn date_to_json(days: i32) -> Value {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(days as i64)))
        .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
        .unwrap_or(Value::Null)
}

fn datetime_to_json(value: i64, unit: TimeUnit) -> Value {
    let dt = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    dt.map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()))
        .unwrap_or(Value::Null)
}

fn time_to_json(nanos: i64) -> Value {
    let secs = nanos.div_euclid(1_000_000_000);
    let frac = nanos.rem_euclid(1_000_000_000);
    u32::try_from(secs)
        .ok()
        .zip(u32::try_from(frac).ok())
        .and_then(|(secs, frac)| NaiveTime::from_num_seconds_from_midnight_opt(secs, frac))
        .map(|time| Value::String(time.format("%H:%M:%S").to_string()))
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_columns() {
        let df = df! {
            "x" => &[1i64, 2],
            "y" => &[1.5f64, 2.5],
            "label" => &["a", "b"],
        }
        .unwrap();

        let rows = to_rows(&df).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["x"], json!(1));
        assert_eq!(rows[1]["y"], json!(2.5));
        assert_eq!(rows[1]["label"], json!("b"));
    }

    #[test]
    fn test_null_values() {
        let df = df! {
            "x" => &[Some(1i32), None],
        }
        .unwrap();

        let rows = to_rows(&df).unwrap();
        assert_eq!(rows[1]["x"], Value::Null);
    }

    #[test]
    fn test_date_values_are_iso_strings() {
        let dates = Series::new("day".into(), &[0i32, 31])
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![dates.into()]).unwrap();

        let rows = to_rows(&df).unwrap();
        assert_eq!(rows[0]["day"], json!("1970-01-01"));
        assert_eq!(rows[1]["day"], json!("1970-02-01"));
    }

    #[test]
    fn test_time_conversion() {
        assert_eq!(time_to_json(3_661_000_000_000), json!("01:01:01"));
    }

    #[test]
    fn test_datetime_conversion() {
        assert_eq!(
            datetime_to_json(0, TimeUnit::Milliseconds),
            json!("1970-01-01T00:00:00.000Z")
        );
    }
}
