//! Column type inference
//!
//! Inspects sample values of a dataset and classifies each column into a
//! semantic type used to pick Vega-Lite encoding types.
//!
//! Only the field set of the *first* row is considered for row oriented data.
//! Fields that appear in later rows only are not inferred. For every field the
//! rows are scanned until a non-null value is found.

use polars::prelude::{DataType, DataFrame};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{Data, Row};

/// Inferred semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Nominal,
    Quantitative,
    Temporal,
    Time,
}

impl ColumnType {
    /// Vega-Lite encoding type for this column type.
    ///
    /// Vega-Lite has no time-of-day type, time columns are encoded as temporal.
    pub fn vega_type(&self) -> &'static str {
        match self {
            ColumnType::Nominal => "nominal",
            ColumnType::Quantitative => "quantitative",
            ColumnType::Temporal | ColumnType::Time => "temporal",
        }
    }

    /// Whether this column holds dates, date-times or times
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Temporal | ColumnType::Time)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColumnType::Nominal => "nominal",
            ColumnType::Quantitative => "quantitative",
            ColumnType::Temporal => "temporal",
            ColumnType::Time => "time",
        };
        write!(f, "{}", s)
    }
}

/// Inferred types per column; `None` marks a column of unknown type
pub type ColumnTypes = BTreeMap<String, Option<ColumnType>>;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

static ISO_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$")
        .expect("valid datetime regex")
});

static ISO_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$").expect("valid time regex")
});

/// Infer the column types of a data source.
///
/// Returns `None` for empty inline data, for a first row without fields and for
/// sources that are not inspected locally (URLs, datasets, specs).
pub fn infer_column_types(data: &Data) -> Option<ColumnTypes> {
    match data {
        Data::Inline(Value::Array(items)) => {
            let rows: Vec<&Row> = items.iter().map_while(Value::as_object).collect();
            infer_rows(&rows)
        }
        Data::Inline(Value::Object(columns)) => infer_columns(columns),
        Data::Inline(_) => None,
        Data::Rows(rows) => infer_rows(&rows.iter().collect::<Vec<_>>()),
        Data::Frame(df) => infer_frame(df),
        Data::Url(_) | Data::Dataset(_) | Data::Spec(_) => None,
    }
}

/// Infer types of row oriented data
pub fn infer_rows(rows: &[&Row]) -> Option<ColumnTypes> {
    let first = rows.first()?;
    if first.is_empty() {
        return None;
    }

    Some(
        first
            .keys()
            .map(|field| {
                let sample = rows
                    .iter()
                    .filter_map(|row| row.get(field))
                    .find(|value| !value.is_null());
                (field.clone(), sample.and_then(classify_value))
            })
            .collect(),
    )
}

/// Infer types of column oriented data (`{"field": [values...]}`)
pub fn infer_columns(columns: &serde_json::Map<String, Value>) -> Option<ColumnTypes> {
    if columns.is_empty() {
        return None;
    }

    Some(
        columns
            .iter()
            .map(|(field, values)| {
                let sample = match values {
                    Value::Array(items) => items.iter().find(|value| !value.is_null()),
                    _ => None,
                };
                (field.clone(), sample.and_then(classify_value))
            })
            .collect(),
    )
}

/// Infer types from the dtypes of a DataFrame
pub fn infer_frame(df: &DataFrame) -> Option<ColumnTypes> {
    if df.width() == 0 {
        return None;
    }

    Some(
        df.get_columns()
            .iter()
            .map(|column| {
                use DataType::*;
                let column_type = match column.dtype() {
                    Int8 | Int16 | Int32 | Int64 | UInt8 | UInt16 | UInt32 | UInt64 | Float32
                    | Float64 => Some(ColumnType::Quantitative),
                    Date | Datetime(_, _) => Some(ColumnType::Temporal),
                    Time => Some(ColumnType::Time),
                    Boolean => Some(ColumnType::Nominal),
                    String => first_string(column).map_or(Some(ColumnType::Nominal), |s| {
                        Some(classify_string(&s))
                    }),
                    List(_) | Null => None,
                    _ => Some(ColumnType::Nominal),
                };
                (column.name().to_string(), column_type)
            })
            .collect(),
    )
}

fn first_string(column: &polars::prelude::Column) -> Option<std::string::String> {
    let ca = column.as_materialized_series().str().ok()?;
    ca.into_iter().flatten().next().map(|s| s.to_string())
}

/// Classify a single JSON value.
///
/// Composite values (arrays, objects) and null are of unknown type.
pub fn classify_value(value: &Value) -> Option<ColumnType> {
    match value {
        Value::Number(_) => Some(ColumnType::Quantitative),
        Value::Bool(_) => Some(ColumnType::Nominal),
        Value::String(s) => Some(classify_string(s)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Classify a string by ISO-8601 pattern; anything else is nominal
pub fn classify_string(s: &str) -> ColumnType {
    if ISO_DATE.is_match(s) || ISO_DATETIME.is_match(s) {
        ColumnType::Temporal
    } else if ISO_TIME.is_match(s) {
        ColumnType::Time
    } else {
        ColumnType::Nominal
    }
}
