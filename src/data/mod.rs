//! Data sources for plots
//!
//! A plot can be built from:
//! - inline JSON, either row oriented (`[{"x": 1}, ...]`) or column oriented
//!   (`{"x": [1, 2, 3]}`)
//! - a Polars [`DataFrame`]
//! - a URL pointing to a CSV/JSON file
//! - a symbolic dataset name resolved through the [`datasets`] registry
//! - an existing [`Spec`], reused as the base of the new plot
//!
//! Inline sources are type-inferred when the base spec is created (see
//! [`infer`]) and embedded as `data.values`.

pub mod datasets;
pub mod frame;
pub mod infer;

pub use infer::{infer_column_types, ColumnType, ColumnTypes};

use crate::spec::Spec;
use crate::{DataFrame, PlotspecError, Result};
use serde_json::{json, Map, Value};

/// A single row of inline data
pub type Row = Map<String, Value>;

/// Data source of a plot
#[derive(Debug, Clone)]
pub enum Data {
    /// Raw JSON: an array of row objects or an object of column arrays
    Inline(Value),
    /// Row oriented inline data
    Rows(Vec<Row>),
    /// Polars DataFrame
    Frame(DataFrame),
    /// URL of a remote or local data file
    Url(String),
    /// Name of a dataset known to the dataset registry
    Dataset(String),
    /// An existing specification used as the plot base
    Spec(Box<Spec>),
}

impl Data {
    /// Data loaded from a URL
    pub fn url(url: impl Into<String>) -> Self {
        Data::Url(url.into())
    }

    /// One of the registered example datasets
    pub fn dataset(name: impl Into<String>) -> Self {
        Data::Dataset(name.into())
    }

    /// Vega-Lite `data` property for this source.
    ///
    /// Returns `None` for [`Data::Spec`], whose data (if any) is already part
    /// of the spec.
    pub fn to_vega_data(&self) -> Result<Option<Value>> {
        match self {
            Data::Inline(value) => Ok(Some(json!({ "values": rows_from_json(value)? }))),
            Data::Rows(rows) => Ok(Some(json!({ "values": rows }))),
            Data::Frame(df) => Ok(Some(json!({ "values": frame::to_rows(df)? }))),
            Data::Url(url) => Ok(Some(json!({ "url": url }))),
            Data::Dataset(name) => Ok(Some(json!({ "url": datasets::resolve(name)? }))),
            Data::Spec(_) => Ok(None),
        }
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Data::Inline(value)
    }
}

impl From<Vec<Row>> for Data {
    fn from(rows: Vec<Row>) -> Self {
        Data::Rows(rows)
    }
}

impl From<DataFrame> for Data {
    fn from(df: DataFrame) -> Self {
        Data::Frame(df)
    }
}

impl From<Spec> for Data {
    fn from(spec: Spec) -> Self {
        Data::Spec(Box::new(spec))
    }
}

/// Strings that look like paths or URLs are treated as such, anything else as
/// a dataset name.
impl From<&str> for Data {
    fn from(source: &str) -> Self {
        if looks_like_url(source) {
            Data::Url(source.to_string())
        } else {
            Data::Dataset(source.to_string())
        }
    }
}

impl From<String> for Data {
    fn from(source: String) -> Self {
        Data::from(source.as_str())
    }
}

fn looks_like_url(source: &str) -> bool {
    source.contains("://") || source.contains('/') || source.contains('.')
}

/// Normalize inline JSON data into rows.
///
/// Column oriented objects are zipped into rows; all columns must have the
/// same length.
pub fn rows_from_json(value: &Value) -> Result<Vec<Row>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(row) => Ok(row.clone()),
                other => Err(PlotspecError::Data(format!(
                    "row {} is not an object: {}",
                    idx, other
                ))),
            })
            .collect(),
        Value::Object(columns) => rows_from_columns(columns),
        other => Err(PlotspecError::Data(format!(
            "inline data must be an array of rows or an object of columns, got {}",
            json_kind(other)
        ))),
    }
}

fn rows_from_columns(columns: &Map<String, Value>) -> Result<Vec<Row>> {
    let mut arrays = Vec::with_capacity(columns.len());
    for (name, values) in columns {
        match values {
            Value::Array(items) => arrays.push((name, items)),
            other => {
                return Err(PlotspecError::Data(format!(
                    "column '{}' must be an array, got {}",
                    name,
                    json_kind(other)
                )))
            }
        }
    }

    let len = arrays.first().map(|(_, items)| items.len()).unwrap_or(0);
    if let Some((name, items)) = arrays.iter().find(|(_, items)| items.len() != len) {
        return Err(PlotspecError::Data(format!(
            "column '{}' has {} values, expected {}",
            name,
            items.len(),
            len
        )));
    }

    Ok((0..len)
        .map(|idx| {
            arrays
                .iter()
                .map(|(name, items)| (name.to_string(), items[idx].clone()))
                .collect()
        })
        .collect())
}

/// Short human readable name of a JSON value kind
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_row_array() {
        let rows = rows_from_json(&json!([{"a": 1}, {"a": 2}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["a"], json!(2));
    }

    #[test]
    fn test_rows_from_columns() {
        let rows = rows_from_json(&json!({"a": [1, 2], "b": ["x", "y"]})).unwrap();
        assert_eq!(
            Value::Array(rows.into_iter().map(Value::Object).collect()),
            json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}])
        );
    }

    #[test]
    fn test_columns_with_different_lengths_fail() {
        let err = rows_from_json(&json!({"a": [1, 2], "b": ["x"]})).unwrap_err();
        assert!(err.to_string().contains("'b' has 1 values, expected 2"));
    }

    #[test]
    fn test_non_object_row_fails() {
        let err = rows_from_json(&json!([{"a": 1}, 3])).unwrap_err();
        assert!(err.to_string().contains("row 1 is not an object"));
    }

    #[test]
    fn test_scalar_inline_data_fails() {
        assert!(rows_from_json(&json!(42)).is_err());
    }

    #[test]
    fn test_string_sources() {
        assert!(matches!(Data::from("iris"), Data::Dataset(name) if name == "iris"));
        assert!(matches!(Data::from("data/cars.json"), Data::Url(_)));
        assert!(matches!(
            Data::from("https://example.com/a.csv"),
            Data::Url(_)
        ));
    }

    #[test]
    fn test_vega_data_for_url_and_dataset() {
        assert_eq!(
            Data::url("cars.json").to_vega_data().unwrap(),
            Some(json!({"url": "cars.json"}))
        );
        let iris = Data::dataset("iris").to_vega_data().unwrap().unwrap();
        assert!(iris["url"].as_str().unwrap().ends_with("iris.json"));
        assert!(Data::dataset("nope").to_vega_data().is_err());
    }
}
