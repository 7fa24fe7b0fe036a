//! Candlestick charts

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const CANDLESTICK_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "stroke_width",
];

pub(crate) const CANDLESTICK_EXTRAS: &[OptionDescriptor] = &[
    OptionDescriptor::new("up_color", ValueKind::Color, Section::Mark, "Color of periods closing higher than they opened")
        .with_default(DefaultValue::String("#06982d")),
    OptionDescriptor::new("down_color", ValueKind::Color, Section::Mark, "Color of periods closing lower than they opened")
        .with_default(DefaultValue::String("#ae1325")),
];

/// Open-high-low-close chart.
///
/// Each period is a rule from `low` to `high` and a bar from `open` to
/// `close`, colored by the direction of the move.
pub fn candlestick(
    data: impl Into<Data>,
    timestamp: &str,
    open: &str,
    high: &str,
    low: &str,
    close: &str,
    opts: Value,
) -> Result<Spec> {
    let (prepared, base) =
        Prepared::with_data(CANDLESTICK_OPTIONS, CANDLESTICK_EXTRAS, data, &opts)?;

    let up = prepared.get("up_color").cloned().unwrap_or(Value::Null);
    let down = prepared.get("down_color").cloned().unwrap_or(Value::Null);
    let test = format!("datum[{}] < datum[{}]", json!(open), json!(close));

    let wick = spec::set_mark(base.detached(), "rule", prepared.mark_options())?;
    let wick = spec::encode_field(wick, "y", low, ColumnType::Quantitative, Value::Null)?;
    let wick = spec::put_encoding(wick, "y2", json!({ "field": high }))?;

    let body = spec::set_mark(base.detached(), "bar", Value::Null)?;
    let body = spec::encode_field(body, "y", open, ColumnType::Quantitative, Value::Null)?;
    let body = spec::put_encoding(body, "y2", json!({ "field": close }))?;

    let mut spec = spec::append_layers(spec::promote_to_layered(base), vec![wick, body])?;
    spec = spec::encode_field(
        spec,
        "x",
        timestamp,
        ColumnType::Temporal,
        json!({ "title": null }),
    )?;
    spec = spec::put_encoding(
        spec,
        "color",
        json!({ "condition": { "test": test, "value": up }, "value": down }),
    )?;
    spec = spec::put_encoding_options(spec, "y", json!({ "title": "Price", "scale": { "zero": false } }))?;

    prepared.finish(spec)
}
