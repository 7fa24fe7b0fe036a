//! Bar charts and lollipop charts

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const BAR_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "color_by",
    "orient",
    "aggregate",
    "fill_color",
    "opacity",
    "corner_radius",
    "x",
    "y",
    "color",
];

pub(crate) const LOLLIPOP_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "orient",
    "aggregate",
    "point_size",
    "point_color",
    "line_color",
    "stroke_width",
    "x",
    "y",
];

pub(crate) const BAR_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "mode",
    ValueKind::OneOf(&["stacked", "grouped", "normalize"]),
    Section::Layout,
    "How bars of several color groups are arranged",
)
.with_default(DefaultValue::String("stacked"))];

/// Bar chart of `value` per category `field`.
///
/// With `orient` set to `horizontal` categories are listed on the y axis.
pub fn bar(data: impl Into<Data>, field: &str, value: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(BAR_OPTIONS, BAR_EXTRAS, data, &opts)?;

    let mut spec = spec::set_mark(spec, "bar", prepared.mark_options())?;
    spec = spec::encode_field(spec, "x", field, ColumnType::Nominal, Value::Null)?;
    spec = spec::encode_field(spec, "y", value, ColumnType::Quantitative, value_opts(&prepared))?;

    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
        match prepared.str("mode") {
            Some("grouped") => {
                spec = spec::encode_field(spec, "xOffset", group, ColumnType::Nominal, Value::Null)?;
            }
            Some("normalize") => {
                spec = spec::put_encoding_options(spec, "y", json!({ "stack": "normalize" }))?;
            }
            _ => {}
        }
    }

    if prepared.is_horizontal() {
        spec = spec::flip_axes(spec)?;
    }
    prepared.finish(spec)
}

/// Lollipop chart: a rule from zero to `value` topped by a point
pub fn lollipop(data: impl Into<Data>, field: &str, value: &str, opts: Value) -> Result<Spec> {
    let (prepared, base) = Prepared::with_data(LOLLIPOP_OPTIONS, &[], data, &opts)?;

    let stem_opts = strip_nulls(json!({
        "color": prepared.get("line_color"),
        "stroke_width": prepared.get("stroke_width"),
    }));
    let stem = spec::set_mark(base.detached(), "rule", stem_opts)?;
    let stem = spec::put_encoding(stem, "y2", json!({ "datum": 0 }))?;

    let head_opts = strip_nulls(json!({
        "filled": true,
        "size": prepared.get("point_size"),
        "color": prepared.get("point_color"),
    }));
    let head = spec::set_mark(base.detached(), "point", head_opts)?;

    let mut spec = spec::append_layers(base, vec![stem, head])?;
    spec = spec::encode_field(spec, "x", field, ColumnType::Nominal, Value::Null)?;
    spec = spec::encode_field(spec, "y", value, ColumnType::Quantitative, value_opts(&prepared))?;

    if prepared.is_horizontal() {
        spec = spec::flip_axes(spec)?;
    }
    prepared.finish(spec)
}

fn value_opts(prepared: &Prepared) -> Value {
    match prepared.str("aggregate") {
        Some(op) => json!({ "aggregate": op }),
        None => Value::Null,
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}
