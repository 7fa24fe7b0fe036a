//! Distribution plots
//!
//! Binning and density estimation are emitted as Vega-Lite transforms; the
//! statistics are computed by the rendering engine.

use serde_json::{json, Map, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::{naming, Result};

pub(crate) const HISTOGRAM_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "color_by",
    "orient",
    "fill_color",
    "opacity",
    "x",
    "y",
    "color",
];

pub(crate) const HISTOGRAM_EXTRAS: &[OptionDescriptor] = &[
    OptionDescriptor::new("maxbins", ValueKind::PositiveInteger, Section::Data, "Maximum number of bins")
        .with_default(DefaultValue::Number(20.0)),
    OptionDescriptor::new("step", ValueKind::PositiveNumber, Section::Data, "Exact width of the bins, overrides maxbins"),
    OptionDescriptor::new("extent", ValueKind::List, Section::Data, "Range of values to bin, as [min, max]"),
    OptionDescriptor::new("relative", ValueKind::Boolean, Section::Data, "Show relative frequencies instead of counts")
        .with_default(DefaultValue::Boolean(false)),
    OptionDescriptor::new("stacked", ValueKind::Boolean, Section::Layout, "Stack the bars of the color groups")
        .with_default(DefaultValue::Boolean(true)),
];

pub(crate) const DENSITY_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "color_by",
    "fill_opacity",
    "opacity",
    "interpolate",
    "x",
    "y",
    "color",
];

pub(crate) const DENSITY_EXTRAS: &[OptionDescriptor] = &[
    OptionDescriptor::new("bandwidth", ValueKind::PositiveNumber, Section::Data, "Kernel bandwidth, estimated from the data if unset"),
    OptionDescriptor::new("counts", ValueKind::Boolean, Section::Data, "Scale densities by the number of values")
        .with_default(DefaultValue::Boolean(false)),
    OptionDescriptor::new("cumulative", ValueKind::Boolean, Section::Data, "Cumulative density")
        .with_default(DefaultValue::Boolean(false)),
    OptionDescriptor::new("extent", ValueKind::List, Section::Data, "Domain over which to estimate, as [min, max]"),
    OptionDescriptor::new("minsteps", ValueKind::PositiveInteger, Section::Data, "Minimum number of samples"),
    OptionDescriptor::new("maxsteps", ValueKind::PositiveInteger, Section::Data, "Maximum number of samples"),
    OptionDescriptor::new("steps", ValueKind::PositiveInteger, Section::Data, "Exact number of samples"),
];

pub(crate) const STRIPPLOT_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "group_by",
    "color_by",
    "orient",
    "opacity",
    "point_size",
    "x",
    "y",
    "color",
];

pub(crate) const STRIPPLOT_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "style",
    ValueKind::OneOf(&["tick", "jitter"]),
    Section::Mark,
    "Draw values as ticks or as jittered points",
)
.with_default(DefaultValue::String("tick"))];

pub(crate) const BOXPLOT_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "group_by",
    "color_by",
    "orient",
    "opacity",
    "x",
    "y",
    "color",
];

pub(crate) const BOXPLOT_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "mode",
    ValueKind::OneOf(&["tukey", "min-max"]),
    Section::Mark,
    "Whiskers at 1.5 IQR (tukey) or at the extreme values (min-max)",
)
.with_default(DefaultValue::String("tukey"))];

pub(crate) const ERRORBAR_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "group_by",
    "color_by",
    "orient",
    "stroke_width",
    "x",
    "y",
    "color",
];

pub(crate) const ERRORBAND_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "color_by",
    "interpolate",
    "opacity",
    "x",
    "y",
    "color",
];

pub(crate) const ERROR_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "extent",
    ValueKind::OneOf(&["ci", "stderr", "stdev", "iqr"]),
    Section::Mark,
    "Extent of the error: confidence interval, standard error, standard deviation or interquartile range",
)
.with_default(DefaultValue::String("stderr"))];

/// Histogram of `field`.
///
/// Values are binned with a `bin` transform and counted with an `aggregate`
/// transform (grouped by `color_by`); the bars span `[bin, bin_end]`.
pub fn histogram(data: impl Into<Data>, field: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(HISTOGRAM_OPTIONS, HISTOGRAM_EXTRAS, data, &opts)?;

    let bin_start = naming::bin_column(field);
    let bin_end = naming::bin_end_column(field);
    let count = naming::count_column(field);

    let mut bin = Map::new();
    for key in ["maxbins", "step", "extent"] {
        if let Some(value) = prepared.get(key) {
            bin.insert(key.to_string(), value.clone());
        }
    }

    let mut groupby = vec![json!(bin_start), json!(bin_end)];
    if let Some(group) = prepared.str("color_by") {
        groupby.push(json!(group));
    }

    let mut transforms = vec![
        json!({ "bin": bin, "field": field, "as": [bin_start, bin_end] }),
        json!({ "aggregate": [{ "op": "count", "as": count }], "groupby": groupby }),
    ];

    let (y_field, y_title) = if prepared.flag("relative") {
        let total = format!("total_{}", field);
        let relative = format!("relative_{}", field);
        transforms.push(json!({ "joinaggregate": [{ "op": "sum", "field": count, "as": total }] }));
        transforms.push(json!({
            "calculate": format!("datum[{}] / datum[{}]", json!(count), json!(total)),
            "as": relative
        }));
        (relative, "Relative frequency")
    } else {
        (count, "Count")
    };

    let mut spec = spec::set_mark(spec.with_transforms(transforms), "bar", prepared.mark_options())?;
    spec = spec::encode_field(
        spec,
        "x",
        &bin_start,
        ColumnType::Quantitative,
        json!({ "bin": { "binned": true }, "title": field }),
    )?;
    spec = spec::put_encoding(spec, "x2", json!({ "field": bin_end }))?;

    let mut y_opts = json!({ "title": y_title });
    if !prepared.flag("stacked") {
        y_opts["stack"] = Value::Null;
    }
    spec = spec::encode_field(spec, "y", &y_field, ColumnType::Quantitative, y_opts)?;

    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
    }
    if prepared.is_horizontal() {
        spec = spec::flip_axes(spec)?;
    }
    prepared.finish(spec)
}

/// Kernel density estimate of `field`, one curve per `color_by` group
pub fn density(data: impl Into<Data>, field: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(DENSITY_OPTIONS, DENSITY_EXTRAS, data, &opts)?;

    let mut transform = Map::new();
    transform.insert("density".to_string(), json!(field));
    for key in ["bandwidth", "counts", "cumulative", "extent", "minsteps", "maxsteps", "steps"] {
        if let Some(value) = prepared.get(key) {
            transform.insert(key.to_string(), value.clone());
        }
    }
    if let Some(group) = prepared.str("color_by") {
        transform.insert("groupby".to_string(), json!([group]));
    }
    transform.insert("as".to_string(), json!([field, "density"]));

    let mut spec = spec::set_mark(
        spec.with_transforms(vec![Value::Object(transform)]),
        "area",
        prepared.mark_options(),
    )?;
    spec = spec::encode_field(spec, "x", field, ColumnType::Quantitative, Value::Null)?;
    spec = spec::encode_field(spec, "y", "density", ColumnType::Quantitative, json!({ "stack": null }))?;
    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
    }
    prepared.finish(spec)
}

/// One mark per value of `field`, optionally split by `group_by`
pub fn stripplot(data: impl Into<Data>, field: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(STRIPPLOT_OPTIONS, STRIPPLOT_EXTRAS, data, &opts)?;
    let jitter = prepared.str("style") == Some("jitter");

    let mut spec = if jitter {
        let offset = format!("jitter_{}", field);
        let spec = spec.with_transforms(vec![json!({
            "calculate": "sqrt(-2 * log(random())) * cos(2 * PI * random())",
            "as": offset
        })]);
        let spec = spec::set_mark(spec, "point", prepared.mark_options())?;
        spec::encode_field(spec, "xOffset", &offset, ColumnType::Quantitative, Value::Null)?
    } else {
        spec::set_mark(spec, "tick", prepared.mark_options())?
    };

    spec = spec::encode_field(spec, "y", field, ColumnType::Quantitative, Value::Null)?;
    if let Some(group) = prepared.str("group_by") {
        spec = spec::encode_field(spec, "x", group, ColumnType::Nominal, Value::Null)?;
    }
    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
    }
    if prepared.is_horizontal() {
        spec = spec::flip_axes(spec)?;
    }
    prepared.finish(spec)
}

/// Box plot of `field`, one box per `group_by` value
pub fn boxplot(data: impl Into<Data>, field: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(BOXPLOT_OPTIONS, BOXPLOT_EXTRAS, data, &opts)?;
    let extent = match prepared.str("mode") {
        Some("min-max") => json!("min-max"),
        _ => json!(1.5),
    };
    let mark_opts = spec::merge::deep_merge(prepared.mark_options(), json!({ "extent": extent }));

    let spec = spec::set_mark(spec, "boxplot", mark_opts)?;
    grouped_statistic(&prepared, spec, field)
}

/// Error bars of `field`, one per `group_by` value
pub fn errorbar(data: impl Into<Data>, field: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(ERRORBAR_OPTIONS, ERROR_EXTRAS, data, &opts)?;
    let mark_opts = spec::merge::deep_merge(
        prepared.mark_options(),
        json!({ "extent": prepared.str("extent"), "ticks": true }),
    );

    let spec = spec::set_mark(spec, "errorbar", mark_opts)?;
    grouped_statistic(&prepared, spec, field)
}

/// Continuous error band of `y` along `x`
pub fn errorband(data: impl Into<Data>, x: &str, y: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(ERRORBAND_OPTIONS, ERROR_EXTRAS, data, &opts)?;
    let mark_opts = spec::merge::deep_merge(
        prepared.mark_options(),
        json!({ "extent": prepared.str("extent") }),
    );

    let mut spec = spec::set_mark(spec, "errorband", mark_opts)?;
    spec = spec::encode_field(spec, "x", x, ColumnType::Quantitative, Value::Null)?;
    spec = spec::encode_field(spec, "y", y, ColumnType::Quantitative, Value::Null)?;
    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
    }
    prepared.finish(spec)
}

fn grouped_statistic(prepared: &Prepared, spec: Spec, field: &str) -> Result<Spec> {
    let mut spec = spec::encode_field(spec, "y", field, ColumnType::Quantitative, Value::Null)?;
    if let Some(group) = prepared.str("group_by") {
        spec = spec::encode_field(spec, "x", group, ColumnType::Nominal, Value::Null)?;
    }
    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
    }
    if prepared.is_horizontal() {
        spec = spec::flip_axes(spec)?;
    }
    prepared.finish(spec)
}
