//! Heatmaps and punchcards

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const HEATMAP_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "aggregate",
    "color_scheme",
    "opacity",
    "x",
    "y",
    "color",
];

pub(crate) const HEATMAP_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "annotate",
    ValueKind::Boolean,
    Section::Mark,
    "Write the value of each cell on top of it",
)
.with_default(DefaultValue::Boolean(false))];

pub(crate) const PUNCHCARD_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "aggregate",
    "color_by",
    "point_color",
    "opacity",
    "x",
    "y",
    "size",
    "color",
];

/// Grid of `x` by `y` cells colored by `color`.
///
/// Cells with several rows are aggregated with `aggregate` (mean by
/// default).
pub fn heatmap(data: impl Into<Data>, x: &str, y: &str, color: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(HEATMAP_OPTIONS, HEATMAP_EXTRAS, data, &opts)?;
    let aggregate = prepared.str("aggregate").unwrap_or("mean");

    let mut color_opts = json!({ "aggregate": aggregate });
    if let Some(scheme) = prepared.str("color_scheme") {
        color_opts["scale"] = json!({ "scheme": scheme });
    }

    let mut spec = spec::set_mark(spec, "rect", prepared.mark_options())?;
    spec = spec::encode_field(spec, "x", x, ColumnType::Nominal, Value::Null)?;
    spec = spec::encode_field(spec, "y", y, ColumnType::Nominal, Value::Null)?;
    spec = spec::encode_field(spec, "color", color, ColumnType::Quantitative, color_opts)?;

    if prepared.flag("annotate") {
        let mut layered = spec::to_layered(spec)?;
        let labels = spec::set_mark(Spec::new(), "text", Value::Null)?;
        let labels = spec::encode_field(
            labels,
            "text",
            color,
            ColumnType::Quantitative,
            json!({ "aggregate": aggregate, "format": ".2~f" }),
        )?;
        layered = spec::append_layers(layered, labels)?;
        spec = hoist_position(layered)?;
    }

    prepared.finish(spec)
}

/// Move the `x`/`y` channels of the first layer to the shared encoding so
/// every layer sees them.
fn hoist_position(spec: Spec) -> Result<Spec> {
    let first = spec.layers().and_then(|layers| layers.first());
    let x = first.and_then(|layer| layer.channel("x")).cloned();
    let y = first.and_then(|layer| layer.channel("y")).cloned();

    let mut spec = spec;
    for (channel, def) in [("x", x), ("y", y)] {
        if let Some(def) = def {
            spec = spec::drop_encoding(spec, channel)?;
            spec = spec::put_encoding(spec, channel, def)?;
        }
    }
    Ok(spec)
}

/// Circles at each `x`/`y` combination sized by the aggregated `size` field
pub fn punchcard(data: impl Into<Data>, x: &str, y: &str, size: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(PUNCHCARD_OPTIONS, &[], data, &opts)?;
    let aggregate = prepared.str("aggregate").unwrap_or("sum");

    let mut spec = spec::set_mark(spec, "circle", prepared.mark_options())?;
    spec = spec::encode_field(spec, "x", x, ColumnType::Nominal, Value::Null)?;
    spec = spec::encode_field(spec, "y", y, ColumnType::Nominal, Value::Null)?;
    spec = spec::encode_field(
        spec,
        "size",
        size,
        ColumnType::Quantitative,
        json!({ "aggregate": aggregate }),
    )?;
    if let Some(group) = prepared.str("color_by") {
        spec = spec::color_by(spec, group, Value::Null)?;
    }
    prepared.finish(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Value {
        json!([
            {"day": "Mon", "hour": 9, "load": 0.5},
            {"day": "Tue", "hour": 10, "load": 0.75}
        ])
    }

    #[test]
    fn test_heatmap_channels() {
        let spec = heatmap(grid(), "day", "hour", "load", json!({"color_scheme": "viridis"})).unwrap();
        assert_eq!(spec.mark_type(), Some("rect"));
        assert_eq!(spec.channel("y").unwrap()["type"], json!("nominal"));
        assert_eq!(
            spec.channel("color"),
            Some(&json!({
                "field": "load",
                "type": "quantitative",
                "aggregate": "mean",
                "scale": {"scheme": "viridis"}
            }))
        );
    }

    #[test]
    fn test_annotated_heatmap_shares_positions() {
        let spec = heatmap(grid(), "day", "hour", "load", json!({"annotate": true})).unwrap();
        let layers = spec.layers().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].mark_type(), Some("rect"));
        assert!(layers[0].channel("x").is_none());
        assert_eq!(layers[1].channel("text").unwrap()["aggregate"], json!("mean"));
        assert_eq!(spec.channel("x").unwrap()["field"], json!("day"));
        assert_eq!(spec.channel("y").unwrap()["field"], json!("hour"));
    }

    #[test]
    fn test_punchcard_aggregates_size() {
        let spec = punchcard(grid(), "day", "hour", "load", Value::Null).unwrap();
        assert_eq!(spec.mark_type(), Some("circle"));
        assert_eq!(spec.channel("size").unwrap()["aggregate"], json!("sum"));
    }
}
