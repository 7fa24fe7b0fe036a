//! Area plots and streamgraphs

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const AREA_OPTIONS: &[&str] = &[
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
    "fill_color",
    "interpolate",
    "x",
    "y",
    "color",
];

pub(crate) const STREAMGRAPH_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "fill_opacity",
    "opacity",
    "interpolate",
    "x",
    "y",
    "color",
];

pub(crate) const AREA_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "mode",
    ValueKind::OneOf(&["stacked", "normalize", "streamgraph", "no_stack"]),
    Section::Layout,
    "How areas of several groups are stacked",
)
.with_default(DefaultValue::String("stacked"))];

/// Filled area under `y`, stacked by `color_by` groups.
///
/// With `mode` set to `no_stack` overlapping groups are drawn on top of each
/// other, so a `fill_opacity` below one is advisable.
pub fn area(data: impl Into<Data>, x: &str, y: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(AREA_OPTIONS, AREA_EXTRAS, data, &opts)?;
    let group = prepared.str("color_by");
    let mode = prepared.str("mode").unwrap_or("stacked");
    areas(&prepared, spec, x, y, group, mode)
}

/// Areas of each `group` stacked around a central baseline
pub fn streamgraph(data: impl Into<Data>, x: &str, y: &str, group: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(STREAMGRAPH_OPTIONS, &[], data, &opts)?;
    areas(&prepared, spec, x, y, Some(group), "streamgraph")
}

fn areas(
    prepared: &Prepared,
    spec: Spec,
    x: &str,
    y: &str,
    group: Option<&str>,
    mode: &str,
) -> Result<Spec> {
    let stack = match mode {
        "normalize" => json!("normalize"),
        "streamgraph" => json!("center"),
        "no_stack" => Value::Null,
        _ => json!("zero"),
    };

    let mut spec = spec::set_mark(spec, "area", prepared.mark_options())?;
    spec = spec::encode_field(spec, "x", x, ColumnType::Quantitative, Value::Null)?;
    spec = spec::encode_field(spec, "y", y, ColumnType::Quantitative, json!({ "stack": stack }))?;
    if mode == "streamgraph" {
        spec = spec::put_encoding_options(spec, "y", json!({ "axis": null }))?;
    }
    if let Some(field) = group {
        spec = spec::color_by(spec, field, Value::Null)?;
    }

    prepared.finish(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Value {
        json!([
            {"year": 2000, "n": 10, "kind": "a"},
            {"year": 2000, "n": 4, "kind": "b"}
        ])
    }

    #[test]
    fn test_area_default_is_stacked() {
        let spec = area(data(), "year", "n", json!({"color_by": "kind"})).unwrap();
        assert_eq!(spec.mark_type(), Some("area"));
        assert_eq!(spec.channel("y").unwrap()["stack"], json!("zero"));
        assert_eq!(spec.channel("color").unwrap()["field"], json!("kind"));
    }

    #[test]
    fn test_area_modes() {
        let normalized = area(data(), "year", "n", json!({"mode": "normalize"})).unwrap();
        assert_eq!(normalized.channel("y").unwrap()["stack"], json!("normalize"));

        let overlapping = area(data(), "year", "n", json!({"mode": "no_stack"})).unwrap();
        assert_eq!(overlapping.channel("y").unwrap()["stack"], Value::Null);

        assert!(area(data(), "year", "n", json!({"mode": "spiral"})).is_err());
    }

    #[test]
    fn test_streamgraph_is_centered() {
        let spec = streamgraph(data(), "year", "n", "kind", Value::Null).unwrap();
        let y = spec.channel("y").unwrap();
        assert_eq!(y["stack"], json!("center"));
        assert_eq!(y["axis"], Value::Null);
        assert_eq!(spec.channel("color").unwrap()["type"], json!("nominal"));
    }
}
