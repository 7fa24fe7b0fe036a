//! Line and step plots

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const LINE_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "group_by",
    "color_by",
    "points",
    "interpolate",
    "line_color",
    "stroke_width",
    "stroke_dash",
    "opacity",
    "x",
    "y",
    "color",
];

pub(crate) const STEP_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "group_by",
    "color_by",
    "points",
    "line_color",
    "stroke_width",
    "stroke_dash",
    "opacity",
    "x",
    "y",
    "color",
];

pub(crate) const STEP_EXTRAS: &[OptionDescriptor] = &[OptionDescriptor::new(
    "step_position",
    ValueKind::OneOf(&["center", "before", "after"]),
    Section::Mark,
    "Where the step happens relative to each data point",
)
.with_default(DefaultValue::String("center"))];

/// Line plot of `y` against `x`.
///
/// `group_by` draws one line per group without coloring them, `color_by`
/// draws one colored line per group.
pub fn lineplot(data: impl Into<Data>, x: &str, y: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(LINE_OPTIONS, &[], data, &opts)?;
    lines(&prepared, spec, x, y, prepared.mark_options())
}

/// Line plot drawn as a staircase
pub fn step(data: impl Into<Data>, x: &str, y: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(STEP_OPTIONS, STEP_EXTRAS, data, &opts)?;
    let interpolate = match prepared.str("step_position") {
        Some("before") => "step-before",
        Some("after") => "step-after",
        _ => "step",
    };
    let mark_opts = spec::merge::deep_merge(
        prepared.mark_options(),
        json!({ "interpolate": interpolate }),
    );
    lines(&prepared, spec, x, y, mark_opts)
}

fn lines(prepared: &Prepared, spec: Spec, x: &str, y: &str, mark_opts: Value) -> Result<Spec> {
    let mut spec = spec::set_mark(spec, "line", mark_opts)?;
    spec = spec::encode_field(spec, "x", x, ColumnType::Quantitative, Value::Null)?;
    spec = spec::encode_field(spec, "y", y, ColumnType::Quantitative, Value::Null)?;

    if let Some(field) = prepared.str("group_by") {
        spec = spec::encode_field(spec, "detail", field, ColumnType::Nominal, Value::Null)?;
    }
    if let Some(field) = prepared.str("color_by") {
        spec = spec::color_by(spec, field, Value::Null)?;
    }

    prepared.finish(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Value {
        json!({
            "t": ["2024-01-01", "2024-01-02", "2024-01-03"],
            "v": [1.0, 3.5, 2.0],
            "s": ["a", "a", "b"]
        })
    }

    #[test]
    fn test_lineplot_with_groups() {
        let spec = lineplot(
            series(),
            "t",
            "v",
            json!({"group_by": "s", "points": true, "interpolate": "monotone"}),
        )
        .unwrap();

        assert_eq!(spec.channel("x").unwrap()["type"], json!("temporal"));
        assert_eq!(
            spec.channel("detail"),
            Some(&json!({"field": "s", "type": "nominal"}))
        );
        let mark = spec.mark().unwrap();
        assert_eq!(mark["point"], json!(true));
        assert_eq!(mark["interpolate"], json!("monotone"));
    }

    #[test]
    fn test_column_data_is_converted_to_rows() {
        let spec = lineplot(series(), "t", "v", Value::Null).unwrap();
        assert_eq!(
            spec.property("data").unwrap()["values"][1],
            json!({"t": "2024-01-02", "v": 3.5, "s": "a"})
        );
    }

    #[test]
    fn test_step_interpolation() {
        let spec = step(series(), "t", "v", Value::Null).unwrap();
        assert_eq!(spec.mark().unwrap()["interpolate"], json!("step"));

        let spec = step(series(), "t", "v", json!({"step_position": "after"})).unwrap();
        assert_eq!(spec.mark().unwrap()["interpolate"], json!("step-after"));

        assert!(step(series(), "t", "v", json!({"interpolate": "linear"})).is_err());
    }
}
