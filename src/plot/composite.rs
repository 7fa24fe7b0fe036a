//! Plots made of several views

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::options::{DefaultValue, OptionDescriptor, Section, ValueKind};
use crate::spec::{self, Spec};
use crate::{PlotspecError, Result};

pub(crate) const JOINTPLOT_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "tooltip",
    "color_by",
    "point_size",
    "opacity",
    "fill_color",
];

pub(crate) const JOINTPLOT_EXTRAS: &[OptionDescriptor] = &[
    OptionDescriptor::new(
        "kind",
        ValueKind::OneOf(&["scatter", "density"]),
        Section::Layout,
        "Joint view drawn as a scatter plot or as a 2D histogram",
    )
    .with_default(DefaultValue::String("scatter")),
    OptionDescriptor::new("maxbins", ValueKind::PositiveInteger, Section::Data, "Maximum number of bins of the histograms")
        .with_default(DefaultValue::Number(20.0)),
    OptionDescriptor::new("marginal_size", ValueKind::PositiveNumber, Section::Layout, "Height of the x marginal and width of the y marginal")
        .with_default(DefaultValue::Number(60.0)),
];

pub(crate) const PAIRPLOT_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "tooltip",
    "color_by",
    "point_size",
    "opacity",
];

/// Joint distribution of `x` and `y` with marginal histograms.
///
/// The x histogram sits above the joint view, the y histogram on its right.
/// `width` and `height` size the joint view.
pub fn jointplot(data: impl Into<Data>, x: &str, y: &str, opts: Value) -> Result<Spec> {
    let (prepared, root) = Prepared::with_data(JOINTPLOT_OPTIONS, JOINTPLOT_EXTRAS, data, &opts)?;
    let width = root.property("width").cloned();
    let height = root.property("height").cloned();
    let root = root.without_property("width").without_property("height");

    let maxbins = prepared.get("maxbins").cloned().unwrap_or(json!(20));
    let marginal = prepared.get("marginal_size").cloned().unwrap_or(json!(60));
    let marginal_bins = |field: &str| {
        json!({
            "field": field,
            "type": "quantitative",
            "bin": { "maxbins": maxbins },
            "title": null,
            "axis": null
        })
    };

    let joint = match prepared.str("kind") {
        Some("density") => {
            let view = spec::set_mark(root.detached(), "rect", Value::Null)?;
            let joint_bins = |field: &str| {
                json!({
                    "field": field,
                    "type": "quantitative",
                    "bin": { "maxbins": maxbins },
                    "title": field
                })
            };
            let view = spec::put_encoding(view, "x", joint_bins(x))?;
            let view = spec::put_encoding(view, "y", joint_bins(y))?;
            spec::put_encoding(
                view,
                "color",
                json!({ "aggregate": "count", "type": "quantitative" }),
            )?
        }
        _ => {
            let view = spec::set_mark(root.detached(), "point", prepared.mark_options())?;
            let view = spec::encode_field(view, "x", x, ColumnType::Quantitative, Value::Null)?;
            let view = spec::encode_field(view, "y", y, ColumnType::Quantitative, Value::Null)?;
            match prepared.str("color_by") {
                Some(group) => spec::color_by(view, group, Value::Null)?,
                None => view,
            }
        }
    };
    let joint = sized(prepared.finish(joint)?, width.clone(), height.clone());

    let count = json!({ "aggregate": "count", "type": "quantitative", "title": null });
    let x_marginal = spec::set_mark(root.detached(), "bar", Value::Null)?;
    let x_marginal = spec::put_encoding(x_marginal, "x", marginal_bins(x))?;
    let x_marginal = spec::put_encoding(x_marginal, "y", count.clone())?;
    let x_marginal = sized(x_marginal, width, Some(marginal.clone()));

    let y_marginal = spec::set_mark(root.detached(), "bar", Value::Null)?;
    let y_marginal = spec::put_encoding(y_marginal, "y", marginal_bins(y))?;
    let y_marginal = spec::put_encoding(y_marginal, "x", count)?;
    let y_marginal = sized(y_marginal, Some(marginal), height);

    let bottom = spec::hconcat(Spec::new(), vec![joint, y_marginal])?;
    spec::vconcat(root, vec![x_marginal, bottom])
}

/// Grid of scatter plots of every pair of `fields`
pub fn pairplot(data: impl Into<Data>, fields: &[&str], opts: Value) -> Result<Spec> {
    if fields.is_empty() {
        return Err(PlotspecError::Options(
            "pairplot expects at least one field".to_string(),
        ));
    }
    let (prepared, root) = Prepared::with_data(PAIRPLOT_OPTIONS, &[], data, &opts)?;
    let width = root.property("width").cloned();
    let height = root.property("height").cloned();
    let root = root.without_property("width").without_property("height");

    let cell = spec::set_mark(root.detached(), "point", prepared.mark_options())?;
    let cell = spec::put_encoding(
        cell,
        "x",
        json!({ "field": { "repeat": "column" }, "type": "quantitative" }),
    )?;
    let cell = spec::put_encoding(
        cell,
        "y",
        json!({ "field": { "repeat": "row" }, "type": "quantitative" }),
    )?;
    let cell = match prepared.str("color_by") {
        Some(group) => spec::color_by(cell, group, Value::Null)?,
        None => cell,
    };
    let cell = sized(prepared.finish(cell)?, width, height);

    let reversed: Vec<&str> = fields.iter().rev().copied().collect();
    spec::repeat(root, json!({ "row": fields, "column": reversed }), cell)
}

fn sized(spec: Spec, width: Option<Value>, height: Option<Value>) -> Spec {
    let mut spec = spec;
    if let Some(width) = width {
        spec = spec.with_property("width", width);
    }
    if let Some(height) = height {
        spec = spec.with_property("height", height);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Composition;

    fn points() -> Value {
        json!([
            {"a": 1.0, "b": 2.0, "c": 0.5, "g": "u"},
            {"a": 2.0, "b": 1.0, "c": 0.25, "g": "v"}
        ])
    }

    #[test]
    fn test_jointplot_layout() {
        let spec = jointplot(points(), "a", "b", json!({"width": 300, "color_by": "g"})).unwrap();
        assert!(spec.property("data").is_some());
        assert!(spec.property("width").is_none());

        let Some(Composition::VConcat(rows)) = spec.composition() else {
            panic!("expected vconcat");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mark_type(), Some("bar"));
        assert_eq!(rows[0].property("width"), Some(&json!(300)));
        assert_eq!(rows[0].property("height"), Some(&json!(60)));

        let Some(Composition::HConcat(bottom)) = rows[1].composition() else {
            panic!("expected hconcat");
        };
        assert_eq!(bottom[0].mark_type(), Some("point"));
        assert_eq!(bottom[0].channel("color").unwrap()["field"], json!("g"));
        assert_eq!(bottom[1].channel("y").unwrap()["field"], json!("b"));
        assert!(bottom[0].metadata().is_none());
    }

    #[test]
    fn test_jointplot_density() {
        let spec = jointplot(points(), "a", "b", json!({"kind": "density", "maxbins": 10})).unwrap();
        let Some(Composition::VConcat(rows)) = spec.composition() else {
            panic!("expected vconcat");
        };
        let joint = rows[1].composition().unwrap().children()[0];
        assert_eq!(joint.mark_type(), Some("rect"));
        assert_eq!(joint.channel("x").unwrap()["bin"], json!({"maxbins": 10}));
        assert_eq!(joint.channel("x").unwrap()["title"], json!("a"));
    }

    #[test]
    fn test_pairplot_repeat() {
        let spec = pairplot(points(), &["a", "b", "c"], json!({"width": 120})).unwrap();
        let Some(Composition::Repeat { repeat, spec: cell }) = spec.composition() else {
            panic!("expected repeat");
        };
        assert_eq!(repeat, &json!({"row": ["a", "b", "c"], "column": ["c", "b", "a"]}));
        assert_eq!(cell.channel("x").unwrap()["field"], json!({"repeat": "column"}));
        assert_eq!(cell.property("width"), Some(&json!(120)));
        assert!(pairplot(points(), &[], Value::Null).is_err());
    }
}
