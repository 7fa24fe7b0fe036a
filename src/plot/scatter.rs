//! Scatter and bubble plots

use serde_json::Value;

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const SCATTER_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "color_by",
    "shape_by",
    "size_by",
    "fill_opacity",
    "opacity",
    "filled",
    "point_size",
    "point_shape",
    "point_color",
    "x",
    "y",
    "color",
    "size",
    "shape",
];

pub(crate) const BUBBLE_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "x_title",
    "y_title",
    "tooltip",
    "zoomable",
    "color_by",
    "shape_by",
    "fill_opacity",
    "opacity",
    "filled",
    "point_shape",
    "point_color",
    "x",
    "y",
    "color",
    "size",
    "shape",
];

/// Scatter plot of `y` against `x`.
///
/// # Arguments
///
/// * `data` - Data source
/// * `x` - Field on the horizontal axis
/// * `y` - Field on the vertical axis
/// * `opts` - Options, see [`super::option_set`]
pub fn scatter(data: impl Into<Data>, x: &str, y: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(SCATTER_OPTIONS, &[], data, &opts)?;
    points(&prepared, spec, x, y, prepared.str("size_by"))
}

/// Scatter plot with point areas proportional to `size`
pub fn bubble(data: impl Into<Data>, x: &str, y: &str, size: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(BUBBLE_OPTIONS, &[], data, &opts)?;
    points(&prepared, spec, x, y, Some(size))
}

fn points(prepared: &Prepared, spec: Spec, x: &str, y: &str, size: Option<&str>) -> Result<Spec> {
    let mut spec = spec::set_mark(spec, "point", prepared.mark_options())?;
    spec = spec::encode_field(spec, "x", x, ColumnType::Quantitative, Value::Null)?;
    spec = spec::encode_field(spec, "y", y, ColumnType::Quantitative, Value::Null)?;

    if let Some(field) = prepared.str("color_by") {
        spec = spec::color_by(spec, field, Value::Null)?;
    }
    if let Some(field) = prepared.str("shape_by") {
        spec = spec::shape_by(spec, field, Value::Null)?;
    }
    if let Some(field) = size {
        spec = spec::size_by(spec, field, Value::Null)?;
    }

    prepared.finish(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlotspecError;
    use serde_json::json;

    fn cars() -> Value {
        json!([
            {"x": 130, "y": 18, "origin": "USA"},
            {"x": 165, "y": 15, "origin": "Japan"}
        ])
    }

    #[test]
    fn test_scatter_encodes_quantitative_fields() {
        let spec = scatter(cars(), "x", "y", Value::Null).unwrap();
        assert_eq!(
            spec.channel("x"),
            Some(&json!({"field": "x", "type": "quantitative"}))
        );
        assert_eq!(
            spec.channel("y"),
            Some(&json!({"field": "y", "type": "quantitative"}))
        );
        assert_eq!(spec.mark_type(), Some("point"));
        assert_eq!(spec.property("data").unwrap()["values"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_scatter_options() {
        let spec = scatter(
            cars(),
            "x",
            "y",
            json!({
                "color_by": "origin",
                "point_size": 40,
                "filled": true,
                "width": 300,
                "title": "Cars"
            }),
        )
        .unwrap();

        assert_eq!(
            spec.channel("color"),
            Some(&json!({"field": "origin", "type": "nominal"}))
        );
        let mark = spec.mark().unwrap();
        assert_eq!(mark["size"], json!(40));
        assert_eq!(mark["filled"], json!(true));
        assert_eq!(mark["tooltip"], json!(true));
        assert_eq!(spec.property("width"), Some(&json!(300)));
        assert_eq!(spec.property("title"), Some(&json!("Cars")));
    }

    #[test]
    fn test_temporal_x_is_detected() {
        let data = json!([{"date": "2024-03-01", "v": 2}]);
        let spec = scatter(data, "date", "v", Value::Null).unwrap();
        assert_eq!(spec.channel("x").unwrap()["type"], json!("temporal"));
    }

    #[test]
    fn test_invalid_option_fails_before_building() {
        let err = scatter(cars(), "x", "y", json!({"point_size": "big"})).unwrap_err();
        assert!(matches!(err, PlotspecError::Options(_)));

        let err = scatter(cars(), "x", "y", json!({"colour_by": "origin"})).unwrap_err();
        assert!(err.to_string().contains("unknown option 'colour_by'"));
    }

    #[test]
    fn test_bubble_sizes_points() {
        let spec = bubble(cars(), "x", "y", "y", json!({"opacity": 0.5})).unwrap();
        assert_eq!(
            spec.channel("size"),
            Some(&json!({"field": "y", "type": "quantitative"}))
        );
        assert_eq!(spec.mark().unwrap()["opacity"], json!(0.5));
    }
}
