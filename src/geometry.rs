//! Geometric shapes as plot layers
//!
//! Shapes are drawn as `line` marks over their own inline data, so they can be
//! appended as layers on top of any plot sharing the same x/y scales:
//!
//! ```rust,ignore
//! let spec = plot::scatter(data, "x", "y", Value::Null)?;
//! let spec = spec::append_layers(spec, geometry::circle((0.0, 0.0), 1.0, Value::Null)?)?;
//! ```
//!
//! Each vertex is a row with `x`, `y` and a drawing `order`. Closed shapes
//! repeat their first vertex at the end.

use std::f64::consts::TAU;

use serde_json::{json, Value};

use crate::data::ColumnType;
use crate::plot::Prepared;
use crate::spec::{self, Spec};
use crate::{PlotspecError, Result};

const GEOMETRY_OPTIONS: &[&str] = &["line_color", "stroke_width", "stroke_dash", "opacity"];

/// Number of segments used to approximate circles and ellipses
const ELLIPSE_SEGMENTS: usize = 72;

pub type Point = (f64, f64);

/// Open path through `points`, drawn in the given order
pub fn polyline(points: &[Point], opts: Value) -> Result<Spec> {
    if points.len() < 2 {
        return Err(PlotspecError::Geometry(format!(
            "a polyline needs at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some((x, y)) = points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(PlotspecError::Geometry(format!(
            "polyline points must be finite, got ({}, {})",
            x, y
        )));
    }
    path_layer(points, opts)
}

/// Axis aligned rectangle with opposite corners `from` and `to`
pub fn rectangle(from: Point, to: Point, opts: Value) -> Result<Spec> {
    let ((x1, y1), (x2, y2)) = (from, to);
    if x1 == x2 {
        return Err(PlotspecError::Geometry(format!(
            "rectangle corners have equal x coordinates ({})",
            x1
        )));
    }
    if y1 == y2 {
        return Err(PlotspecError::Geometry(format!(
            "rectangle corners have equal y coordinates ({})",
            y1
        )));
    }
    polyline(&[(x1, y1), (x1, y2), (x2, y2), (x2, y1), (x1, y1)], opts)
}

pub fn circle(center: Point, radius: f64, opts: Value) -> Result<Spec> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(PlotspecError::Geometry(format!(
            "circle radius must be a positive number, got {}",
            radius
        )));
    }
    polyline(&ellipse_points(center, radius, radius), opts)
}

/// Axis aligned ellipse with radii `rx` and `ry`
pub fn ellipse(center: Point, (rx, ry): (f64, f64), opts: Value) -> Result<Spec> {
    if !(rx.is_finite() && rx > 0.0 && ry.is_finite() && ry > 0.0) {
        return Err(PlotspecError::Geometry(format!(
            "ellipse radii must be positive numbers, got ({}, {})",
            rx, ry
        )));
    }
    polyline(&ellipse_points(center, rx, ry), opts)
}

fn ellipse_points((cx, cy): Point, rx: f64, ry: f64) -> Vec<Point> {
    let mut points: Vec<Point> = (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
            (cx + rx * angle.cos(), cy + ry * angle.sin())
        })
        .collect();
    points.push(points[0]);
    points
}

fn path_layer(points: &[Point], opts: Value) -> Result<Spec> {
    let prepared = Prepared::validate(GEOMETRY_OPTIONS, &[], &opts)?;
    let values: Vec<Value> = points
        .iter()
        .enumerate()
        .map(|(order, (x, y))| json!({ "x": x, "y": y, "order": order }))
        .collect();

    let layer = Spec::new().with_property("data", json!({ "values": values }));
    let layer = spec::set_mark(layer, "line", prepared.mark_options())?;
    let layer = spec::encode_field(layer, "x", "x", ColumnType::Quantitative, Value::Null)?;
    let layer = spec::encode_field(layer, "y", "y", ColumnType::Quantitative, Value::Null)?;
    spec::put_encoding(layer, "order", json!({ "field": "order" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(spec: &Spec) -> Vec<(f64, f64)> {
        spec.property("data").unwrap()["values"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| (row["x"].as_f64().unwrap(), row["y"].as_f64().unwrap()))
            .collect()
    }

    #[test]
    fn test_rectangle_winding() {
        let spec = rectangle((1.0, 2.0), (5.0, 6.0), Value::Null).unwrap();
        assert_eq!(spec.mark_type(), Some("line"));
        assert_eq!(
            vertices(&spec),
            vec![(1.0, 2.0), (1.0, 6.0), (5.0, 6.0), (5.0, 2.0), (1.0, 2.0)]
        );
        assert_eq!(spec.channel("order"), Some(&json!({"field": "order"})));
    }

    #[test]
    fn test_degenerate_rectangle() {
        let err = rectangle((1.0, 1.0), (1.0, 3.0), Value::Null).unwrap_err();
        assert!(matches!(err, PlotspecError::Geometry(_)));
        assert!(err.to_string().contains("equal x coordinates"));

        let err = rectangle((1.0, 3.0), (2.0, 3.0), Value::Null).unwrap_err();
        assert!(err.to_string().contains("equal y coordinates"));
    }

    #[test]
    fn test_circle_is_closed() {
        let spec = circle((1.0, -1.0), 2.0, json!({"line_color": "black"})).unwrap();
        let points = vertices(&spec);
        assert_eq!(points.len(), ELLIPSE_SEGMENTS + 1);
        assert_eq!(points[0], (3.0, -1.0));
        assert_eq!(points.first(), points.last());
        for (x, y) in points {
            let distance = ((x - 1.0).powi(2) + (y + 1.0).powi(2)).sqrt();
            assert!((distance - 2.0).abs() < 1e-9);
        }
        assert_eq!(spec.mark().unwrap()["color"], json!("black"));
    }

    #[test]
    fn test_ellipse_radii() {
        let spec = ellipse((0.0, 0.0), (4.0, 1.0), Value::Null).unwrap();
        let points = vertices(&spec);
        let max_x = points.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        let max_y = points.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        assert!((max_x - 4.0).abs() < 1e-9);
        assert!((max_y - 1.0).abs() < 1e-9);

        assert!(ellipse((0.0, 0.0), (0.0, 1.0), Value::Null).is_err());
        assert!(circle((0.0, 0.0), -1.0, Value::Null).is_err());
    }

    #[test]
    fn test_polyline_validation() {
        assert!(polyline(&[(0.0, 0.0)], Value::Null).is_err());
        assert!(polyline(&[(0.0, 0.0), (f64::NAN, 1.0)], Value::Null).is_err());
        assert!(polyline(&[(0.0, 0.0), (1.0, 1.0)], json!({"fill_color": "red"})).is_err());
    }

    #[test]
    fn test_shapes_append_as_layers() {
        let base = Spec::from_value(json!({
            "data": {"values": [{"a": 1, "b": 2}]},
            "mark": "point",
            "encoding": {"x": {"field": "a"}, "y": {"field": "b"}}
        }))
        .unwrap();
        let spec = spec::append_layers(
            base,
            vec![
                rectangle((0.0, 0.0), (2.0, 3.0), Value::Null).unwrap(),
                circle((1.0, 1.0), 0.5, Value::Null).unwrap(),
            ],
        )
        .unwrap();
        let layers = spec.layers().unwrap();
        assert_eq!(layers.len(), 3);
        assert!(layers[1].property("data").is_some());
    }
}
