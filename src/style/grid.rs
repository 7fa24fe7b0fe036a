//! Grid lines drawn from the axis of a positional channel

use serde_json::{json, Value};

use super::{axes, color_to_hex};
use crate::spec::Spec;
use crate::{PlotspecError, Result};

pub fn set_enabled(spec: Spec, channel: &str, enabled: bool) -> Result<Spec> {
    axes::put_options(spec, channel, json!({ "grid": enabled }))
}

pub fn set_color(spec: Spec, channel: &str, color: &str) -> Result<Spec> {
    let color = color_to_hex(color)?;
    axes::put_options(spec, channel, json!({ "grid_color": color }))
}

pub fn set_width(spec: Spec, channel: &str, width: f64) -> Result<Spec> {
    if width.is_nan() || width < 0.0 {
        return Err(PlotspecError::Options(format!(
            "grid width must be a non-negative number, got {}",
            width
        )));
    }
    axes::put_options(spec, channel, json!({ "grid_width": width }))
}

/// Dash pattern of the grid lines as alternating stroke and space lengths.
/// An empty pattern draws solid lines.
pub fn set_dash_style(spec: Spec, channel: &str, dash: &[f64]) -> Result<Spec> {
    axes::put_options(spec, channel, json!({ "grid_dash": dash }))
}

pub fn set_opacity(spec: Spec, channel: &str, opacity: f64) -> Result<Spec> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(PlotspecError::Options(format!(
            "grid opacity must be between 0 and 1, got {}",
            opacity
        )));
    }
    axes::put_options(spec, channel, json!({ "grid_opacity": Value::from(opacity) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Spec {
        Spec::from_value(json!({
            "mark": "line",
            "encoding": {"x": {"field": "t"}, "y": {"field": "v"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_grid_styling_accumulates() {
        let spec = set_enabled(base(), "y", true).unwrap();
        let spec = set_color(spec, "y", "lightgray").unwrap();
        let spec = set_width(spec, "y", 0.5).unwrap();
        let spec = set_dash_style(spec, "y", &[2.0, 2.0]).unwrap();
        let spec = set_opacity(spec, "y", 0.8).unwrap();

        assert_eq!(
            spec.channel("y").unwrap()["axis"],
            json!({
                "grid": true,
                "gridColor": "#d3d3d3",
                "gridWidth": 0.5,
                "gridDash": [2.0, 2.0],
                "gridOpacity": 0.8
            })
        );
        assert!(spec.channel("x").unwrap().get("axis").is_none());
    }

    #[test]
    fn test_invalid_grid_values() {
        assert!(set_color(base(), "x", "grey-ish").is_err());
        assert!(set_width(base(), "x", -1.0).is_err());
        assert!(set_opacity(base(), "x", 1.5).is_err());
        assert!(set_enabled(base(), "color", false).is_err());
    }
}
