//! Scale domains, types and color schemes

use serde_json::{json, Value};

use super::{color_to_hex, one_of};
use crate::spec::{put_encoding_options_strict, Spec};
use crate::{PlotspecError, Result};

const SCALE_TYPES: &[&str] = &[
    "linear", "log", "pow", "sqrt", "symlog", "time", "utc", "ordinal", "band", "point",
    "quantile", "quantize", "threshold",
];

/// Colors of a color scale: a named Vega scheme or an explicit range
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScheme {
    Named(String),
    Colors(Vec<String>),
}

impl From<&str> for ColorScheme {
    fn from(name: &str) -> Self {
        ColorScheme::Named(name.to_string())
    }
}

impl From<Vec<&str>> for ColorScheme {
    fn from(colors: Vec<&str>) -> Self {
        ColorScheme::Colors(colors.into_iter().map(str::to_string).collect())
    }
}

/// Merge raw Vega-Lite scale properties (snake_case keys accepted)
pub fn put_options(spec: Spec, channel: &str, opts: Value) -> Result<Spec> {
    put_encoding_options_strict(spec, channel, json!({ "scale": opts }))
}

/// Set the domain of the scale of `channel`.
///
/// `domain` is either an array (`[min, max]` or a list of categories) or
/// `"unaggregated"`.
pub fn set_domain(spec: Spec, channel: &str, domain: Value) -> Result<Spec> {
    match &domain {
        Value::Array(_) => {}
        Value::String(s) if s == "unaggregated" => {}
        other => {
            return Err(PlotspecError::Options(format!(
                "scale domain of {} must be an array, got {}",
                channel, other
            )))
        }
    }
    put_options(spec, channel, json!({ "domain": domain }))
}

pub fn set_x_domain(spec: Spec, min: impl Into<Value>, max: impl Into<Value>) -> Result<Spec> {
    set_domain(spec, "x", json!([min.into(), max.into()]))
}

pub fn set_y_domain(spec: Spec, min: impl Into<Value>, max: impl Into<Value>) -> Result<Spec> {
    set_domain(spec, "y", json!([min.into(), max.into()]))
}

/// Set the scale type of `channel` (`linear`, `log`, `sqrt`, ...)
pub fn set_scale_type(spec: Spec, channel: &str, scale_type: &str) -> Result<Spec> {
    let scale_type = one_of(scale_type, SCALE_TYPES, "scale type")?;
    put_options(spec, channel, json!({ "type": scale_type }))
}

/// Set the colors of the scale of `channel`.
///
/// Explicit colors may use any CSS notation and are written as hex.
pub fn set_color_scheme(
    spec: Spec,
    channel: &str,
    scheme: impl Into<ColorScheme>,
) -> Result<Spec> {
    let scale = match scheme.into() {
        ColorScheme::Named(name) => json!({ "scheme": name }),
        ColorScheme::Colors(colors) => {
            let range = colors
                .iter()
                .map(|c| color_to_hex(c))
                .collect::<Result<Vec<_>>>()?;
            json!({ "range": range })
        }
    };
    put_options(spec, channel, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Spec {
        Spec::from_value(json!({
            "mark": "point",
            "encoding": {
                "x": {"field": "a"},
                "y": {"field": "b"},
                "color": {"field": "c", "type": "nominal"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_domains() {
        let spec = set_x_domain(base(), 0, 10).unwrap();
        let spec = set_y_domain(spec, -1.5, 1.5).unwrap();
        assert_eq!(spec.channel("x").unwrap()["scale"]["domain"], json!([0, 10]));
        assert_eq!(spec.channel("y").unwrap()["scale"]["domain"], json!([-1.5, 1.5]));
        assert!(set_domain(base(), "x", json!(5)).is_err());
    }

    #[test]
    fn test_scale_type_keeps_domain() {
        let spec = set_x_domain(base(), 1, 1000).unwrap();
        let spec = set_scale_type(spec, "x", "log").unwrap();
        assert_eq!(
            spec.channel("x").unwrap()["scale"],
            json!({"domain": [1, 1000], "type": "log"})
        );
        assert!(set_scale_type(base(), "x", "logarithmic").is_err());
    }

    #[test]
    fn test_color_schemes() {
        let spec = set_color_scheme(base(), "color", "category10").unwrap();
        assert_eq!(spec.channel("color").unwrap()["scale"], json!({"scheme": "category10"}));

        let spec = set_color_scheme(base(), "color", vec!["red", "rgb(0, 128, 0)"]).unwrap();
        assert_eq!(
            spec.channel("color").unwrap()["scale"]["range"],
            json!(["#ff0000", "#008000"])
        );

        assert!(set_color_scheme(base(), "color", vec!["red", "nope"]).is_err());
        assert!(set_color_scheme(base(), "size", "viridis").is_err());
    }
}
