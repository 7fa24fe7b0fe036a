//! Built-in Vega-Lite themes
//!
//! A theme is a Vega-Lite `config` object merged at the root of a finished
//! specification. Built-in themes follow the look of the
//! [vega-themes](https://github.com/vega/vega-themes) collection.

use std::sync::LazyLock;

use serde_json::{json, Value};

use crate::data::json_kind;
use crate::spec::{merge, Spec};
use crate::{naming, PlotspecError, Result};

/// A named Vega-Lite `config`
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub config: Value,
}

static BUILTIN: LazyLock<Vec<Theme>> = LazyLock::new(|| {
    vec![
        Theme {
            name: "dark".to_string(),
            config: json!({
                "background": "#333",
                "view": { "stroke": "#888" },
                "title": { "color": "#fff", "subtitleColor": "#fff" },
                "style": { "guide-label": { "fill": "#fff" }, "guide-title": { "fill": "#fff" } },
                "axis": { "domainColor": "#fff", "gridColor": "#888", "tickColor": "#fff" }
            }),
        },
        Theme {
            name: "ggplot2".to_string(),
            config: json!({
                "view": { "fill": "#e5e5e5", "stroke": null },
                "arc": { "fill": "#000" },
                "area": { "fill": "#000" },
                "line": { "stroke": "#000" },
                "path": { "stroke": "#000" },
                "point": { "fill": "#000", "size": 40, "filled": true },
                "rect": { "fill": "#000" },
                "shape": { "stroke": "#000" },
                "symbol": { "fill": "#000", "size": 40 },
                "axis": {
                    "domain": false,
                    "grid": true,
                    "gridColor": "#FFFFFF",
                    "gridOpacity": 1,
                    "labelColor": "#7F7F7F",
                    "labelPadding": 4,
                    "tickColor": "#7F7F7F",
                    "tickSize": 5.67,
                    "titleFontSize": 16,
                    "titleFontWeight": "normal"
                },
                "legend": { "labelBaseline": "middle", "labelFontSize": 11, "symbolSize": 40 },
                "range": {
                    "category": [
                        "#000000", "#7F7F7F", "#1A1A1A", "#999999", "#333333",
                        "#B0B0B0", "#4D4D4D", "#C9C9C9", "#666666", "#DCDCDC"
                    ]
                }
            }),
        },
        Theme {
            name: "fivethirtyeight".to_string(),
            config: json!({
                "background": "#f0f0f0",
                "arc": { "fill": "#30a2da" },
                "area": { "fill": "#30a2da" },
                "bar": { "fill": "#30a2da" },
                "line": { "stroke": "#30a2da", "strokeWidth": 2 },
                "point": { "filled": true, "shape": "circle" },
                "axis": {
                    "domainColor": "#cbcbcb",
                    "grid": true,
                    "gridColor": "#cbcbcb",
                    "gridWidth": 1,
                    "labelColor": "#999",
                    "labelFontSize": 10,
                    "titleColor": "#333",
                    "tickColor": "#cbcbcb",
                    "tickSize": 10,
                    "titleFontSize": 14,
                    "titlePadding": 10,
                    "labelPadding": 4
                },
                "axisBand": { "grid": false },
                "range": {
                    "category": [
                        "#30a2da", "#fc4f30", "#e5ae38", "#6d904f",
                        "#8b8b8b", "#b96db8", "#ff9e27", "#56cc60"
                    ]
                },
                "legend": {
                    "labelColor": "#333",
                    "labelFontSize": 11,
                    "padding": 1,
                    "symbolSize": 30,
                    "symbolType": "square",
                    "titleColor": "#333",
                    "titleFontSize": 14,
                    "titlePadding": 10
                },
                "title": { "anchor": "start", "fontSize": 22, "fontWeight": "bold", "offset": 20 }
            }),
        },
    ]
});

impl Theme {
    /// One of the built-in themes
    pub fn from_name(name: &str) -> Result<Theme> {
        BUILTIN
            .iter()
            .find(|theme| theme.name == name)
            .cloned()
            .ok_or_else(|| {
                PlotspecError::UnknownTheme(format!(
                    "'{}', available themes: {}",
                    name,
                    Theme::names().join(", ")
                ))
            })
    }

    /// Names of the built-in themes
    pub fn names() -> Vec<&'static str> {
        BUILTIN.iter().map(|theme| theme.name.as_str()).collect()
    }

    /// A custom theme from a Vega-Lite `config` object. snake_case keys are
    /// accepted and converted.
    pub fn from_config(name: impl Into<String>, config: Value) -> Result<Theme> {
        match config {
            Value::Object(map) => Ok(Theme {
                name: name.into(),
                config: Value::Object(naming::to_wire_map(map)),
            }),
            other => Err(PlotspecError::Options(format!(
                "theme config must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Merge `theme` into the `config` of the root of `spec`. Settings already
/// present in the spec's `config` win over the theme.
pub fn set_theme(spec: Spec, theme: &Theme) -> Spec {
    let existing = spec.property("config").cloned().unwrap_or(Value::Null);
    let config = match existing {
        Value::Null => theme.config.clone(),
        existing => merge::deep_merge(theme.config.clone(), existing),
    };
    tracing::debug!(theme = %theme.name, "applying theme");
    spec.with_property("config", config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        assert_eq!(Theme::names(), vec!["dark", "ggplot2", "fivethirtyeight"]);
        let theme = Theme::from_name("dark").unwrap();
        assert_eq!(theme.config["background"], json!("#333"));

        let err = Theme::from_name("solarized").unwrap_err();
        assert!(matches!(err, PlotspecError::UnknownTheme(_)));
        assert!(err.to_string().contains("ggplot2"));
    }

    #[test]
    fn test_set_theme_keeps_explicit_config() {
        let spec = Spec::new().with_property("config", json!({"axis": {"gridColor": "red"}}));
        let spec = set_theme(spec, &Theme::from_name("fivethirtyeight").unwrap());

        let config = spec.property("config").unwrap();
        assert_eq!(config["axis"]["gridColor"], json!("red"));
        assert_eq!(config["axis"]["tickSize"], json!(10));
        assert_eq!(config["background"], json!("#f0f0f0"));
    }

    #[test]
    fn test_custom_theme() {
        let theme = Theme::from_config("mine", json!({"axis": {"label_font_size": 12}})).unwrap();
        assert_eq!(theme.config, json!({"axis": {"labelFontSize": 12}}));
        assert!(Theme::from_config("bad", json!("dark")).is_err());

        let spec = set_theme(Spec::new(), &theme);
        assert_eq!(spec.property("config"), Some(&theme.config));
    }
}
