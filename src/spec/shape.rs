//! Shape predicates and validators
//!
//! Operations that mutate marks or encodings only make sense on single views
//! (and usually on layered views as well). The validators reject other shapes
//! with an error naming the composition key that was found.

use super::{Spec, View};
use crate::{PlotspecError, Result};

/// Keys that turn a node into a layered or multi view, in scan order
pub const COMPOSITION_KEYS: [&str; 7] = [
    "layer", "hconcat", "vconcat", "concat", "repeat", "facet", "spec",
];

/// Coarse shape of a specification node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Single,
    Layered,
    Multi,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShapeKind::Single => "single view",
            ShapeKind::Layered => "layered view",
            ShapeKind::Multi => "multi view",
        };
        write!(f, "{}", s)
    }
}

pub fn is_single_view(spec: &Spec) -> bool {
    matches!(spec.view, View::Single(_))
}

pub fn is_layered(spec: &Spec) -> bool {
    matches!(spec.view, View::Layered { .. })
}

pub fn is_multi_view(spec: &Spec) -> bool {
    matches!(spec.view, View::Multi(_))
}

/// First composition key defined by the node, if any
pub fn composition_key(spec: &Spec) -> Option<&'static str> {
    match &spec.view {
        View::Single(_) => None,
        View::Layered { .. } => Some("layer"),
        View::Multi(composition) => Some(composition.key()),
    }
}

/// Fail unless `spec` is a single view (no layers, no composition)
pub fn validate_single_view(spec: &Spec, caller: &str) -> Result<()> {
    match composition_key(spec) {
        Some(key) => Err(PlotspecError::Shape {
            caller: caller.to_string(),
            expected: "single view",
            key,
        }),
        None => Ok(()),
    }
}

/// Fail unless `spec` is a single or a layered view
pub fn validate_single_or_layered_view(spec: &Spec, caller: &str) -> Result<()> {
    match &spec.view {
        View::Multi(composition) => Err(PlotspecError::Shape {
            caller: caller.to_string(),
            expected: "single or layered view",
            key: composition.key(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> Spec {
        Spec::from_value(value).unwrap()
    }

    #[test]
    fn test_predicates() {
        let single = spec(json!({"mark": "point"}));
        let layered = spec(json!({"layer": [{"mark": "point"}]}));
        let multi = spec(json!({"vconcat": [{"mark": "point"}]}));

        assert!(is_single_view(&single));
        assert!(!is_layered(&single));
        assert!(is_layered(&layered));
        assert!(!is_multi_view(&layered));
        assert!(is_multi_view(&multi));
        assert!(!is_single_view(&multi));
    }

    #[test]
    fn test_strict_single_view_rejects_layers() {
        let layered = spec(json!({"layer": []}));
        let err = validate_single_view(&layered, "to_layered").unwrap_err();
        assert_eq!(
            err,
            PlotspecError::Shape {
                caller: "to_layered".to_string(),
                expected: "single view",
                key: "layer",
            }
        );
    }

    #[test]
    fn test_single_or_layered_accepts_layers() {
        let layered = spec(json!({"layer": []}));
        assert!(validate_single_or_layered_view(&layered, "caller").is_ok());
        assert!(validate_single_or_layered_view(&Spec::new(), "caller").is_ok());
    }

    #[test]
    fn test_rejection_names_hconcat_regardless_of_other_keys() {
        let variants = [
            json!({"hconcat": []}),
            json!({"hconcat": [], "data": {"values": []}}),
            json!({"hconcat": [], "width": 100, "title": "t", "transform": []}),
        ];
        for value in variants {
            let node = spec(value);
            for result in [
                validate_single_view(&node, "op"),
                validate_single_or_layered_view(&node, "op"),
            ] {
                let err = result.unwrap_err();
                assert!(matches!(err, PlotspecError::Shape { key: "hconcat", .. }));
                assert!(err.to_string().contains("hconcat key is defined"));
            }
        }
    }

    #[test]
    fn test_facet_and_repeat_keys_are_named() {
        let faceted = spec(json!({"facet": {"row": {"field": "a"}}, "spec": {"mark": "bar"}}));
        let repeated = spec(json!({"repeat": ["a", "b"], "spec": {"mark": "bar"}}));
        assert_eq!(composition_key(&faceted), Some("facet"));
        assert_eq!(composition_key(&repeated), Some("repeat"));
        assert!(validate_single_view(&repeated, "op")
            .unwrap_err()
            .to_string()
            .contains("repeat key is defined"));
    }
}
