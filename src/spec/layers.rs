//! Layer composition
//!
//! [`to_layered`] turns a single view into a layered one. [`append_layers`]
//! and [`prepend_layers`] add layers to a single or layered view, promoting a
//! single view through [`promote_to_layered`] first.

use super::{shape, Spec, View, ViewContent};
use crate::Result;

/// One or more specifications to be added as layers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layers(pub Vec<Spec>);

impl Layers {
    pub fn into_inner(self) -> Vec<Spec> {
        self.0
    }
}

impl From<Spec> for Layers {
    fn from(spec: Spec) -> Self {
        Layers(vec![spec])
    }
}

impl From<Vec<Spec>> for Layers {
    fn from(specs: Vec<Spec>) -> Self {
        Layers(specs)
    }
}

impl<const N: usize> From<[Spec; N]> for Layers {
    fn from(specs: [Spec; N]) -> Self {
        Layers(specs.into())
    }
}

/// Convert a single view into a layered view.
///
/// A non-empty top-level mark/encoding becomes the first layer. Every other
/// property stays at the top level.
pub fn to_layered(spec: Spec) -> Result<Spec> {
    shape::validate_single_view(&spec, "to_layered")?;
    Ok(promote_to_layered(spec))
}

/// Implicit promotion of a single view into a layered view.
///
/// Layered and multi views are returned unchanged.
pub fn promote_to_layered(spec: Spec) -> Spec {
    let Spec {
        view,
        props,
        metadata,
    } = spec;

    let view = match view {
        View::Single(content) => {
            let layers = if content.is_empty() {
                Vec::new()
            } else {
                tracing::debug!("Promoting single view to first layer");
                vec![Spec {
                    view: View::Single(content),
                    ..Spec::default()
                }]
            };
            View::Layered {
                shared: ViewContent::default(),
                layers,
            }
        }
        other => other,
    };

    Spec {
        view,
        props,
        metadata,
    }
}

/// Add layers after the existing ones
pub fn append_layers(spec: Spec, layers: impl Into<Layers>) -> Result<Spec> {
    insert_layers(spec, layers.into(), "append_layers", Placement::Back)
}

/// Add layers before the existing ones, keeping their given order
pub fn prepend_layers(spec: Spec, layers: impl Into<Layers>) -> Result<Spec> {
    insert_layers(spec, layers.into(), "prepend_layers", Placement::Front)
}

/// Layered view made of `specs`, in order
pub fn layers(specs: impl Into<Layers>) -> Result<Spec> {
    append_layers(
        Spec {
            view: View::Layered {
                shared: ViewContent::default(),
                layers: Vec::new(),
            },
            ..Spec::default()
        },
        specs,
    )
}

enum Placement {
    Front,
    Back,
}

fn insert_layers(spec: Spec, new: Layers, caller: &str, placement: Placement) -> Result<Spec> {
    shape::validate_single_or_layered_view(&spec, caller)?;
    for layer in &new.0 {
        shape::validate_single_or_layered_view(layer, caller)?;
    }

    let new: Vec<Spec> = new.0.into_iter().map(Spec::into_bare).collect();
    let mut spec = promote_to_layered(spec);
    if let View::Layered { layers, .. } = &mut spec.view {
        match placement {
            Placement::Back => layers.extend(new),
            Placement::Front => {
                layers.splice(0..0, new);
            }
        }
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlotspecError;
    use serde_json::json;

    fn named(mark: &str) -> Spec {
        Spec::from_value(json!({"mark": mark})).unwrap()
    }

    fn mark_types(spec: &Spec) -> Vec<&str> {
        spec.layers()
            .unwrap()
            .iter()
            .filter_map(|l| l.mark_type())
            .collect()
    }

    #[test]
    fn test_to_layered_moves_content_into_first_layer() {
        let spec = Spec::from_value(json!({
            "data": {"url": "a.csv"},
            "mark": "point",
            "encoding": {"x": {"field": "a"}},
            "width": 200
        }))
        .unwrap();

        let layered = to_layered(spec).unwrap();
        assert_eq!(
            layered.to_value(),
            json!({
                "data": {"url": "a.csv"},
                "width": 200,
                "layer": [{"mark": {"type": "point"}, "encoding": {"x": {"field": "a"}}}]
            })
        );
    }

    #[test]
    fn test_to_layered_of_empty_view_has_no_layers() {
        let layered = to_layered(Spec::new().with_property("title", "t")).unwrap();
        assert_eq!(layered.layers().unwrap().len(), 0);
        assert_eq!(layered.property("title"), Some(&json!("t")));
    }

    #[test]
    fn test_to_layered_rejects_layered_view() {
        let layered = to_layered(named("point")).unwrap();
        let err = to_layered(layered).unwrap_err();
        assert!(matches!(err, PlotspecError::Shape { key: "layer", .. }));
    }

    #[test]
    fn test_append_preserves_order() {
        let base = layers(vec![named("line"), named("area")]).unwrap();
        let spec = append_layers(base, [named("rule"), named("text")]).unwrap();
        assert_eq!(mark_types(&spec), vec!["line", "area", "rule", "text"]);
    }

    #[test]
    fn test_prepend_preserves_order() {
        let base = layers(vec![named("line"), named("area")]).unwrap();
        let spec = prepend_layers(base, vec![named("rule"), named("text")]).unwrap();
        assert_eq!(mark_types(&spec), vec!["rule", "text", "line", "area"]);
    }

    #[test]
    fn test_append_promotes_single_view() {
        let spec = append_layers(named("bar"), named("rule")).unwrap();
        assert_eq!(mark_types(&spec), vec!["bar", "rule"]);
    }

    #[test]
    fn test_new_layers_are_stripped_of_root_only_keys() {
        let layer = Spec::from_data(json!([{"a": 1}]))
            .unwrap()
            .with_property("config", json!({"view": {}}))
            .with_property("$schema", "https://example.com");
        let spec = append_layers(Spec::new(), layer).unwrap();
        let inner = &spec.layers().unwrap()[0];
        assert!(inner.metadata().is_none());
        assert!(inner.property("config").is_none());
        assert!(inner.property("$schema").is_none());
        assert!(inner.property("data").is_some());
    }

    #[test]
    fn test_multi_view_layers_are_rejected() {
        let multi = Spec::from_value(json!({"hconcat": []})).unwrap();
        assert!(append_layers(Spec::new(), multi.clone()).is_err());
        assert!(prepend_layers(multi, named("point")).is_err());
    }

    #[test]
    fn test_promote_keeps_layered_view() {
        let layered = layers([named("line")]).unwrap();
        assert_eq!(promote_to_layered(layered.clone()), layered);
    }
}
