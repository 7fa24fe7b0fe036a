//! Encoding option merging
//!
//! Writes partial option trees into the options of an encoding channel.
//! Incoming options are converted to wire names (see [`naming`]) and deep
//! merged into the existing channel options, so setting `axis.grid` keeps a
//! previously set `axis.title`.
//!
//! On a layered view the options are applied to every layer (and to the
//! shared encoding) that already encodes the channel. Layers without the
//! channel are left untouched.
//!
//! [`naming`]: crate::naming

use serde_json::{Map, Value};

use super::{merge, shape, Spec, View};
use crate::data::json_kind;
use crate::{naming, PlotspecError, Result};

/// Merge `opts` into the options of `channel`.
///
/// Views that do not encode `channel` are left unchanged; use
/// [`put_encoding_options_strict`] when a missing channel is an error.
///
/// ```rust,ignore
/// let spec = put_encoding_options(spec, "x", json!({"axis": {"label_angle": 45}}))?;
/// ```
pub fn put_encoding_options(spec: Spec, channel: &str, opts: Value) -> Result<Spec> {
    merge_channel_options(spec, channel, opts, "put_encoding_options").map(|(spec, _)| spec)
}

/// Like [`put_encoding_options`] but fails with
/// [`PlotspecError::MissingChannel`] if no view encodes `channel`.
pub fn put_encoding_options_strict(spec: Spec, channel: &str, opts: Value) -> Result<Spec> {
    let caller = "put_encoding_options_strict";
    let (spec, updated) = merge_channel_options(spec, channel, opts, caller)?;
    if updated == 0 {
        return Err(PlotspecError::MissingChannel {
            caller: caller.to_string(),
            channel: channel.to_string(),
        });
    }
    Ok(spec)
}

fn merge_channel_options(
    spec: Spec,
    channel: &str,
    opts: Value,
    caller: &str,
) -> Result<(Spec, usize)> {
    shape::validate_single_or_layered_view(&spec, caller)?;
    let opts = Value::Object(wire_options(opts, caller)?);

    let mut spec = spec;
    let updated = update_channel(&mut spec, channel, &mut |current| {
        let existing = current.take();
        *current = merge::deep_merge(existing, opts.clone());
    });
    Ok((spec, updated))
}

/// Apply `f` to every encoding of `channel` in the tree, returning how many
/// encodings were visited.
pub(crate) fn update_channel(
    spec: &mut Spec,
    channel: &str,
    f: &mut dyn FnMut(&mut Value),
) -> usize {
    match &mut spec.view {
        View::Single(content) => match content.encoding.get_mut(channel) {
            Some(current) => {
                f(current);
                1
            }
            None => 0,
        },
        View::Layered { shared, layers } => {
            let mut updated = 0;
            if let Some(current) = shared.encoding.get_mut(channel) {
                f(current);
                updated += 1;
            }
            for layer in layers.iter_mut() {
                updated += update_channel(layer, channel, f);
            }
            updated
        }
        View::Multi(_) => 0,
    }
}

/// Normalize caller options: null means no options, anything but an object is
/// rejected. Keys are converted to wire names.
pub(crate) fn wire_options(opts: Value, caller: &str) -> Result<Map<String, Value>> {
    match opts {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(naming::to_wire_map(map)),
        other => Err(PlotspecError::Options(format!(
            "{} expects options to be an object, got {}",
            caller,
            json_kind(&other)
        ))),
    }
}

/// True if any view of the tree encodes `channel`
pub fn has_encoding(spec: &Spec, channel: &str) -> bool {
    match &spec.view {
        View::Single(content) => content.encoding.contains_key(channel),
        View::Layered { shared, layers } => {
            shared.encoding.contains_key(channel)
                || layers.iter().any(|layer| has_encoding(layer, channel))
        }
        View::Multi(_) => false,
    }
}

/// Options of `channel`: the shared or single-view encoding first, then the
/// first layer that encodes it
pub fn encoding_options<'a>(spec: &'a Spec, channel: &str) -> Option<&'a Value> {
    match &spec.view {
        View::Single(content) => content.encoding.get(channel),
        View::Layered { shared, layers } => shared
            .encoding
            .get(channel)
            .or_else(|| layers.iter().find_map(|layer| encoding_options(layer, channel))),
        View::Multi(_) => None,
    }
}

/// Set the options of `channel`, replacing any previous definition.
///
/// On a layered view the shared encoding is set.
pub fn put_encoding(spec: Spec, channel: &str, options: Value) -> Result<Spec> {
    let caller = "put_encoding";
    shape::validate_single_or_layered_view(&spec, caller)?;
    let options = wire_options(options, caller)?;

    let mut spec = spec;
    if let Some(content) = spec.content_mut() {
        content
            .encoding
            .insert(channel.to_string(), Value::Object(options));
    }
    Ok(spec)
}

/// Remove `channel` from every view of the tree
pub fn drop_encoding(spec: Spec, channel: &str) -> Result<Spec> {
    shape::validate_single_or_layered_view(&spec, "drop_encoding")?;
    let mut spec = spec;
    remove_channel(&mut spec, channel);
    Ok(spec)
}

fn remove_channel(spec: &mut Spec, channel: &str) {
    match &mut spec.view {
        View::Single(content) => {
            content.encoding.shift_remove(channel);
        }
        View::Layered { shared, layers } => {
            shared.encoding.shift_remove(channel);
            for layer in layers.iter_mut() {
                remove_channel(layer, channel);
            }
        }
        View::Multi(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn spec(value: Value) -> Spec {
        Spec::from_value(value).unwrap()
    }

    #[test]
    fn test_merge_keeps_sibling_options() {
        let base = spec(json!({
            "mark": "point",
            "encoding": {"x": {"field": "a", "axis": {"title": "T"}}}
        }));

        let updated = put_encoding_options(base, "x", json!({"axis": {"grid": false}})).unwrap();
        assert_eq!(
            updated.channel("x"),
            Some(&json!({"field": "a", "axis": {"title": "T", "grid": false}}))
        );
    }

    #[test]
    fn test_option_keys_are_converted() {
        let base = spec(json!({"encoding": {"x": {"field": "a"}}}));
        let updated =
            put_encoding_options(base, "x", json!({"axis": {"label_angle": -45}})).unwrap();
        assert_eq!(updated.channel("x").unwrap()["axis"]["labelAngle"], json!(-45));
    }

    #[test]
    fn test_lenient_missing_channel_is_noop() {
        let base = spec(json!({"encoding": {"x": {"field": "a"}}}));
        let updated = put_encoding_options(base.clone(), "color", json!({"legend": null})).unwrap();
        assert_eq!(updated, base);
    }

    #[test]
    fn test_strict_missing_channel_fails() {
        let base = spec(json!({"encoding": {"x": {"field": "a"}}}));
        let err = put_encoding_options_strict(base, "y", json!({"title": "Y"})).unwrap_err();
        assert_eq!(
            err,
            PlotspecError::MissingChannel {
                caller: "put_encoding_options_strict".to_string(),
                channel: "y".to_string(),
            }
        );
    }

    #[test]
    fn test_strict_existing_channel_succeeds() {
        let base = spec(json!({"encoding": {"y": {"field": "b"}}}));
        let updated = put_encoding_options_strict(base, "y", json!({"title": "Y"})).unwrap();
        assert_eq!(updated.channel("y").unwrap()["title"], json!("Y"));
    }

    #[test]
    fn test_layered_applies_to_every_layer_with_channel() {
        let base = spec(json!({
            "layer": [
                {"mark": "line", "encoding": {"x": {"field": "a"}, "y": {"field": "b"}}},
                {"mark": "rule", "encoding": {"y": {"datum": 3}}},
                {"mark": "point", "encoding": {"x": {"field": "a"}}}
            ]
        }));

        let updated = put_encoding_options(base, "x", json!({"title": "A"})).unwrap();
        let layers = updated.layers().unwrap();
        assert_eq!(layers[0].channel("x").unwrap()["title"], json!("A"));
        assert!(layers[1].channel("x").is_none());
        assert_eq!(layers[2].channel("x").unwrap()["title"], json!("A"));
    }

    #[test]
    fn test_layered_strict_fails_only_when_no_layer_has_channel() {
        let base = spec(json!({
            "layer": [
                {"mark": "rule", "encoding": {"y": {"datum": 3}}},
                {"mark": "point", "encoding": {"x": {"field": "a"}}}
            ]
        }));
        assert!(put_encoding_options_strict(base.clone(), "x", json!({"title": "A"})).is_ok());
        assert!(put_encoding_options_strict(base, "color", json!({"title": "A"})).is_err());
    }

    #[test]
    fn test_multi_view_is_rejected() {
        let base = spec(json!({"hconcat": [{"encoding": {"x": {"field": "a"}}}]}));
        let err = put_encoding_options(base, "x", json!({})).unwrap_err();
        assert!(matches!(err, PlotspecError::Shape { key: "hconcat", .. }));
    }

    #[test]
    fn test_non_object_options_are_rejected() {
        let base = spec(json!({"encoding": {"x": {"field": "a"}}}));
        let err = put_encoding_options(base, "x", json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("expects options to be an object"));
    }

    #[test]
    fn test_leaf_last_write_wins_across_kinds() {
        let base = spec(json!({"encoding": {"x": {"field": "a", "axis": {"title": "T"}}}}));
        let updated = put_encoding_options(base, "x", json!({"axis": null})).unwrap();
        assert_eq!(updated.channel("x").unwrap()["axis"], Value::Null);

        let updated = put_encoding_options(updated, "x", json!({"axis": {"grid": true}})).unwrap();
        assert_eq!(updated.channel("x").unwrap()["axis"], json!({"grid": true}));
    }

    #[test]
    fn test_has_put_and_drop_encoding() {
        let base = spec(json!({"layer": [{"encoding": {"x": {"field": "a"}}}]}));
        assert!(has_encoding(&base, "x"));
        assert!(!has_encoding(&base, "y"));

        let with_color = put_encoding(base, "color", json!({"field": "c", "type": "nominal"})).unwrap();
        assert_eq!(with_color.channel("color").unwrap()["field"], json!("c"));

        let dropped = drop_encoding(with_color, "x").unwrap();
        assert!(!has_encoding(&dropped, "x"));
        assert!(has_encoding(&dropped, "color"));
    }

    #[test]
    fn test_encoding_options_prefers_shared() {
        let base = spec(json!({
            "encoding": {"y": {"field": "shared"}},
            "layer": [{"encoding": {"x": {"field": "a"}, "y": {"field": "b"}}}]
        }));
        assert_eq!(encoding_options(&base, "y").unwrap()["field"], json!("shared"));
        assert_eq!(encoding_options(&base, "x").unwrap()["field"], json!("a"));
        assert!(encoding_options(&base, "color").is_none());
    }

    proptest! {
        #[test]
        fn prop_two_puts_match_one_combined_put(
            title in "[a-z]{1,5}",
            grid in any::<bool>(),
            angle in -90i32..90,
        ) {
            let base = spec(json!({"encoding": {"x": {"field": "a", "axis": {"title": "T"}}}}));
            let first = json!({"axis": {"grid": grid}});
            let second = json!({"axis": {"label_angle": angle}, "title": title});

            let sequential = put_encoding_options(base.clone(), "x", first.clone())
                .and_then(|s| put_encoding_options(s, "x", second.clone()))
                .unwrap();
            let combined = put_encoding_options(base, "x", merge::deep_merge(first, second)).unwrap();
            prop_assert_eq!(sequential, combined);
        }
    }
}
