//! Multi view composition
//!
//! Each constructor takes a base spec, typically holding the shared `data`,
//! and nests the given views under a composition key.
//!
//! - an empty single view becomes the composition (its properties are kept)
//! - a multi view of the same kind gets the new views appended
//! - anything else is rejected

use serde_json::Value;

use super::{shape, Composition, Spec, View};
use crate::{PlotspecError, Result};

/// Place views side by side
pub fn hconcat(base: Spec, specs: Vec<Spec>) -> Result<Spec> {
    concat_with(base, specs, "hconcat")
}

/// Stack views vertically
pub fn vconcat(base: Spec, specs: Vec<Spec>) -> Result<Spec> {
    concat_with(base, specs, "vconcat")
}

/// General (wrappable) concatenation
pub fn concat(base: Spec, specs: Vec<Spec>) -> Result<Spec> {
    concat_with(base, specs, "concat")
}

fn concat_with(base: Spec, specs: Vec<Spec>, key: &'static str) -> Result<Spec> {
    let specs: Vec<Spec> = specs.into_iter().map(Spec::into_bare).collect();
    let mut base = base;

    if let View::Multi(composition) = &mut base.view {
        match (key, composition) {
            ("hconcat", Composition::HConcat(existing))
            | ("vconcat", Composition::VConcat(existing))
            | ("concat", Composition::Concat(existing)) => {
                existing.extend(specs);
                return Ok(base);
            }
            _ => {}
        }
    }

    ensure_empty_base(&base, key)?;
    base.view = View::Multi(match key {
        "hconcat" => Composition::HConcat(specs),
        "vconcat" => Composition::VConcat(specs),
        _ => Composition::Concat(specs),
    });
    Ok(base)
}

/// Facet `inner` by the fields of `facet_def`.
///
/// Data of `inner` is hoisted to the facet node since a faceted view must
/// own its data.
pub fn facet(base: Spec, facet_def: Value, inner: Spec) -> Result<Spec> {
    ensure_empty_base(&base, "facet")?;
    let mut inner = inner.into_bare();
    let mut base = base;
    if let Some(data) = inner.props.shift_remove("data") {
        base.props.insert("data".to_string(), data);
    }
    base.view = View::Multi(Composition::Facet {
        facet: facet_def,
        spec: Box::new(inner),
    });
    Ok(base)
}

/// Repeat `inner` over the fields of `repeat_def`.
///
/// `repeat_def` is either a list of fields or an object with `row`, `column`
/// and/or `layer` lists.
pub fn repeat(base: Spec, repeat_def: Value, inner: Spec) -> Result<Spec> {
    match &repeat_def {
        Value::Array(_) | Value::Object(_) => {}
        other => {
            return Err(PlotspecError::InvalidSpec(format!(
                "repeat expects a list of fields or an object, got {}",
                crate::data::json_kind(other)
            )))
        }
    }
    ensure_empty_base(&base, "repeat")?;
    let mut base = base;
    base.view = View::Multi(Composition::Repeat {
        repeat: repeat_def,
        spec: Box::new(inner.into_bare()),
    });
    Ok(base)
}

fn ensure_empty_base(base: &Spec, caller: &str) -> Result<()> {
    match &base.view {
        View::Single(content) if content.is_empty() => Ok(()),
        View::Single(_) => Err(PlotspecError::InvalidSpec(format!(
            "{} expects a base spec without mark or encoding",
            caller
        ))),
        View::Layered { .. } | View::Multi(_) => Err(PlotspecError::Shape {
            caller: caller.to_string(),
            expected: "single view",
            key: shape::composition_key(base).unwrap_or("layer"),
        }),
    }
}
