//! Mark creation and mark option merging

use serde_json::{Map, Value};

use super::{encoding::wire_options, merge, shape, Spec, View};
use crate::Result;

/// Set the mark of a single view, or the shared mark of a layered view.
///
/// `opts` become properties of the mark definition next to `type`; their keys
/// are converted to wire names.
pub fn set_mark(spec: Spec, mark_type: &str, opts: Value) -> Result<Spec> {
    let caller = "set_mark";
    shape::validate_single_or_layered_view(&spec, caller)?;
    let opts = wire_options(opts, caller)?;

    let mut mark = Map::new();
    mark.insert("type".to_string(), Value::String(mark_type.to_string()));
    mark.extend(opts);

    let mut spec = spec;
    if let Some(content) = spec.content_mut() {
        content.mark = Some(mark);
    }
    Ok(spec)
}

/// Deep merge `opts` into every mark of the tree.
///
/// Views without a mark are left unchanged.
pub fn put_mark_options(spec: Spec, opts: Value) -> Result<Spec> {
    let caller = "put_mark_options";
    shape::validate_single_or_layered_view(&spec, caller)?;
    let opts = wire_options(opts, caller)?;
    if opts.is_empty() {
        return Ok(spec);
    }

    let mut spec = spec;
    merge_marks(&mut spec, &opts);
    Ok(spec)
}

fn merge_marks(spec: &mut Spec, opts: &Map<String, Value>) {
    match &mut spec.view {
        View::Single(content) => merge_mark(&mut content.mark, opts),
        View::Layered { shared, layers } => {
            merge_mark(&mut shared.mark, opts);
            for layer in layers.iter_mut() {
                merge_marks(layer, opts);
            }
        }
        View::Multi(_) => {}
    }
}

fn merge_mark(mark: &mut Option<Map<String, Value>>, opts: &Map<String, Value>) {
    if let Some(current) = mark.take() {
        *mark = Some(merge::deep_merge_maps(current, opts.clone()));
    }
}
