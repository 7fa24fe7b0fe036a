//! Axis titles, orientation and visibility

use serde_json::{json, Value};

use super::one_of;
use crate::spec::{put_encoding_options_strict, Spec};
use crate::Result;

const AXIS_ORIENTS: &[&str] = &["top", "bottom", "left", "right"];

/// Set the title of the axis of `channel`. `None` removes the title.
pub fn set_title(spec: Spec, channel: &str, title: Option<&str>) -> Result<Spec> {
    put_encoding_options_strict(spec, channel, json!({ "title": title }))
}

pub fn set_x_title(spec: Spec, title: Option<&str>) -> Result<Spec> {
    set_title(spec, "x", title)
}

pub fn set_y_title(spec: Spec, title: Option<&str>) -> Result<Spec> {
    set_title(spec, "y", title)
}

pub fn set_xy_titles(spec: Spec, x: Option<&str>, y: Option<&str>) -> Result<Spec> {
    set_y_title(set_x_title(spec, x)?, y)
}

/// Merge raw Vega-Lite axis properties (snake_case keys accepted)
pub fn put_options(spec: Spec, channel: &str, opts: Value) -> Result<Spec> {
    put_encoding_options_strict(spec, channel, json!({ "axis": opts }))
}

/// Show or hide the axis of `channel`
pub fn set_enabled(spec: Spec, channel: &str, enabled: bool) -> Result<Spec> {
    let axis = if enabled { json!({}) } else { Value::Null };
    put_encoding_options_strict(spec, channel, json!({ "axis": axis }))
}

/// Place the axis of `channel` on one side of the view
///
/// # Arguments
///
/// * `orient` - one of `top`, `bottom`, `left`, `right`
pub fn set_orientation(spec: Spec, channel: &str, orient: &str) -> Result<Spec> {
    let orient = one_of(orient, AXIS_ORIENTS, "axis orientation")?;
    put_options(spec, channel, json!({ "orient": orient }))
}
