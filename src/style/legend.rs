//! Legends of color, size, shape and other non-positional channels

use serde_json::{json, Value};

use super::one_of;
use crate::spec::{put_encoding_options_strict, Spec};
use crate::Result;

const LEGEND_ORIENTS: &[&str] = &[
    "left",
    "right",
    "top",
    "bottom",
    "top-left",
    "top-right",
    "bottom-left",
    "bottom-right",
    "none",
];

pub fn set_title(spec: Spec, channel: &str, title: Option<&str>) -> Result<Spec> {
    put_options(spec, channel, json!({ "title": title }))
}

/// Place the legend of `channel`; `none` lets the legend float at its
/// `legendX`/`legendY` position
pub fn set_orientation(spec: Spec, channel: &str, orient: &str) -> Result<Spec> {
    let orient = one_of(orient, LEGEND_ORIENTS, "legend orientation")?;
    put_options(spec, channel, json!({ "orient": orient }))
}

/// Show or hide the legend of `channel`
pub fn set_enabled(spec: Spec, channel: &str, enabled: bool) -> Result<Spec> {
    let legend = if enabled { json!({}) } else { Value::Null };
    put_encoding_options_strict(spec, channel, json!({ "legend": legend }))
}

/// Merge raw Vega-Lite legend properties (snake_case keys accepted)
pub fn put_options(spec: Spec, channel: &str, opts: Value) -> Result<Spec> {
    put_encoding_options_strict(spec, channel, json!({ "legend": opts }))
}
