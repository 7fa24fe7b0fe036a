//! Top-level view properties

use serde_json::{json, Value};

use super::color_to_hex;
use crate::spec::Spec;
use crate::Result;

pub fn set_width(spec: Spec, width: u32) -> Spec {
    spec.with_property("width", width)
}

pub fn set_height(spec: Spec, height: u32) -> Spec {
    spec.with_property("height", height)
}

pub fn set_size(spec: Spec, width: u32, height: u32) -> Spec {
    set_height(set_width(spec, width), height)
}

/// Set the plot title, with an optional subtitle
pub fn set_title(spec: Spec, title: &str, subtitle: Option<&str>) -> Spec {
    let title = match subtitle {
        Some(subtitle) => json!({ "text": title, "subtitle": subtitle }),
        None => Value::String(title.to_string()),
    };
    spec.with_property("title", title)
}

/// Background color of the whole visualization, any CSS notation
pub fn set_background(spec: Spec, color: &str) -> Result<Spec> {
    Ok(spec.with_property("background", color_to_hex(color)?))
}
