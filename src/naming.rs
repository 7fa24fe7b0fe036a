//! Naming conventions shared across the crate
//!
//! Options are written by callers in snake_case (`label_angle`, `fill_opacity`)
//! while Vega-Lite expects camelCase property names (`labelAngle`,
//! `fillOpacity`). The conversion only touches object keys, never values, so a
//! field called `total_sales` stays `total_sales`.

use serde_json::{Map, Value};

/// Key under which crate private metadata is serialized on the root spec
pub const METADATA_KEY: &str = "__plotspec__";

/// Key holding the Vega-Lite schema URL on a root spec
pub const SCHEMA_KEY: &str = "$schema";

/// Convert a snake_case option name into the camelCase wire name.
///
/// Keys starting with an underscore, or without any underscore, are returned
/// unchanged.
///
/// ```rust,ignore
/// assert_eq!(to_camel_case("label_angle"), "labelAngle");
/// assert_eq!(to_camel_case("x"), "x");
/// ```
pub fn to_camel_case(key: &str) -> String {
    if key.starts_with('_') || !key.contains('_') {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    for (idx, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        if idx == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert a camelCase wire name back into snake_case.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Recursively convert all object keys of a value to their wire names.
///
/// Objects nested in arrays are converted as well; scalar values are left
/// untouched.
pub fn to_wire_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(to_wire_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(to_wire_keys).collect()),
        other => other,
    }
}

/// Convert the keys of an options map, preserving key order.
pub fn to_wire_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (to_camel_case(&key), to_wire_keys(value)))
        .collect()
}

/// Name of the column produced by a bin transform for `field`
pub fn bin_column(field: &str) -> String {
    format!("bin_{}", field)
}

/// Name of the column holding the upper bin boundary for `field`
pub fn bin_end_column(field: &str) -> String {
    format!("bin_{}_end", field)
}

/// Name of the count column produced by an aggregate over `field`
pub fn count_column(field: &str) -> String {
    format!("count_{}", field)
}
