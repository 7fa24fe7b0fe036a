//! Deep merge of JSON option trees
//!
//! Objects are merged key by key, recursing when both sides hold an object.
//! Any other value (scalars, null, arrays) on the incoming side replaces the
//! existing value outright. Arrays are never merged element-wise.

use serde_json::{Map, Value};

/// Merge `incoming` into `base`, incoming wins at the leaves
pub fn deep_merge(base: Value, incoming: Value) -> Value {
    match (base, incoming) {
        (Value::Object(base), Value::Object(incoming)) => {
            Value::Object(deep_merge_maps(base, incoming))
        }
        (_, incoming) => incoming,
    }
}

/// Merge two objects; existing keys keep their position, new keys are appended
pub fn deep_merge_maps(mut base: Map<String, Value>, incoming: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in incoming {
        match base.get_mut(&key) {
            Some(existing) => {
                let current = existing.take();
                *existing = deep_merge(current, value);
            }
            None => {
                base.insert(key, value);
            }
        }
    }
    base
}
