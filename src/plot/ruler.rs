//! Reference lines added on top of an existing plot

use serde_json::{json, Value};

use super::Prepared;
use crate::spec::{self, Spec};
use crate::Result;

const RULER_OPTIONS: &[&str] = &["line_color", "stroke_width", "stroke_dash", "opacity"];

/// Position of a ruler
#[derive(Debug, Clone, PartialEq)]
pub enum RulerPosition {
    /// A constant position on the scale
    Value(Value),
    /// Aggregate of a field, e.g. the mean of `price`
    Aggregate { field: String, op: String },
}

impl RulerPosition {
    pub fn aggregate(field: impl Into<String>, op: impl Into<String>) -> Self {
        RulerPosition::Aggregate {
            field: field.into(),
            op: op.into(),
        }
    }

    fn channel_def(&self) -> Value {
        match self {
            RulerPosition::Value(value) => json!({ "datum": value }),
            RulerPosition::Aggregate { field, op } => json!({
                "field": field,
                "type": "quantitative",
                "aggregate": op
            }),
        }
    }
}

impl From<f64> for RulerPosition {
    fn from(value: f64) -> Self {
        RulerPosition::Value(json!(value))
    }
}

impl From<i64> for RulerPosition {
    fn from(value: i64) -> Self {
        RulerPosition::Value(json!(value))
    }
}

impl From<&str> for RulerPosition {
    /// A date or other literal datum
    fn from(value: &str) -> Self {
        RulerPosition::Value(json!(value))
    }
}

/// Add a horizontal line at `position` on the y scale
pub fn hruler(spec: Spec, position: impl Into<RulerPosition>, opts: Value) -> Result<Spec> {
    ruler(spec, "y", position.into(), opts)
}

/// Add a vertical line at `position` on the x scale
pub fn vruler(spec: Spec, position: impl Into<RulerPosition>, opts: Value) -> Result<Spec> {
    ruler(spec, "x", position.into(), opts)
}

fn ruler(spec: Spec, channel: &str, position: RulerPosition, opts: Value) -> Result<Spec> {
    let prepared = Prepared::validate(RULER_OPTIONS, &[], &opts)?;
    let rule = spec::set_mark(Spec::new(), "rule", prepared.mark_options())?;
    let rule = spec::put_encoding(rule, channel, position.channel_def())?;
    spec::append_layers(spec, rule)
}
