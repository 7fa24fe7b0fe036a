//! Pie and donut charts

use serde_json::{json, Value};

use super::Prepared;
use crate::data::{ColumnType, Data};
use crate::spec::{self, Spec};
use crate::Result;

pub(crate) const PIE_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "tooltip",
    "aggregate",
    "color_scheme",
    "opacity",
    "theta",
    "color",
];

pub(crate) const DONUT_OPTIONS: &[&str] = &[
    "width",
    "height",
    "title",
    "tooltip",
    "aggregate",
    "color_scheme",
    "opacity",
    "inner_radius",
    "theta",
    "color",
];

/// Inner radius of a donut when none is given, in pixels
const DEFAULT_INNER_RADIUS: f64 = 50.0;

/// Pie chart: one slice per `category`, sized by `field`
pub fn pie(data: impl Into<Data>, field: &str, category: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(PIE_OPTIONS, &[], data, &opts)?;
    let spec = spec::set_mark(spec, "arc", prepared.mark_options())?;
    slices(&prepared, spec, field, category)
}

/// Pie chart with a hole in the middle
pub fn donut(data: impl Into<Data>, field: &str, category: &str, opts: Value) -> Result<Spec> {
    let (prepared, spec) = Prepared::with_data(DONUT_OPTIONS, &[], data, &opts)?;
    let mark_opts = spec::merge::deep_merge(
        json!({ "innerRadius": DEFAULT_INNER_RADIUS }),
        prepared.mark_options(),
    );
    let spec = spec::set_mark(spec, "arc", mark_opts)?;
    slices(&prepared, spec, field, category)
}

fn slices(prepared: &Prepared, spec: Spec, field: &str, category: &str) -> Result<Spec> {
    let theta_opts = match prepared.str("aggregate") {
        Some(op) => json!({ "aggregate": op, "stack": true }),
        None => json!({ "stack": true }),
    };
    let color_opts = match prepared.str("color_scheme") {
        Some(scheme) => json!({ "scale": { "scheme": scheme } }),
        None => Value::Null,
    };

    let mut spec = spec::encode_field(spec, "theta", field, ColumnType::Quantitative, theta_opts)?;
    spec = spec::encode_field(spec, "color", category, ColumnType::Nominal, color_opts)?;
    prepared.finish(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares() -> Value {
        json!([{"party": "A", "votes": 40}, {"party": "B", "votes": 35}])
    }

    #[test]
    fn test_pie() {
        let spec = pie(shares(), "votes", "party", Value::Null).unwrap();
        assert_eq!(spec.mark_type(), Some("arc"));
        assert_eq!(
            spec.channel("theta"),
            Some(&json!({"field": "votes", "type": "quantitative", "stack": true}))
        );
        assert_eq!(spec.channel("color").unwrap()["field"], json!("party"));
        assert!(spec.mark().unwrap().get("innerRadius").is_none());
    }

    #[test]
    fn test_donut_inner_radius() {
        let spec = donut(shares(), "votes", "party", Value::Null).unwrap();
        assert_eq!(spec.mark().unwrap()["innerRadius"], json!(50.0));

        let spec = donut(shares(), "votes", "party", json!({"inner_radius": 80})).unwrap();
        assert_eq!(spec.mark().unwrap()["innerRadius"], json!(80));

        assert!(pie(shares(), "votes", "party", json!({"inner_radius": 80})).is_err());
    }
}
