//! Styling helpers
//!
//! Named wrappers over the encoding option merger and the top-level
//! properties of a specification:
//!
//! - `axes` - axis titles, orientation and visibility
//! - `scale` - domains, scale types and color schemes
//! - `legend` - legend titles, placement and visibility
//! - `grid` - grid lines of an axis
//! - `view` - width, height, title and background
//!
//! Channel helpers use the strict merger: styling a channel the plot does not
//! encode is an error rather than a silent no-op.

pub mod axes;
pub mod grid;
pub mod legend;
pub mod scale;
pub mod view;

use serde_json::Value;

use crate::{PlotspecError, Result};

/// Parse any CSS color and return its hex form
pub fn color_to_hex(value: &str) -> Result<String> {
    csscolorparser::parse(value)
        .map(|c| c.to_css_hex())
        .map_err(|e| PlotspecError::Options(format!("Invalid color '{}': {}", value, e)))
}

/// Check `value` against a closed list of accepted words
pub(crate) fn one_of(value: &str, accepted: &[&str], what: &str) -> Result<Value> {
    if accepted.contains(&value) {
        Ok(Value::String(value.to_string()))
    } else {
        Err(PlotspecError::Options(format!(
            "invalid {} '{}', expected one of: {}",
            what,
            value,
            accepted.join(", ")
        )))
    }
}
