/*!
# plotspec - Declarative Vega-Lite plotting

A plotting facade that turns tabular data and a handful of semantic parameters
into [Vega-Lite](https://vega.github.io/vega-lite/) specifications. Nothing is
rendered here; the produced specification is handed to a Vega-Lite engine.

## Example

```rust,ignore
use plotspec::plot::scatter;
use plotspec::writer::{VegaLiteWriter, Writer};
use serde_json::json;

let data = json!([{"x": 1, "y": 2}, {"x": 2, "y": 3}]);
let spec = scatter(data, "x", "y", json!({"color_by": "x", "width": 400}))?;
let json = VegaLiteWriter::new().write(&spec)?;
```

## Architecture

- [`data`] - data sources, column type inference and the dataset registry
- [`spec`] - the specification tree (single, layered and multi views),
  encoding option merging, layer composition and multi-view composition
- [`options`] - the registry of reusable plot options and their validation
- [`plot`] - high level plot builders (scatter, lineplot, histogram, ...)
- [`style`] - axes, scales, legends, grid lines and view properties
- [`geometry`] - polylines, rectangles, circles and ellipses as layers
- [`theme`] - built-in Vega-Lite themes
- [`writer`] - serialization of finished specifications
*/

pub mod data;
pub mod geometry;
pub mod naming;
pub mod options;
pub mod plot;
pub mod spec;
pub mod style;
pub mod theme;
pub mod writer;

// Re-export key types for convenience
pub use data::{ColumnType, ColumnTypes, Data};
pub use options::{Destination, OptionDescriptor, OptionSet, Options, Schema, Section};
pub use spec::{Composition, ShapeKind, Spec, View, ViewContent};

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlotspecError {
    #[error("{caller} expects a {expected} spec, a multi view was detected ({key} key is defined)")]
    Shape {
        caller: String,
        expected: &'static str,
        key: &'static str,
    },

    #[error("{caller}: encoding for channel {channel} not found in the spec")]
    MissingChannel { caller: String, channel: String },

    #[error("Invalid spec: {0}")]
    InvalidSpec(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("The following options were requested more than once: {}", .0.join(", "))]
    DuplicateOptions(Vec<String>),

    #[error("Invalid options: {0}")]
    Options(String),

    #[error("Invalid geometry: {0}")]
    Geometry(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Output generation error: {0}")]
    Writer(String),
}

pub type Result<T> = std::result::Result<T, PlotspecError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message_names_key() {
        let err = PlotspecError::Shape {
            caller: "put_encoding_options".to_string(),
            expected: "single view",
            key: "hconcat",
        };
        assert_eq!(
            err.to_string(),
            "put_encoding_options expects a single view spec, a multi view was detected (hconcat key is defined)"
        );
    }

    #[test]
    fn test_duplicate_options_message_lists_names() {
        let err = PlotspecError::DuplicateOptions(vec!["width".to_string(), "height".to_string()]);
        assert_eq!(
            err.to_string(),
            "The following options were requested more than once: width, height"
        );
    }
}
