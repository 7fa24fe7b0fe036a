//! Vega-Lite JSON writer
//!
//! Emits the root spec as a Vega-Lite v5 document: the `$schema` tag first,
//! then the spec properties in insertion order.
//!
//! ```rust,ignore
//! use plotspec::writer::{VegaLiteWriter, Writer};
//!
//! let json = VegaLiteWriter::new().write(&spec)?;
//! // Can be rendered in browser with vega-embed
//! ```

use serde_json::{Map, Value};

use crate::naming::SCHEMA_KEY;
use crate::spec::Spec;
use crate::writer::Writer;
use crate::{PlotspecError, Result};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Vega-Lite JSON writer
#[derive(Debug, Clone)]
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
    pretty: bool,
    /// Keep the inferred column types under the private metadata key
    include_metadata: bool,
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings
    pub fn new() -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA.to_string(),
            pretty: true,
            include_metadata: false,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Root document as JSON
    pub fn to_document(&self, spec: &Spec) -> Value {
        let body = if self.include_metadata {
            spec.to_value_with_metadata()
        } else {
            spec.to_value()
        };

        let mut document = Map::new();
        document.insert(SCHEMA_KEY.to_string(), Value::String(self.schema.clone()));
        if let Value::Object(body) = body {
            for (key, value) in body {
                if key != SCHEMA_KEY {
                    document.insert(key, value);
                }
            }
        }
        Value::Object(document)
    }
}

impl Writer for VegaLiteWriter {
    fn write(&self, spec: &Spec) -> Result<String> {
        let document = self.to_document(spec);
        let output = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        output.map_err(|e| PlotspecError::Writer(format!("failed to serialize spec: {}", e)))
    }
}
