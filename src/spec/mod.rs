//! Vega-Lite specification tree
//!
//! A [`Spec`] is one node of a Vega-Lite specification. Its shape is a closed
//! sum type ([`View`]):
//!
//! - **Single view** - an optional `mark` and an `encoding` mapping channels to
//!   channel options
//! - **Layered view** - an ordered list of layers plus optional shared
//!   `mark`/`encoding`
//! - **Multi view** - one [`Composition`]: `hconcat`, `vconcat`, `concat`,
//!   `facet` + `spec` or `repeat` + `spec`
//!
//! Every other top-level property (`data`, `width`, `title`, `transform`,
//! `config`, ...) lives in an order preserving property map that shape
//! operations never touch.
//!
//! All transformations consume a `Spec` and return a new one. Generic JSON is
//! only inspected at the boundary, in [`Spec::from_value`] and
//! [`Spec::to_value`].
//!
//! # Submodules
//!
//! - `shape` - shape predicates and validators
//! - `merge` - deep merge of JSON option trees
//! - `encoding` - channel option merging
//! - `mark` - mark creation and mark option merging
//! - `layers` - promotion to layered views, appending and prepending layers
//! - `compose` - multi view composition
//! - `channels` - field encoders (`color_by`, `facet_by`, `flip_axes`, ...)

pub mod channels;
pub mod compose;
pub mod encoding;
pub mod layers;
pub mod mark;
pub mod merge;
pub mod shape;

pub use channels::{
    color_by, encode_field, facet_by, fill_by, flip_axes, shape_by, size_by, stroke_dash_by,
    FacetMode,
};
pub use compose::{concat, facet, hconcat, repeat, vconcat};
pub use encoding::{
    drop_encoding, encoding_options, has_encoding, put_encoding, put_encoding_options, put_encoding_options_strict,
};
pub use layers::{append_layers, layers, prepend_layers, promote_to_layered, to_layered, Layers};
pub use mark::{put_mark_options, set_mark};
pub use shape::{
    is_layered, is_multi_view, is_single_view, validate_single_or_layered_view,
    validate_single_view, ShapeKind, COMPOSITION_KEYS,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::data::{infer_column_types, json_kind, ColumnType, ColumnTypes, Data};
use crate::{naming, PlotspecError, Result};

/// Mark and encoding of a single view (or the shared part of a layered view)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewContent {
    /// Mark definition, always an object with a `type` key
    pub mark: Option<Map<String, Value>>,
    /// Channel name -> channel options
    pub encoding: Map<String, Value>,
}

impl ViewContent {
    /// True if neither a mark nor any encoding channel is defined
    pub fn is_empty(&self) -> bool {
        self.mark.is_none() && self.encoding.is_empty()
    }

    fn write_into(&self, out: &mut Map<String, Value>) {
        if let Some(mark) = &self.mark {
            out.insert("mark".to_string(), Value::Object(mark.clone()));
        }
        if !self.encoding.is_empty() {
            out.insert(
                "encoding".to_string(),
                Value::Object(self.encoding.clone()),
            );
        }
    }

    fn take_from(map: &mut Map<String, Value>) -> Result<Self> {
        let mark = match map.shift_remove("mark") {
            None => None,
            Some(Value::String(mark_type)) => {
                let mut mark = Map::new();
                mark.insert("type".to_string(), Value::String(mark_type));
                Some(mark)
            }
            Some(Value::Object(mark)) => Some(mark),
            Some(other) => {
                return Err(PlotspecError::InvalidSpec(format!(
                    "mark must be a string or an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let encoding = match map.shift_remove("encoding") {
            None => Map::new(),
            Some(Value::Object(encoding)) => encoding,
            Some(other) => {
                return Err(PlotspecError::InvalidSpec(format!(
                    "encoding must be an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(Self { mark, encoding })
    }
}

/// Shape of a specification node
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Single(ViewContent),
    Layered {
        shared: ViewContent,
        layers: Vec<Spec>,
    },
    Multi(Composition),
}

impl Default for View {
    fn default() -> Self {
        View::Single(ViewContent::default())
    }
}

/// Multi view composition operators
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    HConcat(Vec<Spec>),
    VConcat(Vec<Spec>),
    Concat(Vec<Spec>),
    Facet { facet: Value, spec: Box<Spec> },
    Repeat { repeat: Value, spec: Box<Spec> },
}

impl Composition {
    /// The composition key defining this operator
    pub fn key(&self) -> &'static str {
        match self {
            Composition::HConcat(_) => "hconcat",
            Composition::VConcat(_) => "vconcat",
            Composition::Concat(_) => "concat",
            Composition::Facet { .. } => "facet",
            Composition::Repeat { .. } => "repeat",
        }
    }

    /// Nested specifications, in order
    pub fn children(&self) -> Vec<&Spec> {
        match self {
            Composition::HConcat(specs)
            | Composition::VConcat(specs)
            | Composition::Concat(specs) => specs.iter().collect(),
            Composition::Facet { spec, .. } | Composition::Repeat { spec, .. } => vec![spec.as_ref()],
        }
    }

    fn write_into(&self, out: &mut Map<String, Value>) {
        let list = |specs: &[Spec]| Value::Array(specs.iter().map(Spec::to_value).collect());
        match self {
            Composition::HConcat(specs) => {
                out.insert("hconcat".to_string(), list(specs));
            }
            Composition::VConcat(specs) => {
                out.insert("vconcat".to_string(), list(specs));
            }
            Composition::Concat(specs) => {
                out.insert("concat".to_string(), list(specs));
            }
            Composition::Facet { facet, spec } => {
                out.insert("facet".to_string(), facet.clone());
                out.insert("spec".to_string(), spec.to_value());
            }
            Composition::Repeat { repeat, spec } => {
                out.insert("repeat".to_string(), repeat.clone());
                out.insert("spec".to_string(), spec.to_value());
            }
        }
    }
}

/// Private metadata attached to a root spec
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Column types inferred from inline data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_types: Option<ColumnTypes>,
}

/// A Vega-Lite specification node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spec {
    pub(crate) view: View,
    pub(crate) props: Map<String, Value>,
    pub(crate) metadata: Option<Metadata>,
}

impl Spec {
    /// An empty single view
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a base spec from a data source.
    ///
    /// Inline data is type-inferred and the result cached in the spec
    /// metadata. A [`Data::Spec`] source is returned as is.
    pub fn from_data(data: impl Into<Data>) -> Result<Self> {
        let data = data.into();
        if let Data::Spec(spec) = data {
            return Ok(*spec);
        }

        let column_types = infer_column_types(&data);
        let mut spec = Spec::new();
        if let Some(vega_data) = data.to_vega_data()? {
            spec.props.insert("data".to_string(), vega_data);
        }
        spec.metadata = column_types.map(|column_types| Metadata {
            column_types: Some(column_types),
        });
        Ok(spec)
    }

    /// Parse a Vega-Lite JSON specification.
    ///
    /// Composition keys are scanned in the fixed order of
    /// [`COMPOSITION_KEYS`]; a node defining conflicting keys is rejected.
    /// A `$schema` key is dropped and crate metadata is restored.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(PlotspecError::InvalidSpec(format!(
                    "a spec must be an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        map.shift_remove(naming::SCHEMA_KEY);
        let metadata = match map.shift_remove(naming::METADATA_KEY) {
            Some(value) => Some(serde_json::from_value::<Metadata>(value).map_err(|e| {
                PlotspecError::InvalidSpec(format!("invalid {} metadata: {}", naming::METADATA_KEY, e))
            })?),
            None => None,
        };

        let present: Vec<&'static str> = COMPOSITION_KEYS
            .iter()
            .copied()
            .filter(|key| map.contains_key(*key))
            .collect();

        let view = match present.as_slice() {
            [] => View::Single(ViewContent::take_from(&mut map)?),
            ["layer"] => {
                let layers = take_spec_list(&mut map, "layer")?;
                View::Layered {
                    shared: ViewContent::take_from(&mut map)?,
                    layers,
                }
            }
            ["hconcat"] => View::Multi(Composition::HConcat(take_multi_list(&mut map, "hconcat")?)),
            ["vconcat"] => View::Multi(Composition::VConcat(take_multi_list(&mut map, "vconcat")?)),
            ["concat"] => View::Multi(Composition::Concat(take_multi_list(&mut map, "concat")?)),
            ["repeat", "spec"] => {
                ensure_no_view_content(&map, "repeat")?;
                let repeat = map.shift_remove("repeat").unwrap_or(Value::Null);
                let spec = take_nested_spec(&mut map)?;
                View::Multi(Composition::Repeat { repeat, spec })
            }
            ["facet", "spec"] => {
                ensure_no_view_content(&map, "facet")?;
                let facet = map.shift_remove("facet").unwrap_or(Value::Null);
                let spec = take_nested_spec(&mut map)?;
                View::Multi(Composition::Facet { facet, spec })
            }
            [key @ ("repeat" | "facet")] => {
                return Err(PlotspecError::InvalidSpec(format!(
                    "{} requires a nested spec key",
                    key
                )))
            }
            ["spec"] => {
                return Err(PlotspecError::InvalidSpec(
                    "spec key is only valid alongside facet or repeat".to_string(),
                ))
            }
            keys => {
                return Err(PlotspecError::InvalidSpec(format!(
                    "conflicting composition keys: {}",
                    keys.join(", ")
                )))
            }
        };

        Ok(Spec {
            view,
            props: map,
            metadata,
        })
    }

    /// Bare JSON form of this node, without schema tag or metadata
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// JSON form including crate metadata under the private namespace key
    pub fn to_value_with_metadata(&self) -> Value {
        let mut map = self.to_map();
        if let Some(metadata) = &self.metadata {
            if let Ok(value) = serde_json::to_value(metadata) {
                map.insert(naming::METADATA_KEY.to_string(), value);
            }
        }
        Value::Object(map)
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut out = self.props.clone();
        match &self.view {
            View::Single(content) => content.write_into(&mut out),
            View::Layered { shared, layers } => {
                shared.write_into(&mut out);
                out.insert(
                    "layer".to_string(),
                    Value::Array(layers.iter().map(Spec::to_value).collect()),
                );
            }
            View::Multi(composition) => composition.write_into(&mut out),
        }
        out
    }

    /// Strip root-only information so the spec can be nested in another one
    pub fn into_bare(mut self) -> Self {
        self.metadata = None;
        self.props.shift_remove(naming::SCHEMA_KEY);
        self.props.shift_remove("config");
        self
    }

    /// An empty single view carrying the same metadata.
    ///
    /// Composite plots use it to build nested views that still see the
    /// inferred column types of the shared data.
    pub fn detached(&self) -> Self {
        Spec {
            metadata: self.metadata.clone(),
            ..Spec::default()
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn shape(&self) -> ShapeKind {
        match self.view {
            View::Single(_) => ShapeKind::Single,
            View::Layered { .. } => ShapeKind::Layered,
            View::Multi(_) => ShapeKind::Multi,
        }
    }

    /// Top-level properties other than the shape keys
    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Set a top-level property, replacing any previous value
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn without_property(mut self, key: &str) -> Self {
        self.props.shift_remove(key);
        self
    }

    /// Append transforms to the top-level `transform` array
    pub fn with_transforms(mut self, transforms: Vec<Value>) -> Self {
        if transforms.is_empty() {
            return self;
        }
        match self.props.get_mut("transform") {
            Some(Value::Array(existing)) => existing.extend(transforms),
            _ => {
                self.props
                    .insert("transform".to_string(), Value::Array(transforms));
            }
        }
        self
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn column_types(&self) -> Option<&ColumnTypes> {
        self.metadata.as_ref()?.column_types.as_ref()
    }

    /// Inferred type of a field, `None` if unknown or not inferred
    pub fn column_type(&self, field: &str) -> Option<ColumnType> {
        self.column_types()?.get(field).copied().flatten()
    }

    pub fn with_column_types(mut self, column_types: ColumnTypes) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::default)
            .column_types = Some(column_types);
        self
    }

    /// Mark of a single view, or the shared mark of a layered view
    pub fn mark(&self) -> Option<&Map<String, Value>> {
        self.content()?.mark.as_ref()
    }

    pub fn mark_type(&self) -> Option<&str> {
        self.mark()?.get("type")?.as_str()
    }

    /// Encoding of a single view, or the shared encoding of a layered view
    pub fn encoding(&self) -> Option<&Map<String, Value>> {
        Some(&self.content()?.encoding)
    }

    pub fn channel(&self, channel: &str) -> Option<&Value> {
        self.encoding()?.get(channel)
    }

    pub fn layers(&self) -> Option<&[Spec]> {
        match &self.view {
            View::Layered { layers, .. } => Some(layers),
            _ => None,
        }
    }

    pub fn composition(&self) -> Option<&Composition> {
        match &self.view {
            View::Multi(composition) => Some(composition),
            _ => None,
        }
    }

    fn content(&self) -> Option<&ViewContent> {
        match &self.view {
            View::Single(content) => Some(content),
            View::Layered { shared, .. } => Some(shared),
            View::Multi(_) => None,
        }
    }

    pub(crate) fn content_mut(&mut self) -> Option<&mut ViewContent> {
        match &mut self.view {
            View::Single(content) => Some(content),
            View::Layered { shared, .. } => Some(shared),
            View::Multi(_) => None,
        }
    }
}

fn take_spec_list(map: &mut Map<String, Value>, key: &str) -> Result<Vec<Spec>> {
    match map.shift_remove(key) {
        Some(Value::Array(items)) => items.into_iter().map(Spec::from_value).collect(),
        Some(other) => Err(PlotspecError::InvalidSpec(format!(
            "{} must be an array of specs, got {}",
            key,
            json_kind(&other)
        ))),
        None => Ok(Vec::new()),
    }
}

fn take_multi_list(map: &mut Map<String, Value>, key: &str) -> Result<Vec<Spec>> {
    ensure_no_view_content(map, key)?;
    take_spec_list(map, key)
}

fn take_nested_spec(map: &mut Map<String, Value>) -> Result<Box<Spec>> {
    let nested = map.shift_remove("spec").unwrap_or(Value::Null);
    Ok(Box::new(Spec::from_value(nested)?))
}

fn ensure_no_view_content(map: &Map<String, Value>, key: &str) -> Result<()> {
    match ["mark", "encoding"].iter().find(|k| map.contains_key(**k)) {
        Some(found) => Err(PlotspecError::InvalidSpec(format!(
            "{} is not allowed on a {} spec",
            found, key
        ))),
        None => Ok(()),
    }
}

impl Serialize for Spec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Spec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Spec::from_value(value).map_err(serde::de::Error::custom)
    }
}
