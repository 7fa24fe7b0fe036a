//! Field encoders
//!
//! Encode a data field on a channel with a sensible Vega-Lite type. The type
//! is picked in this order:
//!
//! 1. an explicit `type` in the caller options
//! 2. `temporal` when the field was inferred as a date, date-time or time
//! 3. the default type given by the caller

use serde_json::{json, Map, Value};

use super::{encoding::wire_options, merge, shape, Composition, Spec, View};
use crate::data::ColumnType;
use crate::{PlotspecError, Result};

/// Time unit used for time-of-day columns
pub const TIME_OF_DAY_UNIT: &str = "hoursminutesseconds";

/// Channel definition for `field`: `field`, `type` and, for time-of-day
/// columns, `timeUnit`.
pub fn resolve_field_type(spec: &Spec, field: &str, default: ColumnType) -> Map<String, Value> {
    let column_type = match spec.column_type(field) {
        Some(inferred) if inferred.is_temporal() => inferred,
        _ => default,
    };

    let mut def = Map::new();
    def.insert("field".to_string(), Value::String(field.to_string()));
    def.insert(
        "type".to_string(),
        Value::String(column_type.vega_type().to_string()),
    );
    if column_type == ColumnType::Time {
        def.insert("timeUnit".to_string(), json!(TIME_OF_DAY_UNIT));
    }
    def
}

/// Encode `field` on `channel`, replacing any previous definition of the
/// channel. `opts` are merged over the generated definition.
pub fn encode_field(
    spec: Spec,
    channel: &str,
    field: &str,
    default: ColumnType,
    opts: Value,
) -> Result<Spec> {
    let caller = "encode_field";
    shape::validate_single_or_layered_view(&spec, caller)?;
    let opts = wire_options(opts, caller)?;
    let def = merge::deep_merge_maps(resolve_field_type(&spec, field, default), opts);

    let mut spec = spec;
    if let Some(content) = spec.content_mut() {
        content
            .encoding
            .insert(channel.to_string(), Value::Object(def));
    }
    Ok(spec)
}

pub fn color_by(spec: Spec, field: &str, opts: Value) -> Result<Spec> {
    encode_field(spec, "color", field, ColumnType::Nominal, opts)
}

pub fn fill_by(spec: Spec, field: &str, opts: Value) -> Result<Spec> {
    encode_field(spec, "fill", field, ColumnType::Nominal, opts)
}

pub fn shape_by(spec: Spec, field: &str, opts: Value) -> Result<Spec> {
    encode_field(spec, "shape", field, ColumnType::Nominal, opts)
}

pub fn size_by(spec: Spec, field: &str, opts: Value) -> Result<Spec> {
    encode_field(spec, "size", field, ColumnType::Quantitative, opts)
}

pub fn stroke_dash_by(spec: Spec, field: &str, opts: Value) -> Result<Spec> {
    encode_field(spec, "strokeDash", field, ColumnType::Nominal, opts)
}

/// How facets are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetMode {
    /// One row per value
    Row,
    /// One column per value
    Column,
    /// Wrapped grid with the given number of columns
    Wrap(u32),
}

impl FacetMode {
    fn channel(&self) -> &'static str {
        match self {
            FacetMode::Row => "row",
            FacetMode::Column => "column",
            FacetMode::Wrap(_) => "facet",
        }
    }
}

/// Properties that belong to the faceted inner view rather than the facet node
const INNER_VIEW_PROPS: [&str; 3] = ["width", "height", "params"];

/// Split a view into small multiples by the values of `field`.
///
/// A single view gets a `row`, `column` or `facet` encoding channel. Layered
/// views cannot carry facet channels and are wrapped into a facet node whose
/// inner spec holds the layers. Faceting an already faceted node by row or
/// column adds the missing direction.
pub fn facet_by(spec: Spec, field: &str, mode: FacetMode, opts: Value) -> Result<Spec> {
    let caller = "facet_by";
    let opts = wire_options(opts, caller)?;
    let def = merge::deep_merge_maps(resolve_field_type(&spec, field, ColumnType::Nominal), opts);

    let mut spec = spec;
    match &mut spec.view {
        View::Single(content) => {
            let mut def = def;
            if let FacetMode::Wrap(columns) = mode {
                def.insert("columns".to_string(), json!(columns));
            }
            content
                .encoding
                .insert(mode.channel().to_string(), Value::Object(def));
            Ok(spec)
        }
        View::Layered { .. } => Ok(wrap_in_facet(spec, def, mode)),
        View::Multi(Composition::Facet { facet, .. }) => match (mode, facet) {
            (FacetMode::Row | FacetMode::Column, Value::Object(facet))
                if !facet.contains_key("field") =>
            {
                facet.insert(mode.channel().to_string(), Value::Object(def));
                Ok(spec)
            }
            _ => Err(PlotspecError::InvalidSpec(format!(
                "{} cannot combine a wrapped facet with another facet",
                caller
            ))),
        },
        View::Multi(composition) => Err(PlotspecError::Shape {
            caller: caller.to_string(),
            expected: "single or layered view",
            key: composition.key(),
        }),
    }
}

fn wrap_in_facet(spec: Spec, def: Map<String, Value>, mode: FacetMode) -> Spec {
    let Spec {
        view,
        mut props,
        metadata,
    } = spec;

    let mut inner_props = Map::new();
    for key in INNER_VIEW_PROPS {
        if let Some(value) = props.shift_remove(key) {
            inner_props.insert(key.to_string(), value);
        }
    }

    let facet = match mode {
        FacetMode::Wrap(columns) => {
            props.insert("columns".to_string(), json!(columns));
            Value::Object(def)
        }
        FacetMode::Row | FacetMode::Column => {
            let mut facet = Map::new();
            facet.insert(mode.channel().to_string(), Value::Object(def));
            Value::Object(facet)
        }
    };

    let inner = Spec {
        view,
        props: inner_props,
        metadata: None,
    };
    Spec {
        view: View::Multi(Composition::Facet {
            facet,
            spec: Box::new(inner),
        }),
        props,
        metadata,
    }
}

/// Channel pairs exchanged by [`flip_axes`]
const FLIPPED_CHANNELS: [(&str, &str); 4] = [
    ("x", "y"),
    ("x2", "y2"),
    ("xOffset", "yOffset"),
    ("xError", "yError"),
];

/// Swap the horizontal and vertical channels of every view, turning a
/// vertical bar chart into a horizontal one.
pub fn flip_axes(spec: Spec) -> Result<Spec> {
    shape::validate_single_or_layered_view(&spec, "flip_axes")?;
    let mut spec = spec;
    flip(&mut spec);
    Ok(spec)
}

fn flip(spec: &mut Spec) {
    match &mut spec.view {
        View::Single(content) => {
            flip_encoding(&mut content.encoding);
            flip_orient(&mut content.mark);
        }
        View::Layered { shared, layers } => {
            flip_encoding(&mut shared.encoding);
            flip_orient(&mut shared.mark);
            layers.iter_mut().for_each(flip);
        }
        View::Multi(_) => {}
    }
}

fn flip_encoding(encoding: &mut Map<String, Value>) {
    for (a, b) in FLIPPED_CHANNELS {
        let first = encoding.shift_remove(a);
        let second = encoding.shift_remove(b);
        if let Some(value) = second {
            encoding.insert(a.to_string(), value);
        }
        if let Some(value) = first {
            encoding.insert(b.to_string(), value);
        }
    }
}

fn flip_orient(mark: &mut Option<Map<String, Value>>) {
    let Some(orient) = mark.as_mut().and_then(|m| m.get_mut("orient")) else {
        return;
    };
    let flipped = match orient.as_str() {
        Some("horizontal") => "vertical",
        Some("vertical") => "horizontal",
        _ => return,
    };
    *orient = json!(flipped);
}
