//! Static registry of named options shared by the plot builders

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{DefaultValue, Destination, OptionDescriptor, Section, ValueKind};

pub const POINT_SHAPES: &[&str] = &[
    "circle",
    "square",
    "cross",
    "diamond",
    "triangle",
    "triangle-up",
    "triangle-down",
    "triangle-left",
    "triangle-right",
    "stroke",
    "arrow",
    "wedge",
];

pub const INTERPOLATIONS: &[&str] = &[
    "basis",
    "cardinal",
    "catmull-rom",
    "linear",
    "monotone",
    "natural",
    "step",
    "step-after",
    "step-before",
];

pub const AGGREGATES: &[&str] = &[
    "count", "valid", "distinct", "sum", "mean", "average", "median", "min", "max", "stdev",
    "variance", "q1", "q3",
];

pub const ORIENTATIONS: &[&str] = &["vertical", "horizontal"];

const fn channel(name: &'static str, doc: &'static str) -> OptionDescriptor {
    OptionDescriptor::new(name, ValueKind::Map, Section::Encoding, doc).to(Destination::Encoding)
}

static OPTIONS: &[OptionDescriptor] = &[
    // Layout
    OptionDescriptor::new("width", ValueKind::PositiveNumber, Section::Layout, "Width of the view in pixels")
        .to(Destination::Spec),
    OptionDescriptor::new("height", ValueKind::PositiveNumber, Section::Layout, "Height of the view in pixels")
        .to(Destination::Spec),
    OptionDescriptor::new("title", ValueKind::String, Section::Layout, "Title of the plot")
        .to(Destination::Spec),
    OptionDescriptor::new("x_title", ValueKind::String, Section::Layout, "Title of the x axis"),
    OptionDescriptor::new("y_title", ValueKind::String, Section::Layout, "Title of the y axis"),
    OptionDescriptor::new("orient", ValueKind::OneOf(ORIENTATIONS), Section::Layout, "Orientation of the plot")
        .with_default(DefaultValue::String("vertical")),
    // General
    OptionDescriptor::new("tooltip", ValueKind::Tooltip, Section::General, "Show a tooltip with the encoded fields, or the listed fields")
        .with_default(DefaultValue::Boolean(true)),
    OptionDescriptor::new("zoomable", ValueKind::Boolean, Section::General, "Allow zooming and panning the scales")
        .with_default(DefaultValue::Boolean(false)),
    // Data
    OptionDescriptor::new("color_by", ValueKind::Field, Section::Data, "Field colored by"),
    OptionDescriptor::new("shape_by", ValueKind::Field, Section::Data, "Field mapped to the point shape"),
    OptionDescriptor::new("size_by", ValueKind::Field, Section::Data, "Field mapped to the mark size"),
    OptionDescriptor::new("group_by", ValueKind::Field, Section::Data, "Field splitting the data into groups"),
    OptionDescriptor::new("aggregate", ValueKind::OneOf(AGGREGATES), Section::Data, "Aggregation of the value field"),
    // Mark
    OptionDescriptor::new("fill_opacity", ValueKind::Range(0.0, 1.0), Section::Mark, "Opacity of the mark fill")
        .to(Destination::Mark),
    OptionDescriptor::new("opacity", ValueKind::Range(0.0, 1.0), Section::Mark, "Overall opacity of the mark")
        .to(Destination::Mark),
    OptionDescriptor::new("filled", ValueKind::Boolean, Section::Mark, "Fill the mark instead of drawing its outline")
        .to(Destination::Mark),
    OptionDescriptor::new("point_size", ValueKind::PositiveNumber, Section::Mark, "Area of the points in square pixels")
        .to_property(Destination::Mark, "size"),
    OptionDescriptor::new("point_shape", ValueKind::OneOf(POINT_SHAPES), Section::Mark, "Shape of the points")
        .to_property(Destination::Mark, "shape"),
    OptionDescriptor::new("point_color", ValueKind::Color, Section::Mark, "Color of the points")
        .to_property(Destination::Mark, "color"),
    OptionDescriptor::new("line_color", ValueKind::Color, Section::Mark, "Color of the line")
        .to_property(Destination::Mark, "color"),
    OptionDescriptor::new("fill_color", ValueKind::Color, Section::Mark, "Fill color of the mark")
        .to_property(Destination::Mark, "fill"),
    OptionDescriptor::new("interpolate", ValueKind::OneOf(INTERPOLATIONS), Section::Mark, "Line interpolation method")
        .to(Destination::Mark),
    OptionDescriptor::new("stroke_width", ValueKind::PositiveNumber, Section::Mark, "Width of the stroke in pixels")
        .to(Destination::Mark),
    OptionDescriptor::new("stroke_dash", ValueKind::List, Section::Mark, "Dash pattern of the stroke, alternating dash and gap lengths")
        .to(Destination::Mark),
    OptionDescriptor::new("corner_radius", ValueKind::PositiveNumber, Section::Mark, "Radius of the rounded corners")
        .to(Destination::Mark),
    OptionDescriptor::new("clip", ValueKind::Boolean, Section::Mark, "Clip the mark to the plotting area")
        .to(Destination::Mark),
    OptionDescriptor::new("points", ValueKind::Boolean, Section::Mark, "Overlay points on the line")
        .to_property(Destination::Mark, "point"),
    OptionDescriptor::new("inner_radius", ValueKind::PositiveNumber, Section::Mark, "Inner radius of the arcs in pixels")
        .to(Destination::Mark),
    OptionDescriptor::new("color_scheme", ValueKind::String, Section::Mark, "Name of a color scheme"),
    // Encoding
    channel("x", "Options of the x channel"),
    channel("y", "Options of the y channel"),
    channel("color", "Options of the color channel"),
    channel("size", "Options of the size channel"),
    channel("shape", "Options of the shape channel"),
    channel("text", "Options of the text channel"),
    channel("theta", "Options of the theta channel"),
];

static INDEX: LazyLock<HashMap<&'static str, &'static OptionDescriptor>> =
    LazyLock::new(|| OPTIONS.iter().map(|o| (o.name, o)).collect());

/// Descriptor registered under `name`
pub fn lookup(name: &str) -> Option<&'static OptionDescriptor> {
    INDEX.get(name).copied()
}

/// All registered descriptors, in registration order
pub fn all() -> &'static [OptionDescriptor] {
    OPTIONS
}
