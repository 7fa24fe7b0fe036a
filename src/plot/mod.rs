//! Plot builders
//!
//! Each builder takes a data source, the fields to plot and a JSON object of
//! options, and returns a complete specification:
//!
//! ```rust,ignore
//! use plotspec::plot;
//! use serde_json::json;
//!
//! let spec = plot::scatter(data, "horsepower", "mpg", json!({"color_by": "origin"}))?;
//! ```
//!
//! Options are validated before anything is built, an unknown or invalid
//! option fails the whole call.

pub mod arc;
pub mod area;
pub mod bar;
pub mod candlestick;
pub mod composite;
pub mod distribution;
pub mod heatmap;
pub mod line;
pub mod ruler;
pub mod scatter;

pub use arc::{donut, pie};
pub use area::{area, streamgraph};
pub use bar::{bar, lollipop};
pub use candlestick::candlestick;
pub use composite::{jointplot, pairplot};
pub use distribution::{boxplot, density, errorband, errorbar, histogram, stripplot};
pub use heatmap::{heatmap, punchcard};
pub use line::{lineplot, step};
pub use ruler::{hruler, vruler, RulerPosition};
pub use scatter::{bubble, scatter};

use serde_json::{json, Value};

use crate::data::Data;
use crate::options::{self, Destination, OptionDescriptor, OptionSet, Options};
use crate::spec::{self, Spec, View};
use crate::{PlotspecError, Result};

/// Data driven plot kinds, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    Scatter,
    Bubble,
    Line,
    Step,
    Area,
    Streamgraph,
    Bar,
    Lollipop,
    Histogram,
    Density,
    Stripplot,
    Boxplot,
    Errorbar,
    Errorband,
    Heatmap,
    Punchcard,
    Pie,
    Donut,
    Jointplot,
    Pairplot,
    Candlestick,
}

impl PlotKind {
    pub const ALL: [PlotKind; 21] = [
        PlotKind::Scatter,
        PlotKind::Bubble,
        PlotKind::Line,
        PlotKind::Step,
        PlotKind::Area,
        PlotKind::Streamgraph,
        PlotKind::Bar,
        PlotKind::Lollipop,
        PlotKind::Histogram,
        PlotKind::Density,
        PlotKind::Stripplot,
        PlotKind::Boxplot,
        PlotKind::Errorbar,
        PlotKind::Errorband,
        PlotKind::Heatmap,
        PlotKind::Punchcard,
        PlotKind::Pie,
        PlotKind::Donut,
        PlotKind::Jointplot,
        PlotKind::Pairplot,
        PlotKind::Candlestick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "scatter",
            PlotKind::Bubble => "bubble",
            PlotKind::Line => "line",
            PlotKind::Step => "step",
            PlotKind::Area => "area",
            PlotKind::Streamgraph => "streamgraph",
            PlotKind::Bar => "bar",
            PlotKind::Lollipop => "lollipop",
            PlotKind::Histogram => "histogram",
            PlotKind::Density => "density",
            PlotKind::Stripplot => "stripplot",
            PlotKind::Boxplot => "boxplot",
            PlotKind::Errorbar => "errorbar",
            PlotKind::Errorband => "errorband",
            PlotKind::Heatmap => "heatmap",
            PlotKind::Punchcard => "punchcard",
            PlotKind::Pie => "pie",
            PlotKind::Donut => "donut",
            PlotKind::Jointplot => "jointplot",
            PlotKind::Pairplot => "pairplot",
            PlotKind::Candlestick => "candlestick",
        }
    }

    /// Names of the positional fields the builder expects
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            PlotKind::Scatter
            | PlotKind::Line
            | PlotKind::Step
            | PlotKind::Area
            | PlotKind::Errorband
            | PlotKind::Jointplot => &["x", "y"],
            PlotKind::Bubble => &["x", "y", "size"],
            PlotKind::Streamgraph => &["x", "y", "group"],
            PlotKind::Bar | PlotKind::Lollipop => &["field", "value"],
            PlotKind::Histogram
            | PlotKind::Density
            | PlotKind::Stripplot
            | PlotKind::Boxplot
            | PlotKind::Errorbar => &["field"],
            PlotKind::Heatmap => &["x", "y", "color"],
            PlotKind::Punchcard => &["x", "y", "size"],
            PlotKind::Pie | PlotKind::Donut => &["field", "category"],
            PlotKind::Pairplot => &["fields..."],
            PlotKind::Candlestick => &["timestamp", "open", "high", "low", "close"],
        }
    }
}

impl std::fmt::Display for PlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PlotKind {
    type Err = PlotspecError;

    fn from_str(s: &str) -> Result<Self> {
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                PlotspecError::InvalidSpec(format!(
                    "unknown plot kind '{}', expected one of: {}",
                    s,
                    PlotKind::ALL.map(|k| k.as_str()).join(", ")
                ))
            })
    }
}

/// Options accepted by the builder of `kind`
pub fn option_set(kind: PlotKind) -> Result<OptionSet> {
    let (names, extras) = match kind {
        PlotKind::Scatter => (scatter::SCATTER_OPTIONS, &[][..]),
        PlotKind::Bubble => (scatter::BUBBLE_OPTIONS, &[][..]),
        PlotKind::Line => (line::LINE_OPTIONS, &[][..]),
        PlotKind::Step => (line::STEP_OPTIONS, line::STEP_EXTRAS),
        PlotKind::Area => (area::AREA_OPTIONS, area::AREA_EXTRAS),
        PlotKind::Streamgraph => (area::STREAMGRAPH_OPTIONS, &[][..]),
        PlotKind::Bar => (bar::BAR_OPTIONS, bar::BAR_EXTRAS),
        PlotKind::Lollipop => (bar::LOLLIPOP_OPTIONS, &[][..]),
        PlotKind::Histogram => (distribution::HISTOGRAM_OPTIONS, distribution::HISTOGRAM_EXTRAS),
        PlotKind::Density => (distribution::DENSITY_OPTIONS, distribution::DENSITY_EXTRAS),
        PlotKind::Stripplot => (distribution::STRIPPLOT_OPTIONS, distribution::STRIPPLOT_EXTRAS),
        PlotKind::Boxplot => (distribution::BOXPLOT_OPTIONS, distribution::BOXPLOT_EXTRAS),
        PlotKind::Errorbar => (distribution::ERRORBAR_OPTIONS, distribution::ERROR_EXTRAS),
        PlotKind::Errorband => (distribution::ERRORBAND_OPTIONS, distribution::ERROR_EXTRAS),
        PlotKind::Heatmap => (heatmap::HEATMAP_OPTIONS, heatmap::HEATMAP_EXTRAS),
        PlotKind::Punchcard => (heatmap::PUNCHCARD_OPTIONS, &[][..]),
        PlotKind::Pie => (arc::PIE_OPTIONS, &[][..]),
        PlotKind::Donut => (arc::DONUT_OPTIONS, &[][..]),
        PlotKind::Jointplot => (composite::JOINTPLOT_OPTIONS, composite::JOINTPLOT_EXTRAS),
        PlotKind::Pairplot => (composite::PAIRPLOT_OPTIONS, &[][..]),
        PlotKind::Candlestick => (candlestick::CANDLESTICK_OPTIONS, candlestick::CANDLESTICK_EXTRAS),
    };
    options::take(names, extras)
}

/// Build a plot of `kind` from positional `fields`, in the order of
/// [`PlotKind::fields`].
pub fn build(kind: PlotKind, data: impl Into<Data>, fields: &[String], opts: Value) -> Result<Spec> {
    let expected = kind.fields();
    let variadic = kind == PlotKind::Pairplot;
    if (!variadic && fields.len() != expected.len()) || (variadic && fields.is_empty()) {
        return Err(PlotspecError::Options(format!(
            "{} expects fields {}, got {}",
            kind,
            expected.join(", "),
            fields.len()
        )));
    }

    let f = |i: usize| fields[i].as_str();
    match kind {
        PlotKind::Scatter => scatter(data, f(0), f(1), opts),
        PlotKind::Bubble => bubble(data, f(0), f(1), f(2), opts),
        PlotKind::Line => lineplot(data, f(0), f(1), opts),
        PlotKind::Step => step(data, f(0), f(1), opts),
        PlotKind::Area => area(data, f(0), f(1), opts),
        PlotKind::Streamgraph => streamgraph(data, f(0), f(1), f(2), opts),
        PlotKind::Bar => bar(data, f(0), f(1), opts),
        PlotKind::Lollipop => lollipop(data, f(0), f(1), opts),
        PlotKind::Histogram => histogram(data, f(0), opts),
        PlotKind::Density => density(data, f(0), opts),
        PlotKind::Stripplot => stripplot(data, f(0), opts),
        PlotKind::Boxplot => boxplot(data, f(0), opts),
        PlotKind::Errorbar => errorbar(data, f(0), opts),
        PlotKind::Errorband => errorband(data, f(0), f(1), opts),
        PlotKind::Heatmap => heatmap(data, f(0), f(1), f(2), opts),
        PlotKind::Punchcard => punchcard(data, f(0), f(1), f(2), opts),
        PlotKind::Pie => pie(data, f(0), f(1), opts),
        PlotKind::Donut => donut(data, f(0), f(1), opts),
        PlotKind::Jointplot => jointplot(data, f(0), f(1), opts),
        PlotKind::Pairplot => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            pairplot(data, &fields, opts)
        }
        PlotKind::Candlestick => candlestick(data, f(0), f(1), f(2), f(3), f(4), opts),
    }
}

/// Validated options of one builder call
pub(crate) struct Prepared {
    pub set: OptionSet,
    pub opts: Options,
}

impl Prepared {
    /// Validate `opts` against the registry options `names` plus `extra`
    pub fn validate(names: &[&str], extra: &[OptionDescriptor], opts: &Value) -> Result<Self> {
        let set = options::take(names, extra)?;
        let opts = options::to_validation_schema(&set).validate(opts)?;
        Ok(Self { set, opts })
    }

    /// Validate options, then create the base spec from `data` with the
    /// top-level options applied
    pub fn with_data(
        names: &[&str],
        extra: &[OptionDescriptor],
        data: impl Into<Data>,
        opts: &Value,
    ) -> Result<(Self, Spec)> {
        let prepared = Self::validate(names, extra, opts)?;
        let mut spec = Spec::from_data(data)?;
        for (key, value) in prepared.by_destination(Destination::Spec) {
            spec = spec.with_property(key, value);
        }
        Ok((prepared, spec))
    }

    pub fn by_destination(&self, destination: Destination) -> Options {
        options::take_by_destination(&self.opts, &self.set, destination)
    }

    /// Mark options as a JSON object
    pub fn mark_options(&self) -> Value {
        Value::Object(self.by_destination(Destination::Mark))
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.opts.get(name)?.as_str()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.opts.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.opts.get(name)?.as_f64()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.opts.get(name)
    }

    pub fn is_horizontal(&self) -> bool {
        self.str("orient") == Some("horizontal")
    }

    /// Apply the options shared by all builders to a built spec: per channel
    /// encoding options, axis titles, tooltips and zooming.
    pub fn finish(&self, spec: Spec) -> Result<Spec> {
        let mut spec = spec;
        for (channel, channel_opts) in self.by_destination(Destination::Encoding) {
            spec = spec::put_encoding_options(spec, &channel, channel_opts)?;
        }
        if let Some(title) = self.str("x_title") {
            spec = spec::put_encoding_options(spec, "x", json!({ "title": title }))?;
        }
        if let Some(title) = self.str("y_title") {
            spec = spec::put_encoding_options(spec, "y", json!({ "title": title }))?;
        }

        spec = match self.get("tooltip") {
            Some(Value::Bool(true)) => spec::put_mark_options(spec, json!({ "tooltip": true }))?,
            Some(Value::Array(fields)) => {
                spec::validate_single_or_layered_view(&spec, "tooltip")?;
                let tooltip: Vec<Value> = fields.iter().map(|f| json!({ "field": f })).collect();
                set_tooltip_list(spec, tooltip)
            }
            _ => spec,
        };

        if self.flag("zoomable") {
            spec = make_zoomable(spec);
        }
        Ok(spec)
    }
}

fn set_tooltip_list(mut spec: Spec, tooltip: Vec<Value>) -> Spec {
    if let Some(content) = spec.content_mut() {
        content
            .encoding
            .insert("tooltip".to_string(), Value::Array(tooltip));
    }
    spec
}

/// Bind the x/y scales to an interval selection. Layered views carry the
/// selection on their first layer.
fn make_zoomable(mut spec: Spec) -> Spec {
    let params = json!([{ "name": "zoom", "select": "interval", "bind": "scales" }]);
    if let View::Layered { layers, .. } = &mut spec.view {
        if let Some(first) = layers.first_mut() {
            first.props.insert("params".to_string(), params);
        }
        return spec;
    }
    spec.with_property("params", params)
}
