//! Plot options
//!
//! Every plot builder accepts a JSON object of options. The accepted options
//! are described by [`OptionDescriptor`]s drawn from a static registry
//! (see [`registry`]) plus builder specific extras:
//!
//! ```rust,ignore
//! let set = options::take(&["width", "height", "color_by"], HISTOGRAM_EXTRAS)?;
//! let schema = options::to_validation_schema(&set);
//! let opts = schema.validate(&json!({"width": 300}))?;
//! let mark_opts = options::take_by_destination(&opts, &set, Destination::Mark);
//! ```
//!
//! Validation rejects unknown keys and invalid values before any
//! specification is built, and fills in defaults.

pub mod registry;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::data::json_kind;
use crate::{naming, PlotspecError, Result};

/// Validated option values, keyed by option name
pub type Options = Map<String, Value>;

/// Predicate an option value must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    Boolean,
    String,
    Number,
    PositiveNumber,
    Integer,
    PositiveInteger,
    /// Number within an inclusive range
    Range(f64, f64),
    /// One of a fixed set of strings
    OneOf(&'static [&'static str]),
    /// Any CSS color
    Color,
    /// Non-empty field name
    Field,
    Map,
    List,
    /// `true`/`false` or a list of fields
    Tooltip,
    Any,
}

impl ValueKind {
    /// Whether `value` satisfies this kind
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::PositiveNumber => value.as_f64().is_some_and(|n| n > 0.0),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::PositiveInteger => value.as_u64().is_some_and(|n| n > 0),
            ValueKind::Range(min, max) => value.as_f64().is_some_and(|n| n >= *min && n <= *max),
            ValueKind::OneOf(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
            ValueKind::Color => value
                .as_str()
                .is_some_and(|s| csscolorparser::parse(s).is_ok()),
            ValueKind::Field => value.as_str().is_some_and(|s| !s.is_empty()),
            ValueKind::Map => value.is_object(),
            ValueKind::List => value.is_array(),
            ValueKind::Tooltip => match value {
                Value::Bool(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            },
            ValueKind::Any => true,
        }
    }

    /// Human readable constraint, used in error messages and docs
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Boolean => "a boolean".to_string(),
            ValueKind::String => "a string".to_string(),
            ValueKind::Number => "a number".to_string(),
            ValueKind::PositiveNumber => "a positive number".to_string(),
            ValueKind::Integer => "an integer".to_string(),
            ValueKind::PositiveInteger => "a positive integer".to_string(),
            ValueKind::Range(min, max) => format!("a number between {} and {}", min, max),
            ValueKind::OneOf(allowed) => format!("one of {}", allowed.join(", ")),
            ValueKind::Color => "a CSS color".to_string(),
            ValueKind::Field => "a field name".to_string(),
            ValueKind::Map => "an object".to_string(),
            ValueKind::List => "a list".to_string(),
            ValueKind::Tooltip => "a boolean or a list of fields".to_string(),
            ValueKind::Any => "any value".to_string(),
        }
    }
}

/// Default value of an option; `Null` means no default
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    String(&'static str),
    Number(f64),
    Boolean(bool),
    Null,
}

impl DefaultValue {
    pub fn to_value(&self) -> Option<Value> {
        match self {
            DefaultValue::String(s) => Some(Value::String(s.to_string())),
            DefaultValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(Value::from(*n as i64))
            }
            DefaultValue::Number(n) => Some(Value::from(*n)),
            DefaultValue::Boolean(b) => Some(Value::Bool(*b)),
            DefaultValue::Null => None,
        }
    }
}

/// Documentation section an option is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    General,
    Data,
    Encoding,
    Mark,
    Layout,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Section::General => "General",
            Section::Data => "Data",
            Section::Encoding => "Encoding",
            Section::Mark => "Mark",
            Section::Layout => "Layout",
        };
        write!(f, "{}", s)
    }
}

/// Where in the specification an option ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// A property of the mark definition
    Mark,
    /// A top-level property of the specification
    Spec,
    /// Options of the encoding channel named like the option
    Encoding,
}

/// Describes one named option
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub kind: ValueKind,
    pub default: DefaultValue,
    pub section: Section,
    pub destination: Option<Destination>,
    /// Property name at the destination, the camelCased name if unset
    pub property: Option<&'static str>,
    pub required: bool,
    pub doc: &'static str,
}

impl OptionDescriptor {
    pub const fn new(name: &'static str, kind: ValueKind, section: Section, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            default: DefaultValue::Null,
            section,
            destination: None,
            property: None,
            required: false,
            doc,
        }
    }

    pub const fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub const fn to(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    pub const fn to_property(mut self, destination: Destination, property: &'static str) -> Self {
        self.destination = Some(destination);
        self.property = Some(property);
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Property name used at the destination
    pub fn property_name(&self) -> String {
        match self.property {
            Some(property) => property.to_string(),
            None => naming::to_camel_case(self.name),
        }
    }
}

/// Ordered set of option descriptors accepted by one operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionSet {
    options: Vec<OptionDescriptor>,
}

impl OptionSet {
    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.options.iter().map(|o| o.name).collect()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Markdown reference of the options, grouped by section
    pub fn docs(&self) -> String {
        let mut sections: Vec<Section> = self.options.iter().map(|o| o.section).collect();
        sections.sort();
        sections.dedup();

        let mut out = String::new();
        for section in sections {
            out.push_str(&format!("### {}\n\n", section));
            out.push_str("| Option | Accepts | Default | Description |\n");
            out.push_str("|---|---|---|---|\n");
            for option in self.options.iter().filter(|o| o.section == section) {
                let default = match option.default.to_value() {
                    Some(value) => format!("`{}`", value),
                    None if option.required => "required".to_string(),
                    None => "-".to_string(),
                };
                out.push_str(&format!(
                    "| `{}` | {} | {} | {} |\n",
                    option.name,
                    option.kind.describe(),
                    default,
                    option.doc
                ));
            }
            out.push('\n');
        }
        out
    }
}

/// Pick options from the registry by name, adding `extra` descriptors.
///
/// Fails if a name is requested more than once (an extra descriptor clashing
/// with a requested name counts too) or if a name is not registered.
pub fn take(names: &[&str], extra: &[OptionDescriptor]) -> Result<OptionSet> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for name in names.iter().copied().chain(extra.iter().map(|o| o.name)) {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    if !duplicates.is_empty() {
        return Err(PlotspecError::DuplicateOptions(duplicates));
    }

    let mut options = Vec::with_capacity(names.len() + extra.len());
    for name in names {
        let descriptor = registry::lookup(name)
            .ok_or_else(|| PlotspecError::UnknownOption(name.to_string()))?;
        options.push(*descriptor);
    }
    options.extend_from_slice(extra);
    Ok(OptionSet { options })
}

/// One entry of a validation [`Schema`]
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub name: &'static str,
    pub kind: ValueKind,
    pub default: Option<Value>,
    pub required: bool,
}

/// Validation view of an [`OptionSet`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

/// Build a validation schema, keeping only what validation needs
pub fn to_validation_schema(set: &OptionSet) -> Schema {
    Schema {
        entries: set
            .iter()
            .map(|o| SchemaEntry {
                name: o.name,
                kind: o.kind,
                default: o.default.to_value(),
                required: o.required,
            })
            .collect(),
    }
}

impl Schema {
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Validate caller options.
    ///
    /// `null` stands for "no options" and null values for unset options.
    /// The result holds every set option and every default, in schema order.
    pub fn validate(&self, value: &Value) -> Result<Options> {
        let given = match value {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            other => {
                return Err(PlotspecError::Options(format!(
                    "options must be an object, got {}",
                    json_kind(other)
                )))
            }
        };

        if let Some(unknown) = given
            .keys()
            .find(|key| !self.entries.iter().any(|e| e.name == key.as_str()))
        {
            let mut known: Vec<&str> = self.entries.iter().map(|e| e.name).collect();
            known.sort_unstable();
            return Err(PlotspecError::Options(format!(
                "unknown option '{}', expected one of: {}",
                unknown,
                known.join(", ")
            )));
        }

        let mut validated = Options::new();
        for entry in &self.entries {
            match given.get(entry.name) {
                Some(value) if !value.is_null() => {
                    if !entry.kind.accepts(value) {
                        return Err(PlotspecError::Options(format!(
                            "option '{}' must be {}, got {}",
                            entry.name,
                            entry.kind.describe(),
                            value
                        )));
                    }
                    validated.insert(entry.name.to_string(), value.clone());
                }
                _ => match &entry.default {
                    Some(default) => {
                        validated.insert(entry.name.to_string(), default.clone());
                    }
                    None if entry.required => {
                        return Err(PlotspecError::Options(format!(
                            "missing required option '{}'",
                            entry.name
                        )))
                    }
                    None => {}
                },
            }
        }

        tracing::debug!(count = validated.len(), "Validated options");
        Ok(validated)
    }
}

/// Options routed to `destination`, keyed by their destination property name
pub fn take_by_destination(options: &Options, set: &OptionSet, destination: Destination) -> Options {
    set.iter()
        .filter(|o| o.destination == Some(destination))
        .filter_map(|o| {
            options
                .get(o.name)
                .map(|value| (o.property_name(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EXTRAS: &[OptionDescriptor] = &[
        OptionDescriptor::new("maxbins", ValueKind::PositiveInteger, Section::Data, "Bins")
            .with_default(DefaultValue::Number(10.0)),
        OptionDescriptor::new("mode", ValueKind::OneOf(&["a", "b"]), Section::Layout, "Mode")
            .required(),
    ];

    #[test]
    fn test_take_rejects_duplicates() {
        let err = take(&["width", "width", "height", "height"], &[]).unwrap_err();
        assert_eq!(
            err,
            PlotspecError::DuplicateOptions(vec!["width".to_string(), "height".to_string()])
        );
        assert!(err.to_string().contains("width, height"));
    }

    #[test]
    fn test_take_rejects_extra_clashing_with_name() {
        let clash = [OptionDescriptor::new("width", ValueKind::Number, Section::Layout, "")];
        let err = take(&["width"], &clash).unwrap_err();
        assert!(matches!(err, PlotspecError::DuplicateOptions(names) if names == vec!["width"]));
    }

    #[test]
    fn test_take_rejects_unknown_names() {
        let err = take(&["width", "sparkle"], &[]).unwrap_err();
        assert_eq!(err, PlotspecError::UnknownOption("sparkle".to_string()));
    }

    #[test]
    fn test_take_keeps_order_and_extras() {
        let set = take(&["height", "width"], EXTRAS).unwrap();
        assert_eq!(set.names(), vec!["height", "width", "maxbins", "mode"]);
    }

    #[test]
    fn test_validate_fills_defaults_and_checks_required() {
        let schema = to_validation_schema(&take(&["width"], EXTRAS).unwrap());

        let opts = schema.validate(&json!({"mode": "a"})).unwrap();
        assert_eq!(opts.get("maxbins"), Some(&json!(10)));
        assert_eq!(opts.get("mode"), Some(&json!("a")));
        assert!(opts.get("width").is_none());

        let err = schema.validate(&Value::Null).unwrap_err();
        assert!(err.to_string().contains("missing required option 'mode'"));
    }

    #[test]
    fn test_validate_rejects_unknown_and_invalid_values() {
        let schema = to_validation_schema(&take(&["width", "point_color"], &[]).unwrap());

        let err = schema.validate(&json!({"widht": 100})).unwrap_err();
        assert!(matches!(err, PlotspecError::Options(_)));
        assert!(err.to_string().contains("unknown option 'widht'"));

        let err = schema.validate(&json!({"width": -1})).unwrap_err();
        assert!(err.to_string().contains("'width' must be a positive number"));

        let err = schema.validate(&json!({"point_color": "not-a-color"})).unwrap_err();
        assert!(err.to_string().contains("a CSS color"));

        assert!(schema.validate(&json!({"point_color": "#ff8800"})).is_ok());
        assert!(schema.validate(&json!([1])).is_err());
    }

    #[test]
    fn test_null_values_are_unset() {
        let schema = to_validation_schema(&take(&["width"], EXTRAS).unwrap());
        let opts = schema
            .validate(&json!({"width": null, "maxbins": null, "mode": "b"}))
            .unwrap();
        assert!(opts.get("width").is_none());
        assert_eq!(opts.get("maxbins"), Some(&json!(10)));
    }

    #[test]
    fn test_take_by_destination_uses_property_names() {
        let set = take(&["width", "point_size", "fill_opacity", "title"], &[]).unwrap();
        let opts = to_validation_schema(&set)
            .validate(&json!({"width": 200, "point_size": 30, "fill_opacity": 0.3, "title": "T"}))
            .unwrap();

        let mark = take_by_destination(&opts, &set, Destination::Mark);
        assert_eq!(mark.get("size"), Some(&json!(30)));
        assert_eq!(mark.get("fillOpacity"), Some(&json!(0.3)));
        assert_eq!(mark.len(), 2);

        let spec = take_by_destination(&opts, &set, Destination::Spec);
        assert_eq!(spec.get("width"), Some(&json!(200)));
        assert_eq!(spec.get("title"), Some(&json!("T")));
    }

    #[test]
    fn test_value_kinds() {
        assert!(ValueKind::Range(0.0, 1.0).accepts(&json!(0.5)));
        assert!(!ValueKind::Range(0.0, 1.0).accepts(&json!(1.5)));
        assert!(ValueKind::Tooltip.accepts(&json!(["a", "b"])));
        assert!(!ValueKind::Tooltip.accepts(&json!([1])));
        assert!(ValueKind::PositiveInteger.accepts(&json!(3)));
        assert!(!ValueKind::PositiveInteger.accepts(&json!(3.5)));
        assert!(!ValueKind::Field.accepts(&json!("")));
    }

    #[test]
    fn test_docs_group_by_section() {
        let set = take(&["width", "point_size"], EXTRAS).unwrap();
        let docs = set.docs();
        assert!(docs.contains("### Mark"));
        assert!(docs.contains("### Layout"));
        assert!(docs.contains("| `maxbins` | a positive integer | `10` |"));
        assert!(docs.contains("| `mode` | one of a, b | required |"));
    }
}
