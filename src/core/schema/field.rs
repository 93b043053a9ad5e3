//! core::schema::field
//!
//! Static field descriptors.
//!
//! Each record type declares a table of [`FieldDescriptor`]s in a
//! `static`. The table is the single source of truth for field order,
//! optionality, defaults and constraints; [`super::validate`] consumes it
//! generically.
//!
//! Descriptors are built with `const fn` constructors so tables can live in
//! read-only statics:
//!
//! ```
//! use neurometa::core::schema::{FieldDescriptor, FieldKind, NumericBounds, DefaultValue};
//!
//! static WAVELENGTH: FieldDescriptor = FieldDescriptor::required(
//!     "laser_wavelength",
//!     "Wavelength",
//!     FieldKind::Integer(NumericBounds::between(300.0, 1000.0)),
//! );
//! static ANGLE: FieldDescriptor = FieldDescriptor::defaulted(
//!     "imaging_angle",
//!     "Imaging angle",
//!     FieldKind::Integer(NumericBounds::NONE),
//!     DefaultValue::Int(0),
//! );
//!
//! assert!(WAVELENGTH.is_required());
//! assert!(!ANGLE.is_required());
//! ```

use std::fmt;

use serde_json::Value;

use super::record::RecordSchema;
use super::vocabulary::Vocabulary;
use crate::core::types::Clock;

/// One side of a numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// The bound value itself is allowed
    Inclusive(f64),
    /// The bound value itself is rejected
    Exclusive(f64),
}

/// Lower and upper numeric limits of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

impl NumericBounds {
    /// No limits.
    pub const NONE: NumericBounds = NumericBounds::new(None, None);

    pub const fn new(lower: Option<Bound>, upper: Option<Bound>) -> Self {
        Self { lower, upper }
    }

    /// `value >= lower`
    pub const fn at_least(lower: f64) -> Self {
        Self::new(Some(Bound::Inclusive(lower)), None)
    }

    /// `value > lower`
    pub const fn greater_than(lower: f64) -> Self {
        Self::new(Some(Bound::Exclusive(lower)), None)
    }

    /// `value <= upper`
    pub const fn at_most(upper: f64) -> Self {
        Self::new(None, Some(Bound::Inclusive(upper)))
    }

    /// `value < upper`
    pub const fn less_than(upper: f64) -> Self {
        Self::new(None, Some(Bound::Exclusive(upper)))
    }

    /// `lower <= value <= upper`
    pub const fn between(lower: f64, upper: f64) -> Self {
        Self::new(Some(Bound::Inclusive(lower)), Some(Bound::Inclusive(upper)))
    }

    /// Check if `value` lies within the bounds.
    pub fn admits(&self, value: f64) -> bool {
        let lower_ok = match self.lower {
            Some(Bound::Inclusive(lo)) => value >= lo,
            Some(Bound::Exclusive(lo)) => value > lo,
            None => true,
        };
        let upper_ok = match self.upper {
            Some(Bound::Inclusive(hi)) => value <= hi,
            Some(Bound::Exclusive(hi)) => value < hi,
            None => true,
        };
        lower_ok && upper_ok
    }

    /// Check if no limit is declared.
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

impl fmt::Display for NumericBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        match self.lower {
            Some(Bound::Inclusive(lo)) => parts.push(format!(">= {lo}")),
            Some(Bound::Exclusive(lo)) => parts.push(format!("> {lo}")),
            None => {}
        }
        match self.upper {
            Some(Bound::Inclusive(hi)) => parts.push(format!("<= {hi}")),
            Some(Bound::Exclusive(hi)) => parts.push(format!("< {hi}")),
            None => {}
        }
        if parts.is_empty() {
            write!(f, "any value")
        } else {
            write!(f, "{}", parts.join(" and "))
        }
    }
}

/// A set of record shapes sharing a literal discriminator field.
///
/// Each variant schema must declare the discriminator as a
/// [`FieldKind::Literal`] field.
#[derive(Debug)]
pub struct UnionSchema {
    /// Human-readable name used in error messages
    pub name: &'static str,
    /// Name of the tag field (e.g. `type`)
    pub discriminator: &'static str,
    /// The mutually exclusive variants
    pub variants: &'static [&'static RecordSchema],
}

impl UnionSchema {
    /// The tag value a variant declares, if any.
    pub fn tag_of(&self, variant: &RecordSchema) -> Option<&'static str> {
        variant
            .field(self.discriminator)
            .and_then(|field| match field.kind {
                FieldKind::Literal(tag) => Some(tag),
                _ => None,
            })
    }

    /// Find the variant declaring `tag`.
    pub fn variant(&self, tag: &str) -> Option<&'static RecordSchema> {
        self.variants
            .iter()
            .copied()
            .find(|variant| self.tag_of(variant) == Some(tag))
    }

    /// Every declared tag, in variant order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.variants
            .iter()
            .filter_map(|variant| self.tag_of(variant))
            .collect()
    }
}

/// Semantic type and constraint of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Free text
    String,
    /// `true` / `false`
    Bool,
    /// Whole number within bounds
    Integer(NumericBounds),
    /// Any number within bounds
    Number(NumericBounds),
    /// RFC3339 timestamp string
    Timestamp,
    /// Exactly this string (union discriminators)
    Literal(&'static str),
    /// Canonical string from a closed vocabulary
    Enum(&'static Vocabulary),
    /// Sequence with exactly `len` elements
    FixedList {
        element: &'static FieldKind,
        len: usize,
    },
    /// Sequence of any length
    List(&'static FieldKind),
    /// Nested record
    Record(&'static RecordSchema),
    /// One of several tagged record shapes
    Union(&'static UnionSchema),
    /// Open string-keyed parameter map
    Params,
}

/// Shared element kind for numeric vectors and matrices.
pub static NUMBER: FieldKind = FieldKind::Number(NumericBounds::NONE);

/// Shared element kind for lists of free text.
pub static TEXT: FieldKind = FieldKind::String;

impl FieldKind {
    /// Short name of the JSON shape this kind expects.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Literal(_) | FieldKind::Enum(_) => "string",
            FieldKind::Bool => "boolean",
            FieldKind::Integer(_) => "integer",
            FieldKind::Number(_) => "number",
            FieldKind::Timestamp => "timestamp",
            FieldKind::FixedList { .. } | FieldKind::List(_) => "list",
            FieldKind::Record(_) | FieldKind::Union(_) => "record",
            FieldKind::Params => "parameter map",
        }
    }

    /// Human-readable description including constraints.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Integer(bounds) if !bounds.is_unbounded() => {
                format!("integer ({bounds})")
            }
            FieldKind::Number(bounds) if !bounds.is_unbounded() => format!("number ({bounds})"),
            FieldKind::Literal(tag) => format!("\"{tag}\""),
            FieldKind::Enum(vocabulary) => format!("enum {}", vocabulary.name),
            FieldKind::FixedList { element, len } => format!("{}[{len}]", element.describe()),
            FieldKind::List(element) => format!("list<{}>", element.describe()),
            FieldKind::Record(schema) => format!("record {}", schema.id),
            FieldKind::Union(union) => format!("union {} ({})", union.name, union.tags().join(" | ")),
            other => other.type_name().to_string(),
        }
    }
}

/// A static default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// `[]`
    EmptyList,
    /// `{}`
    EmptyParams,
    /// The construction clock's current time
    Now,
}

impl DefaultValue {
    /// Produce the JSON value for this default.
    pub fn materialize(&self, clock: &dyn Clock) -> Value {
        match self {
            DefaultValue::Str(s) => Value::String((*s).to_string()),
            DefaultValue::Int(i) => Value::from(*i),
            DefaultValue::Float(x) => Value::from(*x),
            DefaultValue::Bool(b) => Value::Bool(*b),
            DefaultValue::EmptyList => Value::Array(Vec::new()),
            DefaultValue::EmptyParams => Value::Object(serde_json::Map::new()),
            DefaultValue::Now => Value::String(clock.now().to_string()),
        }
    }

    /// Check whether `value` equals this default.
    ///
    /// `Now` never matches: a timestamp captured at construction is data.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (DefaultValue::Str(s), Value::String(v)) => v == s,
            (DefaultValue::Int(i), Value::Number(n)) => n.as_i64() == Some(*i),
            (DefaultValue::Float(x), Value::Number(n)) => n.as_f64() == Some(*x),
            (DefaultValue::Bool(b), Value::Bool(v)) => v == b,
            (DefaultValue::EmptyList, Value::Array(items)) => items.is_empty(),
            (DefaultValue::EmptyParams, Value::Object(map)) => map.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Str(s) => write!(f, "\"{s}\""),
            DefaultValue::Int(i) => write!(f, "{i}"),
            DefaultValue::Float(x) => write!(f, "{x}"),
            DefaultValue::Bool(b) => write!(f, "{b}"),
            DefaultValue::EmptyList => write!(f, "[]"),
            DefaultValue::EmptyParams => write!(f, "{{}}"),
            DefaultValue::Now => write!(f, "now"),
        }
    }
}

/// Whether a field must be supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    /// Absent → `MissingField`
    Required,
    /// Absent → explicit `null`
    Optional,
    /// Absent → the default
    Default(DefaultValue),
}

/// Static metadata about one record field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Key in the interchange text
    pub name: &'static str,
    /// Short human-readable title
    pub title: &'static str,
    /// Longer explanation, if any
    pub description: Option<&'static str>,
    /// Semantic type and constraint
    pub kind: FieldKind,
    /// Optionality and default
    pub presence: Presence,
}

impl FieldDescriptor {
    /// A field that must always be supplied.
    pub const fn required(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            title,
            description: None,
            kind,
            presence: Presence::Required,
        }
    }

    /// A field that may be `null`.
    pub const fn optional(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            title,
            description: None,
            kind,
            presence: Presence::Optional,
        }
    }

    /// A field that falls back to `default` when absent.
    pub const fn defaulted(
        name: &'static str,
        title: &'static str,
        kind: FieldKind,
        default: DefaultValue,
    ) -> Self {
        Self {
            name,
            title,
            description: None,
            kind,
            presence: Presence::Default(default),
        }
    }

    /// Attach a longer description.
    pub const fn described(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    /// Check if the field has neither a default nor a null fallback.
    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    /// The declared default, if any.
    pub fn default(&self) -> Option<DefaultValue> {
        match self.presence {
            Presence::Default(default) => Some(default),
            _ => None,
        }
    }
}
