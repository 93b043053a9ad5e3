//! core::schema::record
//!
//! The record abstraction every schema type implements.
//!
//! A record type pairs a plain Rust struct (serde derives, declaration
//! order equal to its descriptor table) with a static [`RecordSchema`].
//! Construction always goes through [`construct`]: the input object is
//! validated and normalized against the schema first, and only then
//! deserialized into the struct.
//!
//! # Example
//!
//! ```
//! use neurometa::core::schema::Record;
//! use neurometa::models::tile::Channel;
//! use serde_json::json;
//!
//! let channel = Channel::from_fields(json!({
//!     "channel_name": "488",
//!     "laser_wavelength": 488,
//!     "laser_power": 150.0,
//!     "filter_wheel_index": 0,
//! }))
//! .unwrap();
//! assert_eq!(channel.laser_wavelength, 488);
//!
//! let err = Channel::from_fields(json!({"channel_name": "488"})).unwrap_err();
//! assert!(err.has("laser_wavelength", "missing_field"));
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::errors::{IssueKind, ValidationError};
use super::field::FieldDescriptor;
use super::validate::validate_value;
use crate::core::types::{Clock, FieldPath, SchemaVersion, SystemClock};

/// Static identity and field table of one record type.
#[derive(Debug)]
pub struct RecordSchema {
    /// Schema identifier, also the `kind` in interchange text
    pub id: &'static str,
    /// Schema version stamped on serialized output
    pub version: SchemaVersion,
    /// Short human-readable title
    pub title: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Fields in declaration order
    pub fields: &'static [FieldDescriptor],
}

impl RecordSchema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    /// Names of the fields that must always be supplied.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.is_required())
            .map(|field| field.name)
            .collect()
    }
}

/// A validated record type.
pub trait Record: Serialize + DeserializeOwned {
    /// The record's static schema.
    const SCHEMA: &'static RecordSchema;

    /// Construct from a JSON object of field values.
    ///
    /// # Errors
    ///
    /// Returns every failed field at once.
    fn from_fields(input: Value) -> Result<Self, ValidationError> {
        construct(input)
    }

    /// Re-check a record built directly with a struct literal.
    fn validate(&self) -> Result<(), ValidationError> {
        let value = serde_json::to_value(self).map_err(|_| unrepresentable(Self::SCHEMA))?;
        validate_value(Self::SCHEMA, &value, &SystemClock).map(|_| ())
    }
}

/// A record that is written to its own interchange file.
pub trait CoreRecord: Record {}

/// Construct a record, using the system clock for `now` defaults.
pub fn construct<R: Record>(input: Value) -> Result<R, ValidationError> {
    construct_with(input, &SystemClock)
}

/// Construct a record with an explicit source of "now".
pub fn construct_with<R: Record>(input: Value, clock: &dyn Clock) -> Result<R, ValidationError> {
    let schema = R::SCHEMA;
    debug!("Constructing {} v{}", schema.id, schema.version);

    let normalized = validate_value(schema, &input, clock)?;
    trace!("Normalized {}: {}", schema.id, normalized);

    serde_json::from_value(normalized).map_err(|e| {
        debug!("{} passed validation but did not deserialize: {}", schema.id, e);
        unrepresentable(schema)
    })
}

fn unrepresentable(schema: &RecordSchema) -> ValidationError {
    ValidationError::single(
        schema.id,
        FieldPath::root(),
        IssueKind::Type {
            expected: "record",
            found: "value outside the representable range",
        },
    )
}
