//! core::codec
//!
//! Canonical interchange text for records.
//!
//! # Format
//!
//! A record serializes to one JSON object:
//! - `kind` - the schema identifier
//! - `schema_version` - the schema's semantic version
//! - `described_by` - URI of the published schema
//! - every field in declaration order, absent optionals as `null`
//!
//! Reading checks `kind` and `schema_version` before anything else. A
//! mismatch is reported and the body is not validated; there is no
//! implicit upgrade between versions.
//!
//! # Example
//!
//! ```
//! use neurometa::core::codec::{from_text, to_text};
//! use neurometa::core::schema::Record;
//! use neurometa::models::tile::Channel;
//! use serde_json::json;
//!
//! let channel = Channel::from_fields(json!({
//!     "channel_name": "561",
//!     "laser_wavelength": 561,
//!     "laser_power": 200.0,
//!     "filter_wheel_index": 2,
//! }))
//! .unwrap();
//!
//! let text = to_text(&channel).unwrap();
//! assert!(text.contains("\"kind\": \"channel\""));
//! assert_eq!(from_text::<Channel>(&text).unwrap(), channel);
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::core::schema::{
    construct, FieldKind, FieldIssue, IssueKind, Presence, Record, RecordSchema, ValidationError,
};
use crate::core::types::{FieldPath, SchemaVersion};

/// Base URI the `described_by` field is derived from.
pub const DEFAULT_DESCRIBED_BY_BASE: &str =
    "https://raw.githubusercontent.com/AllenNeuralDynamics/aind-data-schema/main/schemas";

/// Envelope key holding the schema identifier.
pub const KIND_KEY: &str = "kind";
/// Envelope key holding the schema version.
pub const VERSION_KEY: &str = "schema_version";
/// Envelope key holding the schema URI.
pub const DESCRIBED_BY_KEY: &str = "described_by";

/// Errors from reading or writing interchange text.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to parse interchange text: {0}")]
    Syntax(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("failed to serialize record: {0}")]
    Serialize(String),
}

/// Output settings for [`to_text_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    /// Indent the JSON output
    pub pretty: bool,
    /// Emit fields whose value equals their declared default
    pub include_defaults: bool,
    /// Base URI for `described_by`
    pub described_by_base: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            include_defaults: true,
            described_by_base: DEFAULT_DESCRIBED_BY_BASE.to_string(),
        }
    }
}

/// The identity part of interchange text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub described_by: Option<String>,
}

/// `described_by` URI for a schema.
pub fn described_by(base: &str, schema: &RecordSchema) -> String {
    format!("{}/{}", base.trim_end_matches('/'), schema.id)
}

/// Serialize with default options.
pub fn to_text<R: Record>(record: &R) -> Result<String, CodecError> {
    to_text_with(record, &TextOptions::default())
}

/// Serialize a record to canonical interchange text.
///
/// # Errors
///
/// Returns `CodecError::Serialize` if the record cannot be represented as
/// a JSON object.
pub fn to_text_with<R: Record>(record: &R, options: &TextOptions) -> Result<String, CodecError> {
    let schema = R::SCHEMA;
    let body = serde_json::to_value(record).map_err(|e| CodecError::Serialize(e.to_string()))?;
    let Value::Object(mut fields) = body else {
        return Err(CodecError::Serialize(format!(
            "{} did not serialize to an object",
            schema.id
        )));
    };

    if !options.include_defaults {
        strip_defaults(schema, &mut fields, None);
    }

    let mut text = Map::new();
    text.insert(KIND_KEY.to_string(), Value::from(schema.id));
    text.insert(VERSION_KEY.to_string(), Value::from(schema.version.to_string()));
    text.insert(
        DESCRIBED_BY_KEY.to_string(),
        Value::from(described_by(&options.described_by_base, schema)),
    );
    text.extend(fields);

    debug!("Serialized {} ({} keys)", schema.id, text.len());

    let text = Value::Object(text);
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&text)
    } else {
        serde_json::to_string(&text)
    };
    rendered.map_err(|e| CodecError::Serialize(e.to_string()))
}

/// Read only the envelope, for dispatch before full parsing.
///
/// # Errors
///
/// Returns `CodecError::Syntax` if the text is not a JSON object.
pub fn read_envelope(text: &str) -> Result<Envelope, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Syntax(e.to_string()))
}

/// Parse interchange text and re-validate it as an `R`.
///
/// # Errors
///
/// - `CodecError::Syntax` if the text is not a JSON object
/// - `CodecError::Invalid` with `SchemaKind`/`SchemaVersion` issues if the
///   envelope does not name `R`'s schema
/// - `CodecError::Invalid` with field issues if the body fails validation
pub fn from_text<R: Record>(text: &str) -> Result<R, CodecError> {
    let schema = R::SCHEMA;
    let value: Value = serde_json::from_str(text).map_err(|e| CodecError::Syntax(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(CodecError::Syntax("expected a JSON object".to_string()));
    };

    check_envelope(schema, &object)?;

    object.remove(KIND_KEY);
    object.remove(VERSION_KEY);
    object.remove(DESCRIBED_BY_KEY);

    debug!("Reading {} v{}", schema.id, schema.version);
    Ok(construct(Value::Object(object))?)
}

fn check_envelope(schema: &RecordSchema, object: &Map<String, Value>) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    let kind = object.get(KIND_KEY).and_then(Value::as_str).unwrap_or("");
    if kind != schema.id {
        issues.push(FieldIssue::new(
            FieldPath::root().field(KIND_KEY),
            IssueKind::SchemaKind {
                expected: schema.id,
                found: kind.to_string(),
            },
        ));
    }

    let found = object.get(VERSION_KEY).and_then(Value::as_str).unwrap_or("");
    let version_matches = found
        .parse::<SchemaVersion>()
        .map(|version| version == schema.version)
        .unwrap_or(false);
    if !version_matches {
        debug!(
            "Schema version mismatch for {}: found '{}', supported {}",
            schema.id, found, schema.version
        );
        issues.push(FieldIssue::new(
            FieldPath::root().field(VERSION_KEY),
            IssueKind::SchemaVersion {
                expected: schema.version,
                found: found.to_string(),
            },
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(schema.id, issues))
    }
}

/// Remove fields equal to their declared default, recursively.
///
/// Optional fields holding `null` are removed too. `keep` names a field
/// that must survive (a union discriminator).
fn strip_defaults(schema: &RecordSchema, fields: &mut Map<String, Value>, keep: Option<&str>) {
    for field in schema.fields {
        if Some(field.name) == keep {
            continue;
        }
        let Some(value) = fields.get_mut(field.name) else {
            continue;
        };
        let redundant = match field.presence {
            Presence::Default(default) => default.matches(value),
            Presence::Optional => value.is_null(),
            Presence::Required => false,
        };
        if redundant {
            fields.remove(field.name);
        } else {
            strip_nested(&field.kind, value);
        }
    }
}

fn strip_nested(kind: &FieldKind, value: &mut Value) {
    match (kind, value) {
        (FieldKind::Record(schema), Value::Object(fields)) => strip_defaults(schema, fields, None),
        (FieldKind::Union(union), Value::Object(fields)) => {
            let variant = fields
                .get(union.discriminator)
                .and_then(Value::as_str)
                .and_then(|tag| union.variant(tag));
            if let Some(variant) = variant {
                strip_defaults(variant, fields, Some(union.discriminator));
            }
        }
        (FieldKind::List(element), Value::Array(items))
        | (FieldKind::FixedList { element, .. }, Value::Array(items)) => {
            for item in items {
                strip_nested(element, item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tile::{AcquisitionTile, Channel, CoordinateTransform};
    use serde_json::json;

    fn channel() -> Channel {
        Channel::from_fields(json!({
            "channel_name": "488",
            "laser_wavelength": 488,
            "laser_power": 150.0,
            "filter_wheel_index": 1,
        }))
        .unwrap()
    }

    fn tile() -> AcquisitionTile {
        AcquisitionTile::from_fields(json!({
            "coordinate_transformations": [
                {"type": "scale", "scale": [1.8, 1.8, 2.0]},
                {"type": "translation", "translation": [0.0, 0.0, 0.0]},
            ],
            "channel": {
                "channel_name": "488",
                "laser_wavelength": 488,
                "laser_power": 150.0,
                "filter_wheel_index": 1,
            },
        }))
        .unwrap()
    }

    mod writing {
        use super::*;

        #[test]
        fn envelope_comes_first() {
            let text = to_text(&channel()).unwrap();
            let value: Value = serde_json::from_str(&text).unwrap();
            let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
            assert_eq!(
                &keys[..4],
                &["kind", "schema_version", "described_by", "channel_name"]
            );
            assert_eq!(value["kind"], json!("channel"));
            assert_eq!(
                value["described_by"],
                json!(format!("{DEFAULT_DESCRIBED_BY_BASE}/channel"))
            );
        }

        #[test]
        fn optional_fields_are_explicit_null() {
            let text = to_text(&tile()).unwrap();
            let value: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["file_name"], Value::Null);
            assert_eq!(value["notes"], Value::Null);
        }

        #[test]
        fn described_by_base_trailing_slash() {
            let options = TextOptions {
                described_by_base: "https://example.org/schemas/".into(),
                pretty: false,
                ..Default::default()
            };
            let text = to_text_with(&channel(), &options).unwrap();
            assert!(text.contains("\"described_by\":\"https://example.org/schemas/channel\""));
            assert!(!text.contains('\n'));
        }

        #[test]
        fn suppressed_defaults_are_omitted_recursively() {
            let options = TextOptions {
                include_defaults: false,
                ..Default::default()
            };
            let text = to_text_with(&tile(), &options).unwrap();
            let value: Value = serde_json::from_str(&text).unwrap();
            let object = value.as_object().unwrap();

            assert!(!object.contains_key("imaging_angle"));
            assert!(!object.contains_key("imaging_angle_unit"));
            assert!(!object.contains_key("notes"));
            assert!(!value["channel"]
                .as_object()
                .unwrap()
                .contains_key("laser_wavelength_unit"));
            assert_eq!(value["coordinate_transformations"][0]["type"], json!("scale"));
        }

        #[test]
        fn suppressed_text_reads_back_equal() {
            let options = TextOptions {
                include_defaults: false,
                ..Default::default()
            };
            let original = tile();
            let text = to_text_with(&original, &options).unwrap();
            assert_eq!(from_text::<AcquisitionTile>(&text).unwrap(), original);
        }
    }

    mod reading {
        use super::*;

        #[test]
        fn roundtrip() {
            let original = tile();
            let parsed: AcquisitionTile = from_text(&to_text(&original).unwrap()).unwrap();
            assert_eq!(parsed, original);
            assert_eq!(
                parsed.coordinate_transformations[0],
                CoordinateTransform::Scale {
                    scale: [1.8, 1.8, 2.0]
                }
            );
        }

        #[test]
        fn malformed_json_is_syntax_error() {
            assert!(matches!(
                from_text::<Channel>("{not json"),
                Err(CodecError::Syntax(_))
            ));
            assert!(matches!(
                from_text::<Channel>("[1, 2]"),
                Err(CodecError::Syntax(_))
            ));
        }

        #[test]
        fn version_mismatch_is_reported_alone() {
            let text = to_text(&channel())
                .unwrap()
                .replace(&Channel::SCHEMA.version.to_string(), "99.0.0")
                .replace("\"laser_power\": 150.0", "\"laser_power\": 9999.0");

            let Err(CodecError::Invalid(err)) = from_text::<Channel>(&text) else {
                panic!("expected validation error");
            };
            assert_eq!(err.issues.len(), 1);
            assert_eq!(
                err.issues[0].kind,
                IssueKind::SchemaVersion {
                    expected: Channel::SCHEMA.version,
                    found: "99.0.0".into()
                }
            );
        }

        #[test]
        fn wrong_kind_is_reported() {
            let text = to_text(&channel()).unwrap();
            let Err(CodecError::Invalid(err)) = from_text::<AcquisitionTile>(&text) else {
                panic!("expected validation error");
            };
            assert!(err.has("kind", "schema_kind"));
            assert!(!err.has("channel_name", "unknown_field"));
        }

        #[test]
        fn body_is_revalidated() {
            let text = to_text(&channel())
                .unwrap()
                .replace("\"laser_wavelength\": 488", "\"laser_wavelength\": 1200");
            let Err(CodecError::Invalid(err)) = from_text::<Channel>(&text) else {
                panic!("expected validation error");
            };
            assert!(err.has("laser_wavelength", "range"));
        }

        #[test]
        fn envelope_only() {
            let text = to_text(&channel()).unwrap();
            let envelope = read_envelope(&text).unwrap();
            assert_eq!(envelope.kind, "channel");
            assert_eq!(envelope.schema_version, Channel::SCHEMA.version.to_string());

            let empty = read_envelope("{}").unwrap();
            assert_eq!(empty.kind, "");
        }
    }
}
