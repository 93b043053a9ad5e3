//! core::schema::validate
//!
//! The single generic validation routine.
//!
//! [`Validator`] walks a JSON value against a [`RecordSchema`] and collects
//! every [`FieldIssue`] it finds. It never stops at the first failure. On
//! the way it produces a normalized copy of the input: fields in
//! declaration order, defaults materialized, absent optionals as `null`.
//!
//! # Union resolution
//!
//! A [`FieldKind::Union`] value is resolved by its discriminator:
//!
//! - tag present and known: validated against that variant only, so any
//!   issue is reported at the nested path
//! - tag present but unknown: one `UnionMatch` issue
//! - tag absent: every variant is tried in isolation and exactly one must
//!   accept the value

use serde_json::{Map, Value};
use tracing::trace;

use super::errors::{FieldIssue, IssueKind, ValidationError};
use super::field::{FieldKind, NumericBounds, Presence, UnionSchema};
use super::record::RecordSchema;
use crate::core::types::{Clock, FieldPath, UtcTimestamp};

/// Integer fields are stored as `i64`.
const INTEGER_RANGE: NumericBounds = NumericBounds::between(i64::MIN as f64, i64::MAX as f64);

/// Validate `input` as a `schema` record and return its normalized form.
///
/// # Errors
///
/// Returns one [`ValidationError`] listing every failed field.
pub fn validate_value(
    schema: &RecordSchema,
    input: &Value,
    clock: &dyn Clock,
) -> Result<Value, ValidationError> {
    let mut validator = Validator::new(clock);
    let normalized = validator.record(schema, input, &FieldPath::root());
    validator.finish(schema.id)?;
    Ok(normalized)
}

/// Issue collector for one construction.
pub struct Validator<'c> {
    clock: &'c dyn Clock,
    issues: Vec<FieldIssue>,
}

impl<'c> Validator<'c> {
    pub fn new(clock: &'c dyn Clock) -> Self {
        Self {
            clock,
            issues: Vec::new(),
        }
    }

    /// Issues collected so far.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Consume the validator, failing if any issue was recorded.
    pub fn finish(self, record: &'static str) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(record, self.issues))
        }
    }

    fn report(&mut self, path: &FieldPath, kind: IssueKind) {
        trace!("{}: {}", path, kind);
        self.issues.push(FieldIssue::new(path.clone(), kind));
    }

    fn type_mismatch(&mut self, path: &FieldPath, expected: &'static str, found: &Value) {
        self.report(
            path,
            IssueKind::Type {
                expected,
                found: json_type(found),
            },
        );
    }

    /// Validate a record object against `schema`.
    pub fn record(&mut self, schema: &RecordSchema, input: &Value, path: &FieldPath) -> Value {
        let Some(object) = input.as_object() else {
            self.type_mismatch(path, "record", input);
            return input.clone();
        };

        let mut normalized = Map::new();
        for field in schema.fields {
            let field_path = path.field(field.name);
            let value = match (object.get(field.name), field.presence) {
                (Some(Value::Null), Presence::Optional) | (None, Presence::Optional) => Value::Null,
                (Some(Value::Null), _) => {
                    self.type_mismatch(&field_path, field.kind.type_name(), &Value::Null);
                    Value::Null
                }
                (Some(value), _) => self.value(&field.kind, value, &field_path),
                (None, Presence::Required) => {
                    self.report(&field_path, IssueKind::MissingField);
                    Value::Null
                }
                (None, Presence::Default(default)) => {
                    let value = default.materialize(self.clock);
                    self.value(&field.kind, &value, &field_path)
                }
            };
            normalized.insert(field.name.to_string(), value);
        }

        for key in object.keys() {
            if schema.field(key).is_none() {
                self.report(&path.field(key.as_str()), IssueKind::UnknownField);
            }
        }

        Value::Object(normalized)
    }

    /// Validate a single value against `kind`.
    pub fn value(&mut self, kind: &FieldKind, input: &Value, path: &FieldPath) -> Value {
        match kind {
            FieldKind::String => {
                if !input.is_string() {
                    self.type_mismatch(path, kind.type_name(), input);
                }
            }
            FieldKind::Bool => {
                if !input.is_boolean() {
                    self.type_mismatch(path, kind.type_name(), input);
                }
            }
            FieldKind::Integer(bounds) => match input {
                Value::Number(n) if n.is_i64() || n.is_u64() => {
                    let value = n.as_f64().unwrap_or(f64::NAN);
                    if n.as_i64().is_none() {
                        self.report(path, IssueKind::Range { value, bounds: INTEGER_RANGE });
                    } else if !bounds.admits(value) {
                        self.report(path, IssueKind::Range { value, bounds: *bounds });
                    }
                }
                _ => self.type_mismatch(path, kind.type_name(), input),
            },
            FieldKind::Number(bounds) => match input.as_f64() {
                Some(value) => {
                    if !bounds.admits(value) {
                        self.report(path, IssueKind::Range { value, bounds: *bounds });
                    }
                }
                None => self.type_mismatch(path, kind.type_name(), input),
            },
            FieldKind::Timestamp => match input.as_str() {
                Some(text) if UtcTimestamp::parse(text).is_ok() => {}
                Some(_) => self.report(
                    path,
                    IssueKind::Type {
                        expected: "timestamp",
                        found: "non-RFC3339 string",
                    },
                ),
                None => self.type_mismatch(path, kind.type_name(), input),
            },
            FieldKind::Literal(expected) => match input.as_str() {
                Some(text) if text == *expected => {}
                Some(text) => self.report(
                    path,
                    IssueKind::Literal {
                        expected: *expected,
                        found: text.to_string(),
                    },
                ),
                None => self.type_mismatch(path, kind.type_name(), input),
            },
            FieldKind::Enum(vocabulary) => match input.as_str() {
                Some(text) if vocabulary.contains(text) => {}
                Some(text) => self.report(
                    path,
                    IssueKind::Enum {
                        vocabulary: vocabulary.name,
                        value: text.to_string(),
                    },
                ),
                None => self.type_mismatch(path, kind.type_name(), input),
            },
            FieldKind::FixedList { element, len } => {
                let Some(items) = input.as_array() else {
                    self.type_mismatch(path, kind.type_name(), input);
                    return input.clone();
                };
                if items.len() != *len {
                    self.report(
                        path,
                        IssueKind::Length {
                            expected: *len,
                            found: items.len(),
                        },
                    );
                }
                return self.elements(element, items, path);
            }
            FieldKind::List(element) => {
                let Some(items) = input.as_array() else {
                    self.type_mismatch(path, kind.type_name(), input);
                    return input.clone();
                };
                return self.elements(element, items, path);
            }
            FieldKind::Record(schema) => return self.record(schema, input, path),
            FieldKind::Union(union) => return self.union(union, input, path),
            FieldKind::Params => self.params(input, path),
        }
        input.clone()
    }

    fn elements(&mut self, element: &FieldKind, items: &[Value], path: &FieldPath) -> Value {
        Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| self.value(element, item, &path.index(i)))
                .collect(),
        )
    }

    fn union(&mut self, union: &UnionSchema, input: &Value, path: &FieldPath) -> Value {
        let Some(object) = input.as_object() else {
            self.type_mismatch(path, "record", input);
            return input.clone();
        };

        match object.get(union.discriminator) {
            Some(Value::String(tag)) => match union.variant(tag) {
                Some(variant) => self.record(variant, input, path),
                None => {
                    self.report(
                        path,
                        IssueKind::UnionMatch {
                            union: union.name,
                            tag: Some(tag.clone()),
                            matched: 0,
                        },
                    );
                    input.clone()
                }
            },
            Some(other) => {
                self.type_mismatch(&path.field(union.discriminator), "string", other);
                input.clone()
            }
            None => {
                let accepted: Vec<Value> = union
                    .variants
                    .iter()
                    .filter_map(|variant| {
                        let mut scratch = Validator::new(self.clock);
                        let normalized = scratch.record(variant, input, path);
                        scratch.issues.is_empty().then_some(normalized)
                    })
                    .collect();

                match <[Value; 1]>::try_from(accepted) {
                    Ok([normalized]) => normalized,
                    Err(accepted) => {
                        self.report(
                            path,
                            IssueKind::UnionMatch {
                                union: union.name,
                                tag: None,
                                matched: accepted.len(),
                            },
                        );
                        input.clone()
                    }
                }
            }
        }
    }

    fn params(&mut self, input: &Value, path: &FieldPath) {
        let Some(object) = input.as_object() else {
            self.type_mismatch(path, "parameter map", input);
            return;
        };
        for (key, value) in object {
            let entry_path = path.field(key.as_str());
            match value {
                Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
                Value::Object(_) => self.params(value, &entry_path),
                Value::Array(_) | Value::Null => {
                    self.type_mismatch(&entry_path, "scalar or parameter map", value)
                }
            }
        }
    }
}

/// Short name of a JSON value's shape.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}
