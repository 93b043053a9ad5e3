//! core::schema::errors
//!
//! Validation issue taxonomy.
//!
//! Every failed construction yields exactly one [`ValidationError`] that
//! lists every offending field, not just the first. Each entry pairs a
//! [`FieldPath`] with an [`IssueKind`].

use std::fmt;

use thiserror::Error;

use super::field::NumericBounds;
use crate::core::types::{FieldPath, SchemaVersion};

/// Why a single field failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssueKind {
    #[error("field required")]
    MissingField,

    #[error("value {value} is outside {bounds}")]
    Range { value: f64, bounds: NumericBounds },

    #[error("expected exactly {expected} elements, got {found}")]
    Length { expected: usize, found: usize },

    #[error("'{value}' is not a valid {vocabulary}")]
    Enum {
        vocabulary: &'static str,
        value: String,
    },

    #[error("{}", union_message(.union, .tag, .matched))]
    UnionMatch {
        union: &'static str,
        tag: Option<String>,
        matched: usize,
    },

    #[error("unsupported schema version '{found}', supported: {expected}")]
    SchemaVersion {
        expected: SchemaVersion,
        found: String,
    },

    #[error("invalid kind '{found}', expected '{expected}'")]
    SchemaKind {
        expected: &'static str,
        found: String,
    },

    #[error("expected {expected}, got {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected '{expected}', got '{found}'")]
    Literal {
        expected: &'static str,
        found: String,
    },

    #[error("unknown field")]
    UnknownField,
}

fn union_message(union: &str, tag: &Option<String>, matched: &usize) -> String {
    match (tag, *matched) {
        (Some(tag), _) => format!("'{tag}' is not a variant of {union}"),
        (None, 0) => format!("value matches no variant of {union}"),
        (None, matched) => {
            format!("value matches {matched} variants of {union}, expected exactly one")
        }
    }
}

impl IssueKind {
    /// Stable machine-readable code for this issue.
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::MissingField => "missing_field",
            IssueKind::Range { .. } => "range",
            IssueKind::Length { .. } => "length",
            IssueKind::Enum { .. } => "enum",
            IssueKind::UnionMatch { .. } => "union_match",
            IssueKind::SchemaVersion { .. } => "schema_version",
            IssueKind::SchemaKind { .. } => "schema_kind",
            IssueKind::Type { .. } => "type",
            IssueKind::Literal { .. } => "literal",
            IssueKind::UnknownField => "unknown_field",
        }
    }
}

/// One failed field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Where the failure occurred
    pub path: FieldPath,
    /// What went wrong
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(path: FieldPath, kind: IssueKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Aggregated failure of one record construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Schema identifier of the record being constructed
    pub record: &'static str,
    /// Every failed field, in discovery order
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Build an error from collected issues.
    pub fn new(record: &'static str, issues: Vec<FieldIssue>) -> Self {
        Self { record, issues }
    }

    /// Build an error holding a single issue.
    pub fn single(record: &'static str, path: FieldPath, kind: IssueKind) -> Self {
        Self::new(record, vec![FieldIssue::new(path, kind)])
    }

    /// Issues recorded at exactly `path` (rendered form, e.g. `channel.laser_power`).
    pub fn issues_at(&self, path: &str) -> Vec<&IssueKind> {
        self.issues
            .iter()
            .filter(|issue| issue.path.to_string() == path)
            .map(|issue| &issue.kind)
            .collect()
    }

    /// Check whether an issue with `code` was recorded at `path`.
    pub fn has(&self, path: &str, code: &str) -> bool {
        self.issues_at(path).iter().any(|kind| kind.code() == code)
    }

    /// Paths of every issue, rendered.
    pub fn paths(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.path.to_string()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        write!(
            f,
            "{} failed validation with {} issue{}",
            self.record,
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
