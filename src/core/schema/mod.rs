//! core::schema
//!
//! The validated-record framework.
//!
//! # Modules
//!
//! - [`record`] - [`RecordSchema`], the [`Record`] trait and construction
//! - [`field`] - Static field descriptors and constraint kinds
//! - [`validate`] - The generic validation routine
//! - [`vocabulary`] - Closed vocabularies and [`define_vocabulary!`](crate::define_vocabulary)
//! - [`params`] - Open parameter maps
//! - [`errors`] - Issue taxonomy and the aggregated [`ValidationError`]

pub mod errors;
pub mod field;
pub mod params;
pub mod record;
pub mod validate;
pub mod vocabulary;

pub use errors::{FieldIssue, IssueKind, ValidationError};
pub use field::{
    Bound, DefaultValue, FieldDescriptor, FieldKind, NumericBounds, Presence, UnionSchema, NUMBER,
    TEXT,
};
pub use params::{ParamValue, Params};
pub use record::{construct, construct_with, CoreRecord, Record, RecordSchema};
pub use validate::{validate_value, Validator};
pub use vocabulary::{Vocabulary, VocabularyError};
