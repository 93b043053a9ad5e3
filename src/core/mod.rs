//! core
//!
//! Core framework types, schemas, and serialization for neurometa.
//!
//! # Modules
//!
//! - [`types`] - Strong types: SchemaVersion, UtcTimestamp, Clock, FieldPath
//! - [`schema`] - The validated-record framework
//! - [`codec`] - Canonical interchange text
//! - [`writer`] - Standard file output for top-level records
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Field tables are static data consumed by one generic validator
//! - Schemas are strict and self-describing
//! - All validation is deterministic

pub mod codec;
pub mod config;
pub mod schema;
pub mod types;
pub mod writer;
