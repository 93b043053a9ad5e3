//! neurometa - validated metadata records for neuroscience imaging pipelines
//!
//! neurometa describes instruments, imaging tiles, stimulus epochs and
//! processing provenance as versioned, strongly typed records. Every record
//! is built from keyword data through one field-constraint layer and
//! round-trips through JSON interchange text.
//!
//! # Architecture
//!
//! - [`core`] - Record framework: schemas, validation, vocabularies, codec,
//!   file writing, configuration
//! - [`models`] - Concrete record families and the schema registry
//! - [`cli`] - The `nmeta` command-line interface
//! - [`ui`] - Terminal output helpers
//!
//! # Invariants
//!
//! 1. A record value only exists if every field passed its constraint
//! 2. Construction failures report every failed field at once
//! 3. Serialized text re-reads to an equal record

pub mod cli;
pub mod core;
pub mod models;
pub mod ui;
