//! models
//!
//! Concrete record families built on [`crate::core::schema`].
//!
//! # Modules
//!
//! - [`units`] - Unit vocabularies
//! - [`device`] - Manufacturers and the generic device record
//! - [`tile`] - Channels, coordinate transforms, imaging tiles
//! - [`instrument`] - Instrument hardware (top-level)
//! - [`stimulus`] - Stimulus epochs and their parameters
//! - [`processing`] - Processing provenance (top-level)
//! - [`registry`] - Lookup of schemas and vocabularies by name
//! - [`smartspim`] - A complete SmartSPIM instrument

pub mod device;
pub mod instrument;
pub mod processing;
pub mod registry;
pub mod smartspim;
pub mod stimulus;
pub mod tile;
pub mod units;
