//! ui
//!
//! User-facing terminal output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! Command handlers print through this module so that `--quiet` and
//! `--debug` behave the same everywhere.

pub mod output;
