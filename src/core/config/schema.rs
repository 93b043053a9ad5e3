//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$NEUROMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/neurometa/config.toml`
//! 3. `~/.neurometa/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! Located at `.neurometa/config.toml` in the project directory.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., `described_by_base`
//! must be an http(s) URI, `output.prefix` must be usable in a file name).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::writer::validate_prefix;

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "described_by_base",
    "output.directory",
    "output.prefix",
    "output.pretty",
    "output.include_defaults",
];

/// Settings shared by both configuration scopes.
///
/// # Example
///
/// ```toml
/// described_by_base = "https://example.org/schemas"
///
/// [output]
/// directory = "metadata"
/// prefix = "exp1"
/// pretty = true
/// include_defaults = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeConfig {
    /// Base URI for the `described_by` field
    pub described_by_base: Option<String>,

    /// Output file defaults
    pub output: Option<OutputDefaults>,
}

/// Global configuration (user scope).
pub type GlobalConfig = ScopeConfig;

/// Project configuration (directory scope).
pub type ProjectConfig = ScopeConfig;

impl ScopeConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.described_by_base {
            validate_base(base)?;
        }

        if let Some(output) = &self.output {
            output.validate()?;
        }

        Ok(())
    }

    /// Read a key as display text. `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`CONFIG_KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let output = self.output.as_ref();
        let value = match key {
            "described_by_base" => self.described_by_base.clone(),
            "output.directory" => output
                .and_then(|o| o.directory.as_ref())
                .map(|d| d.display().to_string()),
            "output.prefix" => output.and_then(|o| o.prefix.clone()),
            "output.pretty" => output.and_then(|o| o.pretty).map(|b| b.to_string()),
            "output.include_defaults" => output
                .and_then(|o| o.include_defaults)
                .map(|b| b.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a key from text, validating the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` or `ConfigError::InvalidValue`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        match key {
            "described_by_base" => updated.described_by_base = Some(value.to_string()),
            "output.directory" => updated.output_mut().directory = Some(PathBuf::from(value)),
            "output.prefix" => updated.output_mut().prefix = Some(value.to_string()),
            "output.pretty" => updated.output_mut().pretty = Some(parse_bool(key, value)?),
            "output.include_defaults" => {
                updated.output_mut().include_defaults = Some(parse_bool(key, value)?)
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn output_mut(&mut self) -> &mut OutputDefaults {
        self.output.get_or_insert_with(OutputDefaults::default)
    }
}

/// Defaults for written record files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputDefaults {
    /// Directory record files are written to
    pub directory: Option<PathBuf>,

    /// File name prefix
    pub prefix: Option<String>,

    /// Indent JSON output
    pub pretty: Option<bool>,

    /// Emit fields equal to their default
    pub include_defaults: Option<bool>,
}

impl OutputDefaults {
    /// Validate the output defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.prefix {
            validate_prefix(prefix).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }
        Ok(())
    }
}

fn validate_base(base: &str) -> Result<(), ConfigError> {
    let rest = base
        .strip_prefix("https://")
        .or_else(|| base.strip_prefix("http://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidValue(format!(
            "described_by_base must be an http(s) URI, got '{}'",
            base
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue(format!("{} must be true or false, got '{}'", key, value))
    })
}
