//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! neurometa has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Directory-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$NEUROMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/neurometa/config.toml`
//! 3. `~/.neurometa/config.toml` (canonical write location)
//!
//! # Project Config Location
//!
//! `<project>/.neurometa/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use neurometa::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("described_by base: {}", config.described_by_base());
//! println!("pretty: {}", config.pretty());
//! let options = config.text_options();
//! assert_eq!(options.pretty, config.pretty());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, OutputDefaults, ProjectConfig, ScopeConfig, CONFIG_KEYS};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::codec::{TextOptions, DEFAULT_DESCRIBED_BY_BASE};

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "NEUROMETA_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically. Project config
/// overrides global config key by key.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if present)
    pub project: Option<ProjectConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads project-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global(&mut warnings)?;

        let (project, project_path) = match project_dir {
            Some(dir) => Self::load_project(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        debug!(
            "Config loaded (global: {:?}, project: {:?})",
            global_path, project_path
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global(
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $NEUROMETA_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
            warnings.push(ConfigWarning {
                message: format!("{} points to a missing file, ignoring it", CONFIG_ENV),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/neurometa/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("neurometa/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.neurometa/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".neurometa/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Load project configuration.
    fn load_project(dir: &Path) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::project_config_path(dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ScopeConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.neurometa/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".neurometa/config.toml"))
    }

    /// Get the path for project config.
    ///
    /// Returns `.neurometa/config.toml` relative to the given directory.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(".neurometa/config.toml")
    }

    /// Write global config atomically.
    pub fn write_global(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write project config atomically.
    ///
    /// Creates the `.neurometa` directory if needed.
    pub fn write_project(dir: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::project_config_path(dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically.
    fn write_config_atomic(path: &Path, config: &ScopeConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Temp file in the same directory so the rename stays atomic
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!("Wrote config to {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn output<T>(&self, pick: impl Fn(&OutputDefaults) -> Option<T>) -> Option<T> {
        let from = |scope: &ScopeConfig| scope.output.as_ref().and_then(&pick);
        self.project
            .as_ref()
            .and_then(&from)
            .or_else(|| from(&self.global))
    }

    /// Get the base URI for `described_by`.
    ///
    /// Defaults to [`DEFAULT_DESCRIBED_BY_BASE`] if not configured.
    pub fn described_by_base(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.described_by_base.as_deref())
            .or(self.global.described_by_base.as_deref())
            .unwrap_or(DEFAULT_DESCRIBED_BY_BASE)
    }

    /// Get the output directory, if configured.
    pub fn output_directory(&self) -> Option<PathBuf> {
        self.output(|o| o.directory.clone())
    }

    /// Get the output file prefix, if configured.
    pub fn prefix(&self) -> Option<String> {
        self.output(|o| o.prefix.clone())
    }

    /// Check if JSON output is indented.
    ///
    /// Defaults to `true` if not configured.
    pub fn pretty(&self) -> bool {
        self.output(|o| o.pretty).unwrap_or(true)
    }

    /// Check if fields equal to their default are written.
    ///
    /// Defaults to `true` if not configured.
    pub fn include_defaults(&self) -> bool {
        self.output(|o| o.include_defaults).unwrap_or(true)
    }

    /// Serialization options with precedence applied.
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            pretty: self.pretty(),
            include_defaults: self.include_defaults(),
            described_by_base: self.described_by_base().to_string(),
        }
    }

    /// Resolve a key across scopes, as shown by `config get`.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let project = match &self.project {
            Some(project) => project.get(key)?,
            None => None,
        };
        match project {
            Some(value) => Ok(Some(value)),
            None => self.global.get(key),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
