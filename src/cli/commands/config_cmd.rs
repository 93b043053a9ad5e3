//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::Context;
use crate::core::config::{Config, CONFIG_KEYS};
use crate::ui::output;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = ctx.config()?;

    // Unset keys exit silently
    if let Some(value) = config.get(key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value in the project or global scope.
pub fn set(ctx: &Context, key: &str, value: &str, global: bool) -> Result<()> {
    let config = ctx.config()?;

    let path = if global {
        let mut scope = config.global;
        scope.set(key, value)?;
        Config::write_global(&scope).context("Failed to write global config")?
    } else {
        let mut scope = config.project.unwrap_or_default();
        scope.set(key, value)?;
        Config::write_project(&ctx.cwd()?, &scope).context("Failed to write project config")?
    };

    output::success(format!("Set {} = {}", key, value), ctx.verbosity());
    debug!("Wrote {}", path.display());
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;

    if let Some(path) = config.global_config_loaded_from() {
        debug!("global config: {}", path.display());
    }
    if let Some(path) = config.project_config_loaded_from() {
        debug!("project config: {}", path.display());
    }

    println!("# Configuration");
    for key in CONFIG_KEYS {
        match config.get(key)? {
            Some(value) => println!("{} = {}", key, value),
            None => println!("{} = (not set)", key),
        }
    }

    Ok(())
}
