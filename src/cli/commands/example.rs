//! example command - Write a bundled example record

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::args::ExampleName;
use crate::cli::Context;
use crate::core::types::SystemClock;
use crate::core::writer::write_standard_file;
use crate::models::smartspim::{smartspim_instrument, SMARTSPIM_PREFIX};
use crate::ui::output;

/// Build the named example and write it under its standard file name.
///
/// Flags win over configuration; configuration wins over the example's
/// conventional prefix and the working directory.
pub fn example(
    ctx: &Context,
    name: ExampleName,
    prefix: Option<&str>,
    output_dir: Option<&Path>,
) -> Result<()> {
    let config = ctx.config()?;

    let dir = match output_dir.map(Path::to_path_buf).or_else(|| config.output_directory()) {
        Some(dir) => ctx.resolve(&dir)?,
        None => ctx.cwd()?,
    };
    let options = config.text_options();

    let path = match name {
        ExampleName::Smartspim => {
            let prefix = prefix
                .map(str::to_string)
                .or_else(|| config.prefix())
                .unwrap_or_else(|| SMARTSPIM_PREFIX.to_string());
            let instrument = smartspim_instrument(&SystemClock)
                .context("Failed to build the SmartSPIM instrument")?;
            write_standard_file(&instrument, &dir, Some(&prefix), &options)?
        }
    };

    output::success(format!("Wrote {}", path.display()), ctx.verbosity());
    Ok(())
}
