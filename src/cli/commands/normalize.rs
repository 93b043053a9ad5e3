//! normalize command - Re-emit a record file in canonical form

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::writer::write_atomic;
use crate::models::registry::check_text;
use crate::ui::output;

/// Validate `file` and print or rewrite its canonical text.
pub fn normalize(
    ctx: &Context,
    file: &Path,
    write: bool,
    compact: bool,
    omit_defaults: bool,
) -> Result<()> {
    let path = ctx.resolve(file)?;
    let text =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let record =
        check_text(&text).with_context(|| format!("{} is not a valid record", path.display()))?;

    let mut options = ctx.config()?.text_options();
    if compact {
        options.pretty = false;
    }
    if omit_defaults {
        options.include_defaults = false;
    }

    let mut canonical = record
        .to_text_with(&options)
        .context("Failed to serialize record")?;
    canonical.push('\n');

    if write {
        write_atomic(&path, canonical.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        output::success(format!("Normalized {}", path.display()), ctx.verbosity());
    } else {
        print!("{}", canonical);
    }

    Ok(())
}
