//! validate command - Check record files against their declared schema

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::codec::CodecError;
use crate::models::registry::check_text;
use crate::ui::output;

/// Validate each file, reporting every issue. Fails if any file fails.
pub fn validate(ctx: &Context, files: &[PathBuf]) -> Result<()> {
    let verbosity = ctx.verbosity();
    let mut failed = 0;

    for file in files {
        let path = ctx.resolve(file)?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match check_text(&text) {
            Ok(record) => {
                let schema = record.schema();
                output::success(
                    format!("{}: valid {} v{}", file.display(), schema.id, schema.version),
                    verbosity,
                );
            }
            Err(CodecError::Invalid(err)) => {
                failed += 1;
                output::error(format!(
                    "{}: {} issue(s) in {}",
                    file.display(),
                    err.issues.len(),
                    err.record
                ));
                eprintln!("{}", output::format_list(&err.issues, "  "));
            }
            Err(err) => {
                failed += 1;
                output::error(format!("{}: {}", file.display(), err));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed validation", failed, files.len());
    }
    Ok(())
}
