//! core::writer
//!
//! Standard file output for top-level records.
//!
//! Each [`CoreRecord`] is written to its own file named after its schema
//! identifier, optionally prefixed: `<prefix>_<id>.json`. Writes are atomic
//! (temp file in the same directory, then rename) so a reader never sees a
//! half-written record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::codec::{to_text_with, CodecError, TextOptions};
use crate::core::schema::{CoreRecord, RecordSchema};

/// Errors from writing record files.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid file prefix '{0}': must be non-empty and contain no path separators")]
    InvalidPrefix(String),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Check that a prefix can be used in a file name.
pub fn validate_prefix(prefix: &str) -> Result<(), WriteError> {
    if prefix.is_empty() || prefix.contains(['/', '\\']) || prefix == "." || prefix == ".." {
        return Err(WriteError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// File name for a record of `schema`.
///
/// # Example
///
/// ```
/// use neurometa::core::schema::Record;
/// use neurometa::core::writer::standard_file_name;
/// use neurometa::models::instrument::Instrument;
///
/// assert_eq!(
///     standard_file_name(Some("aind_smartspim"), Instrument::SCHEMA),
///     "aind_smartspim_instrument.json"
/// );
/// assert_eq!(standard_file_name(None, Instrument::SCHEMA), "instrument.json");
/// ```
pub fn standard_file_name(prefix: Option<&str>, schema: &RecordSchema) -> String {
    match prefix {
        Some(prefix) => format!("{}_{}.json", prefix, schema.id),
        None => format!("{}.json", schema.id),
    }
}

/// Write a top-level record into `dir` under its standard file name.
///
/// Returns the path written. Creates `dir` if needed and replaces any
/// existing file.
///
/// # Errors
///
/// - `WriteError::InvalidPrefix` for an unusable prefix
/// - `WriteError::Codec` if the record cannot be serialized
/// - `WriteError::Io` on filesystem failure
pub fn write_standard_file<R: CoreRecord>(
    record: &R,
    dir: &Path,
    prefix: Option<&str>,
    options: &TextOptions,
) -> Result<PathBuf, WriteError> {
    if let Some(prefix) = prefix {
        validate_prefix(prefix)?;
    }

    let mut text = to_text_with(record, options)?;
    text.push('\n');

    let path = dir.join(standard_file_name(prefix, R::SCHEMA));
    write_atomic(&path, text.as_bytes())?;

    debug!("Wrote {} to {}", R::SCHEMA.id, path.display());
    Ok(path)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> WriteError {
    let path = path.to_path_buf();
    move |source| WriteError::Io { path, source }
}

/// Replace the file at `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);
    let mut file = fs::File::create(&temp_path).map_err(io_error(&temp_path))?;
    file.write_all(contents).map_err(io_error(&temp_path))?;
    file.sync_all().map_err(io_error(&temp_path))?;

    fs::rename(&temp_path, path).map_err(io_error(path))?;
    Ok(())
}
