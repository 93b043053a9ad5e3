//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves paths and configuration through the [`Context`]
//! 2. Calls into the library to read, validate or write records
//! 3. Formats and displays output
//!
//! Handlers return `anyhow::Result`; library errors gain context here.

mod completion;
mod config_cmd;
mod describe;
mod example;
mod normalize;
mod validate;
mod vocab;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use describe::describe;
pub use example::example;
pub use normalize::normalize;
pub use validate::validate;
pub use vocab::vocab;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Validate { files } => validate::validate(ctx, &files),
        Command::Normalize {
            file,
            write,
            compact,
            omit_defaults,
        } => normalize::normalize(ctx, &file, write, compact, omit_defaults),
        Command::Describe { schema } => describe::describe(schema.as_deref()),
        Command::Vocab { name } => vocab::vocab(name.as_deref()),
        Command::Example {
            name,
            prefix,
            output_dir,
        } => example::example(ctx, name, prefix.as_deref(), output_dir.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value, global } => {
                config_cmd::set(ctx, &key, &value, global)
            }
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
