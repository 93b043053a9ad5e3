//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nmeta - Validate and write neuroscience metadata records
#[derive(Parser, Debug)]
#[command(name = "nmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if nmeta was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check record files against their declared schema
    #[command(
        name = "validate",
        long_about = "Check record files against their declared schema.\n\n\
            Each file is read, its `kind` and `schema_version` are checked, and \
            every field is validated. All issues in a file are reported together, \
            one per line, as `path: reason`. The exit status is non-zero if any \
            file fails.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check one file
    nmeta validate aind_smartspim_instrument.json

    # Check every record in a directory
    nmeta validate metadata/*.json"
    )]
    Validate {
        /// Record files to check
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Re-emit a record file in canonical form
    #[command(
        name = "normalize",
        long_about = "Re-emit a record file in canonical form.\n\n\
            The file is validated, then written back out with the envelope first, \
            fields in declaration order, defaults filled in and absent optional \
            fields as null. Output goes to stdout unless --write is given.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Preview the canonical form
    nmeta normalize processing.json

    # Rewrite the file in place, dropping fields equal to their default
    nmeta normalize processing.json --write --omit-defaults"
    )]
    Normalize {
        /// Record file to normalize
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Overwrite the file instead of printing
        #[arg(long)]
        write: bool,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,

        /// Omit fields equal to their declared default
        #[arg(long)]
        omit_defaults: bool,
    },

    /// List schemas or show the fields of one
    #[command(
        name = "describe",
        after_help = "\
WORKFLOW EXAMPLES:
    # List every schema
    nmeta describe

    # Show the fields of the channel record
    nmeta describe channel"
    )]
    Describe {
        /// Schema identifier
        schema: Option<String>,
    },

    /// List vocabularies or show the values of one
    #[command(
        name = "vocab",
        after_help = "\
WORKFLOW EXAMPLES:
    # List every vocabulary
    nmeta vocab

    # Show permitted manufacturers
    nmeta vocab Manufacturer"
    )]
    Vocab {
        /// Vocabulary name (case-insensitive)
        name: Option<String>,
    },

    /// Write a bundled example record
    #[command(
        name = "example",
        long_about = "Write a bundled example record.\n\n\
            The record is built through the same construction path as any other \
            input and written to its standard file name. The prefix and output \
            directory default to the configured values.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Write aind_smartspim_instrument.json in the current directory
    nmeta example smartspim

    # Write into another directory with a custom prefix
    nmeta example smartspim --output-dir metadata --prefix rig3"
    )]
    Example {
        /// Which example to write
        #[arg(value_enum)]
        name: ExampleName,

        /// File name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Directory to write into
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "View or modify nmeta configuration.\n\n\
            Project configuration is stored in .neurometa/config.toml. Global \
            configuration lives in ~/.neurometa/config.toml. Project values \
            override global ones.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    nmeta config list

    # Get a specific value
    nmeta config get output.prefix

    # Set a value for this project
    nmeta config set output.prefix exp1

    # Set a value for every project
    nmeta config set --global output.pretty false"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for nmeta commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    nmeta completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    nmeta completion zsh >> ~/.zshrc

    # Fish
    nmeta completion fish > ~/.config/fish/completions/nmeta.fish

    # PowerShell
    nmeta completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
        /// Write to the global config instead of the project config
        #[arg(long)]
        global: bool,
    },
    /// List all configuration values
    List,
}

/// Bundled example records
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleName {
    /// SmartSPIM light-sheet instrument
    Smartspim,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_requires_a_file() {
        assert!(Cli::try_parse_from(["nmeta", "validate"]).is_err());
        let cli = Cli::try_parse_from(["nmeta", "validate", "a.json", "b.json"]).unwrap();
        match cli.command {
            Command::Validate { files } => assert_eq!(files.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nmeta", "describe", "--debug", "--cwd", "/tmp"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn quiet_conflicts_with_debug() {
        assert!(Cli::try_parse_from(["nmeta", "vocab", "-q", "--debug"]).is_err());
    }

    #[test]
    fn config_set_global() {
        let cli =
            Cli::try_parse_from(["nmeta", "config", "set", "--global", "output.pretty", "false"])
                .unwrap();
        match cli.command {
            Command::Config {
                action: ConfigAction::Set { key, value, global },
            } => {
                assert_eq!(key, "output.pretty");
                assert_eq!(value, "false");
                assert!(global);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
