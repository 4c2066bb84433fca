//! Command-line interface definitions.
//!
//! Running `assistant-setup` with no subcommand performs the full bootstrap
//! sequence. The subcommands re-run parts of it against an already
//! provisioned project root.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment bootstrapper for the crypto trading assistant
#[derive(Parser, Debug)]
#[command(name = "assistant-setup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Project root the directories and config are created under
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Abort on the first package that fails to install
    #[arg(long, global = true)]
    pub strict: bool,

    /// Do not install the optional visualization tier
    #[arg(long, global = true)]
    pub skip_optional: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full bootstrap sequence (the default)
    Setup,

    /// Verify the runtime and run the smoke test without installing
    Check,

    /// Inspect the configuration document
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `assistant-setup config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Check the configuration is ready for the assistant to start.
    Validate,
}
