//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::PathBuf;

/// scriptenv - Run single-file Python scripts in cached environments.
#[derive(Debug, Parser)]
#[command(name = "scriptenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Maximum number of cached environments for this invocation
    #[arg(
        long,
        env = "SCRIPTENV_CACHE_SIZE",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub cache_size: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a script with the environment its metadata asks for
    Run(RunArgs),

    /// Print the interpreter a script would run under
    Resolve(ResolveArgs),

    /// List cached environments
    List(ListArgs),

    /// Delete all cached environments
    ClearCache(ClearCacheArgs),

    /// Show or change saved settings
    Settings(SettingsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Script to run
    pub script: PathBuf,

    /// Arguments passed through to the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Script to resolve
    pub script: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear-cache` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ClearCacheArgs {
    /// Also remove the saved settings
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `settings` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SettingsArgs {
    /// Set the maximum number of cached environments
    #[arg(long = "cache-size", value_parser = clap::value_parser!(u32).range(1..))]
    pub cache_size: Option<u32>,

    /// Set whether status messages are suppressed by default
    #[arg(long, value_name = "BOOL")]
    pub quiet_mode: Option<bool>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
