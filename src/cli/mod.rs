//! Command-line interface for scriptenv.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ClearCacheArgs, Cli, Commands, CompletionsArgs, ListArgs, ResolveArgs, RunArgs, SettingsArgs,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
