//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command receives the same
//! [`CommandContext`]: the host platform, the cache root, and the saved
//! settings with command-line overrides applied.

pub mod clear_cache;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod resolve;
pub mod run;
pub mod settings;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
