//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the paths and settings every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::platform::{app_root, cache_root, Platform, LAUNCHER_NAME};
use crate::settings::Settings;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result carrying a child process exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(exit_code)
        }
    }
}

/// Host paths and effective settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub platform: Platform,
    pub home: PathBuf,
    pub app_root: PathBuf,
    pub cache_root: PathBuf,
    /// Saved settings with command-line overrides applied.
    pub settings: Settings,
}

impl CommandContext {
    /// Build the context for `home`, with no overrides applied.
    pub fn new(platform: Platform, home: impl Into<PathBuf>, settings: Settings) -> Self {
        let home = home.into();
        Self {
            platform,
            app_root: app_root(platform, &home, LAUNCHER_NAME),
            cache_root: cache_root(platform, &home, LAUNCHER_NAME),
            home,
            settings,
        }
    }

    /// Apply `--quiet` and `--cache-size` on top of the saved settings.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(size) = cli.cache_size {
            self.settings.cache_size = size as usize;
        }
        self.settings.quiet |= cli.quiet;
        self
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Get the cache root path.
    pub fn cache_root(&self) -> &Path {
        &self.context.cache_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = &self.context;
        match &cli.command {
            Commands::Run(args) => super::run::RunCommand::new(ctx, args.clone()).execute(ui),
            Commands::Resolve(args) => {
                super::resolve::ResolveCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::List(args) => super::list::ListCommand::new(ctx, args.clone()).execute(ui),
            Commands::ClearCache(args) => {
                super::clear_cache::ClearCacheCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Settings(args) => {
                super::settings::SettingsCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
