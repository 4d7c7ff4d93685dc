//! Clear-cache command implementation.
//!
//! The `scriptenv clear-cache` command deletes every cached environment;
//! `--all` also removes the saved settings.

use crate::cache::clear_cache;
use crate::cli::args::ClearCacheArgs;
use crate::error::Result;
use crate::settings::Settings;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The clear-cache command implementation.
pub struct ClearCacheCommand {
    context: CommandContext,
    args: ClearCacheArgs,
}

impl ClearCacheCommand {
    /// Create a new clear-cache command.
    pub fn new(context: &CommandContext, args: ClearCacheArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for ClearCacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.context.cache_root;
        if clear_cache(root)? {
            ui.success(&format!("Cleared environment cache {}", root.display()));
        } else {
            ui.message("Environment cache is already empty");
        }

        if self.args.all && Settings::remove(&self.context.app_root)? {
            ui.success("Removed saved settings");
        }

        Ok(CommandResult::success())
    }
}
