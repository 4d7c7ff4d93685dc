//! List command implementation.
//!
//! The `scriptenv list` command shows cached environments, least recently
//! used first.

use crate::cache::{CacheEntry, EnvironmentCache};
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::platform::Platform;
use crate::ui::theme::ScriptEnvTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: &CommandContext, args: ListArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cache =
            EnvironmentCache::read(&self.context.cache_root, self.context.settings.cache_size)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(cache.entries()).map_err(anyhow::Error::from)?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if cache.is_empty() {
            ui.message(&format!(
                "No cached environments in {}",
                cache.root().display()
            ));
            return Ok(CommandResult::success());
        }

        let theme = ScriptEnvTheme::detect();
        for entry in cache.entries() {
            ui.output(&render_entry(entry, self.context.platform, &theme));
        }
        ui.message(&format!(
            "{} of {} environments in use",
            cache.len(),
            cache.capacity()
        ));

        Ok(CommandResult::success())
    }
}

/// One environment: name, version requirement, dependencies and interpreter.
pub fn render_entry(entry: &CacheEntry, platform: Platform, theme: &ScriptEnvTheme) -> String {
    let dependencies = if entry.spec.dependencies().is_empty() {
        theme.dim.apply_to("(no dependencies)").to_string()
    } else {
        entry.spec.dependencies().join(", ")
    };

    format!(
        "{} {}\n  {}\n  {}",
        theme.key.apply_to(entry.name()),
        theme.info.apply_to(entry.spec.version_requirement()),
        dependencies,
        theme
            .dim
            .apply_to(entry.interpreter_path(platform).display().to_string()),
    )
}
