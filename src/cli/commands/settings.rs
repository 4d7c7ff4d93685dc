//! Settings command implementation.
//!
//! The `scriptenv settings` command updates the saved settings from its
//! flags, then prints them.

use crate::cli::args::SettingsArgs;
use crate::error::Result;
use crate::settings::Settings;
use crate::ui::theme::ScriptEnvTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The settings command implementation.
pub struct SettingsCommand {
    context: CommandContext,
    args: SettingsArgs,
}

impl SettingsCommand {
    /// Create a new settings command.
    pub fn new(context: &CommandContext, args: SettingsArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    /// Apply the command's flags to `settings`. Returns whether anything changed.
    fn apply(&self, settings: &mut Settings) -> bool {
        let before = settings.clone();
        if let Some(size) = self.args.cache_size {
            settings.cache_size = size as usize;
        }
        if let Some(quiet) = self.args.quiet_mode {
            settings.quiet = quiet;
        }
        *settings != before
    }
}

impl Command for SettingsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Saved values only; per-invocation overrides never get persisted.
        let mut settings = Settings::load(&self.context.app_root)?;

        if self.apply(&mut settings) {
            settings.save(&self.context.app_root)?;
            ui.success(&format!(
                "Saved settings to {}",
                Settings::file_path(&self.context.app_root).display()
            ));
        }

        let theme = ScriptEnvTheme::detect();
        ui.output(&theme.format_key_value("cache_size", &settings.cache_size.to_string()));
        ui.output(&theme.format_key_value("quiet", &settings.quiet.to_string()));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> CommandContext {
        CommandContext::new(Platform::Linux, temp.path(), Settings::default())
    }

    #[test]
    fn shows_defaults_without_writing() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let mut ui = MockUI::new();

        SettingsCommand::new(&ctx, SettingsArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(!Settings::file_path(&ctx.app_root).exists());
        assert_eq!(ui.outputs().len(), 2);
        assert!(ui.outputs()[0].contains("cache_size"));
        assert!(ui.outputs()[0].contains('5'));
    }

    #[test]
    fn updates_and_persists() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let mut ui = MockUI::new();

        SettingsCommand::new(
            &ctx,
            SettingsArgs {
                cache_size: Some(9),
                quiet_mode: Some(true),
            },
        )
        .execute(&mut ui)
        .unwrap();

        let saved = Settings::load(&ctx.app_root).unwrap();
        assert_eq!(saved.cache_size, 9);
        assert!(saved.quiet);
        assert!(ui.has_success("Saved settings"));
    }

    #[test]
    fn overrides_are_not_persisted() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);
        ctx.settings.cache_size = 2;

        SettingsCommand::new(
            &ctx,
            SettingsArgs {
                cache_size: None,
                quiet_mode: Some(true),
            },
        )
        .execute(&mut MockUI::new())
        .unwrap();

        let saved = Settings::load(&ctx.app_root).unwrap();
        assert_eq!(saved.cache_size, 5);
    }
}
