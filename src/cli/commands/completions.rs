//! Shell completions generation.
//!
//! The `scriptenv completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::platform::LAUNCHER_NAME;
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Render the completion script for the configured shell.
    pub fn render(&self) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, LAUNCHER_NAME, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        ui.output(self.render().trim_end());
        Ok(CommandResult::success())
    }
}
