//! Run command implementation.
//!
//! The `scriptenv run` command resolves a script's environment and runs
//! the script in it, exiting with the script's exit code.

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::launcher::{Launcher, ProcessLauncher};
use crate::resolver::Resolution;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::resolve::system_resolver;

/// The run command implementation.
pub struct RunCommand {
    context: CommandContext,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(context: &CommandContext, args: RunArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = system_resolver(&self.context).resolve(&self.args.script, ui)?;
        launch(&ProcessLauncher, &resolution, &self.args)
    }
}

/// Launch the script under its resolved interpreter.
pub fn launch(
    launcher: &dyn Launcher,
    resolution: &Resolution,
    args: &RunArgs,
) -> Result<CommandResult> {
    let code = launcher.launch(&resolution.interpreter, &args.script, &args.args)?;
    tracing::debug!("{} exited with {}", args.script.display(), code);
    Ok(CommandResult::from_exit_code(code))
}
