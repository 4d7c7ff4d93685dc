//! Running a script under its resolved interpreter.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, ScriptEnvError};
use crate::process::command_line;

/// Runs a script with an interpreter.
pub trait Launcher {
    /// Run `interpreter script args...` and return the child's exit code.
    fn launch(&self, interpreter: &Path, script: &Path, args: &[OsString]) -> Result<i32>;
}

/// Spawns the interpreter as a child process with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, interpreter: &Path, script: &Path, args: &[OsString]) -> Result<i32> {
        let argv = std::iter::once(script.as_os_str()).chain(args.iter().map(OsString::as_os_str));
        tracing::debug!("Launching {}", command_line(interpreter, argv));

        let status = Command::new(interpreter)
            .arg(script)
            .args(args)
            .status()
            .map_err(|e| {
                ScriptEnvError::Other(anyhow::Error::new(e).context(format!(
                    "Failed to launch {}",
                    interpreter.display()
                )))
            })?;

        // Killed by a signal: report the conventional 128 + signal where known.
        Ok(status.code().unwrap_or_else(|| signal_exit_code(&status)))
    }
}

#[cfg(unix)]
fn signal_exit_code(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|s| 128 + s).unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: &std::process::ExitStatus) -> i32 {
    1
}
