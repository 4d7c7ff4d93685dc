//! Subprocess execution.
//!
//! Commands are run directly, never through a shell, so interpreter paths
//! and requirement strings containing spaces or `>` need no quoting.

use crate::error::{Result, ScriptEnvError};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Render a program and its arguments for messages.
pub fn command_line<P, I, S>(program: P, args: I) -> String
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut parts = vec![program.as_ref().to_string_lossy().to_string()];
    parts.extend(
        args.into_iter()
            .map(|arg| arg.as_ref().to_string_lossy().to_string()),
    );
    parts.join(" ")
}

/// Execute a program with arguments.
///
/// A non-zero exit is reported through [`CommandResult::success`]; only a
/// failure to spawn is an error.
pub fn execute<P, I, S>(program: P, args: I, options: &CommandOptions) -> Result<CommandResult>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let start = Instant::now();
    let args: Vec<S> = args.into_iter().collect();

    let mut cmd = Command::new(program.as_ref());
    cmd.args(&args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Running {}", command_line(program.as_ref(), &args));

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {:?}: {}", program.as_ref(), e);
        ScriptEnvError::BuildFailed {
            command: command_line(program.as_ref(), &args),
            code: None,
        }
    })?;

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout,
        stderr,
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Execute with captured output, turning a non-zero exit into an error.
pub fn execute_checked<P, I, S>(program: P, args: I) -> Result<CommandResult>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let result = execute(program.as_ref(), &args, &CommandOptions::captured())?;

    if !result.success {
        let command = command_line(program.as_ref(), &args);
        if !result.stderr.trim().is_empty() {
            tracing::error!("{} failed:\n{}", command, result.stderr.trim_end());
        }
        return Err(ScriptEnvError::BuildFailed {
            command,
            code: result.exit_code,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_arguments() {
        assert_eq!(
            command_line("python", ["-m", "pip", "install", "rich>=13"]),
            "python -m pip install rich>=13"
        );
    }

    #[test]
    fn captured_options_capture_both_streams() {
        let options = CommandOptions::captured();
        assert!(options.capture_stdout);
        assert!(options.capture_stderr);
    }

    #[cfg(unix)]
    #[test]
    fn execute_successful_command() {
        let result = execute("echo", ["hello"], &CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_reports_failure_without_error() {
        let result = execute("false", Vec::<&str>::new(), &CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn execute_checked_turns_failure_into_error() {
        let err = execute_checked("false", Vec::<&str>::new()).unwrap_err();
        assert!(matches!(
            err,
            ScriptEnvError::BuildFailed { code: Some(1), .. }
        ));
    }

    #[test]
    fn execute_missing_program_is_error() {
        let err = execute(
            "/nonexistent/definitely-not-a-program",
            Vec::<&str>::new(),
            &CommandOptions::captured(),
        )
        .unwrap_err();
        assert!(matches!(err, ScriptEnvError::BuildFailed { code: None, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn execute_respects_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..CommandOptions::captured()
        };

        let result = execute("pwd", Vec::<&str>::new(), &options).unwrap();
        let expected = temp.path().canonicalize().unwrap();
        assert_eq!(
            std::path::Path::new(result.stdout.trim()).canonicalize().unwrap(),
            expected
        );
    }
}
