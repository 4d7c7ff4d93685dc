//! Default interpreter discovery.
//!
//! The current interpreter is the first `python3`/`python` on PATH. Other
//! versions come from the pyenv versions directory on Linux and macOS, and
//! from the `py` launcher on Windows.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::probe::{parse_system_path, pyenv_root, resolve_any_tool_path};
use super::{Interpreter, InterpreterDiscovery, PythonVersion};
use crate::error::{Result, ScriptEnvError};
use crate::platform::Platform;
use crate::process::{execute, CommandOptions};

/// One line of `py --list-paths`, e.g. ` -V:3.12 *        C:\Python312\python.exe`.
static PY_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-V:(\d+\.\d+)\S*[\s*]+(.+?)\s*$").unwrap());

/// Discovers interpreters on the real host.
#[derive(Debug, Clone)]
pub struct SystemDiscovery {
    platform: Platform,
    path_entries: Vec<PathBuf>,
    pyenv_root: Option<PathBuf>,
}

impl SystemDiscovery {
    /// Probe the environment using actual environment variables and filesystem.
    pub fn detect(platform: Platform, home: &Path) -> Self {
        Self {
            platform,
            path_entries: parse_system_path(),
            pyenv_root: pyenv_root(home, &|key: &str| std::env::var(key)),
        }
    }

    /// Build a discovery over explicit locations.
    pub fn with_locations(
        platform: Platform,
        path_entries: Vec<PathBuf>,
        pyenv_root: Option<PathBuf>,
    ) -> Self {
        Self {
            platform,
            path_entries,
            pyenv_root,
        }
    }

    pub fn pyenv_root(&self) -> Option<&Path> {
        self.pyenv_root.as_deref()
    }
}

impl InterpreterDiscovery for SystemDiscovery {
    fn current(&self) -> Result<Interpreter> {
        let executables = self.platform.python_executables();
        let path = resolve_any_tool_path(executables, &self.path_entries).ok_or_else(|| {
            ScriptEnvError::NoMatchingInterpreter {
                specifier: format!("any ({} on PATH)", executables.join(" or ")),
            }
        })?;

        let version = query_version(&path)?;
        tracing::debug!("Current interpreter: {} ({})", path.display(), version);
        Ok(Interpreter::new(path, version))
    }

    fn candidates(&self) -> Result<Vec<Interpreter>> {
        let candidates = match self.platform {
            Platform::Windows => py_launcher_candidates(),
            Platform::Linux | Platform::MacOs => match &self.pyenv_root {
                Some(root) => pyenv_candidates(root),
                None => {
                    tracing::info!("Could not find a pyenv versions folder");
                    Vec::new()
                }
            },
        };
        tracing::debug!("Found {} candidate interpreters", candidates.len());
        Ok(candidates)
    }
}

/// Ask an interpreter for its version via `-V`.
pub fn query_version(python: &Path) -> Result<PythonVersion> {
    let result = execute(python, ["-V"], &CommandOptions::captured())?;

    // Python 2 printed its version to stderr.
    let version = [result.stdout.trim(), result.stderr.trim()]
        .into_iter()
        .find_map(PythonVersion::parse)
        .ok_or_else(|| {
            ScriptEnvError::Other(anyhow::anyhow!(
                "Could not read a version from {} -V",
                python.display()
            ))
        });
    version
}

/// Interpreters under `<pyenv root>/versions`, newest first.
///
/// Directories whose names are not plain versions (`miniconda3-latest`,
/// virtualenvs) are skipped.
pub fn pyenv_candidates(root: &Path) -> Vec<Interpreter> {
    let Ok(entries) = fs::read_dir(root.join("versions")) else {
        return Vec::new();
    };

    let mut candidates: Vec<Interpreter> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let version = PythonVersion::parse(name.to_str()?)?;
            let python = entry.path().join("bin").join("python");
            python.is_file().then(|| Interpreter::new(python, version))
        })
        .collect();

    candidates.sort_by(|a, b| b.version.cmp(&a.version));
    candidates
}

fn py_launcher_candidates() -> Vec<Interpreter> {
    match execute("py", ["--list-paths"], &CommandOptions::captured()) {
        Ok(result) => parse_py_list_paths(&result.stdout),
        Err(_) => {
            tracing::info!("py launcher not installed or not present on PATH");
            Vec::new()
        }
    }
}

/// Parse `py --list-paths` output, newest first.
///
/// The launcher only reports major.minor, which is close enough for
/// selecting a base interpreter.
pub fn parse_py_list_paths(output: &str) -> Vec<Interpreter> {
    let mut candidates: Vec<Interpreter> = output
        .lines()
        .filter_map(|line| {
            let caps = PY_LIST_REGEX.captures(line)?;
            let version = PythonVersion::parse(&caps[1])?;
            Some(Interpreter::new(PathBuf::from(&caps[2]), version))
        })
        .collect();

    candidates.sort_by(|a, b| b.version.cmp(&a.version));
    candidates
}
