//! Filesystem probes for interpreters and version managers.
//!
//! Rust's `Command::new()` spawns a non-interactive, non-login process where
//! shell initialization for version managers (pyenv in particular) hasn't
//! run, so interpreters are found by looking at well-known locations
//! instead of relying on shims being on PATH.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Resolve the first of several tool names found on PATH.
pub fn resolve_any_tool_path(tools: &[&str], path_entries: &[PathBuf]) -> Option<PathBuf> {
    tools
        .iter()
        .find_map(|tool| resolve_tool_path(tool, path_entries))
}

/// Probe a manager location, checking its env var first then default paths.
///
/// Returns the install root if `marker_subpath` exists beneath it.
pub fn probe_manager_location<F>(
    env_var: Option<&str>,
    default_paths: &[PathBuf],
    marker_subpath: &str,
    env_fn: &F,
) -> Option<PathBuf>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // 1. Check env var first (handles relocatable installs)
    if let Some(var) = env_var {
        if let Ok(val) = env_fn(var) {
            let path = PathBuf::from(val);
            if path.join(marker_subpath).exists() {
                return Some(path);
            }
        }
    }

    // 2. Fall back to default paths
    for default in default_paths {
        if default.join(marker_subpath).exists() {
            return Some(default.clone());
        }
    }

    None
}

/// Locate the pyenv root (`PYENV_ROOT`, then `~/.pyenv`).
pub fn pyenv_root<F>(home: &Path, env_fn: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    probe_manager_location(
        Some("PYENV_ROOT"),
        &[home.join(".pyenv")],
        "versions",
        env_fn,
    )
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}
