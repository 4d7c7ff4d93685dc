//! Host platform detection and platform-dependent paths.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScriptEnvError};

/// Name used for the cache directory and user-facing messages.
pub const LAUNCHER_NAME: &str = "scriptenv";

/// Directory under the application root that holds built environments.
const CACHE_DIR_NAME: &str = "venv_cache";

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Detect the platform this binary is running on.
    ///
    /// Fails for any OS without a known cache location.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Parse a platform from a `std::env::consts::OS` value.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(ScriptEnvError::UnsupportedPlatform {
                platform: other.to_string(),
            }),
        }
    }

    /// Path of an environment's interpreter relative to its root.
    pub fn venv_interpreter(&self) -> &'static Path {
        match self {
            Platform::Windows => Path::new("Scripts/python.exe"),
            Platform::Linux | Platform::MacOs => Path::new("bin/python"),
        }
    }

    /// Executable names tried, in order, when looking for the host interpreter.
    pub fn python_executables(&self) -> &'static [&'static str] {
        match self {
            Platform::Windows => &["python.exe", "py.exe"],
            Platform::Linux | Platform::MacOs => &["python3", "python"],
        }
    }
}

/// Application root that holds the environment cache and settings.
///
/// - Linux: `~/.<launcher>`
/// - macOS: `~/Library/Caches/<launcher>`
/// - Windows: `%LOCALAPPDATA%\<launcher>` (expressed relative to the home dir)
pub fn app_root(platform: Platform, home_dir: &Path, launcher_name: &str) -> PathBuf {
    match platform {
        Platform::Linux => home_dir.join(format!(".{}", launcher_name)),
        Platform::MacOs => home_dir
            .join("Library")
            .join("Caches")
            .join(launcher_name),
        Platform::Windows => home_dir.join("AppData").join("Local").join(launcher_name),
    }
}

/// Root directory of the environment cache.
///
/// Pure: resolved once at startup and passed down explicitly.
pub fn cache_root(platform: Platform, home_dir: &Path, launcher_name: &str) -> PathBuf {
    app_root(platform, home_dir, launcher_name).join(CACHE_DIR_NAME)
}

/// Resolve the home directory, falling back to the current directory.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
