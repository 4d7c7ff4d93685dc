//! Error types for scriptenv operations.
//!
//! This module defines [`ScriptEnvError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ScriptEnvError` for failures a user needs to act on (bad metadata,
//!   no interpreter, failed build)
//! - Use `anyhow::Error` (via `ScriptEnvError::Other`) for unexpected errors
//! - Recoverable problems (a corrupt index record, a failed eviction) are
//!   logged where they happen and never reach this type

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for scriptenv operations.
#[derive(Debug, Error)]
pub enum ScriptEnvError {
    /// The script's metadata block is malformed or defined twice.
    #[error("Invalid metadata in {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// A dependency line is not a valid requirement string.
    #[error("Invalid requirement '{requirement}': {message}")]
    InvalidRequirement {
        requirement: String,
        message: String,
    },

    /// A version specifier could not be parsed.
    #[error("Invalid version specifier '{specifier}': {message}")]
    InvalidSpecifier { specifier: String, message: String },

    /// No installed interpreter satisfies the requested version.
    #[error("Could not find a Python interpreter matching '{specifier}'")]
    NoMatchingInterpreter { specifier: String },

    /// A subprocess used to build an environment exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    BuildFailed { command: String, code: Option<i32> },

    /// Every environment slot under the cache root is taken.
    #[error(
        "Too many environments in {root}, possibly left over from failed builds. \
         Run `scriptenv clear-cache` to reset the cache."
    )]
    CacheExhausted { root: PathBuf },

    /// The host operating system is not supported.
    #[error("'{platform}' is currently not supported")]
    UnsupportedPlatform { platform: String },

    /// The settings file could not be parsed or holds invalid values.
    #[error("Invalid settings at {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScriptEnvError {
    /// Build a metadata error for the script at `path`.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for scriptenv operations.
pub type Result<T> = std::result::Result<T, ScriptEnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_error_displays_path_and_message() {
        let err = ScriptEnvError::metadata("/scripts/demo.py", "block defined twice");
        let msg = err.to_string();
        assert!(msg.contains("/scripts/demo.py"));
        assert!(msg.contains("block defined twice"));
    }

    #[test]
    fn invalid_requirement_displays_requirement() {
        let err = ScriptEnvError::InvalidRequirement {
            requirement: "requests>>2".into(),
            message: "bad version clause".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("requests>>2"));
        assert!(msg.contains("bad version clause"));
    }

    #[test]
    fn no_matching_interpreter_displays_specifier() {
        let err = ScriptEnvError::NoMatchingInterpreter {
            specifier: "~=3.8.0".into(),
        };
        assert!(err.to_string().contains("~=3.8.0"));
    }

    #[test]
    fn build_failed_displays_command_and_code() {
        let err = ScriptEnvError::BuildFailed {
            command: "python -m venv env_01".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("python -m venv env_01"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn cache_exhausted_suggests_clear() {
        let err = ScriptEnvError::CacheExhausted {
            root: PathBuf::from("/tmp/venv_cache"),
        };
        assert!(err.to_string().contains("clear-cache"));
    }

    #[test]
    fn unsupported_platform_displays_name() {
        let err = ScriptEnvError::UnsupportedPlatform {
            platform: "freebsd".into(),
        };
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ScriptEnvError = io_err.into();
        assert!(matches!(err, ScriptEnvError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ScriptEnvError::metadata("a.py", "test"))
        }
        assert!(returns_error().is_err());
    }
}
