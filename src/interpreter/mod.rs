//! Python interpreter discovery.
//!
//! - [`version`] - Python version numbers and ordering
//! - [`specifier`] - `x-requires-python` style version specifiers
//! - [`probe`] - PATH and version-manager filesystem probes
//! - [`discovery`] - the default [`InterpreterDiscovery`] implementation

pub mod discovery;
pub mod probe;
pub mod specifier;
pub mod version;

pub use discovery::SystemDiscovery;
pub use specifier::{Specifier, VersionSpecifiers};
pub use version::{PreRelease, PythonVersion};

use std::path::PathBuf;

use crate::error::{Result, ScriptEnvError};

/// An interpreter executable and the version it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub path: PathBuf,
    pub version: PythonVersion,
}

impl Interpreter {
    pub fn new(path: impl Into<PathBuf>, version: PythonVersion) -> Self {
        Self {
            path: path.into(),
            version,
        }
    }
}

/// Finds interpreters on the host.
pub trait InterpreterDiscovery {
    /// The interpreter scripts run under when they need nothing special.
    fn current(&self) -> Result<Interpreter>;

    /// Other installed interpreters, newest first.
    fn candidates(&self) -> Result<Vec<Interpreter>>;

    /// Pick an interpreter satisfying `specifiers`, preferring `current`.
    fn find(&self, specifiers: &VersionSpecifiers, current: &Interpreter) -> Result<Interpreter> {
        if specifiers.contains(&current.version) {
            return Ok(current.clone());
        }

        self.candidates()?
            .into_iter()
            .find(|candidate| specifiers.contains(&candidate.version))
            .ok_or_else(|| ScriptEnvError::NoMatchingInterpreter {
                specifier: specifiers.to_string(),
            })
    }
}
