//! Cache entry type.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::spec::DependencySpec;

/// A built environment and the spec it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Root directory of the environment.
    pub location: PathBuf,
    /// Spec the environment satisfies, compared exactly on lookup.
    pub spec: DependencySpec,
}

impl CacheEntry {
    /// Create a new cache entry.
    pub fn new(location: impl Into<PathBuf>, spec: DependencySpec) -> Self {
        Self {
            location: location.into(),
            spec,
        }
    }

    /// Interpreter executable inside the environment.
    pub fn interpreter_path(&self, platform: Platform) -> PathBuf {
        self.location.join(platform.venv_interpreter())
    }

    /// Environment root.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Short display name (the environment directory name).
    pub fn name(&self) -> String {
        self.location
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.location.display().to_string())
    }
}
