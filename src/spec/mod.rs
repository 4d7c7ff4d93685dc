//! Dependency specifications.
//!
//! A [`DependencySpec`] is the normalized "what does this script need"
//! value: an interpreter version requirement plus the dependency lines.
//! It is the key of the environment cache, so equality is deliberately
//! textual: `requests>2.0` never matches an environment built for
//! `requests`, and the same packages listed in a different order are a
//! different spec. Keeping the comparison a plain string match keeps the
//! cache-hit path free of any version parsing.

pub mod requirement;

pub use requirement::{Requirement, RequirementSource};

use serde::Serialize;

use crate::error::Result;
use crate::interpreter::PythonVersion;
use crate::metadata::ScriptMetadata;

/// Interpreter requirement and dependency lines for one script.
#[derive(Debug, Clone, Serialize)]
pub struct DependencySpec {
    version_requirement: String,
    dependencies: Vec<String>,
    #[serde(skip_serializing)]
    explicit: bool,
}

impl DependencySpec {
    /// Build a spec from parsed metadata.
    ///
    /// Without a version requirement, the spec is pinned to the running
    /// interpreter's major.minor (`~=X.Y.0`) and marked not explicit.
    pub fn new(
        version_requirement: Option<String>,
        dependencies: Vec<String>,
        current: &PythonVersion,
    ) -> Self {
        match version_requirement.filter(|v| !v.trim().is_empty()) {
            Some(version) => Self {
                version_requirement: version,
                dependencies,
                explicit: true,
            },
            None => Self {
                version_requirement: pinned_requirement(current),
                dependencies,
                explicit: false,
            },
        }
    }

    /// Build a spec from script metadata.
    pub fn from_metadata(metadata: ScriptMetadata, current: &PythonVersion) -> Self {
        Self::new(metadata.requires_python, metadata.dependencies, current)
    }

    /// Rebuild a spec from stored parts (the cache index).
    pub fn from_parts(version_requirement: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            version_requirement: version_requirement.into(),
            dependencies,
            explicit: true,
        }
    }

    pub fn version_requirement(&self) -> &str {
        &self.version_requirement
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether the version requirement came from the script.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// True when the running interpreter can be used as-is: no version was
    /// requested and there is nothing to install.
    pub fn is_no_spec(&self) -> bool {
        !self.explicit && self.dependencies.is_empty()
    }

    /// Check every dependency line against the requirement grammar.
    ///
    /// Only needed before a build; cache lookups never call this.
    pub fn validate(&self) -> Result<Vec<Requirement>> {
        self.dependencies
            .iter()
            .map(|dep| Requirement::parse(dep))
            .collect()
    }
}

impl PartialEq for DependencySpec {
    fn eq(&self, other: &Self) -> bool {
        self.version_requirement == other.version_requirement
            && self.dependencies == other.dependencies
    }
}

impl Eq for DependencySpec {}

/// Compatible-release pin to a version's major.minor.
fn pinned_requirement(version: &PythonVersion) -> String {
    format!("~={}.{}.0", version.major(), version.minor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptEnvError;

    fn current() -> PythonVersion {
        PythonVersion::parse("3.11.4").unwrap()
    }

    fn deps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_version_is_pinned_to_current() {
        let spec = DependencySpec::new(None, deps(&["requests"]), &current());
        assert_eq!(spec.version_requirement(), "~=3.11.0");
        assert!(!spec.is_explicit());
    }

    #[test]
    fn empty_version_counts_as_missing() {
        let spec = DependencySpec::new(Some("  ".into()), vec![], &current());
        assert!(!spec.is_explicit());
        assert!(spec.is_no_spec());
    }

    #[test]
    fn given_version_is_verbatim() {
        let spec = DependencySpec::new(Some(">=3.10".into()), vec![], &current());
        assert_eq!(spec.version_requirement(), ">=3.10");
        assert!(spec.is_explicit());
        assert!(!spec.is_no_spec());
    }

    #[test]
    fn no_spec_requires_no_dependencies() {
        let spec = DependencySpec::new(None, deps(&["rich"]), &current());
        assert!(!spec.is_no_spec());
        assert!(DependencySpec::new(None, vec![], &current()).is_no_spec());
    }

    #[test]
    fn equality_is_textual() {
        let a = DependencySpec::from_parts(">=3.10", deps(&["requests"]));
        let b = DependencySpec::from_parts(">=3.10", deps(&["requests>2.0"]));
        let c = DependencySpec::from_parts(">= 3.10", deps(&["requests"]));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, DependencySpec::from_parts(">=3.10", deps(&["requests"])));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = DependencySpec::from_parts(">=3.10", deps(&["requests", "rich"]));
        let b = DependencySpec::from_parts(">=3.10", deps(&["rich", "requests"]));
        assert_ne!(a, b);
    }

    #[test]
    fn equality_ignores_explicit_flag() {
        let synthesized = DependencySpec::new(None, deps(&["rich"]), &current());
        let stored = DependencySpec::from_parts("~=3.11.0", deps(&["rich"]));
        assert!(!synthesized.is_explicit());
        assert_eq!(synthesized, stored);
    }

    #[test]
    fn validate_accepts_good_requirements() {
        let spec = DependencySpec::from_parts(">=3.10", deps(&["requests", "rich[jupyter]>=13"]));
        let reqs = spec.validate().unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[1].name, "rich");
    }

    #[test]
    fn validate_rejects_bad_requirement() {
        let spec = DependencySpec::from_parts(">=3.10", deps(&["requests", "rich>>13"]));
        let err = spec.validate().unwrap_err();
        match err {
            ScriptEnvError::InvalidRequirement { requirement, .. } => {
                assert_eq!(requirement, "rich>>13")
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn from_metadata_uses_both_fields() {
        let metadata = ScriptMetadata {
            requires_python: Some("~=3.9.0".into()),
            dependencies: deps(&["prefab_classes"]),
        };
        let spec = DependencySpec::from_metadata(metadata, &current());
        assert_eq!(spec, DependencySpec::from_parts("~=3.9.0", deps(&["prefab_classes"])));
    }
}
