//! Resolution orchestrator.
//!
//! Decides, for one script, whether the host interpreter can run it as-is,
//! whether a cached environment matches exactly, or whether a new
//! environment has to be built.
//!
//! ```text
//! Start -> CheckTrivial -> ReuseCurrent ----------------> Resolved
//!                       -> CheckCache -> CacheHit ------> Resolved
//!                                     -> CacheMiss -----> Resolved
//! ```

pub mod state;

pub use state::{Resolution, ResolutionSource, ResolutionState};

use std::path::{Path, PathBuf};

use crate::builder::EnvironmentBuilder;
use crate::cache::EnvironmentCache;
use crate::error::{Result, ScriptEnvError};
use crate::interpreter::{InterpreterDiscovery, VersionSpecifiers};
use crate::metadata::parse_script;
use crate::platform::Platform;
use crate::spec::DependencySpec;
use crate::ui::UserInterface;

/// Resolves scripts to interpreters against one cache root.
pub struct Resolver<D, B> {
    discovery: D,
    builder: B,
    platform: Platform,
    cache_root: PathBuf,
    capacity: usize,
}

impl<D, B> Resolver<D, B>
where
    D: InterpreterDiscovery,
    B: EnvironmentBuilder,
{
    pub fn new(
        discovery: D,
        builder: B,
        platform: Platform,
        cache_root: impl Into<PathBuf>,
        capacity: usize,
    ) -> Self {
        Self {
            discovery,
            builder,
            platform,
            cache_root: cache_root.into(),
            capacity,
        }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Resolve the interpreter for `script`.
    pub fn resolve(&self, script: &Path, ui: &mut dyn UserInterface) -> Result<Resolution> {
        enter(ResolutionState::Start, script);
        let metadata = parse_script(script)?;
        let current = self.discovery.current()?;
        let spec = DependencySpec::from_metadata(metadata, &current.version);

        enter(ResolutionState::CheckTrivial, script);
        if spec.is_no_spec() {
            enter(ResolutionState::ReuseCurrent, script);
            return Ok(resolved(current.path, ResolutionSource::Current));
        }

        enter(ResolutionState::CheckCache, script);
        let mut cache = EnvironmentCache::load(&self.cache_root, self.capacity)?;

        if let Some(entry) = cache.promote(&spec)? {
            enter(ResolutionState::CacheHit, script);
            ui.message(&format!("Using cached environment {}", entry.name()));
            let interpreter = entry.interpreter_path(self.platform);
            return Ok(resolved(interpreter, ResolutionSource::Cached));
        }

        enter(ResolutionState::CacheMiss, script);
        spec.validate().map_err(|e| with_script_path(e, script))?;
        let specifiers = VersionSpecifiers::parse(spec.version_requirement())?;
        let base = self.discovery.find(&specifiers, &current)?;
        tracing::debug!(
            "Selected base interpreter {} ({})",
            base.path.display(),
            base.version
        );

        let target = cache.next_environment_dir()?;
        let entry = self.builder.build(&spec, &base, &target, ui)?;
        let interpreter = entry.interpreter_path(self.platform);

        if let Some(evicted) = cache.insert(entry)? {
            tracing::info!("Evicted {} to make room", evicted.name());
        }

        Ok(resolved(interpreter, ResolutionSource::Built))
    }
}

/// Report an invalid dependency line against the script that declared it.
fn with_script_path(err: ScriptEnvError, script: &Path) -> ScriptEnvError {
    match err {
        ScriptEnvError::InvalidRequirement {
            requirement,
            message,
        } => ScriptEnvError::metadata(
            script,
            format!("invalid requirement '{}': {}", requirement, message),
        ),
        other => other,
    }
}

fn enter(state: ResolutionState, script: &Path) {
    tracing::debug!("[{}] {}", state, script.display());
}

fn resolved(interpreter: PathBuf, source: ResolutionSource) -> Resolution {
    tracing::debug!(
        "[{}] {} ({})",
        ResolutionState::Resolved,
        interpreter.display(),
        source
    );
    Resolution::new(interpreter, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{index_file_name, CacheEntry};
    use crate::interpreter::{Interpreter, PythonVersion};
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct FakeDiscovery {
        candidates: Vec<Interpreter>,
    }

    impl FakeDiscovery {
        fn new() -> Self {
            Self {
                candidates: vec![interp("/pyenv/versions/3.9.18/bin/python", "3.9.18")],
            }
        }
    }

    impl InterpreterDiscovery for FakeDiscovery {
        fn current(&self) -> Result<Interpreter> {
            Ok(interp("/usr/bin/python3", "3.11.4"))
        }

        fn candidates(&self) -> Result<Vec<Interpreter>> {
            Ok(self.candidates.clone())
        }
    }

    /// Records builds and creates the environment directory.
    #[derive(Default)]
    struct FakeBuilder {
        builds: RefCell<Vec<(PathBuf, PathBuf)>>,
        fail: bool,
    }

    impl EnvironmentBuilder for FakeBuilder {
        fn build(
            &self,
            spec: &DependencySpec,
            interpreter: &Interpreter,
            target: &Path,
            _ui: &mut dyn UserInterface,
        ) -> Result<CacheEntry> {
            fs::create_dir_all(target.join("bin"))?;
            if self.fail {
                return Err(ScriptEnvError::BuildFailed {
                    command: "python -m venv".to_string(),
                    code: Some(1),
                });
            }
            self.builds
                .borrow_mut()
                .push((interpreter.path.clone(), target.to_path_buf()));
            Ok(CacheEntry::new(target, spec.clone()))
        }
    }

    fn interp(path: &str, version: &str) -> Interpreter {
        Interpreter::new(path, PythonVersion::parse(version).unwrap())
    }

    fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn resolver(temp: &TempDir, capacity: usize) -> Resolver<FakeDiscovery, FakeBuilder> {
        Resolver::new(
            FakeDiscovery::new(),
            FakeBuilder::default(),
            Platform::Linux,
            temp.path().join("venv_cache"),
            capacity,
        )
    }

    #[test]
    fn no_metadata_uses_current_interpreter() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "plain.py", "print('hi')\n");
        let resolver = resolver(&temp, 5);

        let resolution = resolver.resolve(&script, &mut MockUI::new()).unwrap();

        assert_eq!(
            resolution,
            Resolution::new("/usr/bin/python3", ResolutionSource::Current)
        );
        assert!(!resolver.cache_root().exists());
    }

    #[test]
    fn dependencies_build_then_hit_cache() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            temp.path(),
            "deps.py",
            "# Script Dependencies:\n#    requests\n#    rich\n\nimport requests\n",
        );
        let resolver = resolver(&temp, 5);
        let mut ui = MockUI::new();

        let first = resolver.resolve(&script, &mut ui).unwrap();
        assert_eq!(first.source, ResolutionSource::Built);
        assert_eq!(
            first.interpreter,
            resolver.cache_root().join("env_01/bin/python")
        );

        let second = resolver.resolve(&script, &mut ui).unwrap();
        assert_eq!(second.source, ResolutionSource::Cached);
        assert_eq!(second.interpreter, first.interpreter);

        assert_eq!(resolver.builder.builds.borrow().len(), 1);
        assert!(ui.has_message("env_01"));

        let index = fs::read_to_string(resolver.cache_root().join(index_file_name())).unwrap();
        assert!(index.contains("~=3.11.0\nrequests\nrich"));
    }

    #[test]
    fn explicit_version_without_dependencies_still_builds() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "v.py", "# x-requires-python: >=3.10\n");
        let resolver = resolver(&temp, 5);

        let resolution = resolver.resolve(&script, &mut MockUI::new()).unwrap();

        assert_eq!(resolution.source, ResolutionSource::Built);
        let builds = resolver.builder.builds.borrow();
        assert_eq!(builds[0].0, PathBuf::from("/usr/bin/python3"));
    }

    #[test]
    fn version_outside_current_uses_candidate() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            temp.path(),
            "old.py",
            "# x-requires-python: ~=3.9.0\n# Script Dependencies:\n#   attrs\n",
        );
        let resolver = resolver(&temp, 5);

        resolver.resolve(&script, &mut MockUI::new()).unwrap();

        let builds = resolver.builder.builds.borrow();
        assert_eq!(
            builds[0].0,
            PathBuf::from("/pyenv/versions/3.9.18/bin/python")
        );
    }

    #[test]
    fn unmatched_version_is_error_and_builds_nothing() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "new.py", "# x-requires-python: >=3.14\n");
        let resolver = resolver(&temp, 5);

        let err = resolver.resolve(&script, &mut MockUI::new()).unwrap_err();

        assert!(matches!(err, ScriptEnvError::NoMatchingInterpreter { .. }));
        assert!(resolver.builder.builds.borrow().is_empty());
    }

    #[test]
    fn invalid_requirement_fails_before_build() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            temp.path(),
            "bad.py",
            "# Script Dependencies:\n#   requests>>2\n",
        );
        let resolver = resolver(&temp, 5);

        let err = resolver.resolve(&script, &mut MockUI::new()).unwrap_err();

        match &err {
            ScriptEnvError::Metadata { path, message } => {
                assert_eq!(path, &script);
                assert!(message.contains("requests>>2"));
            }
            other => panic!("expected metadata error, got {:?}", other),
        }
        assert!(err.to_string().contains("bad.py"));
        assert!(resolver.builder.builds.borrow().is_empty());
    }

    #[test]
    fn metadata_error_propagates() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            temp.path(),
            "twice.py",
            "# Script Dependencies:\n#   a\n\n# Script Dependencies:\n#   b\n",
        );
        let err = resolver(&temp, 5)
            .resolve(&script, &mut MockUI::new())
            .unwrap_err();
        assert!(matches!(err, ScriptEnvError::Metadata { .. }));
    }

    #[test]
    fn missing_script_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = resolver(&temp, 5)
            .resolve(&temp.path().join("missing.py"), &mut MockUI::new())
            .unwrap_err();
        assert!(matches!(err, ScriptEnvError::Io(_)));
    }

    #[test]
    fn full_cache_evicts_oldest_environment() {
        let temp = TempDir::new().unwrap();
        let a = write_script(temp.path(), "a.py", "# Script Dependencies:\n#   a\n");
        let b = write_script(temp.path(), "b.py", "# Script Dependencies:\n#   b\n");
        let resolver = resolver(&temp, 1);
        let mut ui = MockUI::new();

        let first = resolver.resolve(&a, &mut ui).unwrap();
        let second = resolver.resolve(&b, &mut ui).unwrap();

        assert_eq!(second.source, ResolutionSource::Built);
        assert!(!resolver.cache_root().join("env_01").exists());
        assert_ne!(first.interpreter, second.interpreter);

        let cache = EnvironmentCache::load(resolver.cache_root(), 1).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.entries()[0].spec.dependencies(), &["b".to_string()]);
    }

    #[test]
    fn failed_build_leaves_cache_unchanged() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "a.py", "# Script Dependencies:\n#   a\n");
        let resolver = Resolver::new(
            FakeDiscovery::new(),
            FakeBuilder {
                fail: true,
                ..Default::default()
            },
            Platform::Linux,
            temp.path().join("venv_cache"),
            2,
        );

        let err = resolver.resolve(&script, &mut MockUI::new()).unwrap_err();
        assert!(matches!(err, ScriptEnvError::BuildFailed { .. }));

        let cache = EnvironmentCache::load(resolver.cache_root(), 2).unwrap();
        assert!(cache.is_empty());
        // The orphaned directory occupies a slot until the cache is cleared.
        assert_eq!(
            cache.next_environment_dir().unwrap(),
            resolver.cache_root().join("env_02")
        );
    }
}
