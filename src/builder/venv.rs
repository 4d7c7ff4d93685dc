//! Builder using the standard library `venv` module and pip.

use std::ffi::OsStr;
use std::path::Path;

use super::EnvironmentBuilder;
use crate::cache::CacheEntry;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::platform::Platform;
use crate::process::execute_checked;
use crate::spec::DependencySpec;
use crate::ui::{SpinnerHandle, UserInterface};

/// Builds environments with `<python> -m venv` and `pip install`.
#[derive(Debug, Clone, Copy)]
pub struct VenvBuilder {
    platform: Platform,
}

impl VenvBuilder {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    fn run_steps(
        &self,
        spec: &DependencySpec,
        interpreter: &Interpreter,
        target: &Path,
        spinner: &mut dyn SpinnerHandle,
    ) -> Result<()> {
        execute_checked(
            &interpreter.path,
            [OsStr::new("-m"), OsStr::new("venv"), target.as_os_str()],
        )?;

        if spec.dependencies().is_empty() {
            return Ok(());
        }

        let python = target.join(self.platform.venv_interpreter());

        spinner.set_message("Upgrading pip");
        execute_checked(&python, ["-m", "pip", "install", "--upgrade", "pip"])?;

        spinner.set_message(&format!(
            "Installing dependencies: {}",
            spec.dependencies().join(", ")
        ));
        let args = ["-m", "pip", "install"]
            .into_iter()
            .chain(spec.dependencies().iter().map(String::as_str));
        execute_checked(&python, args)?;

        Ok(())
    }
}

impl EnvironmentBuilder for VenvBuilder {
    fn build(
        &self,
        spec: &DependencySpec,
        interpreter: &Interpreter,
        target: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<CacheEntry> {
        tracing::info!(
            "Building environment {:?} with Python {}",
            target,
            interpreter.version
        );

        let mut spinner = ui.start_spinner(&format!(
            "Building environment in {} (Python {})",
            target.display(),
            interpreter.version
        ));

        match self.run_steps(spec, interpreter, target, spinner.as_mut()) {
            Ok(()) => {
                spinner.finish_success(&format!("Built environment {}", target.display()));
                Ok(CacheEntry::new(target, spec.clone()))
            }
            Err(e) => {
                spinner.finish_error(&format!("Failed to build {}", target.display()));
                Err(e)
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ScriptEnvError;
    use crate::interpreter::PythonVersion;
    use crate::ui::MockUI;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Fake interpreter: `-m venv DIR` copies itself to `DIR/bin/python`,
    /// anything else is appended to `calls.log` beside the executable.
    const FAKE_PYTHON: &str = r#"#!/bin/sh
if [ "$2" = "venv" ]; then
  mkdir -p "$3/bin" && cp "$0" "$3/bin/python"
  exit 0
fi
echo "$@" >> "$(dirname "$0")/calls.log"
"#;

    fn write_script(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn fake_interpreter(temp: &TempDir, body: &str) -> Interpreter {
        let path = temp.path().join("base/python3");
        write_script(&path, body);
        Interpreter::new(path, PythonVersion::parse("3.11.4").unwrap())
    }

    fn target(temp: &TempDir) -> PathBuf {
        temp.path().join("cache/env_01")
    }

    #[test]
    fn builds_env_and_installs_dependencies() {
        let temp = TempDir::new().unwrap();
        let interpreter = fake_interpreter(&temp, FAKE_PYTHON);
        let spec = DependencySpec::from_parts(">=3.10", vec!["requests".into(), "rich>=13".into()]);
        let mut ui = MockUI::new();

        let entry = VenvBuilder::new(Platform::Linux)
            .build(&spec, &interpreter, &target(&temp), &mut ui)
            .unwrap();

        assert_eq!(entry.location, target(&temp));
        assert_eq!(entry.spec, spec);
        assert!(entry.interpreter_path(Platform::Linux).is_file());

        let calls = fs::read_to_string(target(&temp).join("bin/calls.log")).unwrap();
        let calls: Vec<&str> = calls.lines().collect();
        assert_eq!(
            calls,
            vec!["-m pip install --upgrade pip", "-m pip install requests rich>=13"]
        );
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn no_dependencies_skips_pip() {
        let temp = TempDir::new().unwrap();
        let interpreter = fake_interpreter(&temp, FAKE_PYTHON);
        let spec = DependencySpec::from_parts("~=3.11.0", vec![]);

        VenvBuilder::new(Platform::Linux)
            .build(&spec, &interpreter, &target(&temp), &mut MockUI::new())
            .unwrap();

        assert!(!target(&temp).join("bin/calls.log").exists());
    }

    #[test]
    fn failing_venv_is_build_failed() {
        let temp = TempDir::new().unwrap();
        let interpreter = fake_interpreter(&temp, "#!/bin/sh\necho 'no venv module' >&2\nexit 3\n");
        let spec = DependencySpec::from_parts(">=3.10", vec!["requests".into()]);

        let err = VenvBuilder::new(Platform::Linux)
            .build(&spec, &interpreter, &target(&temp), &mut MockUI::new())
            .unwrap_err();

        match err {
            ScriptEnvError::BuildFailed { command, code } => {
                assert_eq!(code, Some(3));
                assert!(command.contains("-m venv"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
