//! Persistent user settings.
//!
//! Stored as YAML at `<app root>/settings.yml`. Command-line flags override
//! these values for a single invocation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{Result, ScriptEnvError};

/// File name of the settings file under the application root.
pub const SETTINGS_FILE_NAME: &str = "settings.yml";

/// Saved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Maximum number of cached environments.
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// Suppress status output.
    #[serde(default)]
    pub quiet: bool,
}

fn default_cache_size() -> usize {
    DEFAULT_CAPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CAPACITY,
            quiet: false,
        }
    }
}

impl Settings {
    /// Get the settings file path under `app_root`.
    pub fn file_path(app_root: &Path) -> PathBuf {
        app_root.join(SETTINGS_FILE_NAME)
    }

    /// Load settings; a missing file gives the defaults.
    pub fn load(app_root: &Path) -> Result<Self> {
        let path = Self::file_path(app_root);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self =
            serde_yaml::from_str(&content).map_err(|e| ScriptEnvError::InvalidSettings {
                path: path.clone(),
                message: e.to_string(),
            })?;
        settings.validate(&path)?;

        tracing::debug!("Loaded settings from {:?}: {:?}", path, settings);
        Ok(settings)
    }

    /// Save settings using atomic write.
    pub fn save(&self, app_root: &Path) -> Result<()> {
        let path = Self::file_path(app_root);
        self.validate(&path)?;
        fs::create_dir_all(app_root)?;

        let content = serde_yaml::to_string(self).map_err(|e| ScriptEnvError::InvalidSettings {
            path: path.clone(),
            message: format!("Failed to serialize settings: {}", e),
        })?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Remove the settings file. Returns `false` if there was none.
    pub fn remove(app_root: &Path) -> Result<bool> {
        match fs::remove_file(Self::file_path(app_root)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.cache_size == 0 {
            return Err(ScriptEnvError::InvalidSettings {
                path: path.to_path_buf(),
                message: "cache_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cache_size, 5);
        assert!(!settings.quiet);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE_NAME), "\n").unwrap();
        assert_eq!(Settings::load(temp.path()).unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("app");
        let settings = Settings {
            cache_size: 8,
            quiet: true,
        };

        settings.save(&root).unwrap();
        assert_eq!(Settings::load(&root).unwrap(), settings);
        assert!(!root.join("settings.yml.tmp").exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE_NAME), "quiet: true\n").unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.cache_size, 5);
        assert!(settings.quiet);
    }

    #[test]
    fn zero_cache_size_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE_NAME), "cache_size: 0\n").unwrap();

        let err = Settings::load(temp.path()).unwrap_err();
        assert!(matches!(err, ScriptEnvError::InvalidSettings { .. }));

        let save_err = Settings {
            cache_size: 0,
            quiet: false,
        }
        .save(temp.path())
        .unwrap_err();
        assert!(save_err.to_string().contains("at least 1"));
    }

    #[test]
    fn unparsable_file_is_invalid_settings() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE_NAME), "cache_size: lots\n").unwrap();

        let err = Settings::load(temp.path()).unwrap_err();
        assert!(matches!(err, ScriptEnvError::InvalidSettings { .. }));
    }

    #[test]
    fn remove_settings_file() {
        let temp = TempDir::new().unwrap();
        Settings::default().save(temp.path()).unwrap();

        assert!(Settings::remove(temp.path()).unwrap());
        assert!(!Settings::remove(temp.path()).unwrap());
    }
}
