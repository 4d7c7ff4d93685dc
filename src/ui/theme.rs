//! Visual theme and styling.

use console::Style;

/// Styles for status output.
#[derive(Debug, Clone)]
pub struct ScriptEnvTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational/running elements (cyan).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for ScriptEnvTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEnvTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or NO_COLOR).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            key: Style::new(),
        }
    }

    /// Theme matching the terminal's color support.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a `key: value` line.
    pub fn format_key_value(&self, key: &str, value: &str) -> String {
        format!("{} {}", self.key.apply_to(format!("{}:", key)), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stderr().is_term()
}
