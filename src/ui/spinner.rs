//! Progress spinners.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use super::theme::ScriptEnvTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations, drawn on stderr.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: ScriptEnvTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            theme: ScriptEnvTheme::detect(),
        }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: ScriptEnvTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_finishes() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("Installing");
        spinner.finish_success("Done");
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn spinner_finish_error() {
        let mut spinner = ProgressSpinner::new("Building...");
        spinner.finish_error("Failed");
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn spinner_set_message() {
        let mut spinner = ProgressSpinner::new("Initial");
        spinner.set_message("Updated");
        assert_eq!(spinner.bar.message(), "Updated");
        spinner.finish_success("Done");
    }
}
