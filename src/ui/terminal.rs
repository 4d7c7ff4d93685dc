//! Terminal UI on stderr.

use console::Term;
use std::io::Write;

use super::{OutputMode, ProgressSpinner, ScriptEnvTheme, SpinnerHandle, UserInterface};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: ScriptEnvTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stderr(),
            theme: ScriptEnvTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn output(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.term.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            self.message(message);
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Create the UI for the given mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
