//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing styled status lines to stderr
//! - [`MockUI`] capturing interactions for tests
//! - Spinners for environment builds
//!
//! Status output always goes to stderr. Stdout is reserved for command
//! results (`resolve`, `list`) and for the launched script itself.
//!
//! # Example
//!
//! ```
//! use scriptenv::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Resolving script.py");
//! ui.success("Environment ready");
//!
//! assert!(ui.has_success("Environment ready"));
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ScriptEnvTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Write a command result to stdout. Shown in every output mode.
    fn output(&mut self, text: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
