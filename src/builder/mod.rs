//! Environment construction.
//!
//! The resolver only sees the [`EnvironmentBuilder`] trait; [`VenvBuilder`]
//! is the default implementation on top of `python -m venv` and pip.

pub mod venv;

pub use venv::VenvBuilder;

use std::path::Path;

use crate::cache::CacheEntry;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::spec::DependencySpec;
use crate::ui::UserInterface;

/// Creates an environment for a spec.
pub trait EnvironmentBuilder {
    /// Create an environment at `target` from `interpreter` and install the
    /// spec's dependencies into it.
    ///
    /// `spec` has already been validated. A partially built `target` is
    /// left on disk when this fails.
    fn build(
        &self,
        spec: &DependencySpec,
        interpreter: &Interpreter,
        target: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<CacheEntry>;
}
