//! scriptenv - Run single-file Python scripts in cached environments.
//!
//! A script declares what it needs in a comment block:
//!
//! ```python
//! # x-requires-python: >=3.10
//! # Script Dependencies:
//! #     requests
//! #     rich
//! ```
//!
//! scriptenv runs scripts without such a block under the host interpreter.
//! Otherwise it looks for a cached environment built for exactly that
//! block, and builds one (evicting the least recently used environment
//! when the cache is full) when there is none.
//!
//! # Modules
//!
//! - [`metadata`] - Parsing the comment block
//! - [`spec`] - Dependency specifications and requirement validation
//! - [`cache`] - The bounded environment cache and its index file
//! - [`interpreter`] - Python versions, specifiers and interpreter discovery
//! - [`builder`] - Environment construction
//! - [`launcher`] - Running a script under its interpreter
//! - [`resolver`] - Deciding which interpreter a script runs under
//! - [`settings`] - Persistent user settings
//! - [`platform`] - Host platform and cache locations
//! - [`process`] - Subprocess execution
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Status output and spinners
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use scriptenv::interpreter::PythonVersion;
//! use scriptenv::metadata::parse_metadata;
//! use scriptenv::spec::DependencySpec;
//!
//! let metadata = parse_metadata("# Script Dependencies:\n#    requests\n").unwrap();
//! let current = PythonVersion::parse("3.11.4").unwrap();
//! let spec = DependencySpec::from_metadata(metadata, &current);
//!
//! assert_eq!(spec.version_requirement(), "~=3.11.0");
//! assert_eq!(spec.dependencies(), &["requests".to_string()]);
//! ```

pub mod builder;
pub mod cache;
pub mod cli;
pub mod error;
pub mod interpreter;
pub mod launcher;
pub mod metadata;
pub mod platform;
pub mod process;
pub mod resolver;
pub mod settings;
pub mod spec;
pub mod ui;

pub use error::{Result, ScriptEnvError};
