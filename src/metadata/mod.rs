//! Inline script metadata.
//!
//! Scripts declare what they need in a comment block:
//!
//! ```text
//! # x-requires-python: >=3.10
//! # Script Dependencies:
//! #     requests
//! #     rich     # Needed for the output
//! ```
//!
//! [`parse_metadata`] extracts the version requirement and the dependency
//! lines from script text; [`parse_script`] does the same for a file on disk.

pub mod parser;

pub use parser::{parse_metadata, parse_script, MetadataError};

/// Requirements declared by a script, verbatim as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptMetadata {
    /// Text after `x-requires-python:`, if present.
    pub requires_python: Option<String>,
    /// Requirement strings from the dependency block, in source order.
    pub dependencies: Vec<String>,
}

impl ScriptMetadata {
    /// Render this metadata back into a comment block.
    ///
    /// Parsing the rendered block yields the same metadata.
    pub fn to_block(&self) -> String {
        let mut out = String::new();
        if let Some(version) = &self.requires_python {
            out.push_str(&format!("# x-requires-python: {}\n", version));
        }
        if !self.dependencies.is_empty() {
            out.push_str("# Script Dependencies:\n");
            for dep in &self.dependencies {
                out.push_str(&format!("#     {}\n", dep));
            }
        }
        out
    }
}
