//! Line scanner for dependency and version headers.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::ScriptMetadata;
use crate::error::{Result, ScriptEnvError};

/// Headers that open a dependency block, in normalized form.
const DEPENDENCY_HEADERS: &[&str] = &["script dependencies"];

/// Headers that carry the interpreter version requirement, in normalized form.
const VERSION_HEADERS: &[&str] = &["x requires python"];

/// Separator for a trailing comment after a value.
const INLINE_COMMENT: &str = " # ";

/// A problem with the metadata comments themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct MetadataError {
    /// 1-based line number of the offending header.
    pub line: usize,
    pub message: String,
}

/// Read a script and parse its metadata.
///
/// A missing or unreadable file is an `Io` error; bad metadata is a
/// `Metadata` error naming the script.
pub fn parse_script(path: &Path) -> Result<ScriptMetadata> {
    let content = fs::read_to_string(path)?;
    parse_metadata(&content).map_err(|e| ScriptEnvError::metadata(path, e.to_string()))
}

/// Parse the metadata comments out of script text.
pub fn parse_metadata(content: &str) -> std::result::Result<ScriptMetadata, MetadataError> {
    let mut metadata = ScriptMetadata::default();
    let mut in_dependency_block = false;

    for (index, line) in content.lines().enumerate() {
        let Some(comment) = strip_comment(line) else {
            in_dependency_block = false;
            if metadata.requires_python.is_some() && !metadata.dependencies.is_empty() {
                break;
            }
            continue;
        };

        if comment.is_empty() {
            continue;
        }

        if in_dependency_block {
            metadata.dependencies.push(comment.to_string());
            continue;
        }

        let Some((header, rest)) = comment.split_once(':') else {
            continue;
        };
        let header = normalize_header(header);

        if DEPENDENCY_HEADERS.contains(&header.as_str()) {
            if !metadata.dependencies.is_empty() {
                return Err(MetadataError {
                    line: index + 1,
                    message: "Script Dependencies block defined multiple times in script"
                        .to_string(),
                });
            }
            in_dependency_block = true;
        } else if VERSION_HEADERS.contains(&header.as_str()) {
            if metadata.requires_python.is_some() {
                return Err(MetadataError {
                    line: index + 1,
                    message: "x-requires-python block defined multiple times in script"
                        .to_string(),
                });
            }
            let version = rest.trim();
            if !version.is_empty() {
                metadata.requires_python = Some(version.to_string());
            }
        }
    }

    Ok(metadata)
}

/// Remove the comment marker and any trailing inline comment.
///
/// Returns `None` for lines that are not comments.
fn strip_comment(line: &str) -> Option<&str> {
    let body = line.strip_prefix('#')?;
    let body = match body.split_once(INLINE_COMMENT) {
        Some((value, _)) => value,
        None => body,
    };
    Some(body.trim())
}

/// Lowercase a header and fold `-`, `_` and whitespace runs into single spaces.
fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
