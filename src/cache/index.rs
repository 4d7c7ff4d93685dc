//! Cache index file format.
//!
//! The index is plain UTF-8 text, one record per environment, records
//! separated by a blank line:
//!
//! ```text
//! /home/ada/.scriptenv/venv_cache/env_01
//! >=3.10
//! requests
//! rich
//!
//! /home/ada/.scriptenv/venv_cache/env_02
//! ~=3.11.0
//! ```
//!
//! Line one is the environment location, line two the version requirement,
//! any further lines are dependencies. Records are stored least recently
//! used first.

use std::path::PathBuf;

use super::entry::CacheEntry;
use crate::spec::DependencySpec;

/// File name of the index, qualified with the crate version so an upgrade
/// never reads an index written in an older format.
pub fn index_file_name() -> String {
    format!(
        "CACHE_INFO_{}",
        env!("CARGO_PKG_VERSION").replace(['.', '-'], "_")
    )
}

/// Parse index text into entries.
///
/// Records without a location or version line are skipped, so a partially
/// written index loses only the damaged records.
pub fn parse_index(content: &str) -> Vec<CacheEntry> {
    let content = content.replace("\r\n", "\n");

    content
        .split("\n\n")
        .map(|record| record.trim_matches('\n'))
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let entry = parse_record(record);
            if entry.is_none() {
                tracing::debug!("Skipping malformed cache record: {:?}", record);
            }
            entry
        })
        .collect()
}

fn parse_record(record: &str) -> Option<CacheEntry> {
    let mut lines = record.lines();
    let location = lines.next().map(str::trim).filter(|l| !l.is_empty())?;
    let version = lines.next().map(str::trim).filter(|l| !l.is_empty())?;
    let dependencies = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    Some(CacheEntry::new(
        PathBuf::from(location),
        DependencySpec::from_parts(version, dependencies),
    ))
}

/// Render entries as index text.
pub fn render_index(entries: &[CacheEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let records: Vec<String> = entries.iter().map(render_record).collect();
    format!("{}\n", records.join("\n\n"))
}

fn render_record(entry: &CacheEntry) -> String {
    let mut lines = vec![
        entry.location.display().to_string(),
        entry.spec.version_requirement().to_string(),
    ];
    lines.extend(entry.spec.dependencies().iter().cloned());
    lines.join("\n")
}
