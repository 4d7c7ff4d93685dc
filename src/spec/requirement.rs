//! Requirement-string grammar.
//!
//! Accepts the PEP 508 shapes people put in script headers:
//!
//! - `requests`
//! - `rich[jupyter]>=13,<14`
//! - `numpy (>=1.26)`
//! - `mypkg @ https://example.com/mypkg.tar.gz`
//! - `tomli; python_version < "3.11"`
//!
//! Marker expressions are checked for presence only, not evaluated.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ScriptEnvError};

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(.*)$").unwrap()
});

static EXTRA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());

static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(===|~=|==|!=|<=|>=|<|>)\s*(\S+)$").unwrap()
});

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^v?(?:\d+!)?\d+(?:\.\d+)*(?:[-_.]?(?:a|b|c|rc|alpha|beta|pre|preview)[-_.]?\d*)?(?:[-_.]?(?:post|rev|r)[-_.]?\d*)?(?:[-_.]?dev[-_.]?\d*)?(?:\+[a-z0-9]+(?:[-_.][a-z0-9]+)*)?(?:\.\*)?$",
    )
    .unwrap()
});

/// Where a requirement's distribution comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementSource {
    /// Version clauses, e.g. `[">=13", "<14"]`; empty means any version.
    Index(Vec<String>),
    /// Direct reference after `@`.
    Url(String),
}

/// A parsed requirement string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub source: RequirementSource,
    pub marker: Option<String>,
}

impl Requirement {
    /// Parse a requirement string.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |message: &str| ScriptEnvError::InvalidRequirement {
            requirement: text.to_string(),
            message: message.to_string(),
        };

        let (body, marker) = match split_marker(text) {
            Some((body, marker)) => {
                let marker = marker.trim();
                if marker.is_empty() {
                    return Err(invalid("empty environment marker after ';'"));
                }
                (body.trim(), Some(marker.to_string()))
            }
            None => (text.trim(), None),
        };

        let caps = NAME_REGEX
            .captures(body)
            .ok_or_else(|| invalid("expected a package name"))?;
        let name = caps[1].to_string();
        let mut rest = caps.get(2).map_or("", |m| m.as_str()).trim();

        let mut extras = Vec::new();
        if let Some(after_bracket) = rest.strip_prefix('[') {
            let (inner, tail) = after_bracket
                .split_once(']')
                .ok_or_else(|| invalid("unterminated extras list"))?;
            for extra in inner.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                if !EXTRA_REGEX.is_match(extra) {
                    return Err(invalid(&format!("invalid extra name '{}'", extra)));
                }
                extras.push(extra.to_string());
            }
            rest = tail.trim();
        }

        let source = if let Some(url) = rest.strip_prefix('@') {
            let url = url.trim();
            if url.is_empty() || url.contains(char::is_whitespace) {
                return Err(invalid("expected a URL after '@'"));
            }
            RequirementSource::Url(url.to_string())
        } else {
            let clauses = match rest.strip_prefix('(') {
                Some(inner) => inner
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("unterminated version list"))?,
                None => rest,
            };
            RequirementSource::Index(parse_clauses(clauses).map_err(|m| invalid(&m))?)
        };

        Ok(Self {
            name,
            extras,
            source,
            marker,
        })
    }
}

/// Split off the environment marker.
///
/// After a direct URL the `;` only starts a marker when whitespace precedes
/// it, since URLs may contain `;` themselves.
fn split_marker(text: &str) -> Option<(&str, &str)> {
    let is_url = text.split(';').next().is_some_and(|head| head.contains('@'));
    if !is_url {
        return text.split_once(';');
    }
    text.char_indices()
        .find(|&(i, c)| c == ';' && text[..i].ends_with(char::is_whitespace))
        .map(|(i, _)| (&text[..i], &text[i + 1..]))
}

fn parse_clauses(text: &str) -> std::result::Result<Vec<String>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|clause| {
            let clause = clause.trim();
            let caps = CLAUSE_REGEX
                .captures(clause)
                .ok_or_else(|| format!("invalid version clause '{}'", clause))?;
            let (op, version) = (&caps[1], &caps[2]);
            if op != "===" && !VERSION_REGEX.is_match(version) {
                return Err(format!("invalid version '{}'", version));
            }
            Ok(format!("{}{}", op, version))
        })
        .collect()
}
