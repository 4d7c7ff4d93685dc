//! Version specifiers such as `>=3.10` or `~=3.9.0, !=3.9.7`.
//!
//! Only what interpreter selection needs is supported: the comparison
//! operators, `==`/`!=` with a trailing `.*`, compatible release (`~=`) and
//! arbitrary equality (`===`). Pre-release candidates are ordered normally
//! and never filtered out.

use std::fmt;
use std::str::FromStr;

use super::version::PythonVersion;
use crate::error::{Result, ScriptEnvError};

/// Comparison operator of a single clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Compatible,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Arbitrary,
}

impl Operator {
    /// Operators ordered so that longer tokens are tried first.
    const TOKENS: &'static [(&'static str, Operator)] = &[
        ("===", Operator::Arbitrary),
        ("~=", Operator::Compatible),
        ("==", Operator::Equal),
        ("!=", Operator::NotEqual),
        ("<=", Operator::LessEqual),
        (">=", Operator::GreaterEqual),
        ("<", Operator::Less),
        (">", Operator::Greater),
    ];

    fn split(clause: &str) -> Option<(Operator, &str)> {
        Self::TOKENS
            .iter()
            .find_map(|(token, op)| clause.strip_prefix(token).map(|rest| (*op, rest.trim())))
    }

    fn as_str(&self) -> &'static str {
        Self::TOKENS
            .iter()
            .find(|(_, op)| op == self)
            .map(|(token, _)| *token)
            .unwrap_or("")
    }
}

/// One `<op><version>` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    operator: Operator,
    version: PythonVersion,
    /// `==3.10.*` style prefix match.
    wildcard: bool,
    /// Version text as written, used by `===`.
    raw: String,
}

impl Specifier {
    /// Parse a single clause.
    pub fn parse(clause: &str) -> Result<Self> {
        let clause = clause.trim();
        let invalid = |message: &str| ScriptEnvError::InvalidSpecifier {
            specifier: clause.to_string(),
            message: message.to_string(),
        };

        let (operator, rest) = Operator::split(clause).ok_or_else(|| invalid("missing operator"))?;
        if rest.is_empty() {
            return Err(invalid("missing version"));
        }

        let (text, wildcard) = match rest.strip_suffix(".*") {
            Some(prefix) => (prefix, true),
            None => (rest, false),
        };

        if wildcard && !matches!(operator, Operator::Equal | Operator::NotEqual) {
            return Err(invalid("wildcards are only allowed with == and !="));
        }

        let version = match PythonVersion::parse(text) {
            Some(version) => version,
            // `===` compares text, anything goes
            None if operator == Operator::Arbitrary => PythonVersion::new(vec![]),
            None => return Err(invalid("unparsable version")),
        };

        if operator == Operator::Compatible && version.release().len() < 2 {
            return Err(invalid("~= needs at least two release segments"));
        }

        Ok(Self {
            operator,
            version,
            wildcard,
            raw: text.to_string(),
        })
    }

    /// Check whether `candidate` satisfies this clause.
    pub fn contains(&self, candidate: &PythonVersion) -> bool {
        match self.operator {
            Operator::Equal if self.wildcard => self.prefix_matches(candidate),
            Operator::NotEqual if self.wildcard => !self.prefix_matches(candidate),
            Operator::Equal => candidate == &self.version,
            Operator::NotEqual => candidate != &self.version,
            Operator::LessEqual => candidate <= &self.version,
            Operator::GreaterEqual => candidate >= &self.version,
            Operator::Less => candidate < &self.version,
            Operator::Greater => candidate > &self.version,
            Operator::Compatible => {
                let release = self.version.release();
                let prefix = &release[..release.len() - 1];
                candidate >= &self.version
                    && prefix
                        .iter()
                        .enumerate()
                        .all(|(i, n)| candidate.segment(i) == *n)
            }
            Operator::Arbitrary => candidate.to_string() == self.raw,
        }
    }

    fn prefix_matches(&self, candidate: &PythonVersion) -> bool {
        self.version
            .release()
            .iter()
            .enumerate()
            .all(|(i, n)| candidate.segment(i) == *n)
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.as_str(), self.raw)?;
        if self.wildcard {
            write!(f, ".*")?;
        }
        Ok(())
    }
}

/// A comma-separated set of clauses; a version must satisfy all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSpecifiers {
    clauses: Vec<Specifier>,
}

impl VersionSpecifiers {
    /// Parse a specifier set. An empty string matches every version.
    pub fn parse(text: &str) -> Result<Self> {
        let clauses = text
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Specifier::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    /// Check whether `version` satisfies every clause.
    pub fn contains(&self, version: &PythonVersion) -> bool {
        self.clauses.iter().all(|clause| clause.contains(version))
    }

    pub fn clauses(&self) -> &[Specifier] {
        &self.clauses
    }
}

impl FromStr for VersionSpecifiers {
    type Err = ScriptEnvError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionSpecifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.clauses.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", clauses.join(", "))
    }
}
