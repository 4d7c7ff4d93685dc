//! Resolution states and outcome.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Steps of a resolution, logged as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Start,
    CheckTrivial,
    ReuseCurrent,
    CheckCache,
    CacheHit,
    CacheMiss,
    Resolved,
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::CheckTrivial => "check-trivial",
            Self::ReuseCurrent => "reuse-current",
            Self::CheckCache => "check-cache",
            Self::CacheHit => "cache-hit",
            Self::CacheMiss => "cache-miss",
            Self::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

/// Where the resolved interpreter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// The host interpreter, used as-is.
    Current,
    /// An environment already in the cache.
    Cached,
    /// An environment built for this run.
    Built,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Cached => write!(f, "cached"),
            Self::Built => write!(f, "built"),
        }
    }
}

/// The interpreter a script should run under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub interpreter: PathBuf,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn new(interpreter: impl Into<PathBuf>, source: ResolutionSource) -> Self {
        Self {
            interpreter: interpreter.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names() {
        assert_eq!(ResolutionState::CheckTrivial.to_string(), "check-trivial");
        assert_eq!(ResolutionState::CacheMiss.to_string(), "cache-miss");
    }

    #[test]
    fn source_serializes_lowercase() {
        let resolution = Resolution::new("/usr/bin/python3", ResolutionSource::Cached);
        let json = serde_json::to_string(&resolution).unwrap();
        assert_eq!(json, r#"{"interpreter":"/usr/bin/python3","source":"cached"}"#);
    }
}
