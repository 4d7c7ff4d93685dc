//! Python version numbers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Python\s+)?v?(\d+(?:\.\d+)*)(?:(a|b|rc)(\d+))?(?:\+\S*)?$").unwrap()
});

/// Pre-release phase of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha(u64),
    Beta(u64),
    Candidate(u64),
}

/// A Python version such as `3.11.4` or `3.13.0rc1`.
#[derive(Debug, Clone)]
pub struct PythonVersion {
    release: Vec<u64>,
    pre: Option<PreRelease>,
}

impl PythonVersion {
    /// Create a final release from its numeric segments.
    pub fn new(release: Vec<u64>) -> Self {
        Self { release, pre: None }
    }

    /// Attach a pre-release marker.
    pub fn with_pre(mut self, pre: PreRelease) -> Self {
        self.pre = Some(pre);
        self
    }

    /// Parse a version, accepting the `Python 3.x.y` form printed by `python -V`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = VERSION_REGEX.captures(text.trim())?;
        let release = caps[1]
            .split('.')
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<u64>>>()?;

        let pre = match (caps.get(2), caps.get(3)) {
            (Some(phase), Some(number)) => {
                let number = number.as_str().parse().ok()?;
                Some(match phase.as_str() {
                    "a" => PreRelease::Alpha(number),
                    "b" => PreRelease::Beta(number),
                    _ => PreRelease::Candidate(number),
                })
            }
            _ => None,
        };

        Some(Self { release, pre })
    }

    /// Numeric release segments.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Pre-release marker, if any.
    pub fn pre(&self) -> Option<PreRelease> {
        self.pre
    }

    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    /// Release segment at `index`, zero when absent.
    pub fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Compare release segments only, padding the shorter one with zeros.
    pub fn cmp_release(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for PythonVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PythonVersion {}

impl PartialOrd for PythonVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PythonVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // A final release sorts after every pre-release of the same number.
        self.cmp_release(other).then_with(|| match (self.pre, other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        })
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid Python version: {}", s))
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        match self.pre {
            Some(PreRelease::Alpha(n)) => write!(f, "a{}", n),
            Some(PreRelease::Beta(n)) => write!(f, "b{}", n),
            Some(PreRelease::Candidate(n)) => write!(f, "rc{}", n),
            None => Ok(()),
        }
    }
}
