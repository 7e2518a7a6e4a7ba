//! Key paths and the eligibility patterns matched against them.

use crate::error::{Result, ShrError};
use regex::Regex;
use std::fmt;

/// Location of a value inside a payload: field names and list indices from
/// the root down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// A new path one level below this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }
}

impl From<&str> for KeyPath {
    /// Dotted form: `"body.request.headers"`.
    fn from(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self(dotted.split('.').map(str::to_string).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Any,
    Exact(String),
    Glob(Regex),
}

impl Segment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(s) => s == segment,
            Self::Glob(re) => re.is_match(segment),
        }
    }
}

/// One dotted eligibility pattern. `*` as a whole segment matches any single
/// segment; `*` inside a segment is a glob.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    segments: Vec<Segment>,
}

impl KeyPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| ShrError::InvalidKeyPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };
        if pattern.is_empty() {
            return Err(invalid("empty pattern"));
        }

        let mut segments = Vec::new();
        for part in pattern.split('.') {
            let segment = match part {
                "" => return Err(invalid("empty segment")),
                "*" => Segment::Any,
                p if p.contains('*') => {
                    let body = p.split('*').map(regex::escape).collect::<Vec<_>>().join(".*");
                    let re = Regex::new(&format!("^{body}$")).map_err(|e| invalid(&e.to_string()))?;
                    Segment::Glob(re)
                }
                p => Segment::Exact(p.to_string()),
            };
            segments.push(segment);
        }
        Ok(Self { source: pattern.to_string(), segments })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Same length, every segment matching.
    pub fn matches(&self, key: &KeyPath) -> bool {
        self.segments.len() == key.len()
            && self.segments.iter().zip(key.segments()).all(|(p, k)| p.matches(k))
    }
}

/// Set of eligibility patterns. `KeySet::any()` accepts every key.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    patterns: Option<Vec<KeyPattern>>,
}

impl KeySet {
    pub fn any() -> Self {
        Self { patterns: None }
    }

    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| KeyPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns: Some(patterns) })
    }

    pub fn is_any(&self) -> bool {
        self.patterns.is_none()
    }

    pub fn contains(&self, key: &KeyPath) -> bool {
        match &self.patterns {
            None => true,
            Some(patterns) => patterns.iter().any(|p| p.matches(key)),
        }
    }
}
