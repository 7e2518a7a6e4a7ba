use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default traversal depth before containers are summarized instead of
/// descended into.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Shortener settings as they appear in a client configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Render opaque objects through their text form before summarizing.
    pub safe_repr: bool,
    /// Eligible key patterns. `None` makes every keyed value eligible.
    pub keys: Option<Vec<String>>,
    /// Per-category overrides, e.g. `{"maxlist": 5, "string": 40}`.
    pub sizes: BTreeMap<String, usize>,
    pub max_depth: usize,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            safe_repr: true,
            keys: None,
            sizes: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ShortenerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_size(mut self, name: impl Into<String>, size: usize) -> Self {
        self.sizes.insert(name.into(), size);
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_safe_repr(mut self, safe_repr: bool) -> Self {
        self.safe_repr = safe_repr;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
