//! The size limiter: per-category shortening of nested values.

use crate::category::Category;
use crate::limits::Limits;
use crate::summary::{ellipsize, format_float, quote_text, Summarizer};
use shr_core::config::DEFAULT_MAX_DEPTH;
use shr_core::{KeyPath, KeySet, Mapping, Result, ShortenerConfig, Transform, Value};
use tracing::{debug, trace, warn};

/// Caps every container and scalar of an eligible value at the limit of its
/// category.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct SizeLimiter {
    limits: Limits,
    safe_repr: bool,
    keys: KeySet,
    max_depth: usize,
}

impl Default for SizeLimiter {
    fn default() -> Self {
        Self::new(true, KeySet::any(), Limits::default())
    }
}

impl SizeLimiter {
    pub fn new(safe_repr: bool, keys: KeySet, limits: Limits) -> Self {
        debug!(
            "Size limiter configured: safe_repr={}, any_key={}, limits={:?}",
            safe_repr,
            keys.is_any(),
            limits
        );
        Self { limits, safe_repr, keys, max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Build from configuration. Fails on an unknown size name or a key
    /// pattern that does not compile.
    pub fn from_config(config: &ShortenerConfig) -> Result<Self> {
        let limits = Limits::try_from(&config.sizes)?;
        let keys = match &config.keys {
            Some(patterns) => KeySet::from_patterns(patterns)?,
            None => KeySet::any(),
        };
        Ok(Self::new(config.safe_repr, keys, limits).with_max_depth(config.max_depth))
    }

    /// Containers nested at or below `max_depth` are summarized instead of
    /// descended into.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn safe_repr(&self) -> bool {
        self.safe_repr
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn classify(&self, value: &Value) -> Category {
        Category::of(value)
    }

    /// Limit of the category `value` falls into.
    pub fn max_size(&self, value: &Value) -> usize {
        self.limits.get(self.classify(value))
    }

    /// Entry point. Values without a key, or whose key is not eligible, come
    /// back untouched.
    pub fn apply(&self, value: Value, key: Option<&KeyPath>) -> Value {
        if !self.should_shorten(key) {
            return value;
        }
        self.shorten(value)
    }

    pub fn should_shorten(&self, key: Option<&KeyPath>) -> bool {
        match key {
            Some(key) if !key.is_empty() => self.keys.contains(key),
            _ => false,
        }
    }

    /// Shorten `value` and everything below it, ignoring eligibility.
    pub fn shorten(&self, value: Value) -> Value {
        self.shorten_at(value, 0)
    }

    fn shorten_at(&self, value: Value, depth: usize) -> Value {
        if value.is_container() && depth >= self.max_depth {
            warn!(
                "Depth limit {} reached at a {}, summarizing instead of descending",
                self.max_depth,
                value.type_name()
            );
            return Value::Text(self.summarize(&value));
        }

        let max_size = self.max_size(&value);
        match value {
            Value::Map(map) => {
                let mut value = Value::Map(self.shorten_mapping(map, max_size));
                self.traverse(&mut value, depth);
                value
            }
            Value::Text(_) | Value::Bytes(_) => self.shorten_sequence(value, max_size),
            value if value.is_sequence() => {
                let mut value = self.shorten_sequence(value, max_size);
                self.traverse(&mut value, depth);
                value
            }
            value if value.is_numeric() => self.shorten_scalar(value, self.limits.get(Category::Long)),
            value => self.shorten_other(value),
        }
    }

    /// Rewrite every child of a mapping or sequence in place.
    ///
    /// A child mapping is cut to its key limit and a child sequence is
    /// summarized when over its element limit; either is then walked in
    /// turn. Any other child goes through the leaf strategies. Text and
    /// scalars have no children, so traversing them is a no-op.
    pub fn traverse(&self, value: &mut Value, depth: usize) {
        value.for_each_child_mut(|child| {
            *child = self.shorten_at(std::mem::take(child), depth + 1);
        });
    }

    /// Text and ordered containers: unchanged when within `max_size`,
    /// otherwise replaced by a bounded summary string.
    pub fn shorten_sequence(&self, value: Value, max_size: usize) -> Value {
        match value.len() {
            Some(len) if len > max_size => {
                trace!("Summarizing {} of length {} (limit {})", value.type_name(), len, max_size);
                Value::Text(self.summarize(&value))
            }
            _ => value,
        }
    }

    /// Keep the first `max_size` keys. Values are not shortened here.
    pub fn shorten_mapping(&self, mut map: Mapping, max_size: usize) -> Mapping {
        if map.len() > max_size {
            trace!("Truncating mapping of {} keys to {}", map.len(), max_size);
            map.truncate(max_size);
        }
        map
    }

    /// Numbers: unchanged when their string form fits `max_len`. An elided
    /// form is also held to the string limit, so it stays a valid text leaf.
    pub fn shorten_scalar(&self, value: Value, max_len: usize) -> Value {
        let form = match &value {
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Float(f) => format_float(*f),
            _ => return self.shorten_other(value),
        };
        if form.chars().count() <= max_len {
            return value;
        }
        trace!("Eliding {} of {} chars (limit {})", value.type_name(), form.chars().count(), max_len);
        Value::Text(ellipsize(&form, max_len.min(self.limits.get(Category::String))))
    }

    /// Everything without a structural strategy. Null is kept as is; any other
    /// value always becomes a bounded summary string.
    pub fn shorten_other(&self, value: Value) -> Value {
        match value {
            value if value.is_null() => value,
            value if self.safe_repr => {
                let text = match value {
                    Value::Text(s) => s,
                    Value::Opaque(o) => o.canonical_text(),
                    other => self.summarizer().summarize(&other),
                };
                Value::Text(quote_text(&text, self.limits.get(Category::String)))
            }
            value => Value::Text(self.summarize(&value)),
        }
    }

    fn summarizer(&self) -> Summarizer<'_> {
        Summarizer::new(&self.limits)
    }

    /// Summary that replaces a value. Capped at the string limit so the
    /// replacement is itself a valid text leaf.
    fn summarize(&self, value: &Value) -> String {
        ellipsize(&self.summarizer().summarize(value), self.limits.get(Category::String))
    }
}

impl Transform for SizeLimiter {
    fn name(&self) -> &str {
        "shortener"
    }

    fn transform(&self, value: Value, key: Option<&KeyPath>) -> Value {
        self.apply(value, key)
    }
}
