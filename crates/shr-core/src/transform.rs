use crate::key::KeyPath;
use crate::value::Value;

/// A rewrite applied to payload values, one keyed node at a time.
pub trait Transform: Send + Sync {
    /// Name reported by pipelines that ran this transform.
    fn name(&self) -> &str;

    /// Rewrite `value` found at `key`. `None` means the value has no key
    /// (the payload root, or a caller without path information).
    fn transform(&self, value: Value, key: Option<&KeyPath>) -> Value;
}
