//! Tagged value model for arbitrary nested payload data.

use std::collections::VecDeque;
use std::fmt;

/// A nested payload value.
///
/// Containers own their children, so a value tree can never be cyclic.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Map(Mapping),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    FrozenSet(Vec<Value>),
    /// Fixed-length typed array; `typecode` names the element type.
    Array { typecode: char, items: Vec<Value> },
    Deque(VecDeque<Value>),
    Opaque(Opaque),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text-like values: strings and byte strings.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Bytes(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Ordered element containers. Text is not a sequence here even though it
    /// is iterable.
    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            Self::List(_)
                | Self::Tuple(_)
                | Self::Set(_)
                | Self::FrozenSet(_)
                | Self::Array { .. }
                | Self::Deque(_)
        )
    }

    pub fn is_container(&self) -> bool {
        self.is_mapping() || self.is_sequence()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Int(_) | Self::Float(_))
    }

    /// Element count for containers, character count for text, byte count
    /// for byte strings. `None` for scalars and opaque values.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::Bytes(b) => Some(b.len()),
            Self::Map(m) => Some(m.len()),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) | Self::FrozenSet(items) => {
                Some(items.len())
            }
            Self::Array { items, .. } => Some(items.len()),
            Self::Deque(items) => Some(items.len()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in logs and descriptors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Map(_) => "dict",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::FrozenSet(_) => "frozenset",
            Self::Array { .. } => "array",
            Self::Deque(_) => "deque",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Apply `f` to every direct child, in iteration order.
    pub fn for_each_child_mut(&mut self, mut f: impl FnMut(&mut Value)) {
        match self {
            Self::Map(m) => m.values_mut().for_each(&mut f),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) | Self::FrozenSet(items) => {
                items.iter_mut().for_each(&mut f)
            }
            Self::Array { items, .. } => items.iter_mut().for_each(&mut f),
            Self::Deque(items) => items.iter_mut().for_each(&mut f),
            _ => {}
        }
    }

    /// Convert into JSON for a downstream serializer.
    ///
    /// Lossy: byte strings are decoded leniently, every sequence kind becomes
    /// an array, non-finite floats and opaque values become strings.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or_else(|| Json::String(f.to_string())),
            Self::Text(s) => Json::String(s.clone()),
            Self::Bytes(b) => Json::String(String::from_utf8_lossy(b).into_owned()),
            Self::Map(m) => Json::Object(
                m.iter().map(|(k, v)| (k.to_string(), v.to_json())).collect(),
            ),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) | Self::FrozenSet(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Array { items, .. } => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Deque(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Opaque(o) => Json::String(o.canonical_text()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Self::Map(Mapping {
                entries: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Map(m)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Self::Opaque(o)
    }
}

/// Insertion-ordered, string-keyed mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Keep only the first `len` keys in iteration order.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut m = Mapping::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A foreign object that has no structural representation.
///
/// `text` is its user-facing string form, `repr` its debug form. Either may be
/// missing when the object cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    type_name: String,
    text: Option<String>,
    repr: Option<String>,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), text: None, repr: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_repr(mut self, repr: impl Into<String>) -> Self {
        self.repr = Some(repr.into());
        self
    }

    /// Capture both renderings of a Rust value.
    pub fn from_display<T: fmt::Display + fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
            .with_text(value.to_string())
            .with_repr(format!("{value:?}"))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn repr(&self) -> Option<&str> {
        self.repr.as_deref()
    }

    /// Generic stand-in used when the object cannot be rendered.
    pub fn descriptor(&self) -> String {
        format!("<{} object>", self.type_name)
    }

    /// String form: text, else debug form, else the descriptor.
    pub fn canonical_text(&self) -> String {
        self.text
            .clone()
            .or_else(|| self.repr.clone())
            .unwrap_or_else(|| self.descriptor())
    }

    /// Debug form, else the descriptor.
    pub fn canonical_repr(&self) -> String {
        self.repr.clone().unwrap_or_else(|| self.descriptor())
    }
}

/// `alloc::vec::Vec<core::net::IpAddr>` -> `Vec<IpAddr>`
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        match c {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                out.push_str(segment.rsplit("::").next().unwrap_or(""));
                segment.clear();
                out.push(c);
            }
            _ => segment.push(c),
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(""));
    out
}
