//! Size categories and the fixed-priority classifier.

use shr_core::{Result, ShrError, Value};
use std::fmt;
use std::str::FromStr;

/// Sizing category of a value. Each category carries exactly one limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    String,
    Long,
    Dict,
    List,
    Tuple,
    Set,
    FrozenSet,
    Array,
    Deque,
    Other,
}

type Predicate = fn(&Value) -> bool;

/// Classification order. The first matching predicate wins; anything left
/// over is `Other`.
const DISPATCH: [(Category, Predicate); 9] = [
    (Category::String, is_text),
    (Category::Long, is_integer),
    (Category::Dict, is_mapping),
    (Category::List, is_list),
    (Category::Tuple, is_tuple),
    (Category::Set, is_set),
    (Category::FrozenSet, is_frozenset),
    (Category::Array, is_array),
    (Category::Deque, is_deque),
];

fn is_text(v: &Value) -> bool {
    v.is_text()
}

fn is_integer(v: &Value) -> bool {
    matches!(v, Value::Int(_) | Value::Bool(_))
}

fn is_mapping(v: &Value) -> bool {
    v.is_mapping()
}

fn is_list(v: &Value) -> bool {
    matches!(v, Value::List(_))
}

fn is_tuple(v: &Value) -> bool {
    matches!(v, Value::Tuple(_))
}

fn is_set(v: &Value) -> bool {
    matches!(v, Value::Set(_))
}

fn is_frozenset(v: &Value) -> bool {
    matches!(v, Value::FrozenSet(_))
}

fn is_array(v: &Value) -> bool {
    matches!(v, Value::Array { .. })
}

fn is_deque(v: &Value) -> bool {
    matches!(v, Value::Deque(_))
}

impl Category {
    pub const COUNT: usize = 10;

    pub const ALL: [Category; Self::COUNT] = [
        Self::String,
        Self::Long,
        Self::Dict,
        Self::List,
        Self::Tuple,
        Self::Set,
        Self::FrozenSet,
        Self::Array,
        Self::Deque,
        Self::Other,
    ];

    pub fn of(value: &Value) -> Self {
        DISPATCH
            .iter()
            .find(|(_, matches)| matches(value))
            .map(|(category, _)| *category)
            .unwrap_or(Self::Other)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Long => "long",
            Self::Dict => "dict",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::FrozenSet => "frozenset",
            Self::Array => "array",
            Self::Deque => "deque",
            Self::Other => "other",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Categories whose limit counts elements rather than characters.
    pub fn is_container(self) -> bool {
        !matches!(self, Self::String | Self::Long | Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ShrError;

    /// Accepts `list` and `maxlist` alike; `mapping` is an alias of `dict`.
    fn from_str(name: &str) -> Result<Self> {
        let bare = name.strip_prefix("max").unwrap_or(name);
        let bare = if bare == "mapping" { "dict" } else { bare };
        Self::ALL
            .into_iter()
            .find(|c| c.name() == bare)
            .ok_or_else(|| ShrError::UnknownCategory(name.to_string()))
    }
}
