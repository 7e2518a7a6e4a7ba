//! Bounded, human-readable summaries of values.
//!
//! Every renderer here is total: it never fails, and its output length is
//! bounded by the limits it was given. Lengths are counted in chars.

use crate::category::Category;
use crate::limits::Limits;
use shr_core::{Mapping, Value};

pub const ELLIPSIS: &str = "...";

/// Cap `s` at `max_len` chars by eliding its middle.
pub fn ellipsize(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        return s.to_string();
    }
    elide(s, len, max_len)
}

/// Unconditionally splice `...` into `s`, keeping a head and tail that make
/// the result exactly `max_len` chars (or a prefix of `...` when
/// `max_len < 3`).
fn elide(s: &str, len: usize, max_len: usize) -> String {
    if max_len < ELLIPSIS.len() {
        return ELLIPSIS[..max_len].to_string();
    }
    let (head, tail) = split_bound(max_len);
    let mut out = String::with_capacity(max_len);
    out.extend(s.chars().take(head));
    out.push_str(ELLIPSIS);
    out.extend(s.chars().skip(len.saturating_sub(tail)));
    out
}

/// Head and tail char counts around the ellipsis.
fn split_bound(max_len: usize) -> (usize, usize) {
    let room = max_len.saturating_sub(ELLIPSIS.len());
    let head = room / 2;
    (head, room - head)
}

/// Display form of a float: always carries a decimal point or exponent.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{f:?}")
    }
}

/// Quoted text, at most `max_len` chars.
pub fn quote_text(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    let (head, tail) = split_bound(max_len);
    if len <= max_len {
        let quoted = format!("{s:?}");
        let quoted_len = quoted.chars().count();
        if quoted_len <= max_len {
            return quoted;
        }
        // Escapes alone overflow the bound; head and tail would overlap in `s`.
        if len <= head + tail {
            return elide(&quoted, quoted_len, max_len);
        }
    }
    let short: String = s.chars().take(head).chain(s.chars().skip(len - tail)).collect();
    let quoted = format!("{short:?}");
    elide(&quoted, quoted.chars().count(), max_len)
}

/// Quoted byte string, at most `max_len` chars.
pub fn quote_bytes(b: &[u8], max_len: usize) -> String {
    let (head, tail) = split_bound(max_len);
    if b.len() <= max_len {
        let quoted = format!("b\"{}\"", b.escape_ascii());
        let quoted_len = quoted.chars().count();
        if quoted_len <= max_len {
            return quoted;
        }
        if b.len() <= head + tail {
            return elide(&quoted, quoted_len, max_len);
        }
    }
    let mut short = b[..head].to_vec();
    short.extend_from_slice(&b[b.len() - tail..]);
    let quoted = format!("b\"{}\"", short.escape_ascii());
    elide(&quoted, quoted.chars().count(), max_len)
}

/// Renders values within the element and length limits of a [`Limits`]
/// table, collapsing nesting deeper than its `level`.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer<'a> {
    limits: &'a Limits,
}

impl<'a> Summarizer<'a> {
    pub fn new(limits: &'a Limits) -> Self {
        Self { limits }
    }

    pub fn summarize(&self, value: &Value) -> String {
        self.render(value, self.limits.level())
    }

    fn render(&self, value: &Value, level: usize) -> String {
        let limit = |c: Category| self.limits.get(c);
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => ellipsize(&i.to_string(), limit(Category::Long)),
            Value::Float(f) => ellipsize(&format_float(*f), limit(Category::Long)),
            Value::Text(s) => quote_text(s, limit(Category::String)),
            Value::Bytes(b) => quote_bytes(b, limit(Category::String)),
            Value::Map(m) => self.render_map(m, level),
            Value::List(items) => {
                self.render_items(items.iter(), items.len(), level, "[", "]", limit(Category::List), "")
            }
            Value::Tuple(items) => {
                self.render_items(items.iter(), items.len(), level, "(", ")", limit(Category::Tuple), ",")
            }
            Value::Set(items) if items.is_empty() => "set()".to_string(),
            Value::Set(items) => {
                self.render_items(items.iter(), items.len(), level, "{", "}", limit(Category::Set), "")
            }
            Value::FrozenSet(items) if items.is_empty() => "frozenset()".to_string(),
            Value::FrozenSet(items) => self.render_items(
                items.iter(),
                items.len(),
                level,
                "frozenset({",
                "})",
                limit(Category::FrozenSet),
                "",
            ),
            Value::Array { typecode, items } if items.is_empty() => format!("array('{typecode}')"),
            Value::Array { typecode, items } => {
                let header = format!("array('{typecode}', [");
                self.render_items(items.iter(), items.len(), level, &header, "])", limit(Category::Array), "")
            }
            Value::Deque(items) => self.render_items(
                items.iter(),
                items.len(),
                level,
                "deque([",
                "])",
                limit(Category::Deque),
                "",
            ),
            Value::Opaque(o) => ellipsize(&o.canonical_repr(), limit(Category::Other)),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_items<'v>(
        &self,
        items: impl Iterator<Item = &'v Value>,
        len: usize,
        level: usize,
        left: &str,
        right: &str,
        max_items: usize,
        trail: &str,
    ) -> String {
        let body = if level == 0 && len > 0 {
            ELLIPSIS.to_string()
        } else {
            let mut pieces: Vec<String> = items.take(max_items).map(|v| self.render(v, level.saturating_sub(1))).collect();
            if len > max_items {
                pieces.push(ELLIPSIS.to_string());
            }
            pieces.join(", ")
        };
        let trail = if len == 1 { trail } else { "" };
        format!("{left}{body}{trail}{right}")
    }

    fn render_map(&self, map: &Mapping, level: usize) -> String {
        if map.is_empty() {
            return "{}".to_string();
        }
        if level == 0 {
            return format!("{{{ELLIPSIS}}}");
        }
        let max_keys = self.limits.get(Category::Dict);
        let string_limit = self.limits.get(Category::String);
        let mut pieces: Vec<String> = map
            .iter()
            .take(max_keys)
            .map(|(k, v)| format!("{}: {}", quote_text(k, string_limit), self.render(v, level - 1)))
            .collect();
        if map.len() > max_keys {
            pieces.push(ELLIPSIS.to_string());
        }
        format!("{{{}}}", pieces.join(", "))
    }
}
