//! # Instance Paths
//!
//! A location inside a parsed document, expressed as a sequence of typed
//! segments from the root. The display form is part of the tool's output
//! contract:
//!
//! | segments                       | display                |
//! |--------------------------------|------------------------|
//! | (none)                         | `$`                    |
//! | `Key("a")`, `Key("b")`         | `$.a.b`                |
//! | `Key("items")`, `Index(2)`     | `$.items[2]`           |
//!
//! ## Ordering
//!
//! Paths order lexicographically over their segments. At a single depth an
//! [`PathSegment::Index`] sorts before a [`PathSegment::Key`], indices compare
//! numerically and keys compare by byte order. A path sorts before every path
//! it is a prefix of.

use std::fmt;

use serde_json::Value;

/// One step from a node to one of its children.
///
/// Variant order is significant: it drives the derived `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Position inside a sequence.
    Index(usize),
    /// Key inside a mapping.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Key(k) => write!(f, ".{k}"),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self {
        Self::Key(k.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(k: String) -> Self {
        Self::Key(k)
    }
}

/// Root-relative path to a node in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// The document root (`$`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from its segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns the segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Decode a JSON Pointer (RFC 6901) that addresses a node in `instance`.
    ///
    /// JSON Pointer tokens are untyped, so the document is walked alongside
    /// the pointer: a token becomes an [`PathSegment::Index`] only when the
    /// node it steps into is an array and the token is a canonical decimal
    /// index. Every other token, including ones that run past the end of the
    /// document, becomes a [`PathSegment::Key`].
    pub fn from_json_pointer(pointer: &str, instance: &Value) -> Self {
        if pointer.is_empty() {
            return Self::root();
        }

        let mut segments = Vec::new();
        let mut current = Some(instance);

        for raw in pointer.strip_prefix('/').unwrap_or(pointer).split('/') {
            let token = unescape_token(raw);
            let segment = match current {
                Some(Value::Array(items)) => match parse_index(&token) {
                    Some(i) => {
                        current = items.get(i);
                        PathSegment::Index(i)
                    }
                    None => {
                        current = None;
                        PathSegment::Key(token)
                    }
                },
                Some(Value::Object(map)) => {
                    current = map.get(&token);
                    PathSegment::Key(token)
                }
                _ => {
                    current = None;
                    PathSegment::Key(token)
                }
            };
            segments.push(segment);
        }

        Self { segments }
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for InstancePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Render a segment sequence in display form.
///
/// The result always starts with `$`; the empty sequence renders as exactly
/// `$`.
pub fn format_path(segments: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in segments {
        out.push_str(&segment.to_string());
    }
    out
}

/// `~1` → `/`, then `~0` → `~`. The order matters: `~01` must decode to `~1`.
fn unescape_token(raw: &str) -> String {
    if raw.contains('~') {
        raw.replace("~1", "/").replace("~0", "~")
    } else {
        raw.to_string()
    }
}

/// Array index per RFC 6901: `0` or a digit string without leading zeros.
fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}
