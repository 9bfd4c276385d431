//! Path-addressed tree editing for JSON columns
//!
//! Path expressions are a small JSON-path subset: `$` is the root,
//! `$.a.b` addresses nested object keys, `$.a[2]` addresses array
//! elements. Expressions are parsed once at configuration time; lookups
//! that traverse a missing key, a non-container or an out-of-range index
//! yield absent instead of failing.

use crate::rules::PathRule;
use rowmask_core::{Error, Result};
use serde_json::Value as JsonValue;
use std::fmt;

/// One step of a compiled path expression
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Object key
    Key(String),

    /// Array index
    Index(usize),
}

/// A compiled path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
    source: String,
}

impl PathExpr {
    /// Parse a path expression.
    ///
    /// Fails with `Error::ConfigValidation` on anything that is not a `$`
    /// head followed by `.key` and `[index]` steps.
    pub fn parse(source: &str) -> Result<Self> {
        let malformed = |detail: &str| {
            Error::ConfigValidation(format!("malformed path '{source}': {detail}"))
        };

        let mut chars = source.chars().peekable();
        if chars.next() != Some('$') {
            return Err(malformed("must start with '$'"));
        }

        let mut segments = Vec::new();
        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let mut key = String::new();
                    while let Some(&next) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        key.push(next);
                        chars.next();
                    }
                    if key.is_empty() {
                        return Err(malformed("empty key"));
                    }
                    segments.push(Segment::Key(key));
                }
                '[' => {
                    let mut digits = String::new();
                    while let Some(&next) = chars.peek() {
                        if next == ']' {
                            break;
                        }
                        digits.push(next);
                        chars.next();
                    }
                    if chars.next() != Some(']') {
                        return Err(malformed("unterminated index"));
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| malformed("index must be a non-negative integer"))?;
                    segments.push(Segment::Index(index));
                }
                _ => return Err(malformed("expected '.' or '['")),
            }
        }

        Ok(Self {
            segments,
            source: source.to_string(),
        })
    }

    /// Whether this expression addresses the whole tree. The root is never
    /// eligible for replacement.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The original expression text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve the addressed node, or `None` if any step misses.
    pub fn resolve<'a>(&self, root: &'a JsonValue) -> Option<&'a JsonValue> {
        let mut node = root;
        for segment in &self.segments {
            node = match segment {
                Segment::Key(key) => node.as_object()?.get(key)?,
                Segment::Index(index) => node.as_array()?.get(*index)?,
            };
        }
        Some(node)
    }

    fn resolve_mut<'a>(&self, root: &'a mut JsonValue) -> Option<&'a mut JsonValue> {
        let mut node = root;
        for segment in &self.segments {
            node = match segment {
                Segment::Key(key) => node.as_object_mut()?.get_mut(key)?,
                Segment::Index(index) => node.as_array_mut()?.get_mut(*index)?,
            };
        }
        Some(node)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Masking input for an addressed node: a JSON string's contents verbatim,
/// anything else its compact JSON rendering.
fn render_node(node: &JsonValue) -> String {
    match node {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Apply path rules to a tree, sequentially and in configured order.
///
/// Each rule that resolves replaces the addressed node with a single JSON
/// string holding the masked text. Later rules see earlier edits; when two
/// rules address the same node the later one wins. Root paths and paths
/// that resolve to nothing are no-ops.
pub fn apply_path_rules(tree: &mut JsonValue, rules: &[PathRule]) {
    for rule in rules {
        if rule.path.is_root() {
            continue;
        }
        if let Some(node) = rule.path.resolve_mut(tree) {
            let masked = rule.kind.apply(&render_node(node));
            *node = JsonValue::String(masked);
        }
    }
}
