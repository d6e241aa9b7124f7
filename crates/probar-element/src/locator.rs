//! Locator expressions and the algebra used to scope one locator under another.
//!
//! A [`Locator`] is an opaque expression the driver evaluates against the
//! document root. It may be a *union*: a top-level `|`-separated list of
//! alternatives. Pipes nested in predicates (`[...]`) or string literals
//! (`'...'`, `"..."`) never split a union.
//!
//! # Scoping
//!
//! ```text
//! base      = "a | b"
//! relative  = "t1 | t2"
//! compose   = "(a | b)/t1 | (a | b)/t2"
//! ```
//!
//! Without the parentheses only the first relative alternative would be
//! scoped under every base alternative; the others would range over the
//! whole document.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// An expression identifying zero or more document nodes.
///
/// Immutable: scoping or traversal always produces a new `Locator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Create a locator from a raw expression
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// The raw expression
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw expression
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if the expression is a top-level union
    #[must_use]
    pub fn is_union(&self) -> bool {
        is_union(&self.0)
    }

    /// Top-level alternatives, whitespace-trimmed
    #[must_use]
    pub fn alternatives(&self) -> Vec<&str> {
        split_union(&self.0)
    }

    /// Evaluate `relative` under this locator
    #[must_use]
    pub fn join(&self, relative: &Locator) -> Locator {
        compose(&self.0, &relative.0)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locator {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl From<String> for Locator {
    fn from(expression: String) -> Self {
        Self(expression)
    }
}

impl PartialEq<str> for Locator {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Locator {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Byte offsets of the pipes separating top-level alternatives.
///
/// All delimiters are ASCII, so every offset is a char boundary.
fn top_level_pipes(expr: &str) -> Vec<usize> {
    let bytes = expr.as_bytes();
    let mut pipes = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match quote {
            Some(q) if byte == q => {
                if bytes.get(i + 1) == Some(&q) {
                    // doubled quote is an escape, literal continues
                    i += 1;
                } else {
                    quote = None;
                }
            }
            Some(_) => {}
            None => match byte {
                b'\'' | b'"' => quote = Some(byte),
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'|' if depth == 0 => pipes.push(i),
                _ => {}
            },
        }
        i += 1;
    }

    pipes
}

/// Check if `expr` is a union of alternatives at the top level.
#[must_use]
pub fn is_union(expr: &str) -> bool {
    !top_level_pipes(expr).is_empty()
}

/// Split `expr` into its top-level alternatives, trimming each one.
///
/// A non-union expression yields a single element.
#[must_use]
pub fn split_union(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for pipe in top_level_pipes(expr) {
        parts.push(expr[start..pipe].trim());
        start = pipe + 1;
    }
    parts.push(expr[start..].trim());
    parts
}

/// Build the locator for `relative` evaluated under `base`.
///
/// Every relative alternative is prefixed with the base, which is
/// parenthesized when it is itself a union.
#[must_use]
pub fn compose(base: &str, relative: &str) -> Locator {
    let prefix: Cow<'_, str> = if is_union(base) {
        Cow::Owned(format!("({base})"))
    } else {
        Cow::Borrowed(base)
    };

    let composed = split_union(relative)
        .into_iter()
        .map(|alternative| format!("{prefix}/{alternative}"))
        .collect::<Vec<_>>()
        .join(" | ");

    Locator(composed)
}
