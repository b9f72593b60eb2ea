//! Markup Context Tracking
//!
//! Tracks, from lexical structure alone, which markup is still
//! open at a point in a template. The context is the residue of
//! everything consumed so far once closed structure has been
//! erased: an empty residue means top level, a residue ending in
//! `='` or `="` means inside a quoted attribute value, anything
//! else means somewhere inside an open tag.
//!
//! This is a heuristic reduction, not an HTML parser. It only
//! has to be precise about the three positions placeholders care
//! about.
//!

use super::patterns::{ATTRIBUTE, CLOSED_PREFIX, OPEN_QUOTED_ATTRIBUTE, QUOTED_VALUE, TAG_OPEN};
use std::fmt;

// ------------------------------------------------------------- Public Types

/// Residue of still-open markup structure at a point in a
/// template. Two contexts are equal exactly when the same
/// structure is open.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Context(String);

// ------------------------------------------------------------- Public Implementations

impl Context {
    pub fn new(residue: impl Into<String>) -> Self {
        Self(residue.into())
    }

    /// Outside any open tag.
    ///
    pub fn top_level() -> Self {
        Self::default()
    }

    pub fn is_top_level(&self) -> bool {
        self.0.is_empty()
    }

    /// Directly inside an open `'` or `"` attribute value.
    ///
    pub fn in_quoted_attribute(&self) -> bool {
        OPEN_QUOTED_ATTRIBUTE.is_match(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Computes the context after `literal` has been emitted.
    /// The literal is appended to the residue and closed
    /// structure is erased in three passes: attribute values,
    /// finished attributes, then leading text and whole tags.
    ///
    pub fn advance(&self, literal: &str) -> Self {
        if literal.is_empty() {
            return self.clone();
        }

        let residue = format!("{}{}", self.0, literal);
        let residue = QUOTED_VALUE.replace_all(&residue, "$1");
        let residue = strip_closed_attributes(&residue);
        let residue = CLOSED_PREFIX.replace(&residue, "");

        Self(residue.into_owned())
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ------------------------------------------------------------- Private Functions

/// Removes every finished attribute that directly follows a tag
/// name: bare names followed by a space or `>`, and names with
/// an empty quoted value (values were emptied by the previous
/// pass). Stops at the first attribute that is still open.
///
fn strip_closed_attributes(residue: &str) -> String {
    let mut out = String::with_capacity(residue.len());
    let mut copied = 0;

    for tag in TAG_OPEN.find_iter(residue) {
        out.push_str(&residue[copied..tag.end()]);
        let mut pos = tag.end();

        while let Some(attr) = ATTRIBUTE.find(&residue[pos..]) {
            let after = pos + attr.end();
            let has_value = attr.as_str().ends_with("''") || attr.as_str().ends_with("\"\"");
            let followed_by_break = matches!(residue[after..].chars().next(), Some(' ' | '>'));

            if !has_value && !followed_by_break {
                break;
            }
            pos = after;
        }

        copied = pos;
    }

    out.push_str(&residue[copied..]);
    out
}

// ------------------------------------------------------------- Unit Tests
