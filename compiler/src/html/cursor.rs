//! Template Cursor
//!
//! A forward-only view over the text that is still to be
//! parsed. The only way to move forward is to eat a pattern
//! anchored at the current position; a failed attempt leaves
//! the cursor where it was.
//!

use regex::Regex;

// ------------------------------------------------------------- Public Types

/// Something that can be matched at the very start of the
/// remaining text. Implemented for anchored regexes, plain
/// string prefixes, and hand-written scanners.
///
pub trait Pattern {
    fn match_prefix<'t>(&self, text: &'t str) -> Option<Match<'t>>;
}

/// Text matched by a pattern plus its capture groups. Slices
/// borrow from the template itself, not from the cursor, so a
/// match can be held while the cursor keeps moving.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t str,
    groups: Vec<Option<&'t str>>,
}

/// Remaining input of a single compile call.
///
#[derive(Debug)]
pub struct Cursor<'a> {
    rest: &'a str,
}

// ------------------------------------------------------------- Public Implementations

impl<'t> Match<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            groups: Vec::new(),
        }
    }

    pub fn as_str(&self) -> &'t str {
        self.text
    }

    /// Returns capture group `index` (1-based, like regex
    /// groups). None when the group did not participate.
    ///
    pub fn group(&self, index: usize) -> Option<&'t str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i).copied().flatten())
    }
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consumes `pattern` if it matches at the current position
    /// and returns the match. On failure nothing changes.
    ///
    pub fn eat<P: Pattern + ?Sized>(&mut self, pattern: &P) -> Option<Match<'a>> {
        let found = pattern.match_prefix(self.rest)?;
        self.rest = &self.rest[found.text.len()..];
        Some(found)
    }
}

impl Pattern for Regex {
    fn match_prefix<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        let caps = self.captures(text)?;
        let whole = caps.get(0)?;

        if whole.start() != 0 {
            return None;
        }

        Some(Match {
            text: whole.as_str(),
            groups: caps.iter().skip(1).map(|g| g.map(|m| m.as_str())).collect(),
        })
    }
}

impl Pattern for str {
    fn match_prefix<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        text.starts_with(self).then(|| Match::new(&text[..self.len()]))
    }
}

// ------------------------------------------------------------- Unit Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_prefix_advances() {
        let mut cursor = Cursor::new("{rest");
        let found = cursor.eat("{").unwrap();
        assert_eq!(found.as_str(), "{");
        assert_eq!(cursor.rest(), "rest");
    }

    #[test]
    fn test_eat_failure_leaves_state() {
        let mut cursor = Cursor::new("abc");
        assert!(cursor.eat("}").is_none());
        assert_eq!(cursor.rest(), "abc");
    }

    #[test]
    fn test_eat_regex_must_match_at_start() {
        let re = Regex::new(r"b+").unwrap();
        let mut cursor = Cursor::new("abb");
        assert!(cursor.eat(&re).is_none());
        assert_eq!(cursor.rest(), "abb");
    }

    #[test]
    fn test_eat_regex_groups() {
        let re = Regex::new(r"^(.)\{([^}]*)\}(x)?").unwrap();
        let mut cursor = Cursor::new("${name}tail");
        let found = cursor.eat(&re).unwrap();
        assert_eq!(found.group(1), Some("$"));
        assert_eq!(found.group(2), Some("name"));
        assert_eq!(found.group(3), None);
        assert_eq!(found.group(0), None);
        assert_eq!(cursor.rest(), "tail");
    }
}
