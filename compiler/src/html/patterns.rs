use super::cursor::{Match, Pattern};
use regex::Regex;
use std::sync::LazyLock;

/*
Template grammar patterns
*/

/// Placeholder head: one type symbol followed by `{args}`.
/// Backticks are excluded from args since they would close the
/// embedded snippet in CoffeeScript output.
///
pub static PLACEHOLDER_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^}])\{([^}`]*)\}").unwrap());

/// Backslash escape inside a literal run. The escaped
/// character may be anything but a line terminator.
///
pub static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([^\n\r\x{2028}\x{2029}])").unwrap());

/*
Context reduction patterns
*/

/// Value text inside an open quoted attribute. Replaced by the
/// `='` or `="` prefix alone.
///
pub static QUOTED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(=['"])[^'"<>]*"#).unwrap());

/// Start of a tag whose attributes may be stripped.
///
pub static TAG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[A-Za-z0-9_]+").unwrap());

/// One attribute right after a tag name or a previous
/// attribute. Bare attributes only count as closed when a
/// space or `>` follows, which the caller checks.
///
pub static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^ [A-Za-z0-9_-]+(?:=''|="")?"#).unwrap());

/// Leading text and complete open/close tags, all of which
/// count as closed structure.
///
pub static CLOSED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:[^'"<>]+|</?[A-Za-z0-9_]+>)*"#).unwrap());

/// Residue ending inside a freshly opened quoted attribute.
///
pub static OPEN_QUOTED_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"=['"]$"#).unwrap());

/*
Literal runs
*/

/// Maximal run of unescaped non-brace characters and
/// backslash escapes. A run may not end right before a `{`:
/// the last character then belongs to a placeholder head, so
/// one unit is given back.
///
pub struct LiteralRun;

impl Pattern for LiteralRun {
    fn match_prefix<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        let mut end = 0;
        let mut last_unit = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '{' | '}' => break,
                '\\' => match chars.peek() {
                    Some(&(j, escaped)) if !is_line_terminator(escaped) => {
                        chars.next();
                        last_unit = i;
                        end = j + escaped.len_utf8();
                    }
                    _ => break,
                },
                _ => {
                    last_unit = i;
                    end = i + c.len_utf8();
                }
            }
        }

        if text[end..].starts_with('{') {
            end = last_unit;
        }

        (end > 0).then(|| Match::new(&text[..end]))
    }
}

/// Resolves backslash escapes: `\X` becomes `X`.
///
pub fn unescape(text: &str) -> String {
    ESCAPE.replace_all(text, "$1").into_owned()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

// ------------------------------------------------------------- Unit Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::cursor::Cursor;

    fn literal(text: &str) -> Option<&str> {
        LiteralRun.match_prefix(text).map(|m| m.as_str())
    }

    // ----------------------------------------- LiteralRun tests

    #[test]
    fn test_literal_run_plain_text() {
        assert_eq!(literal("hello world"), Some("hello world"));
    }

    #[test]
    fn test_literal_run_stops_at_close_brace() {
        assert_eq!(literal("abc}def"), Some("abc"));
    }

    #[test]
    fn test_literal_run_gives_back_placeholder_symbol() {
        assert_eq!(literal("<b>${name}</b>"), Some("<b>"));
    }

    #[test]
    fn test_literal_run_none_before_placeholder() {
        assert_eq!(literal("${name}"), None);
        assert_eq!(literal("{x}"), None);
    }

    #[test]
    fn test_literal_run_keeps_escapes() {
        assert_eq!(literal(r"\{a\}"), Some(r"\{a\}"));
    }

    #[test]
    fn test_literal_run_escape_before_brace_given_back() {
        assert_eq!(literal(r"a\{{"), Some("a"));
    }

    #[test]
    fn test_literal_run_backslash_before_newline_stops() {
        assert_eq!(literal("ab\\\ncd"), Some("ab"));
    }

    #[test]
    fn test_literal_run_multibyte() {
        let mut cursor = Cursor::new("héllo&{x}");
        assert_eq!(cursor.eat(&LiteralRun).unwrap().as_str(), "héllo");
        assert_eq!(cursor.rest(), "&{x}");
    }

    // ----------------------------------------- unescape tests

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"\{a\}\\b"), r"{a}\b");
    }

    // ----------------------------------------- PLACEHOLDER_HEAD tests

    #[test]
    fn test_placeholder_head_rejects_backtick() {
        assert!(PLACEHOLDER_HEAD.match_prefix("${a`b}").is_none());
    }

    #[test]
    fn test_placeholder_head_groups() {
        let found = PLACEHOLDER_HEAD.match_prefix("@{items.map(f)}rest").unwrap();
        assert_eq!(found.group(1), Some("@"));
        assert_eq!(found.group(2), Some("items.map(f)"));
    }
}
