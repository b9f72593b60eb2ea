use regex::Regex;
use std::sync::LazyLock;

/*
Interpolation delimiters
*/

/// `<%= expr %>`, `<%- expr %>` and `<% code %>`. Group 1 is
/// the mode marker (empty for evaluate blocks), group 2 the
/// body. Bodies are non-greedy and may span lines.
///
pub static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<%([=-]?)(.+?)%>").unwrap());

/*
Import helpers
*/

/// Runs of line breaks, collapsed to one in imported CSS.
///
pub static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Indentation at the start of each line of imported HTML.
///
pub static LEADING_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ +").unwrap());

/// Line breaks removed from imported HTML.
///
pub static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());
