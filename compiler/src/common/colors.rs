//! Terminal Colors
//!
//! ANSI escape codes for the status lines the CLI prints.
//! Diagnostics go through tracing; these are only for the short
//! human-facing summary of a run.
//!

// ------------------------------------------------------------- Public Consts

/// Used for "Built <file>" and compiled output paths.
///
pub const GREEN: &str = "\x1b[0;32m";

/// Used for build and compile failures.
///
pub const RED: &str = "\x1b[0;31m";

/// Used when a build is skipped because the output is fresh.
///
pub const YELLOW: &str = "\x1b[0;33m";

/// Resets the terminal color. Always follows a colored message.
///
pub const NC: &str = "\x1b[0m";
