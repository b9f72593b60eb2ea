//! CLI Argument Parsing
//!
//! Parses command-line arguments using pico-args. Flags are
//! consumed first; whatever is left becomes the subcommand and
//! its positional arguments. Unknown flags stop the process
//! early so subcommands receive clean, validated input.
//!

use super::colors::{NC, RED};
use crate::html::TargetKind;
use std::path::PathBuf;
use std::process;

// ------------------------------------------------------------- Public Types

/// Parsed CLI arguments for the `markup` binary.
///
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Subcommand to run (`build` or `html`). Empty if none was
    /// given.
    ///
    pub command: String,

    /// Prints each written file and enables debug logging.
    /// Enabled with `-v` or `--verbose`.
    ///
    pub verbose: bool,

    /// Only reports whether the build output is stale: exits 0
    /// if it needs rebuilding, 1 if it is fresh.
    ///
    pub check_only: bool,

    /// Project root holding package.json, version.json and
    /// `src/`. Defaults to the current directory.
    ///
    pub root: PathBuf,

    /// Output language, `--target coffee|javascript`.
    ///
    pub target: TargetKind,

    /// Starting markup context for `html`, `--context`.
    ///
    pub context: String,

    /// Positional arguments after the subcommand.
    ///
    pub positional: Vec<String>,
}

// ------------------------------------------------------------- Public Functions

/// Parses arguments from the environment and validates them.
/// Exits with an error message on unknown flags or bad values.
///
pub fn parse() -> Args {
    let mut pargs = pico_args::Arguments::from_env();

    let verbose = pargs.contains(["-v", "--verbose"]);
    let check_only = pargs.contains("--check-only");
    let root = or_exit(pargs.opt_value_from_str("--root")).unwrap_or_else(|| PathBuf::from("."));
    let target = or_exit(pargs.opt_value_from_str("--target")).unwrap_or_default();
    let context = or_exit(pargs.opt_value_from_str("--context")).unwrap_or_default();
    let command = pargs.free_from_str().unwrap_or_default();

    let remaining: Vec<String> = pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let unknown: Vec<&String> = remaining.iter().filter(|arg| arg.starts_with('-')).collect();
    if !unknown.is_empty() {
        eprintln!("{}Unknown arguments: {:?}{}", RED, unknown, NC);
        process::exit(1);
    }

    Args {
        command,
        verbose,
        check_only,
        root,
        target,
        context,
        positional: remaining,
    }
}

// ------------------------------------------------------------- Private Functions

/// Unwraps a pico-args result or exits with the error in red.
///
fn or_exit<T>(result: Result<T, pico_args::Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{}{}{}", RED, err, NC);
            process::exit(1);
        }
    }
}
