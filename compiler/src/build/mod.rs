//! Source Builder
//!
//! Produces a source file from a template source: loads the
//! build context, expands `<%= %>` blocks (which may compile
//! HTML templates through helpers), and writes the result. Also
//! answers whether an output is stale so build scripts can skip
//! work.
//!

mod config;
mod error;
mod expression;
mod files;
mod helpers;
mod interpolate;

pub use config::BuildContext;
pub use error::BuildError;

use crate::common::colors::{GREEN, NC};
use crate::html::{self, Context, TargetKind};
use std::path::{Path, PathBuf};
use tracing::info;

// ------------------------------------------------------------- Public Types

/// Everything one `build` run needs, resolved from the command
/// line.
///
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub root: PathBuf,
    pub target: TargetKind,
    /// `key=value` pairs applied on top of the JSON data.
    ///
    pub overrides: Vec<String>,
    pub verbose: bool,
}

// ------------------------------------------------------------- Public Functions

/// Runs the full pipeline for one input file. Nothing is
/// written unless every step succeeds.
///
pub fn build(options: &BuildOptions) -> Result<(), BuildError> {
    info!(
        input = %options.input.display(),
        target = options.target.name(),
        "building"
    );

    let ctx = BuildContext::load(&options.root, options.target, &options.overrides)?;
    let source = files::read_text(&options.input)?;
    let output = interpolate::render(&source, &ctx)?;

    files::write_text(&options.output, &output)?;

    if options.verbose {
        println!(
            "  {} -> {}{}{}",
            options.input.display(),
            GREEN,
            options.output.display(),
            NC
        );
    }

    info!(output = %options.output.display(), bytes = output.len(), "built");
    Ok(())
}

/// True when the output is missing or older than any of its
/// sources. Used by `--check-only`.
///
pub fn should_build(options: &BuildOptions) -> bool {
    config::is_stale(&options.root, &options.input, &options.output)
}

/// Compiles a single HTML template file, starting in `context`,
/// and returns the host expression.
///
pub fn compile_file(
    path: &Path,
    context: &Context,
    target: TargetKind,
) -> Result<String, BuildError> {
    let template = files::read_text(path)?;
    Ok(html::compile(&template, context, target.target())?)
}

// ------------------------------------------------------------- Unit Tests
