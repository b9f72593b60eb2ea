//! Template Helpers
//!
//! Functions callable from `<%= %>` blocks. They read project
//! files, compile HTML templates, and emit snippets of the
//! selected output language. Paths are relative to the project
//! root, imports to its `src/` directory.
//!

use super::config::BuildContext;
use super::error::BuildError;
use super::files;
use super::interpolate;
use crate::html::{self, codegen};
use crate::patterns::{BLANK_LINES, LEADING_SPACES, LINE_BREAKS};
use serde_json::Value;
use tracing::debug;

// ------------------------------------------------------------- Public Functions

/// Dispatches a helper call by name with already evaluated
/// arguments.
///
pub fn call(name: &str, args: &[Value], ctx: &BuildContext) -> Result<Value, BuildError> {
    debug!(helper = name, args = args.len(), "calling helper");

    match name {
        "html" => html(single_string("html", args)?, ctx).map(Value::String),
        "importCSS" => import_css(&all_strings("importCSS", args)?, ctx).map(Value::String),
        "importHTML" => import_html(single_string("importHTML", args)?, ctx).map(Value::String),
        "assert" => Ok(Value::String(assert(single_string("assert", args)?, ctx))),
        "read" => files::read_text(&ctx.resolve(single_string("read", args)?)).map(Value::String),
        "readJSON" => files::read_json(&ctx.resolve(single_string("readJSON", args)?)),
        "readBase64" => {
            files::read_base64(&ctx.resolve(single_string("readBase64", args)?)).map(Value::String)
        }
        "ls" => files::list_dir(&ctx.resolve(single_string("ls", args)?))
            .map(|names| Value::Array(names.into_iter().map(Value::String).collect())),
        other => Err(BuildError::UnknownHelper(other.to_string())),
    }
}

/// Compiles an HTML template at top level and wraps it as an
/// `innerHTML` object for the build target.
///
pub fn html(template: &str, ctx: &BuildContext) -> Result<String, BuildError> {
    Ok(html::html(template, ctx.target().target())?)
}

/// Concatenates `src/css/<name>.css` files, interpolates them,
/// and emits one string literal per line joined with ` +\n`.
///
pub fn import_css(names: &[&str], ctx: &BuildContext) -> Result<String, BuildError> {
    let mut text = String::new();
    for name in names {
        text.push_str(&files::read_text(&ctx.source_path(&format!("css/{}.css", name)))?);
    }

    let text = interpolate::render(&text, ctx)?;
    let text = BLANK_LINES.replace_all(text.trim(), "\n");

    let mut lines: Vec<&str> = text.split_inclusive('\n').collect();
    if lines.is_empty() {
        lines.push("");
    }

    let literals: Vec<String> = lines.into_iter().map(codegen::json_string).collect();
    Ok(literals.join(" +\n").replace('`', "\\`"))
}

/// Reads `src/<name>.html` as a single line without
/// indentation, interpolates it, and compiles it with
/// [`html`].
///
pub fn import_html(name: &str, ctx: &BuildContext) -> Result<String, BuildError> {
    let text = files::read_text(&ctx.source_path(&format!("{}.html", name)))?;
    let text = LEADING_SPACES.replace_all(&text, "");
    let text = LINE_BREAKS.replace_all(&text, "");
    let text = interpolate::render(&text, ctx)?;

    html(&text, ctx)
}

/// Runtime assertion for test builds; empty otherwise.
///
pub fn assert(statement: &str, ctx: &BuildContext) -> String {
    if !ctx.tests_enabled() {
        return String::new();
    }
    ctx.target().target().assertion(statement)
}

// ------------------------------------------------------------- Private Functions

fn single_string<'v>(helper: &'static str, args: &'v [Value]) -> Result<&'v str, BuildError> {
    match args {
        [Value::String(s)] => Ok(s),
        [_] => Err(BuildError::ArgumentType { helper }),
        _ => Err(BuildError::Arity {
            helper,
            expected: "1",
            got: args.len(),
        }),
    }
}

fn all_strings<'v>(helper: &'static str, args: &'v [Value]) -> Result<Vec<&'v str>, BuildError> {
    if args.is_empty() {
        return Err(BuildError::Arity {
            helper,
            expected: "at least 1",
            got: 0,
        });
    }

    args.iter()
        .map(|arg| arg.as_str().ok_or(BuildError::ArgumentType { helper }))
        .collect()
}

// ------------------------------------------------------------- Unit Tests
