//! Build Errors
//!
//! Failures of the build pipeline around the template compiler.
//! None of them are recoverable: a build either writes its
//! output completely or not at all.
//!

use crate::html::CompileError;
use std::path::PathBuf;
use thiserror::Error;

// ------------------------------------------------------------- Public Types

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The `<%= %>` expression could not be parsed.
    ///
    #[error("Invalid expression `{expression}`: {message}")]
    Syntax { expression: String, message: String },

    #[error("{0} is not defined")]
    Undefined(String),

    #[error("Cannot read property `{property}` of {value}")]
    Property { property: String, value: String },

    #[error("Unknown helper: {0}")]
    UnknownHelper(String),

    #[error("{helper}() expects {expected}, got {got} argument(s)")]
    Arity {
        helper: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("{helper}() expects a string argument")]
    ArgumentType { helper: &'static str },

    /// `<% code %>` blocks need a JavaScript runtime.
    ///
    #[error("Evaluate blocks are not supported: <%{0}%>")]
    Evaluate(String),

    #[error("Invalid override `{0}`, expected key=value")]
    Override(String),

    #[error("`meta` in package.json must be an object")]
    MetaNotObject,
}
