//! Compile Errors
//!
//! Every failure of the template compiler is fatal for the
//! whole compile call. Errors are raised at the point of
//! failure and then wrapped by each enclosing (sub)template
//! frame with that frame's text, so the final message names
//! both the precise problem and where it happened.
//!

use std::fmt;
use thiserror::Error;

// ------------------------------------------------------------- Public Types

/// The specific problem that stopped compilation. Rendered
/// on its own as the first segment of a compile error.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Text left over at the top level that is neither a
    /// literal run nor a placeholder (usually a stray `}`).
    ///
    #[error("Unexpected characters in template ({0})")]
    UnexpectedCharacters(String),

    /// A conditional branch stopped parsing somewhere other
    /// than at its closing `}`.
    ///
    #[error("Unexpected characters in subtemplate ({0})")]
    UnexpectedCharactersInSubtemplate(String),

    /// Placeholder head with a symbol outside `$ & @ ?`.
    ///
    #[error("Unrecognized placeholder type ({0})")]
    UnrecognizedPlaceholderType(char),

    /// Placeholder used where its output would be unsafe or
    /// malformed, like raw markup inside an open tag.
    ///
    #[error("Illegal insertion of placeholder (type {symbol}) into HTML template (at {context})")]
    IllegalPlaceholderInsertion { symbol: char, context: String },

    /// A (sub)template left a tag or attribute open, so its
    /// ending context differs from its starting context.
    ///
    #[error("HTML template is ill-formed (at {0})")]
    IllFormedTemplate(String),

    /// Conditional branches nested deeper than the compiler
    /// is willing to recurse.
    ///
    #[error("Conditional placeholders nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// A compile failure together with the (sub)template text of
/// every frame it passed through, innermost first.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub fragments: Vec<String>,
}

// ------------------------------------------------------------- Public Implementations

impl CompileError {
    /// Appends the text of an enclosing frame. Called once per
    /// frame while the error unwinds.
    ///
    pub fn within(mut self, template: &str) -> Self {
        self.fragments.push(template.to_string());
        self
    }
}

impl From<ErrorKind> for CompileError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            fragments: Vec::new(),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for fragment in &self.fragments {
            write!(f, ": {}", fragment)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// ------------------------------------------------------------- Unit Tests
