//! Code Generation
//!
//! Renders a compiled template expression as source text of the
//! host language. The syntax of every construct comes from a
//! [`Target`], so the same expression can be emitted as
//! CoffeeScript or plain JavaScript. Placeholder arguments are
//! foreign snippets and are embedded verbatim.
//!

use super::parser::Expr;
use std::str::FromStr;

// ------------------------------------------------------------- Public Types

/// Host-language syntax for each node of a template expression.
/// Methods that take `expr` receive a snippet already passed
/// through [`Target::embed`].
///
pub trait Target {
    /// Quoted string literal containing `text`.
    ///
    fn string_literal(&self, text: &str) -> String;

    /// Expression for the empty string.
    ///
    fn empty_string(&self) -> String {
        "\"\"".to_string()
    }

    /// Wraps a template-supplied snippet so it is read as host
    /// code.
    ///
    fn embed(&self, snippet: &str) -> String;

    fn escape_call(&self, expr: &str) -> String {
        format!("E({})", expr)
    }

    fn inner_content(&self, expr: &str) -> String;

    fn concat_contents(&self, expr: &str) -> String {
        format!("E.cat({})", expr)
    }

    fn ternary(&self, condition: &str, then_branch: &str, else_branch: &str) -> String;

    fn concat(&self, parts: &[String]) -> String {
        parts.join(" + ")
    }

    /// Wraps a whole template into an object exposing
    /// `innerHTML`, the shape `&{}` and `@{}` consume.
    ///
    fn wrap_template(&self, expr: &str) -> String;

    /// Statement that throws when `statement` does not hold.
    ///
    fn assertion(&self, statement: &str) -> String;
}

/// CoffeeScript output. Snippets are embedded JavaScript
/// between backticks.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct CoffeeScript;

/// Plain JavaScript output.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScript;

/// Selectable output language.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetKind {
    #[default]
    CoffeeScript,
    JavaScript,
}

// ------------------------------------------------------------- Public Functions

/// Renders `expr` with the syntax of `target`.
///
pub fn render(expr: &Expr, target: &dyn Target) -> String {
    match expr {
        Expr::Empty => target.empty_string(),
        Expr::Literal(text) => target.string_literal(text),
        Expr::Escape(arg) => target.escape_call(&target.embed(arg)),
        Expr::RawContent(arg) => target.inner_content(&target.embed(arg)),
        Expr::RawContentArray(arg) => target.concat_contents(&target.embed(arg)),
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => target.ternary(
            &target.embed(condition),
            &render(then_branch, target),
            &render(else_branch, target),
        ),
        Expr::Concat(parts) if parts.is_empty() => target.empty_string(),
        Expr::Concat(parts) => {
            let rendered: Vec<String> = parts.iter().map(|part| render(part, target)).collect();
            target.concat(&rendered)
        }
    }
}

/// JSON string literal for `text`, the common base of both
/// targets' string syntax.
///
pub fn json_string(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

// ------------------------------------------------------------- Public Implementations

impl TargetKind {
    pub fn target(self) -> &'static dyn Target {
        match self {
            Self::CoffeeScript => &CoffeeScript,
            Self::JavaScript => &JavaScript,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CoffeeScript => "coffee",
            Self::JavaScript => "javascript",
        }
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coffee" | "coffeescript" => Ok(Self::CoffeeScript),
            "js" | "javascript" => Ok(Self::JavaScript),
            other => Err(format!("Unknown target: {}", other)),
        }
    }
}

impl Target for CoffeeScript {
    fn string_literal(&self, text: &str) -> String {
        self.embed(&json_string(text).replace('`', "\\`"))
    }

    fn embed(&self, snippet: &str) -> String {
        format!("`{}`", snippet)
    }

    fn inner_content(&self, expr: &str) -> String {
        format!("{}.innerHTML", expr)
    }

    fn ternary(&self, condition: &str, then_branch: &str, else_branch: &str) -> String {
        format!("(if {} then {} else {})", condition, then_branch, else_branch)
    }

    fn wrap_template(&self, expr: &str) -> String {
        format!("(innerHTML: {})", expr)
    }

    fn assertion(&self, statement: &str) -> String {
        format!(
            "throw new Error 'Assertion failed: ' + {} unless {}",
            self.string_literal(statement),
            statement
        )
    }
}

impl Target for JavaScript {
    fn string_literal(&self, text: &str) -> String {
        json_string(text)
    }

    fn embed(&self, snippet: &str) -> String {
        snippet.to_string()
    }

    fn inner_content(&self, expr: &str) -> String {
        format!("({}).innerHTML", expr)
    }

    fn ternary(&self, condition: &str, then_branch: &str, else_branch: &str) -> String {
        format!("(({}) ? {} : {})", condition, then_branch, else_branch)
    }

    fn wrap_template(&self, expr: &str) -> String {
        format!("{{innerHTML: {}}}", expr)
    }

    fn assertion(&self, statement: &str) -> String {
        format!(
            "if (!({})) {{ throw new Error('Assertion failed: ' + {}); }}",
            statement,
            self.string_literal(statement)
        )
    }
}

// ------------------------------------------------------------- Unit Tests
