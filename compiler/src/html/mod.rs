//! HTML Template Compiler
//!
//! Compiles placeholder templates embedded in HTML-like text
//! into host-language expressions that build safe markup. The
//! compiler tracks which markup is open at each point purely
//! from lexical structure and rejects placeholders whose output
//! would be unsafe there, like raw HTML inside an attribute.
//!
//! Placeholder forms:
//!
//! - `${expr}` escaped text
//! - `&{expr}` inner HTML of one element or template
//! - `@{expr}` inner HTML of an array of elements or templates
//! - `?{expr}{then}{else}` conditional sub-templates
//!
//! Literal `{`, `}` and `\` are written as `\{`, `\}` and `\\`.
//!

pub mod codegen;
pub mod context;
pub mod error;
pub mod parser;
pub mod placeholder;

mod assembler;
mod cursor;
mod patterns;

pub use codegen::{Target, TargetKind};
pub use context::Context;
pub use error::CompileError;

use tracing::debug;

// ------------------------------------------------------------- Public Functions

/// Compiles `template` starting in `context` and renders it for
/// `target`. The result is a single host expression, `""` for
/// an empty template. Nothing is cached between calls, so the
/// same input always yields the same output.
///
pub fn compile(
    template: &str,
    context: &Context,
    target: &dyn Target,
) -> Result<String, CompileError> {
    let expr = parser::parse(template, context)?;
    let output = codegen::render(&expr, target);

    debug!(
        template_len = template.len(),
        output_len = output.len(),
        "compiled html template"
    );

    Ok(output)
}

/// Compiles a top-level template and wraps it as an object
/// exposing `innerHTML`, ready to be passed to `&{}` or `@{}`
/// of another template.
///
pub fn html(template: &str, target: &dyn Target) -> Result<String, CompileError> {
    let output = compile(template, &Context::top_level(), target)?;
    Ok(target.wrap_template(&output))
}

// ------------------------------------------------------------- Unit Tests

#[cfg(test)]
mod tests {
    use super::*;
    use codegen::{CoffeeScript, JavaScript};
    use error::ErrorKind;

    fn coffee(template: &str) -> Result<String, CompileError> {
        compile(template, &Context::top_level(), &CoffeeScript)
    }

    // ----------------------------------------- compile tests

    #[test]
    fn test_compile_plain_text_single_literal() {
        assert_eq!(coffee("Hello, world!").unwrap(), "`\"Hello, world!\"`");
    }

    #[test]
    fn test_compile_empty() {
        assert_eq!(coffee("").unwrap(), "\"\"");
    }

    #[test]
    fn test_compile_escaped_braces() {
        assert_eq!(coffee(r"\{a\}").unwrap(), "`\"{a}\"`");
    }

    #[test]
    fn test_compile_escaped_backslash() {
        assert_eq!(coffee(r"a\\b").unwrap(), r#"`"a\\b"`"#);
    }

    #[test]
    fn test_compile_escaped_text_at_top_level() {
        assert_eq!(
            coffee("<div>${x}</div>").unwrap(),
            "`\"<div>\"` + E(`x`) + `\"</div>\"`"
        );
    }

    #[test]
    fn test_compile_raw_content_after_complete_tag() {
        assert_eq!(
            coffee("<div>&{x}").unwrap(),
            "`\"<div>\"` + `x`.innerHTML"
        );

        let err = coffee("<div class='a&{x}").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::IllegalPlaceholderInsertion { symbol: '&', .. }
        ));
    }

    #[test]
    fn test_compile_escaped_in_open_tag_rejected() {
        let err = coffee("<div ${x}>").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::IllegalPlaceholderInsertion { symbol: '$', .. }
        ));
    }

    #[test]
    fn test_compile_escaped_in_quoted_attribute() {
        assert_eq!(
            coffee("<a href='${x}'>").unwrap(),
            "`\"<a href='\"` + E(`x`) + `\"'>\"`"
        );
    }

    #[test]
    fn test_compile_ill_formed_open_tag() {
        let err = coffee("<input checked").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::IllFormedTemplate("<input checked".to_string())
        );
    }

    #[test]
    fn test_compile_conditional() {
        assert_eq!(
            coffee("?{cond}{yes}{no}").unwrap(),
            "(if `cond` then `\"yes\"` else `\"no\"`)"
        );
    }

    #[test]
    fn test_compile_legality_table() {
        let cases = [
            ("${x}", true),
            ("<a title='${x}'></a>", true),
            ("<a ${x}>", false),
            ("&{x}", true),
            ("<b?{c}{ class='on'}>", true),
            ("<a title='&{x}'>", false),
            ("<a &{x}>", false),
            ("@{x}", true),
            ("<a title='@{x}'>", false),
            ("<a @{x}>", false),
            ("?{x}", true),
            ("<a title='?{x}'>", true),
            ("<a?{x}>", true),
        ];

        for (template, ok) in cases {
            assert_eq!(coffee(template).is_ok(), ok, "template: {}", template);
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let template = "<ul>@{items}</ul>?{more}{<a href='${url}'>more</a>}";
        assert_eq!(coffee(template).unwrap(), coffee(template).unwrap());
    }

    #[test]
    fn test_compile_in_ambient_context() {
        let context = Context::new("<a href='");
        assert_eq!(
            compile("${path}", &context, &JavaScript).unwrap(),
            "E(path)"
        );
    }

    // ----------------------------------------- html tests

    #[test]
    fn test_html_wraps_result() {
        assert_eq!(
            html("<hr>", &CoffeeScript).unwrap(),
            "(innerHTML: `\"<hr>\"`)"
        );
        assert_eq!(html("", &JavaScript).unwrap(), "{innerHTML: \"\"}");
    }
}
