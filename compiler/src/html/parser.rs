//! Template Parser
//!
//! Recursive-descent parser for placeholder templates. Input is
//! consumed as alternating literal runs and placeholders, each
//! committed as soon as it matches. Conditional placeholders
//! recurse into their `{...}` branches, which are parsed against
//! the context in effect at the conditional and must close
//! everything they open.
//!

use super::assembler::Assembler;
use super::context::Context;
use super::cursor::Cursor;
use super::error::{CompileError, ErrorKind};
use super::patterns::{self, LiteralRun, PLACEHOLDER_HEAD};
use super::placeholder::{Placeholder, PlaceholderKind};

// ------------------------------------------------------------- Public Consts

/// Deepest conditional nesting accepted before the parse is
/// aborted instead of recursing further.
///
pub const MAX_NESTING_DEPTH: usize = 128;

// ------------------------------------------------------------- Public Types

/// Output expression of a compiled template. Argument strings
/// are host-language snippets copied from the template as-is.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The empty string, for templates or branches with no
    /// parts.
    ///
    Empty,
    /// Literal markup text with escapes already resolved.
    ///
    Literal(String),
    /// Escaped text from `${...}`.
    ///
    Escape(String),
    /// Trusted inner HTML of one element from `&{...}`.
    ///
    RawContent(String),
    /// Trusted inner HTML of many elements from `@{...}`.
    ///
    RawContentArray(String),
    /// `?{condition}{then}{else}`.
    ///
    Conditional {
        condition: String,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// Parts concatenated in order.
    ///
    Concat(Vec<Expr>),
}

// ------------------------------------------------------------- Private Types

/// Parser state for one compile call. The cursor is shared by
/// every recursion level so branches continue where their
/// parent stopped.
///
struct Parser<'a> {
    cursor: Cursor<'a>,
    max_depth: usize,
}

// ------------------------------------------------------------- Public Functions

/// Parses a whole template starting in `context`. Any input left
/// over once no literal or placeholder matches is an error.
///
pub fn parse(template: &str, context: &Context) -> Result<Expr, CompileError> {
    parse_with_depth(template, context, MAX_NESTING_DEPTH)
}

/// Same as [`parse`] with a custom nesting ceiling.
///
pub fn parse_with_depth(
    template: &str,
    context: &Context,
    max_depth: usize,
) -> Result<Expr, CompileError> {
    let mut parser = Parser {
        cursor: Cursor::new(template),
        max_depth,
    };

    let expr = parser.parse_template(context.clone(), 0)?;

    if !parser.cursor.is_empty() {
        let rest = parser.cursor.rest().to_string();
        return Err(CompileError::from(ErrorKind::UnexpectedCharacters(rest)).within(template));
    }

    Ok(expr)
}

// ------------------------------------------------------------- Private Implementations

impl<'a> Parser<'a> {
    /// Parses one (sub)template frame. Errors from this frame or
    /// any nested one get this frame's text appended.
    ///
    fn parse_template(&mut self, context: Context, depth: usize) -> Result<Expr, CompileError> {
        let template = self.cursor.rest();

        self.parse_parts(context, depth)
            .map_err(|err| err.within(template))
    }

    /// Main loop of a frame. Stops at the first position where
    /// neither a literal run nor a placeholder matches; the
    /// caller decides whether that is the end of a branch or an
    /// error.
    ///
    fn parse_parts(&mut self, context: Context, depth: usize) -> Result<Expr, CompileError> {
        if depth > self.max_depth {
            return Err(ErrorKind::NestingTooDeep(self.max_depth).into());
        }

        let mut assembler = Assembler::new(context);

        while !self.cursor.is_empty() {
            if let Some(literal) = self.cursor.eat(&LiteralRun) {
                assembler.add_literal(patterns::unescape(literal.as_str()));
            } else if let Some(head) = self.cursor.eat(&*PLACEHOLDER_HEAD) {
                let symbol = head.group(1).and_then(|s| s.chars().next()).unwrap_or_default();
                let argument = head.group(2).unwrap_or_default();
                let kind = PlaceholderKind::from_symbol(symbol)?;

                let branches = if kind == PlaceholderKind::Conditional {
                    self.parse_branches(assembler.context(), depth)?
                } else {
                    Vec::new()
                };

                assembler.add_placeholder(Placeholder::new(kind, argument, branches))?;
            } else {
                break;
            }
        }

        assembler.build().map_err(CompileError::from)
    }

    /// Parses up to two `{...}` branches following a conditional
    /// head. Each branch must be closed by `}` right where its
    /// own parse stopped.
    ///
    fn parse_branches(&mut self, context: &Context, depth: usize) -> Result<Vec<Expr>, CompileError> {
        let mut branches = Vec::new();

        while branches.len() < 2 && self.cursor.eat("{").is_some() {
            let branch = self.parse_template(context.clone(), depth + 1)?;

            if self.cursor.eat("}").is_none() {
                let rest = self.cursor.rest().to_string();
                return Err(ErrorKind::UnexpectedCharactersInSubtemplate(rest).into());
            }

            branches.push(branch);
        }

        Ok(branches)
    }
}

// ------------------------------------------------------------- Unit Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_top(template: &str) -> Result<Expr, CompileError> {
        parse(template, &Context::top_level())
    }

    fn lit(text: &str) -> Expr {
        Expr::Literal(text.to_string())
    }

    // ----------------------------------------- parse tests

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_top(""), Ok(Expr::Empty));
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse_top("Hello"), Ok(Expr::Concat(vec![lit("Hello")])));
    }

    #[test]
    fn test_parse_escaped_braces_are_literal() {
        assert_eq!(parse_top(r"\{a\}"), Ok(Expr::Concat(vec![lit("{a}")])));
    }

    #[test]
    fn test_parse_placeholders_in_order() {
        let expr = parse_top("<b>${name}</b>@{items}&{el}").unwrap();
        assert_eq!(
            expr,
            Expr::Concat(vec![
                lit("<b>"),
                Expr::Escape("name".to_string()),
                lit("</b>"),
                Expr::RawContentArray("items".to_string()),
                Expr::RawContent("el".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_conditional_with_branches() {
        let expr = parse_top("?{cond}{yes}{no}").unwrap();
        assert_eq!(
            expr,
            Expr::Concat(vec![Expr::Conditional {
                condition: "cond".to_string(),
                then_branch: Box::new(Expr::Concat(vec![lit("yes")])),
                else_branch: Box::new(Expr::Concat(vec![lit("no")])),
            }])
        );
    }

    #[test]
    fn test_parse_conditional_without_branches() {
        let expr = parse_top("?{cond}").unwrap();
        assert_eq!(
            expr,
            Expr::Concat(vec![Expr::Conditional {
                condition: "cond".to_string(),
                then_branch: Box::new(Expr::Empty),
                else_branch: Box::new(Expr::Empty),
            }])
        );
    }

    #[test]
    fn test_parse_conditional_empty_branch() {
        let expr = parse_top("?{c}{}{x}").unwrap();
        match expr {
            Expr::Concat(parts) => match &parts[0] {
                Expr::Conditional { then_branch, .. } => assert_eq!(**then_branch, Expr::Empty),
                _ => panic!("Expected Conditional"),
            },
            _ => panic!("Expected Concat"),
        }
    }

    #[test]
    fn test_parse_conditional_inside_attribute() {
        let result = parse_top("<a class='?{active}{on}{off}'>x</a>");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_conditional_branch_uses_current_context() {
        let err = parse_top("<a href='?{c}{&{raw}}'>").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::IllegalPlaceholderInsertion { symbol: '&', .. }
        ));
    }

    #[test]
    fn test_parse_quoted_attribute_allows_escaped() {
        assert!(parse_top("<a href='${x}'>").is_ok());
    }

    #[test]
    fn test_parse_escaped_in_tag_rejected() {
        let err = parse_top("<div ${x}>").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::IllegalPlaceholderInsertion {
                symbol: '$',
                context: "<div ".to_string(),
            }
        );
        assert_eq!(err.fragments, vec!["<div ${x}>".to_string()]);
    }

    #[test]
    fn test_parse_raw_content_in_attribute_rejected() {
        for template in ["<a href='&{x}'>", "<a href='@{x}'>", "<p &{x}>"] {
            let err = parse_top(template).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::IllegalPlaceholderInsertion { .. }));
        }
    }

    #[test]
    fn test_parse_ill_formed_unclosed_attribute() {
        let err = parse_top("<div class='a").unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllFormedTemplate("<div class='".to_string()));
    }

    #[test]
    fn test_parse_ill_formed_branch_wraps_fragments() {
        let err = parse_top("?{c}{<b}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllFormedTemplate("<b".to_string()));
        assert_eq!(err.fragments, vec!["<b}".to_string(), "?{c}{<b}".to_string()]);
        assert_eq!(
            err.to_string(),
            "HTML template is ill-formed (at <b): <b}: ?{c}{<b}"
        );
    }

    #[test]
    fn test_parse_unexpected_characters() {
        let err = parse_top("abc}def").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacters("}def".to_string()));
        assert_eq!(err.to_string(), "Unexpected characters in template (}def): abc}def");
    }

    #[test]
    fn test_parse_unterminated_branch() {
        let err = parse_top("?{c}{abc").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedCharactersInSubtemplate(String::new())
        );
        assert_eq!(err.fragments, vec!["?{c}{abc".to_string()]);
    }

    #[test]
    fn test_parse_unrecognized_type() {
        let err = parse_top("%{x}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedPlaceholderType('%'));
    }

    #[test]
    fn test_parse_nested_conditionals() {
        let result = parse_top("?{a}{?{b}{<i>x</i>}{y}}{z}");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_with_depth_ceiling() {
        let err = parse_with_depth("?{a}{?{b}{?{c}{x}}}", &Context::top_level(), 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep(1));
        assert_eq!(err.fragments.len(), 3);
    }

    #[test]
    fn test_parse_in_ambient_context() {
        let context = Context::new("<a href='");
        assert!(parse("/users/${id}", &context).is_ok());
        assert!(parse("&{id}", &context).is_err());
    }
}
