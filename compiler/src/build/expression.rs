//! Interpolation Expressions
//!
//! The small expression language allowed inside `<%= %>`:
//! literals, property paths into the build context, and helper
//! calls. Parsed by hand into a tree, then evaluated against a
//! `BuildContext` by the interpolation pass.
//!

use super::error::BuildError;
use serde_json::{Number, Value};

// ------------------------------------------------------------- Public Types

/// Parsed interpolation expression.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    /// `name`, `name.field`, `name['key']`, `name[0]`.
    ///
    Path { root: String, segments: Vec<Segment> },
    /// `helper(arg, ...)`.
    ///
    Call { name: String, args: Vec<Expression> },
}

/// One step of a property path.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

// ------------------------------------------------------------- Private Types

/// Character-level parser over one expression source.
///
struct ExpressionParser<'a> {
    source: &'a str,
    rest: &'a str,
}

// ------------------------------------------------------------- Public Functions

/// Parses the body of a `<%= %>` block. Surrounding whitespace
/// is ignored; anything after a complete expression is an
/// error.
///
pub fn parse(source: &str) -> Result<Expression, BuildError> {
    let mut parser = ExpressionParser {
        source,
        rest: source,
    };

    let expression = parser.parse_expression()?;
    parser.skip_whitespace();

    if !parser.rest.is_empty() {
        return Err(parser.error(format!("unexpected `{}`", parser.rest)));
    }

    Ok(expression)
}

// ------------------------------------------------------------- Private Implementations

impl<'a> ExpressionParser<'a> {
    fn error(&self, message: impl Into<String>) -> BuildError {
        BuildError::Syntax {
            expression: self.source.trim().to_string(),
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest.starts_with(c) {
            self.rest = &self.rest[c.len_utf8()..];
            true
        } else {
            false
        }
    }

    fn parse_expression(&mut self) -> Result<Expression, BuildError> {
        self.skip_whitespace();

        match self.peek() {
            Some('\'' | '"') => Ok(Expression::Literal(Value::String(self.parse_string()?))),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number().map(Expression::Literal),
            Some(c) if is_ident_start(c) => self.parse_name(),
            Some(c) => Err(self.error(format!("unexpected `{}`", c))),
            None => Err(self.error("empty expression")),
        }
    }

    /// Parses an identifier and whatever follows it: a keyword
    /// literal, a helper call, or a property path.
    ///
    fn parse_name(&mut self) -> Result<Expression, BuildError> {
        let name = self.take_ident();

        match name.as_str() {
            "true" => return Ok(Expression::Literal(Value::Bool(true))),
            "false" => return Ok(Expression::Literal(Value::Bool(false))),
            "null" | "undefined" => return Ok(Expression::Literal(Value::Null)),
            _ => {}
        }

        if self.eat('(') {
            let args = self.parse_args()?;
            return Ok(Expression::Call { name, args });
        }

        let mut segments = Vec::new();
        loop {
            if self.eat('.') {
                self.skip_whitespace();
                if !self.peek().is_some_and(is_ident_start) {
                    return Err(self.error("expected property name after `.`"));
                }
                segments.push(Segment::Key(self.take_ident()));
            } else if self.eat('[') {
                segments.push(self.parse_index()?);
                if !self.eat(']') {
                    return Err(self.error("expected `]`"));
                }
            } else {
                break;
            }
        }

        Ok(Expression::Path {
            root: name,
            segments,
        })
    }

    fn parse_args(&mut self) -> Result<Vec<Expression>, BuildError> {
        let mut args = Vec::new();

        if self.eat(')') {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if self.eat(')') {
                return Ok(args);
            }
            if !self.eat(',') {
                return Err(self.error("expected `,` or `)`"));
            }
        }
    }

    fn parse_index(&mut self) -> Result<Segment, BuildError> {
        self.skip_whitespace();

        match self.peek() {
            Some('\'' | '"') => Ok(Segment::Key(self.parse_string()?)),
            Some(c) if c.is_ascii_digit() => {
                let end = self
                    .rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(self.rest.len());
                let digits = &self.rest[..end];
                self.rest = &self.rest[end..];
                digits
                    .parse()
                    .map(Segment::Index)
                    .map_err(|_| self.error(format!("invalid index `{}`", digits)))
            }
            _ => Err(self.error("expected string or index inside `[]`")),
        }
    }

    /// Parses a quoted string. Backslash escapes `\n`, `\t`,
    /// `\r` and `\0` map to control characters; any other
    /// escaped character stands for itself.
    ///
    fn parse_string(&mut self) -> Result<String, BuildError> {
        let mut chars = self.rest.char_indices();
        let Some((_, quote)) = chars.next() else {
            return Err(self.error("expected string"));
        };

        let mut value = String::new();

        while let Some((i, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.rest = &self.rest[i + c.len_utf8()..];
                    return Ok(value);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, '0')) => value.push('\0'),
                    Some((_, other)) => value.push(other),
                    None => break,
                },
                c => value.push(c),
            }
        }

        Err(self.error("unterminated string"))
    }

    fn parse_number(&mut self) -> Result<Value, BuildError> {
        let end = self
            .rest
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());

        let text = &self.rest[..end];
        let number = if let Ok(int) = text.parse::<i64>() {
            Number::from(int)
        } else {
            text.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .ok_or_else(|| self.error(format!("invalid number `{}`", text)))?
        };

        self.rest = &self.rest[end..];
        Ok(Value::Number(number))
    }

    fn take_ident(&mut self) -> String {
        let end = self
            .rest
            .find(|c: char| !is_ident_char(c))
            .unwrap_or(self.rest.len());
        let ident = self.rest[..end].to_string();
        self.rest = &self.rest[end..];
        ident
    }
}

// ------------------------------------------------------------- Private Functions

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// ------------------------------------------------------------- Unit Tests
