//! Expression Assembler
//!
//! Collects the parts of one (sub)template in output order while
//! keeping the markup context up to date, so every placeholder
//! is checked against the context right before it.
//!

use super::context::Context;
use super::error::ErrorKind;
use super::parser::Expr;
use super::placeholder::Placeholder;

// ------------------------------------------------------------- Public Types

/// Parts of a single (sub)template plus the context it started
/// in and the context after its last part.
///
#[derive(Debug)]
pub struct Assembler {
    parts: Vec<Expr>,
    start: Context,
    end: Context,
}

// ------------------------------------------------------------- Public Implementations

impl Assembler {
    pub fn new(context: Context) -> Self {
        Self {
            parts: Vec::new(),
            end: context.clone(),
            start: context,
        }
    }

    /// The context after everything added so far.
    ///
    pub fn context(&self) -> &Context {
        &self.end
    }

    /// Adds unescaped literal text and advances the context.
    ///
    pub fn add_literal(&mut self, text: String) {
        self.end = self.end.advance(&text);
        self.parts.push(Expr::Literal(text));
    }

    /// Adds a placeholder if its kind is allowed at the current
    /// context.
    ///
    pub fn add_placeholder(&mut self, placeholder: Placeholder) -> Result<(), ErrorKind> {
        if !placeholder.allowed(&self.end) {
            return Err(ErrorKind::IllegalPlaceholderInsertion {
                symbol: placeholder.kind.symbol(),
                context: self.end.as_str().to_string(),
            });
        }

        self.parts.push(placeholder.build());
        Ok(())
    }

    /// Finishes the (sub)template. It must end in the context it
    /// started in. No parts at all yields the empty string.
    ///
    pub fn build(self) -> Result<Expr, ErrorKind> {
        if self.start != self.end {
            return Err(ErrorKind::IllFormedTemplate(self.end.as_str().to_string()));
        }

        if self.parts.is_empty() {
            Ok(Expr::Empty)
        } else {
            Ok(Expr::Concat(self.parts))
        }
    }
}

// ------------------------------------------------------------- Unit Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::placeholder::PlaceholderKind;

    #[test]
    fn test_build_empty() {
        let assembler = Assembler::new(Context::top_level());
        assert_eq!(assembler.build(), Ok(Expr::Empty));
    }

    #[test]
    fn test_parts_keep_insertion_order() {
        let mut assembler = Assembler::new(Context::top_level());
        assembler.add_literal("<b>".to_string());
        assembler
            .add_placeholder(Placeholder::new(PlaceholderKind::Escaped, "x", vec![]))
            .unwrap();
        assembler.add_literal("</b>".to_string());

        assert_eq!(
            assembler.build(),
            Ok(Expr::Concat(vec![
                Expr::Literal("<b>".to_string()),
                Expr::Escape("x".to_string()),
                Expr::Literal("</b>".to_string()),
            ]))
        );
    }

    #[test]
    fn test_add_placeholder_rejected_in_tag() {
        let mut assembler = Assembler::new(Context::top_level());
        assembler.add_literal("<div ".to_string());
        let result =
            assembler.add_placeholder(Placeholder::new(PlaceholderKind::Element, "x", vec![]));

        assert_eq!(
            result,
            Err(ErrorKind::IllegalPlaceholderInsertion {
                symbol: '&',
                context: "<div ".to_string(),
            })
        );
    }

    #[test]
    fn test_build_ill_formed() {
        let mut assembler = Assembler::new(Context::top_level());
        assembler.add_literal("<p class='".to_string());
        assert_eq!(
            assembler.build(),
            Err(ErrorKind::IllFormedTemplate("<p class='".to_string()))
        );
    }

    #[test]
    fn test_build_non_empty_start_context() {
        let mut assembler = Assembler::new(Context::new("<a href='"));
        assembler.add_literal("/path".to_string());
        assert!(assembler.build().is_ok());
    }
}
