//! Placeholders
//!
//! Typed insertion points in a template. Each kind decides for
//! itself where in the markup it may appear and which node of
//! the output expression it becomes. Argument text is a snippet
//! of the host language and is carried through untouched.
//!

use super::context::Context;
use super::error::ErrorKind;
use super::parser::Expr;

// ------------------------------------------------------------- Public Types

/// The four placeholder forms, keyed by their symbol.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `${expr}`: text, HTML-escaped at runtime.
    ///
    Escaped,
    /// `&{expr}`: inner HTML of one element or template object,
    /// trusted as already safe.
    ///
    Element,
    /// `@{expr}`: inner HTML of an array of elements or
    /// templates, concatenated.
    ///
    Elements,
    /// `?{expr}{then}{else}`: one of two sub-templates.
    ///
    Conditional,
}

/// A parsed placeholder ready to be checked and built.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    /// Host-language snippet from between the first braces.
    ///
    pub argument: String,
    /// Compiled branches of a conditional, at most two.
    ///
    pub branches: Vec<Expr>,
}

// ------------------------------------------------------------- Public Implementations

impl PlaceholderKind {
    pub fn from_symbol(symbol: char) -> Result<Self, ErrorKind> {
        match symbol {
            '$' => Ok(Self::Escaped),
            '&' => Ok(Self::Element),
            '@' => Ok(Self::Elements),
            '?' => Ok(Self::Conditional),
            other => Err(ErrorKind::UnrecognizedPlaceholderType(other)),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Escaped => '$',
            Self::Element => '&',
            Self::Elements => '@',
            Self::Conditional => '?',
        }
    }

    /// Whether output of this kind is well-formed and safe at
    /// `context`. Escaped text works outside tags and inside
    /// quoted attribute values; raw markup only outside tags.
    /// Conditionals are allowed anywhere because their branches
    /// are checked separately.
    ///
    pub fn allowed(self, context: &Context) -> bool {
        match self {
            Self::Escaped => context.is_top_level() || context.in_quoted_attribute(),
            Self::Element | Self::Elements => context.is_top_level(),
            Self::Conditional => true,
        }
    }
}

impl Placeholder {
    pub fn new(kind: PlaceholderKind, argument: impl Into<String>, branches: Vec<Expr>) -> Self {
        Self {
            kind,
            argument: argument.into(),
            branches,
        }
    }

    pub fn allowed(&self, context: &Context) -> bool {
        self.kind.allowed(context)
    }

    /// Turns the placeholder into its output node. Missing
    /// conditional branches become the empty string.
    ///
    pub fn build(self) -> Expr {
        match self.kind {
            PlaceholderKind::Escaped => Expr::Escape(self.argument),
            PlaceholderKind::Element => Expr::RawContent(self.argument),
            PlaceholderKind::Elements => Expr::RawContentArray(self.argument),
            PlaceholderKind::Conditional => {
                let mut branches = self.branches.into_iter();
                Expr::Conditional {
                    condition: self.argument,
                    then_branch: Box::new(branches.next().unwrap_or(Expr::Empty)),
                    else_branch: Box::new(branches.next().unwrap_or(Expr::Empty)),
                }
            }
        }
    }
}

// ------------------------------------------------------------- Unit Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn top() -> Context {
        Context::top_level()
    }

    fn in_tag() -> Context {
        Context::new("<div ")
    }

    fn in_attr() -> Context {
        Context::new("<a href='")
    }

    // ----------------------------------------- from_symbol tests

    #[test]
    fn test_from_symbol_round_trip_known() {
        for symbol in ['$', '&', '@', '?'] {
            assert_eq!(PlaceholderKind::from_symbol(symbol).unwrap().symbol(), symbol);
        }
    }

    #[test]
    fn test_from_symbol_unknown() {
        assert_eq!(
            PlaceholderKind::from_symbol('%'),
            Err(ErrorKind::UnrecognizedPlaceholderType('%'))
        );
    }

    // ----------------------------------------- allowed tests

    #[test]
    fn test_allowed_escaped() {
        assert!(PlaceholderKind::Escaped.allowed(&top()));
        assert!(PlaceholderKind::Escaped.allowed(&in_attr()));
        assert!(!PlaceholderKind::Escaped.allowed(&in_tag()));
    }

    #[test]
    fn test_allowed_raw_content_top_level_only() {
        for kind in [PlaceholderKind::Element, PlaceholderKind::Elements] {
            assert!(kind.allowed(&top()));
            assert!(!kind.allowed(&in_tag()));
            assert!(!kind.allowed(&in_attr()));
        }
    }

    #[test]
    fn test_allowed_conditional_anywhere() {
        for context in [top(), in_tag(), in_attr()] {
            assert!(PlaceholderKind::Conditional.allowed(&context));
        }
    }

    // ----------------------------------------- build tests

    #[test]
    fn test_build_keeps_argument_verbatim() {
        let placeholder = Placeholder::new(PlaceholderKind::Escaped, " a.b ( c ) ", vec![]);
        assert_eq!(placeholder.build(), Expr::Escape(" a.b ( c ) ".to_string()));
    }

    #[test]
    fn test_build_conditional_defaults_branches() {
        let placeholder = Placeholder::new(
            PlaceholderKind::Conditional,
            "x",
            vec![Expr::Literal("yes".to_string())],
        );
        assert_eq!(
            placeholder.build(),
            Expr::Conditional {
                condition: "x".to_string(),
                then_branch: Box::new(Expr::Literal("yes".to_string())),
                else_branch: Box::new(Expr::Empty),
            }
        );
    }
}
