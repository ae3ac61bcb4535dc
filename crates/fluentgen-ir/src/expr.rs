//! Expression tree for fluent rule definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source location (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Create a span at the given line and column.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Literal values appearing as call arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// String literal
    Str(String),

    /// Integer literal
    Int(i64),

    /// Floating-point literal
    Float(f64),

    /// Boolean literal
    Bool(bool),

    /// Null/none literal
    Null,
}

/// A parsed expression handed to the extraction engine
///
/// Call expressions are kept in member-call form: the callee name is already
/// split from the receiver, so `a.b().c(x)` is
/// `Call { callee: "c", receiver: Call { callee: "b", receiver: Ident("a") } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A call, optionally on the result of a receiver expression
    Call {
        callee: String,
        receiver: Option<Box<Expr>>,
        args: Vec<Expr>,
        span: Span,
    },

    /// Member access `base.name`
    Member {
        base: Box<Expr>,
        name: String,
        span: Span,
    },

    /// Bare identifier
    Ident { name: String, span: Span },

    /// Single-parameter lambda `param => body`
    Lambda {
        param: String,
        body: Box<Expr>,
        span: Span,
    },

    /// Statement block used as a nested scope body
    Block { statements: Vec<Expr>, span: Span },

    /// Literal value
    Lit { value: Literal, span: Span },
}

impl Expr {
    /// Create a head call with no receiver.
    #[must_use]
    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            callee: callee.into(),
            receiver: None,
            args,
            span: Span::default(),
        }
    }

    /// Create a method call on a receiver expression.
    #[must_use]
    pub fn method(receiver: Expr, callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            callee: callee.into(),
            receiver: Some(Box::new(receiver)),
            args,
            span: Span::default(),
        }
    }

    /// Create a member access off a base expression.
    #[must_use]
    pub fn member(base: Expr, name: impl Into<String>) -> Self {
        Self::Member {
            base: Box::new(base),
            name: name.into(),
            span: Span::default(),
        }
    }

    /// Create a bare identifier.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident {
            name: name.into(),
            span: Span::default(),
        }
    }

    /// Create a single-parameter lambda.
    #[must_use]
    pub fn lambda(param: impl Into<String>, body: Expr) -> Self {
        Self::Lambda {
            param: param.into(),
            body: Box::new(body),
            span: Span::default(),
        }
    }

    /// Create a statement block.
    #[must_use]
    pub fn block(statements: Vec<Expr>) -> Self {
        Self::Block {
            statements,
            span: Span::default(),
        }
    }

    /// Create a string literal.
    #[must_use]
    pub fn str_lit(value: impl Into<String>) -> Self {
        Self::Lit {
            value: Literal::Str(value.into()),
            span: Span::default(),
        }
    }

    /// Create an integer literal.
    #[must_use]
    pub fn int_lit(value: i64) -> Self {
        Self::Lit {
            value: Literal::Int(value),
            span: Span::default(),
        }
    }

    /// Create a floating-point literal.
    #[must_use]
    pub fn float_lit(value: f64) -> Self {
        Self::Lit {
            value: Literal::Float(value),
            span: Span::default(),
        }
    }

    /// Create a boolean literal.
    #[must_use]
    pub fn bool_lit(value: bool) -> Self {
        Self::Lit {
            value: Literal::Bool(value),
            span: Span::default(),
        }
    }

    /// Create a null literal.
    #[must_use]
    pub fn null_lit() -> Self {
        Self::Lit {
            value: Literal::Null,
            span: Span::default(),
        }
    }

    /// Attach a source span, replacing the default.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        match &mut self {
            Self::Call { span: s, .. }
            | Self::Member { span: s, .. }
            | Self::Ident { span: s, .. }
            | Self::Lambda { span: s, .. }
            | Self::Block { span: s, .. }
            | Self::Lit { span: s, .. } => *s = span,
        }
        self
    }

    /// Source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Call { span, .. }
            | Self::Member { span, .. }
            | Self::Ident { span, .. }
            | Self::Lambda { span, .. }
            | Self::Block { span, .. }
            | Self::Lit { span, .. } => *span,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl fmt::Display for Expr {
    /// Renders source-equivalent text; rule arguments carry this verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call {
                callee,
                receiver,
                args,
                ..
            } => {
                if let Some(receiver) = receiver {
                    write!(f, "{receiver}.")?;
                }
                write!(f, "{callee}(")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::Member { base, name, .. } => write!(f, "{base}.{name}"),
            Self::Ident { name, .. } => write!(f, "{name}"),
            Self::Lambda { param, body, .. } => write!(f, "{param} => {body}"),
            Self::Block { statements, .. } => {
                write!(f, "{{ ")?;
                for stmt in statements {
                    write!(f, "{stmt}; ")?;
                }
                write!(f, "}}")
            }
            Self::Lit { value, .. } => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_member_chain() {
        let expr = Expr::member(Expr::member(Expr::ident("x"), "Address"), "City");
        assert_eq!(expr.to_string(), "x.Address.City");
    }

    #[test]
    fn test_display_call_chain() {
        let chain = Expr::method(
            Expr::call(
                "Select",
                vec![Expr::lambda("x", Expr::member(Expr::ident("x"), "Email"))],
            ),
            "WithMessage",
            vec![Expr::str_lit("required")],
        );
        assert_eq!(
            chain.to_string(),
            "Select(x => x.Email).WithMessage(\"required\")"
        );
    }

    #[test]
    fn test_display_literals() {
        assert_eq!(Expr::int_lit(42).to_string(), "42");
        assert_eq!(Expr::bool_lit(true).to_string(), "true");
        assert_eq!(Expr::null_lit().to_string(), "null");
        assert_eq!(Expr::str_lit("hi").to_string(), "\"hi\"");
    }

    #[test]
    fn test_with_span() {
        let expr = Expr::ident("x").with_span(Span::new(3, 14));
        assert_eq!(expr.span(), Span::new(3, 14));
        assert_eq!(expr.span().to_string(), "3:14");
    }

    #[test]
    fn test_default_span() {
        assert_eq!(Expr::ident("x").span(), Span::default());
    }

    #[test]
    fn test_serde_roundtrip() {
        let expr = Expr::method(
            Expr::call("Select", vec![Expr::lambda("x", Expr::ident("x"))]),
            "Required",
            vec![],
        );
        let json = serde_json::to_string(&expr).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(expr, back);
    }
}
