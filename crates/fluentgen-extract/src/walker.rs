//! Chain walker: flattens a nested call expression into ordered steps

use fluentgen_ir::{Expr, Span};

/// One call in a flattened chain
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Callee name
    pub callee: String,
    /// Argument expressions, unevaluated
    pub args: Vec<Expr>,
    /// Location of the call
    pub span: Span,
}

/// Flatten the outermost call expression of a statement into steps in
/// source (left-to-right) order.
///
/// The walk visits the chain tail-first, climbing receiver links, and
/// reverses the result. A non-call receiver terminates the climb; only the
/// calls collected up to that point are returned, which upstream uses to
/// detect too-short chains. A statement that is not a call at all yields an
/// empty list.
#[must_use]
pub fn walk_chain(expr: &Expr) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut current = expr;
    loop {
        match current {
            Expr::Call {
                callee,
                receiver,
                args,
                span,
            } => {
                steps.push(Step {
                    callee: callee.clone(),
                    args: args.clone(),
                    span: *span,
                });
                match receiver {
                    Some(inner) => current = inner.as_ref(),
                    None => break,
                }
            }
            _ => break,
        }
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_chain() -> Expr {
        // Select(x => x.Email).Required().WithMessage("m")
        let select = Expr::call(
            "Select",
            vec![Expr::lambda("x", Expr::member(Expr::ident("x"), "Email"))],
        );
        let required = Expr::method(select, "Required", vec![]);
        Expr::method(required, "WithMessage", vec![Expr::str_lit("m")])
    }

    #[test]
    fn test_walk_returns_source_order() {
        let steps = walk_chain(&select_chain());
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].callee, "Select");
        assert_eq!(steps[1].callee, "Required");
        assert_eq!(steps[2].callee, "WithMessage");
        assert_eq!(steps[2].args.len(), 1);
    }

    #[test]
    fn test_walk_single_call() {
        let steps = walk_chain(&Expr::call("Select", vec![]));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].callee, "Select");
    }

    #[test]
    fn test_walk_non_call_yields_empty() {
        assert!(walk_chain(&Expr::ident("x")).is_empty());
        assert!(walk_chain(&Expr::str_lit("not a chain")).is_empty());
    }

    #[test]
    fn test_walk_stops_at_non_call_receiver() {
        // builder.Required() — the receiver is a bare identifier, so only
        // the calls above it are collected
        let chain = Expr::method(Expr::ident("builder"), "Required", vec![]);
        let steps = walk_chain(&chain);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].callee, "Required");
    }

    #[test]
    fn test_walk_preserves_spans() {
        let select = Expr::call("Select", vec![]).with_span(Span::new(1, 1));
        let required = Expr::method(select, "Required", vec![]).with_span(Span::new(1, 22));
        let steps = walk_chain(&required);
        assert_eq!(steps[0].span, Span::new(1, 1));
        assert_eq!(steps[1].span, Span::new(1, 22));
    }
}
