//! Anchor resolution: binds the leading chain step to a target or scope

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::walker::Step;
use fluentgen_ir::{Expr, Literal, TargetPath, TypeRef};
use fluentgen_registry::TypeLookup;

/// The resolved form of a chain's leading step
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedAnchor {
    /// `Select(x => x.Member)`: one value of the request type
    Single {
        path: TargetPath,
        target_type: Option<TypeRef>,
    },

    /// `SelectEach(x => x.Items)`: each element of a collection
    Each {
        path: TargetPath,
        target_type: Option<TypeRef>,
    },

    /// `Group("name", b => { ... })`: named grouped sub-builder
    Group {
        name: String,
        statements: Vec<Expr>,
    },

    /// `When(condition, b => { ... })`: conditional scope
    When {
        condition: String,
        statements: Vec<Expr>,
    },

    /// `OnFailure(mode, b => { ... })`: failure-mode scope
    OnFailure {
        mode: String,
        statements: Vec<Expr>,
    },
}

/// Resolve the first step of a flattened chain.
///
/// The leading callee must be one of the five anchor operations. Selector
/// anchors bind a member path and its declared type; scope anchors extract a
/// condition/mode value and a nested statement body for recursive
/// processing.
///
/// # Errors
///
/// Returns a diagnostic when the leading step is not an anchor operation,
/// the selector is not a pure member-access lambda, or a scope body argument
/// is missing or malformed. The caller discards the chain.
pub fn resolve_anchor(
    step: &Step,
    lookup: &dyn TypeLookup,
) -> Result<ResolvedAnchor, Diagnostic> {
    match step.callee.as_str() {
        "Select" => {
            let (path, target_type) = selector_target(step, lookup)?;
            Ok(ResolvedAnchor::Single { path, target_type })
        }
        "SelectEach" => {
            let (path, collection_type) = selector_target(step, lookup)?;
            let target_type =
                collection_type.and_then(|collection| lookup.element_type_of(&collection));
            Ok(ResolvedAnchor::Each { path, target_type })
        }
        "Group" => {
            let name = group_name(step)?;
            let statements = scope_body(step)?;
            Ok(ResolvedAnchor::Group { name, statements })
        }
        "When" => {
            let condition = scope_value(step, "condition")?;
            let statements = scope_body(step)?;
            Ok(ResolvedAnchor::When {
                condition,
                statements,
            })
        }
        "OnFailure" => {
            let mode = scope_value(step, "failure mode")?;
            let statements = scope_body(step)?;
            Ok(ResolvedAnchor::OnFailure { mode, statements })
        }
        other => Err(Diagnostic::new(
            DiagnosticCode::InvalidAnchor,
            format!("'{other}' cannot start a rule chain; expected Select, SelectEach, Group, When, or OnFailure"),
            step.span,
        )),
    }
}

/// Whether this step introduces a nested scope when it appears after the
/// anchor (a `When`/`OnFailure` carrying a body lambda).
#[must_use]
pub fn is_scope_step(step: &Step) -> bool {
    matches!(step.callee.as_str(), "When" | "OnFailure")
        && matches!(step.args.get(1), Some(Expr::Lambda { .. }))
}

fn selector_target(
    step: &Step,
    lookup: &dyn TypeLookup,
) -> Result<(TargetPath, Option<TypeRef>), Diagnostic> {
    let Some(selector) = step.args.first() else {
        return Err(Diagnostic::new(
            DiagnosticCode::InvalidSelector,
            format!("'{}' requires a selector lambda argument", step.callee),
            step.span,
        ));
    };
    let path = TargetPath::from_selector(selector).map_err(|err| {
        Diagnostic::new(DiagnosticCode::InvalidSelector, err.to_string(), step.span)
    })?;
    let target_type = match selector {
        Expr::Lambda { body, .. } => lookup.type_of(body),
        _ => None,
    };
    Ok((path, target_type))
}

fn group_name(step: &Step) -> Result<String, Diagnostic> {
    match step.args.first() {
        Some(Expr::Lit {
            value: Literal::Str(name),
            ..
        }) => Ok(name.clone()),
        Some(other) => Err(Diagnostic::new(
            DiagnosticCode::MalformedScopeBody,
            format!("group name must be a string literal, found '{other}'"),
            step.span,
        )),
        None => Err(Diagnostic::new(
            DiagnosticCode::MalformedScopeBody,
            "'Group' requires a name and a body lambda".to_string(),
            step.span,
        )),
    }
}

fn scope_value(step: &Step, what: &str) -> Result<String, Diagnostic> {
    step.args.first().map(ToString::to_string).ok_or_else(|| {
        Diagnostic::new(
            DiagnosticCode::MalformedScopeBody,
            format!("'{}' requires a {what} argument", step.callee),
            step.span,
        )
    })
}

/// Extract the nested statement body from the scope's second argument.
///
/// The body must be a lambda; a block body contributes its statements, a
/// single call body is treated as a one-statement block.
fn scope_body(step: &Step) -> Result<Vec<Expr>, Diagnostic> {
    match step.args.get(1) {
        Some(Expr::Lambda { body, .. }) => match body.as_ref() {
            Expr::Block { statements, .. } => Ok(statements.clone()),
            call @ Expr::Call { .. } => Ok(vec![call.clone()]),
            other => Err(Diagnostic::new(
                DiagnosticCode::MalformedScopeBody,
                format!("scope body must be a statement block, found '{other}'"),
                step.span,
            )),
        },
        Some(other) => Err(Diagnostic::new(
            DiagnosticCode::MalformedScopeBody,
            format!("scope body must be a lambda, found '{other}'"),
            step.span,
        )),
        None => Err(Diagnostic::new(
            DiagnosticCode::MalformedScopeBody,
            format!("'{}' requires a body lambda", step.callee),
            step.span,
        )),
    }
}
