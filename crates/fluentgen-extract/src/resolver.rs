//! Dual-mode rule resolution
//!
//! A rule-attachment step resolves in one of two modes. When the type system
//! knows the callee's declaration, arguments bind against it directly
//! (resolved mode). When it does not — typically because the rule is being
//! generated in the same pass — the step is matched heuristically against
//! the registry of same-pass rule shapes (structural mode). Both modes
//! produce the same external contract; only the confidence tag differs.

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::model::{Confidence, RuleArgument};
use crate::walker::Step;
use fluentgen_ir::{Expr, Literal, TypeRef};
use fluentgen_registry::{
    ParamShape, RuleDecl, RuleShape, RuleTarget, ShapeRegistry, TargetMatch, TypeLookup,
};
use tracing::{debug, trace};

/// Outcome of resolving one rule-attachment step
///
/// Carried into the rule builder verbatim; defaults may still be overridden
/// by later chain steps.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRule {
    pub rule_type: String,
    pub confidence: Confidence,
    pub args: Vec<RuleArgument>,
    pub default_message: Option<String>,
    pub default_code: Option<String>,
    pub placeholders: Vec<String>,
}

/// Resolve a rule-attachment step against the anchor's declared type.
///
/// # Errors
///
/// Returns a diagnostic when the step cannot be bound: target-type
/// incompatibility or argument-count mismatch in resolved mode, ambiguity or
/// no-match in structural mode. The caller omits the rule and keeps the
/// chain.
pub fn resolve_rule(
    step: &Step,
    anchor_type: Option<&TypeRef>,
    lookup: &dyn TypeLookup,
    registry: &ShapeRegistry,
) -> Result<ResolvedRule, Diagnostic> {
    if let Some(decl) = lookup.callee_decl(&step.callee, anchor_type) {
        debug!(callee = %step.callee, rule_type = %decl.rule_type, "resolving in resolved mode");
        return bind_declared(step, anchor_type, &decl);
    }
    debug!(callee = %step.callee, "callee declaration unknown, resolving in structural mode");
    resolve_structural(step, anchor_type, registry)
}

/// Resolved mode: bind positionally against a known declaration.
fn bind_declared(
    step: &Step,
    anchor_type: Option<&TypeRef>,
    decl: &RuleDecl,
) -> Result<ResolvedRule, Diagnostic> {
    if let Some(anchor) = anchor_type {
        if decl.target.match_against(anchor) == TargetMatch::Incompatible {
            return Err(Diagnostic::new(
                DiagnosticCode::TargetTypeMismatch,
                format!(
                    "rule '{}' expects target type '{}', anchor is '{anchor}'",
                    decl.rule_type,
                    target_name(&decl.target),
                ),
                step.span,
            ));
        }
    }
    if decl.params.len() != step.args.len() {
        return Err(Diagnostic::new(
            DiagnosticCode::ArgumentCountMismatch,
            format!(
                "rule '{}' declares {} parameter(s), {} argument(s) supplied",
                decl.rule_type,
                decl.params.len(),
                step.args.len(),
            ),
            step.span,
        ));
    }
    Ok(ResolvedRule {
        rule_type: decl.rule_type.clone(),
        confidence: Confidence::Resolved,
        args: bind_args(&decl.params, &step.args, &decl.target, anchor_type),
        default_message: decl.default_message.clone(),
        default_code: decl.default_code.clone(),
        placeholders: decl.placeholders.clone(),
    })
}

/// Structural mode: best-effort match against the same-pass shape registry.
///
/// Candidates are narrowed in order: exact entry-point name, target-type
/// compatibility (exact preferred over generic), argument count, then
/// argument-shape compatibility as the final tie-break. A surviving tie is
/// an ambiguity; an empty survivor set is a no-match. Either failure drops
/// only this step.
fn resolve_structural(
    step: &Step,
    anchor_type: Option<&TypeRef>,
    registry: &ShapeRegistry,
) -> Result<ResolvedRule, Diagnostic> {
    let named: Vec<&RuleShape> = registry.by_method(&step.callee).iter().collect();
    if named.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticCode::UnmappedRule,
            format!(
                "cannot map rule '{}': no rule shape with this name is visible in the current pass",
                step.callee
            ),
            step.span,
        ));
    }

    // Target-type compatibility: keep the best rank, drop incompatibles.
    // An unknown anchor type cannot discriminate, so all candidates survive.
    let by_target: Vec<&RuleShape> = if let Some(anchor) = anchor_type {
        let best = named
            .iter()
            .map(|shape| shape.target.match_against(anchor))
            .max()
            .unwrap_or(TargetMatch::Incompatible);
        if best == TargetMatch::Incompatible {
            return Err(Diagnostic::new(
                DiagnosticCode::UnmappedRule,
                format!(
                    "cannot map rule '{}': {} candidate(s) match by name but none accept target type '{anchor}'",
                    step.callee,
                    named.len(),
                ),
                step.span,
            ));
        }
        named
            .into_iter()
            .filter(|shape| shape.target.match_against(anchor) == best)
            .collect()
    } else {
        named
    };
    trace!(
        callee = %step.callee,
        candidates = by_target.len(),
        "structural candidates after target filter"
    );

    let by_count: Vec<&RuleShape> = by_target
        .into_iter()
        .filter(|shape| shape.params.len() == step.args.len())
        .collect();
    if by_count.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticCode::UnmappedRule,
            format!(
                "cannot map rule '{}': no candidate takes {} argument(s)",
                step.callee,
                step.args.len(),
            ),
            step.span,
        ));
    }

    // Final tie-break: literal argument kinds against declared parameter
    // types. Non-literal arguments stay neutral.
    let survivors: Vec<&RuleShape> = if by_count.len() > 1 {
        let best = by_count
            .iter()
            .map(|shape| shape_score(shape, &step.args))
            .max()
            .unwrap_or(0);
        by_count
            .into_iter()
            .filter(|shape| shape_score(shape, &step.args) == best)
            .collect()
    } else {
        by_count
    };

    match survivors.as_slice() {
        [shape] => {
            debug!(callee = %step.callee, rule_type = %shape.rule_type, "structural match");
            Ok(ResolvedRule {
                rule_type: shape.rule_type.clone(),
                confidence: Confidence::Structural,
                args: bind_args(&shape.params, &step.args, &shape.target, anchor_type),
                default_message: shape.default_message.clone(),
                default_code: shape.default_code.clone(),
                placeholders: shape.placeholders.clone(),
            })
        }
        many => {
            let names: Vec<&str> = many.iter().map(|shape| shape.rule_type.as_str()).collect();
            Err(Diagnostic::new(
                DiagnosticCode::AmbiguousRule,
                format!(
                    "rule '{}' is ambiguous between: {}",
                    step.callee,
                    names.join(", "),
                ),
                step.span,
            ))
        }
    }
}

/// Bind call arguments to declared parameters positionally, substituting the
/// anchor type for the rule's target type parameter.
fn bind_args(
    params: &[ParamShape],
    args: &[Expr],
    target: &RuleTarget,
    anchor_type: Option<&TypeRef>,
) -> Vec<RuleArgument> {
    params
        .iter()
        .zip(args.iter())
        .map(|(param, arg)| RuleArgument {
            name: param.name.clone(),
            ty: substitute_target(param.ty.as_ref(), target, anchor_type),
            value: arg.to_string(),
        })
        .collect()
}

fn substitute_target(
    ty: Option<&TypeRef>,
    target: &RuleTarget,
    anchor_type: Option<&TypeRef>,
) -> Option<TypeRef> {
    match (ty, target, anchor_type) {
        (Some(ty), RuleTarget::TypeParameter(param), Some(anchor))
            if ty.args.is_empty() && ty.name == *param =>
        {
            Some(anchor.clone())
        }
        _ => ty.cloned(),
    }
}

/// Argument-shape compatibility score: +1 per literal matching its declared
/// parameter type, -1 per literal contradicting it, 0 for anything unknown.
fn shape_score(shape: &RuleShape, args: &[Expr]) -> i32 {
    shape
        .params
        .iter()
        .zip(args.iter())
        .map(|(param, arg)| match (&param.ty, arg) {
            (Some(ty), Expr::Lit { value, .. }) => match literal_matches(value, ty) {
                Some(true) => 1,
                Some(false) => -1,
                None => 0,
            },
            _ => 0,
        })
        .sum()
}

fn literal_matches(literal: &Literal, ty: &TypeRef) -> Option<bool> {
    let matched = match literal {
        Literal::Str(_) => matches!(ty.name.as_str(), "String" | "Str"),
        Literal::Int(_) => matches!(ty.name.as_str(), "Int" | "Integer" | "Long"),
        Literal::Float(_) => matches!(ty.name.as_str(), "Float" | "Double" | "Decimal"),
        Literal::Bool(_) => matches!(ty.name.as_str(), "Bool" | "Boolean"),
        Literal::Null => return None,
    };
    Some(matched)
}

fn target_name(target: &RuleTarget) -> String {
    match target {
        RuleTarget::Concrete(ty) => ty.to_string(),
        RuleTarget::TypeParameter(param) => param.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluentgen_ir::Span;
    use fluentgen_registry::{RuleDecl, StaticTypeLookup};

    fn step(callee: &str, args: Vec<Expr>) -> Step {
        Step {
            callee: callee.to_string(),
            args,
            span: Span::new(7, 3),
        }
    }

    fn string_ty() -> TypeRef {
        TypeRef::named("String")
    }

    fn max_length_shape() -> RuleShape {
        RuleShape::new(
            "MaxLengthRule",
            "MaxLength",
            RuleTarget::Concrete(string_ty()),
        )
        .param(ParamShape::typed("max", TypeRef::named("Int")))
        .message("{Name} must be at most {max} characters")
        .code("MAX_LENGTH")
        .placeholder("max")
    }

    #[test]
    fn test_resolved_mode_binds_declared_params() {
        let decl = RuleDecl::new("MaxLengthRule", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("max", TypeRef::named("Int")))
            .message("{Name} must be at most {max} characters")
            .code("MAX_LENGTH")
            .placeholder("max");
        let lookup = StaticTypeLookup::new().with_decl("MaxLength", decl);
        let registry = ShapeRegistry::empty();

        let resolved = resolve_rule(
            &step("MaxLength", vec![Expr::int_lit(50)]),
            Some(&string_ty()),
            &lookup,
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.rule_type, "MaxLengthRule");
        assert_eq!(resolved.confidence, Confidence::Resolved);
        assert_eq!(resolved.args.len(), 1);
        assert_eq!(resolved.args[0].name, "max");
        assert_eq!(resolved.args[0].value, "50");
        assert_eq!(resolved.args[0].ty, Some(TypeRef::named("Int")));
        assert_eq!(resolved.default_code.as_deref(), Some("MAX_LENGTH"));
    }

    #[test]
    fn test_resolved_mode_substitutes_generic_target() {
        let decl = RuleDecl::new("EqualRule", RuleTarget::TypeParameter("T".to_string()))
            .param(ParamShape::typed("other", TypeRef::named("T")));
        let lookup = StaticTypeLookup::new().with_decl("Equal", decl);
        let registry = ShapeRegistry::empty();

        let resolved = resolve_rule(
            &step("Equal", vec![Expr::int_lit(18)]),
            Some(&TypeRef::named("Int")),
            &lookup,
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.args[0].ty, Some(TypeRef::named("Int")));
    }

    #[test]
    fn test_resolved_mode_rejects_incompatible_target() {
        let decl = RuleDecl::new("MaxLengthRule", RuleTarget::Concrete(string_ty()));
        let lookup = StaticTypeLookup::new().with_decl("MaxLength", decl);
        let registry = ShapeRegistry::empty();

        let err = resolve_rule(
            &step("MaxLength", vec![]),
            Some(&TypeRef::named("Int")),
            &lookup,
            &registry,
        )
        .unwrap_err();

        assert_eq!(err.code, DiagnosticCode::TargetTypeMismatch);
        assert!(err.message.contains("String"));
        assert!(err.message.contains("Int"));
    }

    #[test]
    fn test_resolved_mode_rejects_argument_count_mismatch() {
        let decl = RuleDecl::new("MaxLengthRule", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("max", TypeRef::named("Int")));
        let lookup = StaticTypeLookup::new().with_decl("MaxLength", decl);
        let registry = ShapeRegistry::empty();

        let err = resolve_rule(
            &step("MaxLength", vec![]),
            Some(&string_ty()),
            &lookup,
            &registry,
        )
        .unwrap_err();

        assert_eq!(err.code, DiagnosticCode::ArgumentCountMismatch);
    }

    #[test]
    fn test_structural_single_candidate_succeeds() {
        let lookup = StaticTypeLookup::new();
        let registry = ShapeRegistry::from_shapes(vec![max_length_shape()]);

        let resolved = resolve_rule(
            &step("MaxLength", vec![Expr::int_lit(50)]),
            Some(&string_ty()),
            &lookup,
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.rule_type, "MaxLengthRule");
        assert_eq!(resolved.confidence, Confidence::Structural);
        assert_eq!(resolved.args[0].value, "50");
    }

    #[test]
    fn test_modes_agree_except_confidence() {
        // The same rule resolved structurally, then via its declaration once
        // available, must produce identical bindings and defaults.
        let registry = ShapeRegistry::from_shapes(vec![max_length_shape()]);
        let structural = resolve_rule(
            &step("MaxLength", vec![Expr::int_lit(50)]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap();

        let decl = RuleDecl::new("MaxLengthRule", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("max", TypeRef::named("Int")))
            .message("{Name} must be at most {max} characters")
            .code("MAX_LENGTH")
            .placeholder("max");
        let resolved = resolve_rule(
            &step("MaxLength", vec![Expr::int_lit(50)]),
            Some(&string_ty()),
            &StaticTypeLookup::new().with_decl("MaxLength", decl),
            &ShapeRegistry::empty(),
        )
        .unwrap();

        assert_eq!(structural.confidence, Confidence::Structural);
        assert_eq!(resolved.confidence, Confidence::Resolved);
        assert_eq!(structural.rule_type, resolved.rule_type);
        assert_eq!(structural.args, resolved.args);
        assert_eq!(structural.default_message, resolved.default_message);
        assert_eq!(structural.default_code, resolved.default_code);
        assert_eq!(structural.placeholders, resolved.placeholders);
    }

    #[test]
    fn test_structural_no_name_match_fails() {
        let registry = ShapeRegistry::from_shapes(vec![max_length_shape()]);
        let err = resolve_rule(
            &step("RuleY", vec![]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap_err();

        assert_eq!(err.code, DiagnosticCode::UnmappedRule);
        assert!(err.message.contains("RuleY"));
    }

    #[test]
    fn test_structural_exact_target_beats_generic() {
        let generic = RuleShape::new(
            "GenericCheckRule",
            "Check",
            RuleTarget::TypeParameter("T".to_string()),
        );
        let exact = RuleShape::new("StringCheckRule", "Check", RuleTarget::Concrete(string_ty()));
        let registry = ShapeRegistry::from_shapes(vec![generic, exact]);

        let resolved = resolve_rule(
            &step("Check", vec![]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.rule_type, "StringCheckRule");
    }

    #[test]
    fn test_structural_incompatible_targets_fail() {
        let registry = ShapeRegistry::from_shapes(vec![max_length_shape()]);
        let err = resolve_rule(
            &step("MaxLength", vec![Expr::int_lit(50)]),
            Some(&TypeRef::named("Int")),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap_err();

        assert_eq!(err.code, DiagnosticCode::UnmappedRule);
        assert!(err.message.contains("target type"));
    }

    #[test]
    fn test_structural_argument_count_narrows() {
        let zero_arg = RuleShape::new("RequiredRule", "Check", RuleTarget::Concrete(string_ty()));
        let one_arg = RuleShape::new("PatternRule", "Check", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("pattern", string_ty()));
        let registry = ShapeRegistry::from_shapes(vec![zero_arg, one_arg]);

        let resolved = resolve_rule(
            &step("Check", vec![Expr::str_lit("^[a-z]+$")]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.rule_type, "PatternRule");
    }

    #[test]
    fn test_structural_tied_candidates_are_ambiguous() {
        let first = RuleShape::new("FirstRule", "Check", RuleTarget::Concrete(string_ty()));
        let second = RuleShape::new("SecondRule", "Check", RuleTarget::Concrete(string_ty()));
        let registry = ShapeRegistry::from_shapes(vec![first, second]);

        let err = resolve_rule(
            &step("Check", vec![]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap_err();

        assert_eq!(err.code, DiagnosticCode::AmbiguousRule);
        assert!(err.message.contains("FirstRule"));
        assert!(err.message.contains("SecondRule"));
    }

    #[test]
    fn test_structural_literal_shape_breaks_tie() {
        // Same name, same target, same arity; the int-typed parameter wins
        // for an integer literal argument.
        let takes_int = RuleShape::new("IntBoundRule", "Bound", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("limit", TypeRef::named("Int")));
        let takes_str = RuleShape::new("StrBoundRule", "Bound", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("limit", string_ty()));
        let registry = ShapeRegistry::from_shapes(vec![takes_str, takes_int]);

        let resolved = resolve_rule(
            &step("Bound", vec![Expr::int_lit(9)]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.rule_type, "IntBoundRule");
    }

    #[test]
    fn test_structural_unknown_anchor_type_skips_target_filter() {
        let registry = ShapeRegistry::from_shapes(vec![max_length_shape()]);
        let resolved = resolve_rule(
            &step("MaxLength", vec![Expr::int_lit(50)]),
            None,
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap();

        assert_eq!(resolved.rule_type, "MaxLengthRule");
    }

    #[test]
    fn test_non_literal_arguments_stay_neutral() {
        let takes_int = RuleShape::new("IntBoundRule", "Bound", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("limit", TypeRef::named("Int")));
        let takes_str = RuleShape::new("StrBoundRule", "Bound", RuleTarget::Concrete(string_ty()))
            .param(ParamShape::typed("limit", string_ty()));
        let registry = ShapeRegistry::from_shapes(vec![takes_int, takes_str]);

        // A member-access argument cannot discriminate, so this stays tied.
        let err = resolve_rule(
            &step("Bound", vec![Expr::member(Expr::ident("x"), "Limit")]),
            Some(&string_ty()),
            &StaticTypeLookup::new(),
            &registry,
        )
        .unwrap_err();

        assert_eq!(err.code, DiagnosticCode::AmbiguousRule);
    }
}
