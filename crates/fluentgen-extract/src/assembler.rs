//! Chain assembly: drives the per-chain pipeline and recurses into scopes

use crate::anchor::{is_scope_step, resolve_anchor, ResolvedAnchor};
use crate::builder::RuleBuilder;
use crate::classify::{classify, StepKind};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::model::{Anchor, AnchorKind, Rule, RuleChain, ValidatorDefinition};
use crate::resolver::resolve_rule;
use crate::walker::{walk_chain, Step};
use fluentgen_ir::{Expr, Span, TypeRef};
use fluentgen_registry::{ShapeRegistry, TypeLookup};
use tracing::{debug, trace};

/// One validator declaration as handed over by the discovery collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorDecl {
    /// Declaration identity
    pub name: String,
    /// The request type the validator runs against
    pub request_type: TypeRef,
    /// Top-level statements of the rule-definition body, in source order
    pub statements: Vec<Expr>,
    /// Location of the declaration
    pub span: Span,
}

impl ValidatorDecl {
    /// Create a declaration with a default span.
    #[must_use]
    pub fn new(name: impl Into<String>, request_type: TypeRef, statements: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            request_type,
            statements,
            span: Span::default(),
        }
    }
}

/// Extraction output for one declaration: whatever could be built, plus the
/// diagnostics produced along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub definition: ValidatorDefinition,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Whether any error-severity diagnostic was produced.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == crate::diagnostics::Severity::Error)
    }
}

/// Extract all rule chains from one validator declaration.
///
/// Never aborts: malformed chains are discarded with a diagnostic,
/// unresolvable rule steps are omitted while the rest of their chain
/// finalizes, and the result always carries whatever partial model could be
/// built.
#[must_use]
pub fn extract_validator(
    decl: &ValidatorDecl,
    lookup: &dyn TypeLookup,
    registry: &ShapeRegistry,
) -> Extraction {
    debug!(validator = %decl.name, statements = decl.statements.len(), "extracting validator");
    let mut assembler = ChainAssembler {
        lookup,
        registry,
        diagnostics: Vec::new(),
    };
    let definition =
        assembler.assemble_definition(&decl.name, &decl.request_type, &decl.statements);
    Extraction {
        definition,
        diagnostics: assembler.diagnostics,
    }
}

struct ChainAssembler<'a> {
    lookup: &'a dyn TypeLookup,
    registry: &'a ShapeRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl ChainAssembler<'_> {
    fn assemble_definition(
        &mut self,
        name: &str,
        request_type: &TypeRef,
        statements: &[Expr],
    ) -> ValidatorDefinition {
        let mut chains = Vec::new();
        for statement in statements {
            self.assemble_statement(statement, name, request_type, &mut chains);
        }
        ValidatorDefinition {
            name: name.to_string(),
            request_type: request_type.clone(),
            chains,
        }
    }

    /// Run one statement through the chain pipeline: walk, anchor, then the
    /// classify/resolve/build loop. Scope anchors recurse into their bodies.
    fn assemble_statement(
        &mut self,
        statement: &Expr,
        name: &str,
        request_type: &TypeRef,
        chains: &mut Vec<RuleChain>,
    ) {
        let steps = walk_chain(statement);
        let Some((anchor_step, rest)) = steps.split_first() else {
            // Non-chain statements are filtered upstream; nothing to do.
            trace!("statement is not a call chain, skipping");
            return;
        };

        let anchor = match resolve_anchor(anchor_step, self.lookup) {
            Ok(anchor) => anchor,
            Err(diagnostic) => {
                self.diagnostics.push(diagnostic);
                return;
            }
        };

        match anchor {
            ResolvedAnchor::Single { path, target_type } => {
                let rules =
                    self.assemble_rules(rest, target_type.as_ref(), name, request_type, chains);
                if rules.is_empty() {
                    trace!(target = %path, "chain has no rules, discarding");
                    return;
                }
                chains.push(RuleChain {
                    anchor: Anchor::single(path, target_type, anchor_step.span),
                    rules,
                });
            }
            ResolvedAnchor::Each { path, target_type } => {
                let rules =
                    self.assemble_rules(rest, target_type.as_ref(), name, request_type, chains);
                if rules.is_empty() {
                    trace!(target = %path, "chain has no rules, discarding");
                    return;
                }
                chains.push(RuleChain {
                    anchor: Anchor::each(path, target_type, anchor_step.span),
                    rules,
                });
            }
            ResolvedAnchor::Group {
                name: group_name,
                statements,
            } => {
                if statements.is_empty() {
                    self.diagnostics.push(Diagnostic::new(
                        DiagnosticCode::EmptyScopeBody,
                        format!("group '{group_name}' has an empty body"),
                        anchor_step.span,
                    ));
                }
                let body = self.assemble_definition(name, request_type, &statements);
                let rules = self.assemble_rules(rest, None, name, request_type, chains);
                chains.push(RuleChain {
                    anchor: Anchor::scope(
                        AnchorKind::Group {
                            name: group_name,
                            body,
                        },
                        anchor_step.span,
                    ),
                    rules,
                });
            }
            ResolvedAnchor::When {
                condition,
                statements,
            } => {
                let body = self.assemble_definition(name, request_type, &statements);
                let rules = self.assemble_rules(rest, None, name, request_type, chains);
                chains.push(RuleChain {
                    anchor: Anchor::scope(AnchorKind::When { condition, body }, anchor_step.span),
                    rules,
                });
            }
            ResolvedAnchor::OnFailure { mode, statements } => {
                let body = self.assemble_definition(name, request_type, &statements);
                let rules = self.assemble_rules(rest, None, name, request_type, chains);
                chains.push(RuleChain {
                    anchor: Anchor::scope(AnchorKind::OnFailure { mode, body }, anchor_step.span),
                    rules,
                });
            }
        }
    }

    /// The classify/resolve/build loop over the steps after the anchor.
    ///
    /// A scope-introducing step mid-chain recurses into its body and the
    /// parent resumes at the following step. A rule step that fails to
    /// resolve is omitted; overrides trailing it are swallowed so one
    /// failure does not cascade into override-without-rule noise.
    fn assemble_rules(
        &mut self,
        steps: &[Step],
        anchor_type: Option<&TypeRef>,
        name: &str,
        request_type: &TypeRef,
        chains: &mut Vec<RuleChain>,
    ) -> Vec<Rule> {
        let mut rules = Vec::new();
        let mut builder: Option<RuleBuilder> = None;
        let mut dropped_last = false;

        for step in steps {
            if is_scope_step(step) {
                self.assemble_scope_step(step, name, request_type, chains);
                continue;
            }
            match classify(step) {
                StepKind::Override(kind) => {
                    if let Some(current) = builder.as_mut() {
                        current.apply(kind, step);
                    } else if !dropped_last {
                        self.diagnostics.push(Diagnostic::new(
                            DiagnosticCode::OverrideWithoutRule,
                            format!(
                                "'{}' override appears before any rule is attached",
                                step.callee
                            ),
                            step.span,
                        ));
                    }
                }
                StepKind::RuleAttachment => {
                    if let Some(finished) = builder.take() {
                        rules.push(finished.build());
                    }
                    dropped_last = false;
                    match resolve_rule(step, anchor_type, self.lookup, self.registry) {
                        Ok(resolution) => {
                            builder = Some(RuleBuilder::new(resolution, step.span));
                        }
                        Err(diagnostic) => {
                            self.diagnostics.push(diagnostic);
                            dropped_last = true;
                        }
                    }
                }
            }
        }

        if let Some(finished) = builder.take() {
            rules.push(finished.build());
        }
        rules
    }

    /// A `When`/`OnFailure` carrying a body lambda after the anchor: emit a
    /// scope chain alongside the parent chain.
    fn assemble_scope_step(
        &mut self,
        step: &Step,
        name: &str,
        request_type: &TypeRef,
        chains: &mut Vec<RuleChain>,
    ) {
        match resolve_anchor(step, self.lookup) {
            Ok(ResolvedAnchor::When {
                condition,
                statements,
            }) => {
                let body = self.assemble_definition(name, request_type, &statements);
                chains.push(RuleChain {
                    anchor: Anchor::scope(AnchorKind::When { condition, body }, step.span),
                    rules: Vec::new(),
                });
            }
            Ok(ResolvedAnchor::OnFailure { mode, statements }) => {
                let body = self.assemble_definition(name, request_type, &statements);
                chains.push(RuleChain {
                    anchor: Anchor::scope(AnchorKind::OnFailure { mode, body }, step.span),
                    rules: Vec::new(),
                });
            }
            Ok(_) => {}
            Err(diagnostic) => self.diagnostics.push(diagnostic),
        }
    }
}
