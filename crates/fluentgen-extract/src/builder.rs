//! Rule builder: accumulates one in-progress rule until finalization

use crate::classify::OverrideKind;
use crate::diagnostics::Severity;
use crate::model::Rule;
use crate::resolver::ResolvedRule;
use crate::walker::Step;
use fluentgen_ir::{Expr, Literal, Span};
use std::collections::BTreeMap;

/// Accumulator for one rule-attachment step and its trailing overrides
///
/// Overrides are last-write-wins per field; metadata entries accumulate with
/// last-write-wins per key. `build` is pure structural packaging, no parsing
/// or resolution happens at finalization time.
#[derive(Debug)]
pub struct RuleBuilder {
    resolution: ResolvedRule,
    span: Span,
    message: Option<String>,
    code: Option<String>,
    display_name: Option<String>,
    severity: Option<Severity>,
    metadata: BTreeMap<String, String>,
    guard: Option<String>,
}

impl RuleBuilder {
    /// Start accumulating a freshly resolved rule.
    #[must_use]
    pub fn new(resolution: ResolvedRule, span: Span) -> Self {
        Self {
            resolution,
            span,
            message: None,
            code: None,
            display_name: None,
            severity: None,
            metadata: BTreeMap::new(),
            guard: None,
        }
    }

    /// Apply an override step to the in-progress rule.
    pub fn apply(&mut self, kind: OverrideKind, step: &Step) {
        match kind {
            OverrideKind::Message => self.message = text_arg(step),
            OverrideKind::ErrorCode => self.code = text_arg(step),
            OverrideKind::DisplayName => self.display_name = text_arg(step),
            OverrideKind::Severity => {
                if let Some(severity) = step.args.first().and_then(severity_arg) {
                    self.severity = Some(severity);
                }
            }
            OverrideKind::Metadata => {
                if let (Some(key), Some(value)) = (
                    step.args.first().map(rendered_text),
                    step.args.get(1).map(rendered_text),
                ) {
                    self.metadata.insert(key, value);
                }
            }
            OverrideKind::Guard => {
                self.guard = step.args.first().map(ToString::to_string);
            }
        }
    }

    /// Finalize into an immutable rule, falling back to the resolved
    /// defaults for message and code.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule {
            rule_type: self.resolution.rule_type,
            confidence: self.resolution.confidence,
            args: self.resolution.args,
            message: self.message.or(self.resolution.default_message),
            code: self.code.or(self.resolution.default_code),
            display_name: self.display_name,
            severity: self.severity,
            metadata: self.metadata,
            guard: self.guard,
            placeholders: self.resolution.placeholders,
            span: self.span,
        }
    }
}

/// First argument as override text: string literals unwrap, anything else
/// keeps its rendered source text.
fn text_arg(step: &Step) -> Option<String> {
    step.args.first().map(rendered_text)
}

fn rendered_text(expr: &Expr) -> String {
    match expr {
        Expr::Lit {
            value: Literal::Str(text),
            ..
        } => text.clone(),
        other => other.to_string(),
    }
}

/// Parse a severity value from `Severity.Warning`, `"Warning"`, or bare
/// `Warning`; unknown values leave the override unset.
fn severity_arg(expr: &Expr) -> Option<Severity> {
    let text = rendered_text(expr);
    let name = text.rsplit('.').next().unwrap_or(&text);
    match name {
        "Error" => Some(Severity::Error),
        "Warning" => Some(Severity::Warning),
        "Info" => Some(Severity::Info),
        _ => None,
    }
}
