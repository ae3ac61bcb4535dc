//! Step classification: override vs. rule attachment

use crate::walker::Step;

/// The closed set of override operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    /// `WithMessage`: message template override
    Message,
    /// `WithErrorCode`: error code override
    ErrorCode,
    /// `WithName`: display-name override
    DisplayName,
    /// `WithSeverity`: severity override
    Severity,
    /// `WithMetadata`: metadata key/value entry
    Metadata,
    /// `When` in non-anchor position: per-rule guard
    Guard,
}

/// Classification of one non-anchor step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Mutates the most recently attached rule
    Override(OverrideKind),
    /// Introduces a new rule; identity is decided by the resolver
    RuleAttachment,
}

/// Classify a step by callee name.
///
/// Overrides are a fixed set; every other name is a rule attachment. The set
/// of rules is open and registry-driven, so no name list exists for them.
#[must_use]
pub fn classify(step: &Step) -> StepKind {
    match step.callee.as_str() {
        "WithMessage" => StepKind::Override(OverrideKind::Message),
        "WithErrorCode" => StepKind::Override(OverrideKind::ErrorCode),
        "WithName" => StepKind::Override(OverrideKind::DisplayName),
        "WithSeverity" => StepKind::Override(OverrideKind::Severity),
        "WithMetadata" => StepKind::Override(OverrideKind::Metadata),
        "When" => StepKind::Override(OverrideKind::Guard),
        _ => StepKind::RuleAttachment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluentgen_ir::{Expr, Span};

    fn step(callee: &str) -> Step {
        Step {
            callee: callee.to_string(),
            args: Vec::new(),
            span: Span::default(),
        }
    }

    #[test]
    fn test_overrides_are_closed_set() {
        assert_eq!(
            classify(&step("WithMessage")),
            StepKind::Override(OverrideKind::Message)
        );
        assert_eq!(
            classify(&step("WithErrorCode")),
            StepKind::Override(OverrideKind::ErrorCode)
        );
        assert_eq!(
            classify(&step("WithName")),
            StepKind::Override(OverrideKind::DisplayName)
        );
        assert_eq!(
            classify(&step("WithSeverity")),
            StepKind::Override(OverrideKind::Severity)
        );
        assert_eq!(
            classify(&step("WithMetadata")),
            StepKind::Override(OverrideKind::Metadata)
        );
        assert_eq!(classify(&step("When")), StepKind::Override(OverrideKind::Guard));
    }

    #[test]
    fn test_unknown_names_are_rule_attachments() {
        assert_eq!(classify(&step("Required")), StepKind::RuleAttachment);
        assert_eq!(classify(&step("MaxLength")), StepKind::RuleAttachment);
        assert_eq!(classify(&step("SomeCustomRule")), StepKind::RuleAttachment);
    }

    #[test]
    fn test_classification_ignores_arguments() {
        let with_args = Step {
            callee: "WithMessage".to_string(),
            args: vec![Expr::str_lit("m")],
            span: Span::default(),
        };
        assert_eq!(
            classify(&with_args),
            StepKind::Override(OverrideKind::Message)
        );
    }
}
