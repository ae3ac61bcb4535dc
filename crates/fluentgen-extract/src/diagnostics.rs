//! Structured diagnostics with stable codes

use fluentgen_ir::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Severity of a diagnostic or a rule override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks code emission for the declaration
    Error,
    /// Reported but not blocking
    Warning,
    /// Informational only
    Info,
}

/// Stable diagnostic codes surfaced to the surrounding driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// VALC201: leading chain step is not an anchor operation
    InvalidAnchor,

    /// VALC202: selector argument is not a member-access lambda
    InvalidSelector,

    /// VALC203: override step appears before any rule is attached
    OverrideWithoutRule,

    /// VALC204: grouped scope body is empty where rules were clearly intended
    EmptyScopeBody,

    /// VALC205: structural resolution matched more than one candidate
    AmbiguousRule,

    /// VALC206: structural resolution matched no candidate
    UnmappedRule,

    /// VALC207: rule target type is incompatible with the anchor type
    TargetTypeMismatch,

    /// VALC208: nested scope body argument is missing or not a lambda
    MalformedScopeBody,

    /// VALC209: argument count does not match the resolved declaration
    ArgumentCountMismatch,
}

impl DiagnosticCode {
    /// The stable code text, e.g. `VALC206`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidAnchor => "VALC201",
            Self::InvalidSelector => "VALC202",
            Self::OverrideWithoutRule => "VALC203",
            Self::EmptyScopeBody => "VALC204",
            Self::AmbiguousRule => "VALC205",
            Self::UnmappedRule => "VALC206",
            Self::TargetTypeMismatch => "VALC207",
            Self::MalformedScopeBody => "VALC208",
            Self::ArgumentCountMismatch => "VALC209",
        }
    }

    /// Default severity attached to diagnostics with this code.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::EmptyScopeBody => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One diagnostic record attached to a declaration's extraction output
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code}: {message} at {span}")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a diagnostic; severity follows the code.
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            severity: code.severity(),
        }
    }
}
