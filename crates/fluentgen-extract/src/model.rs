//! Output model: finalized rules, chains, and validator definitions
//!
//! Everything here is immutable once produced and tree-shaped: a rule belongs
//! to exactly one chain, a chain to exactly one anchor or nested scope. The
//! whole model serializes deterministically so callers can cache extraction
//! output by structural identity.

use crate::diagnostics::Severity;
use fluentgen_ir::{Span, TargetPath, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a rule's identity was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Bound against a fully known declaration
    Resolved,
    /// Matched heuristically against the same-pass shape registry
    Structural,
}

/// One bound rule parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleArgument {
    /// Declared parameter name
    pub name: String,
    /// Declared parameter type, generic target already substituted
    pub ty: Option<TypeRef>,
    /// Verbatim source text of the supplied expression
    pub value: String,
}

/// One finalized validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Defining type of the rule
    pub rule_type: String,

    /// Resolution confidence; downstream consumers are mode-agnostic
    pub confidence: Confidence,

    /// Bound arguments in declaration order
    pub args: Vec<RuleArgument>,

    /// Message template (override or the rule's default)
    pub message: Option<String>,

    /// Error code (override or the rule's default)
    pub code: Option<String>,

    /// Display-name override
    pub display_name: Option<String>,

    /// Severity override
    pub severity: Option<Severity>,

    /// Metadata key/value pairs, last write wins per key
    pub metadata: BTreeMap<String, String>,

    /// Per-rule guard condition, rendered source text
    pub guard: Option<String>,

    /// Message placeholder names declared on the rule
    pub placeholders: Vec<String>,

    /// Location of the attaching call, for diagnostics downstream
    pub span: Span,
}

/// What a chain's anchor selects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnchorKind {
    /// A single value of the request type
    Single,

    /// Each element of a selected collection
    Each,

    /// A named grouped sub-builder owning a nested definition
    Group {
        name: String,
        body: ValidatorDefinition,
    },

    /// A conditional scope owning a nested definition
    When {
        condition: String,
        body: ValidatorDefinition,
    },

    /// A failure-mode scope owning a nested definition
    OnFailure {
        mode: String,
        body: ValidatorDefinition,
    },
}

/// The target a rule chain validates against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub kind: AnchorKind,

    /// Selected member path; `None` for scope anchors
    pub target: Option<TargetPath>,

    /// Declared type of the target (element type for `Each`), when known
    pub target_type: Option<TypeRef>,

    pub span: Span,
}

impl Anchor {
    /// Anchor for a single selected value.
    #[must_use]
    pub fn single(target: TargetPath, target_type: Option<TypeRef>, span: Span) -> Self {
        Self {
            kind: AnchorKind::Single,
            target: Some(target),
            target_type,
            span,
        }
    }

    /// Anchor for each element of a selected collection.
    #[must_use]
    pub fn each(target: TargetPath, target_type: Option<TypeRef>, span: Span) -> Self {
        Self {
            kind: AnchorKind::Each,
            target: Some(target),
            target_type,
            span,
        }
    }

    /// Anchor for a nested scope.
    #[must_use]
    pub fn scope(kind: AnchorKind, span: Span) -> Self {
        Self {
            kind,
            target: None,
            target_type: None,
            span,
        }
    }
}

/// An anchor plus its ordered, finalized rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleChain {
    pub anchor: Anchor,
    pub rules: Vec<Rule>,
}

/// Everything extracted from one validator declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorDefinition {
    /// Identity of the declaration this was extracted from
    pub name: String,

    /// The request type the validator runs against
    pub request_type: TypeRef,

    /// Top-level chains and scopes in source order
    pub chains: Vec<RuleChain>,
}
