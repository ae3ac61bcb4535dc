//! Rule shape definitions

use fluentgen_ir::TypeRef;
use serde::{Deserialize, Serialize};

/// Declared target type of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleTarget {
    /// The rule validates exactly this type
    Concrete(TypeRef),

    /// The rule is generic over its target; the parameter name is kept for
    /// substitution when arguments are bound
    TypeParameter(String),
}

/// How a rule target compares against an anchor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TargetMatch {
    /// No match; the candidate is dropped
    Incompatible,
    /// Matches through a generic target parameter
    Generic,
    /// Declared target equals the anchor type
    Exact,
}

impl RuleTarget {
    /// Rank this target against the anchor's declared type.
    #[must_use]
    pub fn match_against(&self, anchor: &TypeRef) -> TargetMatch {
        match self {
            Self::Concrete(ty) if ty == anchor => TargetMatch::Exact,
            Self::Concrete(_) => TargetMatch::Incompatible,
            Self::TypeParameter(_) => TargetMatch::Generic,
        }
    }
}

/// A declared rule parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamShape {
    pub name: String,
    pub ty: Option<TypeRef>,
}

impl ParamShape {
    /// Create an untyped parameter shape.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    /// Create a parameter shape with a declared type.
    #[must_use]
    pub fn typed(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
        }
    }
}

/// One rule shape discovered during the current pass
///
/// Built from rule-defining declarations regardless of whether their
/// generated entry point exists yet; this is what lets a chain reference a
/// rule generated in the same compilation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleShape {
    /// The defining type; becomes the finalized rule's identity
    pub rule_type: String,

    /// Entry-point callee name the chain invokes
    pub method: String,

    /// Declared target type (or target type parameter)
    pub target: RuleTarget,

    /// Declared parameters in order
    pub params: Vec<ParamShape>,

    /// Default message template
    pub default_message: Option<String>,

    /// Default error code
    pub default_code: Option<String>,

    /// User-defined message placeholder names
    pub placeholders: Vec<String>,
}

impl RuleShape {
    /// Create a shape with no parameters or defaults.
    #[must_use]
    pub fn new(
        rule_type: impl Into<String>,
        method: impl Into<String>,
        target: RuleTarget,
    ) -> Self {
        Self {
            rule_type: rule_type.into(),
            method: method.into(),
            target,
            params: Vec::new(),
            default_message: None,
            default_code: None,
            placeholders: Vec::new(),
        }
    }

    /// Append a declared parameter.
    #[must_use]
    pub fn param(mut self, param: ParamShape) -> Self {
        self.params.push(param);
        self
    }

    /// Set the default message template.
    #[must_use]
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.default_message = Some(template.into());
        self
    }

    /// Set the default error code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.default_code = Some(code.into());
        self
    }

    /// Append a message placeholder name.
    #[must_use]
    pub fn placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholders.push(name.into());
        self
    }
}
