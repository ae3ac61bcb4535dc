//! Type-lookup capability

use crate::shape::{ParamShape, RuleTarget};
use fluentgen_ir::{Expr, TypeRef};
use std::collections::HashMap;

/// A fully resolved callee declaration
///
/// Returned by the type system when the rule's entry point already exists in
/// a compiled unit or an already-processed declaration. Rules invoked
/// directly through their defining type (no wrapper entry point) are
/// represented the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDecl {
    /// The defining type; becomes the finalized rule's identity
    pub rule_type: String,

    /// Declared target type (or target type parameter)
    pub target: RuleTarget,

    /// Declared parameters in order
    pub params: Vec<ParamShape>,

    /// Default message template declared on the rule
    pub default_message: Option<String>,

    /// Default error code declared on the rule
    pub default_code: Option<String>,

    /// User-defined message placeholder names
    pub placeholders: Vec<String>,
}

impl RuleDecl {
    /// Create a declaration with no parameters or defaults.
    #[must_use]
    pub fn new(rule_type: impl Into<String>, target: RuleTarget) -> Self {
        Self {
            rule_type: rule_type.into(),
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

/// Read-only view into the surrounding type system
///
/// Every method may answer "unknown". An unknown callee declaration is what
/// routes a rule-attachment step into structural resolution.
pub trait TypeLookup {
    /// Declared type of a member-access expression, if known.
    fn type_of(&self, expr: &Expr) -> Option<TypeRef>;

    /// Element type of a collection type, if known.
    fn element_type_of(&self, collection: &TypeRef) -> Option<TypeRef>;

    /// Full declaration of a rule entry point invoked on the given anchor
    /// type, if the entry point already exists.
    fn callee_decl(&self, callee: &str, anchor: Option<&TypeRef>) -> Option<RuleDecl>;
}

/// In-memory [`TypeLookup`] populated up front
///
/// Member paths and collection types are keyed by their rendered text.
#[derive(Debug, Default)]
pub struct StaticTypeLookup {
    member_types: HashMap<String, TypeRef>,
    element_types: HashMap<String, TypeRef>,
    decls: HashMap<String, RuleDecl>,
}

impl StaticTypeLookup {
    /// Create an empty lookup (everything resolves to "unknown").
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the declared type of a member path, e.g. `"x.Email"`.
    #[must_use]
    pub fn with_member_type(mut self, path: impl Into<String>, ty: TypeRef) -> Self {
        self.member_types.insert(path.into(), ty);
        self
    }

    /// Register the element type of a collection type, keyed by the
    /// collection's rendered name, e.g. `"List<Order>"`.
    #[must_use]
    pub fn with_element_type(mut self, collection: impl Into<String>, element: TypeRef) -> Self {
        self.element_types.insert(collection.into(), element);
        self
    }

    /// Register a resolvable entry-point declaration.
    #[must_use]
    pub fn with_decl(mut self, callee: impl Into<String>, decl: RuleDecl) -> Self {
        self.decls.insert(callee.into(), decl);
        self
    }
}

impl TypeLookup for StaticTypeLookup {
    fn type_of(&self, expr: &Expr) -> Option<TypeRef> {
        self.member_types.get(&expr.to_string()).cloned()
    }

    fn element_type_of(&self, collection: &TypeRef) -> Option<TypeRef> {
        self.element_types.get(&collection.to_string()).cloned()
    }

    fn callee_decl(&self, callee: &str, _anchor: Option<&TypeRef>) -> Option<RuleDecl> {
        self.decls.get(callee).cloned()
    }
}
