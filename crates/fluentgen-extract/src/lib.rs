#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # fluentgen-extract
//!
//! Chain-extraction and dual-mode rule-resolution engine for fluent
//! validator definitions.
//!
//! The engine walks the call chains of a validator declaration into ordered
//! steps, binds each chain to its anchor, classifies every following step as
//! a rule attachment or an override, resolves rule identities either against
//! the type system or structurally against the same-pass shape registry, and
//! assembles the results into an immutable tree of rule chains plus a list
//! of coded diagnostics. It is pure and single-threaded per invocation;
//! parallelism across declarations is safe because the registry is a
//! read-only snapshot.
//!
//! ## Example Usage
//!
//! ```rust
//! use fluentgen_extract::{extract_validator, ValidatorDecl};
//! use fluentgen_ir::{Expr, TypeRef};
//! use fluentgen_registry::{RuleShape, RuleTarget, ShapeRegistry, StaticTypeLookup};
//!
//! // Select(x => x.Email).Required()
//! let select = Expr::call(
//!     "Select",
//!     vec![Expr::lambda("x", Expr::member(Expr::ident("x"), "Email"))],
//! );
//! let chain = Expr::method(select, "Required", vec![]);
//!
//! let lookup = StaticTypeLookup::new().with_member_type("x.Email", TypeRef::named("String"));
//! let registry = ShapeRegistry::from_shapes(vec![RuleShape::new(
//!     "RequiredRule",
//!     "Required",
//!     RuleTarget::Concrete(TypeRef::named("String")),
//! )]);
//!
//! let decl = ValidatorDecl::new(
//!     "CreateUserValidator",
//!     TypeRef::named("CreateUserRequest"),
//!     vec![chain],
//! );
//! let extraction = extract_validator(&decl, &lookup, &registry);
//! assert!(extraction.diagnostics.is_empty());
//! assert_eq!(extraction.definition.chains.len(), 1);
//! ```

/// Anchor resolution for the leading chain step.
pub mod anchor;
/// Chain assembly state machine and the per-declaration driver.
pub mod assembler;
/// In-progress rule accumulation and finalization.
pub mod builder;
/// Override-vs-rule-attachment step classification.
pub mod classify;
/// Coded diagnostics accumulated per declaration.
pub mod diagnostics;
/// Immutable output model: rules, chains, validator definitions.
pub mod model;
/// Dual-mode (resolved/structural) rule resolution.
pub mod resolver;
/// Call-chain flattening into ordered steps.
pub mod walker;

/// Anchor forms bound from a chain's leading step.
pub use anchor::{resolve_anchor, ResolvedAnchor};
/// Driver entry point and its input/output records.
pub use assembler::{extract_validator, Extraction, ValidatorDecl};
/// Rule accumulator.
pub use builder::RuleBuilder;
/// Step classification primitives.
pub use classify::{classify, OverrideKind, StepKind};
/// Diagnostic records with stable codes.
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
/// Output model types.
pub use model::{
    Anchor, AnchorKind, Confidence, Rule, RuleArgument, RuleChain, ValidatorDefinition,
};
/// Rule resolution entry point and outcome.
pub use resolver::{resolve_rule, ResolvedRule};
/// Chain walking primitives.
pub use walker::{walk_chain, Step};
