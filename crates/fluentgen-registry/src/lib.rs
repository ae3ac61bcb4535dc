#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # fluentgen-registry
//!
//! Rule-shape registry and type-lookup capability.
//!
//! The registry is the structural-mode half of rule resolution: a read-only
//! snapshot of every rule shape discovered in the current pass, built once
//! before resolution begins and only read afterwards. The [`TypeLookup`]
//! trait is the seam to the surrounding type system; it may answer "unknown",
//! which is exactly what sends a rule-attachment step into structural mode.

/// Type-lookup capability trait plus an in-memory implementation.
pub mod lookup;
/// Read-only rule-shape registry built once per pass.
pub mod registry;
/// Rule shapes, parameter shapes, and target-type matching.
pub mod shape;

/// Type lookup seam and resolved callee declarations.
pub use lookup::{RuleDecl, StaticTypeLookup, TypeLookup};
/// Snapshot registry of discovered rule shapes.
pub use registry::ShapeRegistry;
/// Shape primitives for rules and their parameters.
pub use shape::{ParamShape, RuleShape, RuleTarget, TargetMatch};
