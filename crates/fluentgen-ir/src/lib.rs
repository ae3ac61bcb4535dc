#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # fluentgen-ir
//!
//! Expression-tree intermediate representation for fluent rule definitions.
//!
//! This crate provides the parsed call-chain structures the extraction engine
//! consumes: call expressions in member-call form, member accesses, lambdas,
//! literals and statement blocks, all carrying source spans, plus nominal
//! type references and selector target paths.

/// Expression tree, literals, and source spans.
pub mod expr;
/// Selector target paths extracted from lambda bodies.
pub mod path;
/// Nominal type references with generic arguments.
pub mod types;

/// Expression primitives.
pub use expr::{Expr, Literal, Span};
/// Target path extracted from a selector lambda.
pub use path::TargetPath;
/// Nominal type reference.
pub use types::TypeRef;

use thiserror::Error;

/// Errors that can occur when interpreting IR fragments
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid selector: {reason}")]
    InvalidSelector { reason: String },
}

impl Error {
    /// Build an invalid-selector error with the rejection reason.
    pub fn invalid_selector(reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for IR operations.
pub type Result<T> = std::result::Result<T, Error>;
