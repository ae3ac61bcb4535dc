//! Target paths extracted from selector lambdas

use crate::expr::Expr;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The member-access path a selector lambda designates
///
/// `x => x.Address.City` becomes `{ param: "x", segments: ["Address", "City"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPath {
    /// Lambda parameter name the chain hangs off
    pub param: String,
    /// Member names in source order
    pub segments: Vec<String>,
}

impl TargetPath {
    /// Extract the target path from a selector lambda.
    ///
    /// The expression must be a single-parameter lambda whose body is a pure
    /// member-access chain rooted at the lambda parameter. Anything else
    /// (calls, literals, a bare parameter reference) is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] when the expression does not have
    /// the required shape.
    pub fn from_selector(expr: &Expr) -> Result<Self> {
        let Expr::Lambda { param, body, .. } = expr else {
            return Err(Error::invalid_selector("expected a selector lambda"));
        };

        let mut segments = Vec::new();
        let mut current = body.as_ref();
        loop {
            match current {
                Expr::Member { base, name, .. } => {
                    segments.push(name.clone());
                    current = base.as_ref();
                }
                Expr::Ident { name, .. } => {
                    if name != param {
                        return Err(Error::invalid_selector(format!(
                            "member chain is rooted at '{name}', not the lambda parameter '{param}'"
                        )));
                    }
                    break;
                }
                other => {
                    return Err(Error::invalid_selector(format!(
                        "selector body must be a member-access chain, found '{other}'"
                    )));
                }
            }
        }

        if segments.is_empty() {
            return Err(Error::invalid_selector(
                "selector must access at least one member of the parameter",
            ));
        }

        segments.reverse();
        Ok(Self {
            param: param.clone(),
            segments,
        })
    }

    /// The selected member's own name (last path segment).
    #[must_use]
    pub fn member_name(&self) -> &str {
        self.segments
            .last()
            .map_or(self.param.as_str(), String::as_str)
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.param)?;
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
