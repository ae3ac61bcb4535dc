//! Read-only registry of rule shapes for one pass

use crate::shape::RuleShape;
use std::collections::HashMap;
use tracing::debug;

/// Snapshot of every rule shape discovered in the current pass
///
/// Built once before resolution begins and never mutated afterwards; this is
/// what allows declarations to be resolved in parallel against it.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    by_method: HashMap<String, Vec<RuleShape>>,
    count: usize,
}

impl ShapeRegistry {
    /// Create an empty registry (no same-pass rule declarations visible).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the snapshot from discovered shapes.
    ///
    /// Insertion order is preserved within each entry-point name so candidate
    /// selection is deterministic across runs.
    #[must_use]
    pub fn from_shapes(shapes: impl IntoIterator<Item = RuleShape>) -> Self {
        let mut by_method: HashMap<String, Vec<RuleShape>> = HashMap::new();
        let mut count = 0;
        for shape in shapes {
            count += 1;
            by_method.entry(shape.method.clone()).or_default().push(shape);
        }
        debug!(shapes = count, "built rule shape registry");
        Self { by_method, count }
    }

    /// Shapes registered under the given entry-point name.
    #[must_use]
    pub fn by_method(&self, method: &str) -> &[RuleShape] {
        self.by_method.get(method).map_or(&[], Vec::as_slice)
    }

    /// Whether any shape is registered under the given entry-point name.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.by_method.contains_key(method)
    }

    /// Total number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the registry holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
