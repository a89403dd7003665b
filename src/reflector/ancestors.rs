//! Path-scoped record of named types seen between the root and a node.

use std::collections::BTreeMap;

/// Visit counts of named types on the current root-to-node path.
///
/// Passed by value: each recursive descent receives its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors(BTreeMap<String, usize>);

impl Ancestors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, type_ref: &str) -> bool {
        self.count(type_ref) > 0
    }

    pub fn count(&self, type_ref: &str) -> usize {
        self.0.get(type_ref).copied().unwrap_or(0)
    }

    pub fn add(&mut self, type_ref: &str) {
        *self.0.entry(type_ref.to_string()).or_default() += 1;
    }

    /// Number of distinct names on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
