//! Keyed lookup over a diagnostic list.

use std::collections::HashMap;

use crate::models::{diagnostic_key, Diagnostic, Entity};

/// Diagnostics grouped by `entity:id:field` (or `entity:id`).
///
/// Several checks can flag the same cell, so each key holds a list in the
/// order the diagnostics were produced.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticIndex {
    by_key: HashMap<String, Vec<Diagnostic>>,
}

impl DiagnosticIndex {
    pub fn build(diagnostics: &[Diagnostic]) -> Self {
        let mut by_key: HashMap<String, Vec<Diagnostic>> = HashMap::new();
        for d in diagnostics {
            by_key.entry(d.key()).or_default().push(d.clone());
        }
        Self { by_key }
    }

    /// Diagnostics stored under a raw key.
    pub fn get(&self, key: &str) -> &[Diagnostic] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Diagnostics for one record cell, or the record itself when `field`
    /// is `None`.
    pub fn lookup(&self, entity: Entity, id: &str, field: Option<&str>) -> &[Diagnostic] {
        self.get(&diagnostic_key(entity, id, field))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl From<&[Diagnostic]> for DiagnosticIndex {
    fn from(diagnostics: &[Diagnostic]) -> Self {
        Self::build(diagnostics)
    }
}
