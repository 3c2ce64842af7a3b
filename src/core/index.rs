//! Lookup maps over the loaded class index.
//!
//! Built once per run from the full entry list, read-only afterwards.
//! Two views: fqcn -> descriptor for point lookups, and simple name ->
//! fqcns (in input order) for the resolver's candidate search.

use crate::core::types::TypeEntry;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    by_fqcn: HashMap<String, TypeEntry>,
    by_simple_name: HashMap<String, Vec<String>>,
}

impl SymbolIndex {
    /// Build both lookup maps in one pass. Duplicate fqcns overwrite the
    /// descriptor (last wins) but keep their slot in the candidate list.
    pub fn build(entries: &[TypeEntry]) -> Self {
        let mut by_fqcn = HashMap::with_capacity(entries.len());
        let mut by_simple_name: HashMap<String, Vec<String>> = HashMap::new();

        for entry in entries {
            by_fqcn.insert(entry.fqcn.clone(), entry.clone());
            by_simple_name
                .entry(entry.name.clone())
                .or_default()
                .push(entry.fqcn.clone());
        }

        log::debug!(
            "Built lookup maps: {} entries, {} unique simple names",
            by_fqcn.len(),
            by_simple_name.len()
        );

        Self {
            by_fqcn,
            by_simple_name,
        }
    }

    pub fn get(&self, fqcn: &str) -> Option<&TypeEntry> {
        self.by_fqcn.get(fqcn)
    }

    pub fn contains(&self, fqcn: &str) -> bool {
        self.by_fqcn.contains_key(fqcn)
    }

    /// Candidate fqcns sharing a simple name, in index input order.
    pub fn candidates(&self, simple_name: &str) -> &[String] {
        self.by_simple_name
            .get(simple_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_fqcn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fqcn.is_empty()
    }

    /// Whether the fqcn names a nested type: its identity carries more
    /// segments than `package.name`. Unknown fqcns are not nested.
    pub fn is_nested(&self, fqcn: &str) -> bool {
        match self.by_fqcn.get(fqcn) {
            Some(entry) => entry.expected_top_level_fqcn() != fqcn,
            None => false,
        }
    }

    /// Walk a nested type's enclosing chain outward to the first known
    /// top-level type. Compilation units share one import list, so import
    /// lookups for `com.foo.Outer.Inner` must land on `com.foo.Outer`.
    ///
    /// Returns the starting fqcn when it is already top-level, and the
    /// deepest known enclosing type when the chain leaves the index.
    pub fn outermost_enclosing<'a>(&self, fqcn: &'a str) -> &'a str {
        let mut current = fqcn;
        while self.is_nested(current) {
            let Some(dot) = current.rfind('.') else {
                break;
            };
            let enclosing = &current[..dot];
            if !self.contains(enclosing) {
                break;
            }
            current = enclosing;
        }
        current
    }
}
