//! Resolves simple type names to concrete fully-qualified identities.
//!
//! Signatures reference types by unqualified name, and a large codebase
//! has plenty of collisions (`BlockType` alone has several definitions).
//! Resolution applies a deterministic cascade, short-circuiting at the
//! first rule that produces a unique or otherwise final answer. The
//! cascade never fails: an unresolvable name yields an empty result, and
//! a genuinely ambiguous one yields every plausible candidate, biasing
//! toward false positives that surface for human review rather than
//! silently dropped references.

use crate::analysis::imports::ImportTable;
use crate::config::NamespaceConfig;
use crate::core::{SymbolIndex, TypeEntry};
use std::collections::HashSet;

pub struct NameResolver<'a> {
    index: &'a SymbolIndex,
    imports: &'a ImportTable,
    namespaces: &'a NamespaceConfig,
}

impl<'a> NameResolver<'a> {
    pub fn new(
        index: &'a SymbolIndex,
        imports: &'a ImportTable,
        namespaces: &'a NamespaceConfig,
    ) -> Self {
        Self {
            index,
            imports,
            namespaces,
        }
    }

    /// Resolve one referenced name in the context of its declaring type.
    /// Total and deterministic; candidate order follows index input order.
    pub fn resolve(&self, name: &str, context: &TypeEntry) -> Vec<String> {
        // Already fully qualified. Known -> that identity; unknown -> an
        // external or unindexed type, not worth a fallback search.
        if name.contains('.') && name.starts_with(self.namespaces.root_prefix.as_str()) {
            if self.index.contains(name) {
                return vec![name.to_string()];
            }
            return Vec::new();
        }

        // Dotted but not fully qualified: an `Outer.Inner` reference.
        if let Some(dot) = name.find('.') {
            let outer = &name[..dot];
            let inner = &name[dot + 1..];
            let mut results = Vec::new();
            for outer_fqcn in self.resolve(outer, context) {
                let candidate = format!("{outer_fqcn}.{inner}");
                if self.index.contains(&candidate) {
                    results.push(candidate);
                }
            }
            return results;
        }

        let candidates = self.index.candidates(name);
        match candidates {
            [] => return Vec::new(),
            [only] => {
                // A bare name almost never refers to a nested type of an
                // unrelated owner; such a match is a coincidental
                // collision with an external type of the same name.
                if self.index.is_nested(only) {
                    return Vec::new();
                }
                return vec![only.clone()];
            }
            _ => {}
        }

        // Import hints are the most accurate signal when present.
        if let Some(imports) = self.imports.effective_imports(&context.fqcn, self.index) {
            if !imports.is_empty() {
                let imported: Vec<String> = candidates
                    .iter()
                    .filter(|c| is_imported(c, imports))
                    .cloned()
                    .collect();
                if !imported.is_empty() {
                    return imported;
                }
            }
        }

        // Same package as the declaring type.
        let same_package: Vec<&String> = candidates
            .iter()
            .filter(|c| {
                self.index
                    .get(c)
                    .is_some_and(|e| e.package == context.package)
            })
            .collect();
        if same_package.len() == 1 {
            return vec![same_package[0].clone()];
        }

        // Candidates that are neither excluded nor external.
        let pool: Vec<String> = candidates
            .iter()
            .filter(|c| !self.namespaces.is_excluded(c) && !self.namespaces.is_external(c))
            .cloned()
            .collect();
        if pool.len() == 1 {
            return pool;
        }

        // Same top-level namespace as the declaring type.
        let scope: &[String] = if pool.is_empty() { candidates } else { &pool };
        let top = top_level_namespace(&context.package);
        let same_top: Vec<String> = scope
            .iter()
            .filter(|c| {
                self.index
                    .get(c)
                    .is_some_and(|e| top_level_namespace(&e.package) == top)
            })
            .cloned()
            .collect();
        if !same_top.is_empty() {
            return same_top;
        }

        if pool.is_empty() {
            candidates.to_vec()
        } else {
            pool
        }
    }
}

/// A candidate counts as imported when it appears verbatim, or when any
/// enclosing prefix of it does (`BuilderCodec.BuilderBase` matches an
/// import of `BuilderCodec`).
fn is_imported(candidate: &str, imports: &HashSet<String>) -> bool {
    if imports.contains(candidate) {
        return true;
    }
    let mut end = candidate.rfind('.');
    while let Some(dot) = end {
        if dot == 0 {
            break;
        }
        let parent = &candidate[..dot];
        if imports.contains(parent) {
            return true;
        }
        end = parent.rfind('.');
    }
    false
}

/// First four dot-separated segments, the granularity at which the
/// codebase splits into sibling trees (`com.hypixel.hytale.server`,
/// `com.hypixel.hytale.event`, ...).
fn top_level_namespace(package: &str) -> String {
    package
        .split('.')
        .take(4)
        .collect::<Vec<_>>()
        .join(".")
}
