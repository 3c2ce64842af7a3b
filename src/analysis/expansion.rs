//! Breadth-first expansion of the API surface.
//!
//! Seeds the frontier with the configured entry-point tiers, then follows
//! every type reference reachable through public/protected members. The
//! frontier is FIFO and the first visit of an identity wins, so each
//! admitted type records the shortest path from any seed and the whole
//! run is deterministic for a given index and policy.

use crate::analysis::extraction::extract_type_names;
use crate::analysis::imports::ImportTable;
use crate::analysis::resolver::NameResolver;
use crate::config::{ApimapConfig, NamespaceConfig};
use crate::core::{SymbolIndex, TypeEntry};
use im::{HashSet, Vector};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

const EXPANSION_REASON: &str = "expansion";

/// One type admitted to the API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceType {
    pub fqcn: String,
    /// Seed tier label, or "expansion" for transitively reached types.
    pub inclusion_reason: String,
    /// Identities leading from a seed to this type, exclusive. Empty for
    /// direct seeds.
    pub expansion_path: Vec<String>,
    pub category: String,
}

/// One type left out of the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalType {
    pub fqcn: String,
    pub tag: String,
}

/// A reachable type that crossed a namespace boundary and needs human
/// review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderlineCase {
    pub fqcn: String,
    pub reason: String,
    pub recommendation: String,
    pub confidence: String,
}

/// Read-only outcome of one classification run. Serialization to the
/// report files happens elsewhere; the engine itself performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationResults {
    /// Admission order (BFS order over the seed tiers).
    pub surface: Vec<SurfaceType>,
    /// Index input order.
    pub internal: Vec<InternalType>,
    /// Discovery order.
    pub borderline: Vec<BorderlineCase>,
    /// Seeds that were present in the index, in tier order.
    pub seed_fqcns: Vec<String>,
    /// Surface entries removed by the protocol duplicate post-pass.
    pub deduplicated: usize,
}

#[derive(Debug, Clone)]
struct FrontierItem {
    fqcn: String,
    reason: String,
    path: Vec<String>,
}

/// State of a single traversal run. Construct, `run()`, discard; no state
/// outlives the run.
pub struct SurfaceExpander<'a> {
    entries: &'a [TypeEntry],
    index: &'a SymbolIndex,
    imports: &'a ImportTable,
    config: &'a ApimapConfig,
    frontier: Vector<FrontierItem>,
    visited: HashSet<String>,
    surface: IndexMap<String, SurfaceType>,
    borderline: Vec<BorderlineCase>,
    seed_fqcns: Vec<String>,
}

impl<'a> SurfaceExpander<'a> {
    pub fn new(
        entries: &'a [TypeEntry],
        index: &'a SymbolIndex,
        imports: &'a ImportTable,
        config: &'a ApimapConfig,
    ) -> Self {
        Self {
            entries,
            index,
            imports,
            config,
            frontier: Vector::new(),
            visited: HashSet::new(),
            surface: IndexMap::new(),
            borderline: Vec::new(),
            seed_fqcns: Vec::new(),
        }
    }

    pub fn run(mut self) -> ClassificationResults {
        let seeds = self.merge_seeds();
        self.seed_frontier(&seeds);
        self.expand();
        let deduplicated = self.deduplicate_protocol_types();
        let internal = self.internal_index();

        ClassificationResults {
            surface: self.surface.into_values().collect(),
            internal,
            borderline: self.borderline,
            seed_fqcns: self.seed_fqcns,
            deduplicated,
        }
    }

    /// Merge all seed tiers into one ordered map. An identity keeps the
    /// first tier it appears under.
    fn merge_seeds(&self) -> IndexMap<String, String> {
        let mut seeds = IndexMap::new();

        let tiers = [
            (&self.config.seeds.tier1, "seed:tier1"),
            (&self.config.seeds.tier2, "seed:tier2"),
            (&self.config.seeds.tier3, "seed:tier3"),
        ];
        for (tier, label) in tiers {
            for fqcn in tier {
                seeds
                    .entry(fqcn.clone())
                    .or_insert_with(|| label.to_string());
            }
        }

        // Tier 4: every indexed type under the event packages.
        for entry in self.entries {
            if self.config.namespaces.is_event_seed_package(&entry.package) {
                seeds
                    .entry(entry.fqcn.clone())
                    .or_insert_with(|| "seed:tier4".to_string());
            }
        }

        seeds
    }

    fn seed_frontier(&mut self, seeds: &IndexMap<String, String>) {
        let mut valid = 0usize;
        for (fqcn, label) in seeds {
            if self.index.contains(fqcn) {
                valid += 1;
                self.seed_fqcns.push(fqcn.clone());
                self.frontier.push_back(FrontierItem {
                    fqcn: fqcn.clone(),
                    reason: label.clone(),
                    path: Vec::new(),
                });
            } else {
                log::warn!("Seed type not found in index: {}", fqcn);
            }
        }
        log::info!("Seeds: {}/{} resolved", valid, seeds.len());
    }

    fn expand(&mut self) {
        let resolver = NameResolver::new(self.index, self.imports, &self.config.namespaces);

        while let Some(item) = self.frontier.pop_front() {
            if self.visited.contains(&item.fqcn) {
                continue;
            }
            self.visited.insert(item.fqcn.clone());

            if self.config.namespaces.is_external(&item.fqcn) {
                continue;
            }

            if self.config.namespaces.is_excluded(&item.fqcn) {
                // Only expansion hits are worth reviewing; direct seeds of
                // excluded packages are a curation decision.
                if !item.path.is_empty() {
                    self.borderline.push(BorderlineCase {
                        fqcn: item.fqcn.clone(),
                        reason: format!(
                            "Reachable from API via {} but lives in excluded package",
                            item.path.join(" -> ")
                        ),
                        recommendation: "exclude".to_string(),
                        confidence: "high".to_string(),
                    });
                }
                continue;
            }

            let Some(entry) = self.index.get(&item.fqcn) else {
                continue;
            };

            self.surface.insert(
                item.fqcn.clone(),
                SurfaceType {
                    fqcn: item.fqcn.clone(),
                    inclusion_reason: item.reason.clone(),
                    expansion_path: item.path.clone(),
                    category: self.config.categories.categorize(&item.fqcn).to_string(),
                },
            );

            for name in referenced_names(entry, &self.config.namespaces) {
                for resolved in resolver.resolve(&name, entry) {
                    if !self.visited.contains(&resolved) {
                        let mut path = item.path.clone();
                        path.push(item.fqcn.clone());
                        self.frontier.push_back(FrontierItem {
                            fqcn: resolved,
                            reason: EXPANSION_REASON.to_string(),
                            path,
                        });
                    }
                }
            }
        }
    }

    /// Drop protocol types whose simple name already has a non-protocol
    /// definition in the surface. Those are wire-format copies of a
    /// server-side concept; the server-side type is the canonical one for
    /// plugin developers. Protocol types that are the only definition of
    /// a concept stay.
    fn deduplicate_protocol_types(&mut self) -> usize {
        let prefix = self.config.namespaces.protocol_prefix.as_str();

        let mut to_remove = Vec::new();
        for fqcn in self.surface.keys() {
            if !fqcn.starts_with(prefix) {
                continue;
            }
            let Some(entry) = self.index.get(fqcn) else {
                continue;
            };
            let has_canonical = self
                .surface
                .keys()
                .filter(|other| !other.starts_with(prefix))
                .any(|other| {
                    self.index
                        .get(other)
                        .is_some_and(|o| o.name == entry.name)
                });
            if has_canonical {
                to_remove.push(fqcn.clone());
            }
        }

        for fqcn in &to_remove {
            self.surface.shift_remove(fqcn);
        }
        to_remove.len()
    }

    /// Everything not admitted, tagged for the internal index. Runs after
    /// dedup so removed protocol duplicates land here too.
    fn internal_index(&self) -> Vec<InternalType> {
        self.entries
            .iter()
            .filter(|entry| !self.surface.contains_key(&entry.fqcn))
            .map(|entry| InternalType {
                fqcn: entry.fqcn.clone(),
                tag: self.config.namespaces.internal_tag(&entry.fqcn).to_string(),
            })
            .collect()
    }
}

/// Names referenced from a type's inheritance clause, annotations, and
/// public/protected member signatures, in declaration order.
fn referenced_names(entry: &TypeEntry, namespaces: &NamespaceConfig) -> IndexSet<String> {
    let mut names = IndexSet::new();

    if let Some(superclass) = &entry.superclass {
        if !namespaces.is_universal_base(superclass) {
            extract_type_names(superclass, &mut names);
        }
    }

    for interface in &entry.interfaces {
        extract_type_names(interface, &mut names);
    }

    // Annotation names arrive pre-tokenized from the indexer.
    for annotation in &entry.annotations {
        names.insert(annotation.clone());
    }

    for method in &entry.methods {
        if !is_public_or_protected(&method.modifiers) {
            continue;
        }
        extract_type_names(&method.return_type, &mut names);
        for param in &method.parameters {
            extract_type_names(&param.ty, &mut names);
        }
        for thrown in &method.throws {
            extract_type_names(thrown, &mut names);
        }
    }

    for field in &entry.fields {
        if !is_public_or_protected(&field.modifiers) {
            continue;
        }
        extract_type_names(&field.ty, &mut names);
    }

    names
}

/// Member visibility cascade. Explicit access modifiers decide directly.
/// Without one, `default` or `abstract` marks an interface member that is
/// implicitly public; anything else is package-private and not part of
/// any public contract.
pub fn is_public_or_protected(modifiers: &[String]) -> bool {
    for modifier in modifiers {
        match modifier.as_str() {
            "public" | "protected" => return true,
            "private" => return false,
            _ => {}
        }
    }
    modifiers.iter().any(|m| m == "default" || m == "abstract")
}
