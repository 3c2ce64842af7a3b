//! Import hints harvested from decompiled source files.
//!
//! The resolver's most accurate disambiguation signal is the set of
//! explicit imports in a type's compilation unit. Sources are read once
//! up front; anything missing or unreadable simply contributes no hints.

use crate::core::{SymbolIndex, TypeEntry};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Leading path segment the indexer records on every `source_file`.
const SOURCE_PREFIX: &str = "decompiled/";

/// Keywords that open a type declaration. Imports only appear above the
/// declaration, so scanning stops at the first of these.
const DECLARATION_STARTS: &[&str] = &[
    "public ",
    "abstract ",
    "final ",
    "sealed ",
    "class ",
    "interface ",
    "enum ",
    "record ",
];

#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    by_fqcn: HashMap<String, HashSet<String>>,
}

impl ImportTable {
    /// Scan the decompiled source of every entry that has one, keyed by
    /// fqcn. `sources_root` is the directory the recorded paths are
    /// relative to once their `decompiled/` prefix is stripped.
    pub fn build(entries: &[TypeEntry], sources_root: &Path) -> Self {
        let mut by_fqcn = HashMap::new();
        let mut scanned = 0usize;

        for entry in entries {
            let Some(source_file) = &entry.source_file else {
                continue;
            };
            let relative = source_file
                .strip_prefix(SOURCE_PREFIX)
                .unwrap_or(source_file);
            let path = sources_root.join(relative);

            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };

            by_fqcn.insert(entry.fqcn.clone(), scan_imports(&contents));
            scanned += 1;
        }

        log::info!("Built import map: {} source files scanned", scanned);
        Self { by_fqcn }
    }

    /// Build from a precomputed mapping, for callers that harvest
    /// imports through some other channel than decompiled sources.
    pub fn from_map(by_fqcn: HashMap<String, HashSet<String>>) -> Self {
        Self { by_fqcn }
    }

    /// Imports visible to a type. Nested types share the compilation unit
    /// of their outermost enclosing type, so the lookup walks outward
    /// first. Absent entries act as an empty set.
    pub fn effective_imports(&self, fqcn: &str, index: &SymbolIndex) -> Option<&HashSet<String>> {
        let unit = index.outermost_enclosing(fqcn);
        self.by_fqcn.get(unit)
    }

    pub fn len(&self) -> usize {
        self.by_fqcn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fqcn.is_empty()
    }
}

/// Collect `import x.y.Z;` lines, skipping static imports, until the type
/// declaration begins.
fn scan_imports(contents: &str) -> HashSet<String> {
    let mut imports = HashSet::new();

    for line in contents.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("import ") {
            if let Some(name) = rest.strip_suffix(';') {
                let name = name.trim();
                if name.starts_with("static ") {
                    continue;
                }
                imports.insert(name.to_string());
            }
        }
        if DECLARATION_STARTS.iter().any(|kw| trimmed.starts_with(kw)) {
            break;
        }
    }

    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_scan_collects_imports() {
        let source = indoc! {"
            package com.hypixel.hytale.server.core.plugin;

            import com.hypixel.hytale.event.EventRegistry;
            import com.hypixel.hytale.common.plugin.PluginManifest;

            public class JavaPlugin {
            }
        "};

        let imports = scan_imports(source);
        assert_eq!(imports.len(), 2);
        assert!(imports.contains("com.hypixel.hytale.event.EventRegistry"));
        assert!(imports.contains("com.hypixel.hytale.common.plugin.PluginManifest"));
    }

    #[test]
    fn test_scan_skips_static_imports() {
        let source = indoc! {"
            import static java.util.Objects.requireNonNull;
            import com.hypixel.hytale.event.IEvent;

            class Listener {
            }
        "};

        let imports = scan_imports(source);
        assert_eq!(imports.len(), 1);
        assert!(imports.contains("com.hypixel.hytale.event.IEvent"));
    }

    #[test]
    fn test_scan_stops_at_declaration() {
        // An import-shaped line below the declaration belongs to a string
        // literal or comment in the body, not the import section.
        let source = indoc! {"
            import com.hypixel.hytale.math.Vec3;

            public final class Sample {
                // import com.hypixel.hytale.event.IEvent;
            }
        "};

        let imports = scan_imports(source);
        assert_eq!(imports.len(), 1);
    }

    #[test]
    fn test_build_skips_missing_sources() {
        let dir = tempfile::tempdir().unwrap();
        let present = TypeEntry {
            fqcn: "com.a.Foo".to_string(),
            name: "Foo".to_string(),
            package: "com.a".to_string(),
            superclass: None,
            interfaces: vec![],
            annotations: vec![],
            methods: vec![],
            fields: vec![],
            source_file: Some("decompiled/com/a/Foo.java".to_string()),
        };
        let mut missing = present.clone();
        missing.fqcn = "com.a.Bar".to_string();
        missing.name = "Bar".to_string();
        missing.source_file = Some("decompiled/com/a/Bar.java".to_string());
        let mut absent = present.clone();
        absent.fqcn = "com.a.Baz".to_string();
        absent.source_file = None;

        let file_path = dir.path().join("com/a/Foo.java");
        fs::create_dir_all(file_path.parent().unwrap()).unwrap();
        fs::write(&file_path, "import com.a.Dep;\n\npublic class Foo {}\n").unwrap();

        let table = ImportTable::build(&[present, missing, absent], dir.path());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_effective_imports_walk_to_outermost() {
        let outer = TypeEntry {
            fqcn: "com.a.Outer".to_string(),
            name: "Outer".to_string(),
            package: "com.a".to_string(),
            superclass: None,
            interfaces: vec![],
            annotations: vec![],
            methods: vec![],
            fields: vec![],
            source_file: None,
        };
        let mut inner = outer.clone();
        inner.fqcn = "com.a.Outer.Inner".to_string();
        inner.name = "Inner".to_string();

        let index = SymbolIndex::build(&[outer, inner]);
        let table = ImportTable::from_map(
            [(
                "com.a.Outer".to_string(),
                ["com.a.Dep".to_string()].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
        );

        let via_inner = table.effective_imports("com.a.Outer.Inner", &index).unwrap();
        assert!(via_inner.contains("com.a.Dep"));
    }
}
