use apimap::analysis::{ImportTable, NameResolver};
use apimap::config::NamespaceConfig;
use apimap::core::{SymbolIndex, TypeEntry};
use pretty_assertions::assert_eq;

fn entry(fqcn: &str, package: &str) -> TypeEntry {
    TypeEntry {
        fqcn: fqcn.to_string(),
        name: fqcn.rsplit('.').next().unwrap().to_string(),
        package: package.to_string(),
        superclass: None,
        interfaces: vec![],
        annotations: vec![],
        methods: vec![],
        fields: vec![],
        source_file: None,
    }
}

#[test]
fn same_package_candidate_wins_without_import_hints() {
    let entries = vec![entry("pkg.a.Foo", "pkg.a"), entry("pkg.b.Foo", "pkg.b")];
    let index = SymbolIndex::build(&entries);
    let imports = ImportTable::default();
    let namespaces = NamespaceConfig::default();
    let resolver = NameResolver::new(&index, &imports, &namespaces);

    let declaring = entry("pkg.a.Declaring", "pkg.a");
    assert_eq!(resolver.resolve("Foo", &declaring), vec!["pkg.a.Foo"]);

    let other_side = entry("pkg.b.Declaring", "pkg.b");
    assert_eq!(resolver.resolve("Foo", &other_side), vec!["pkg.b.Foo"]);
}

#[test]
fn bare_name_does_not_bind_to_a_lone_nested_type() {
    let entries = vec![
        entry("pkg.a.Outer", "pkg.a"),
        entry("pkg.a.Outer.Foo", "pkg.a"),
    ];
    let index = SymbolIndex::build(&entries);
    let imports = ImportTable::default();
    let namespaces = NamespaceConfig::default();
    let resolver = NameResolver::new(&index, &imports, &namespaces);

    let unrelated = entry("pkg.z.Unrelated", "pkg.z");
    assert_eq!(resolver.resolve("Foo", &unrelated), Vec::<String>::new());

    // The qualified form still reaches it.
    assert_eq!(
        resolver.resolve("Outer.Foo", &unrelated),
        vec!["pkg.a.Outer.Foo"]
    );
}

#[test]
fn cascade_prefers_imports_over_package_proximity() {
    let entries = vec![
        entry("pkg.a.Codec", "pkg.a"),
        entry("pkg.b.Codec", "pkg.b"),
    ];
    let index = SymbolIndex::build(&entries);
    let imports = ImportTable::from_map(
        [(
            "pkg.a.Declaring".to_string(),
            ["pkg.b.Codec".to_string()].into_iter().collect(),
        )]
        .into_iter()
        .collect(),
    );
    let namespaces = NamespaceConfig::default();
    let resolver = NameResolver::new(&index, &imports, &namespaces);

    // Same-package pkg.a.Codec exists, but the compilation unit
    // explicitly imports the pkg.b definition.
    let declaring = entry("pkg.a.Declaring", "pkg.a");
    assert_eq!(resolver.resolve("Codec", &declaring), vec!["pkg.b.Codec"]);
}

#[test]
fn nested_declaring_type_uses_its_compilation_units_imports() {
    let entries = vec![
        entry("pkg.a.Host", "pkg.a"),
        entry("pkg.a.Host.Worker", "pkg.a"),
        entry("pkg.b.Codec", "pkg.b"),
        entry("pkg.c.Codec", "pkg.c"),
    ];
    let index = SymbolIndex::build(&entries);
    // Imports are keyed by the outermost type; the nested Worker shares
    // Host's compilation unit.
    let imports = ImportTable::from_map(
        [(
            "pkg.a.Host".to_string(),
            ["pkg.c.Codec".to_string()].into_iter().collect(),
        )]
        .into_iter()
        .collect(),
    );
    let namespaces = NamespaceConfig::default();
    let resolver = NameResolver::new(&index, &imports, &namespaces);

    let worker = entry("pkg.a.Host.Worker", "pkg.a");
    assert_eq!(resolver.resolve("Codec", &worker), vec!["pkg.c.Codec"]);
}

#[test]
fn unresolvable_names_yield_empty_results() {
    let entries = vec![entry("pkg.a.Foo", "pkg.a")];
    let index = SymbolIndex::build(&entries);
    let imports = ImportTable::default();
    let namespaces = NamespaceConfig::default();
    let resolver = NameResolver::new(&index, &imports, &namespaces);

    let declaring = entry("pkg.a.Declaring", "pkg.a");
    assert!(resolver.resolve("Missing", &declaring).is_empty());
    assert!(resolver.resolve("Missing.Inner", &declaring).is_empty());
    assert!(resolver
        .resolve("com.unknown.Missing", &declaring)
        .is_empty());
}
