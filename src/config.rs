//! Namespace policy configuration.
//!
//! Everything the classifier treats as policy rather than algorithm lives
//! here: excluded and external package prefixes, seed tiers, category
//! rules. The shipped defaults are the curated tables for the Hytale
//! server codebase; `.apimap.toml` overrides them per run. The whole
//! config is passed by reference into the engine, so runs with different
//! policies can coexist in one process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApimapConfig {
    #[serde(default)]
    pub namespaces: NamespaceConfig,

    #[serde(default)]
    pub seeds: SeedConfig,

    #[serde(default)]
    pub categories: CategoryConfig,
}

/// Package-prefix policy tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Prefix a dotted name must start with to be treated as a
    /// fully-qualified reference to project code.
    #[serde(default = "default_root_prefix")]
    pub root_prefix: String,

    /// Foreign/third-party namespaces, pruned immediately during
    /// expansion with no borderline record.
    #[serde(default = "default_external")]
    pub external: Vec<String>,

    /// Wire-protocol namespace subject to the duplicate post-pass.
    #[serde(default = "default_protocol_prefix")]
    pub protocol_prefix: String,

    /// Superclasses that carry no reference information.
    #[serde(default = "default_universal_base_types")]
    pub universal_base_types: Vec<String>,

    /// Packages whose entire contents seed the traversal as tier 4.
    #[serde(default = "default_event_seed_packages")]
    pub event_seed_packages: Vec<String>,

    /// Packages whose types are never admitted to the surface, each with
    /// the tag they receive in the internal index.
    #[serde(default = "default_excluded")]
    pub excluded: Vec<ExcludedPackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedPackage {
    pub prefix: String,
    pub tag: String,
}

/// Curated traversal entry points, in decreasing order of confidence
/// that the type is intentionally public.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_tier1_seeds")]
    pub tier1: Vec<String>,

    #[serde(default = "default_tier2_seeds")]
    pub tier2: Vec<String>,

    #[serde(default = "default_tier3_seeds")]
    pub tier3: Vec<String>,
}

/// Ordered prefix -> category rules for admitted surface types.
/// More specific prefixes come first; the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default = "default_category_rules")]
    pub rules: Vec<CategoryRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub prefix: String,
    pub category: String,
}

impl NamespaceConfig {
    pub fn is_external(&self, fqcn: &str) -> bool {
        self.external.iter().any(|p| fqcn.starts_with(p.as_str()))
    }

    pub fn is_excluded(&self, fqcn: &str) -> bool {
        self.excluded.iter().any(|e| fqcn.starts_with(e.prefix.as_str()))
    }

    /// Tag for the internal index: the first matching excluded prefix's
    /// tag, else "protocol" for anything under the protocol namespace
    /// (root protocol types not reached by expansion still get tagged),
    /// else "internal".
    pub fn internal_tag(&self, fqcn: &str) -> &str {
        for excluded in &self.excluded {
            if fqcn.starts_with(excluded.prefix.as_str()) {
                return &excluded.tag;
            }
        }
        if fqcn.starts_with(self.protocol_prefix.as_str()) {
            "protocol"
        } else {
            "internal"
        }
    }

    pub fn is_universal_base(&self, fqcn: &str) -> bool {
        self.universal_base_types.iter().any(|b| b == fqcn)
    }

    /// Whether a package is one of the event seed packages or nested
    /// under one of them.
    pub fn is_event_seed_package(&self, package: &str) -> bool {
        self.event_seed_packages
            .iter()
            .any(|p| package == p || package.starts_with(&format!("{p}.")))
    }
}

impl CategoryConfig {
    pub fn categorize(&self, fqcn: &str) -> &str {
        for rule in &self.rules {
            if fqcn.starts_with(rule.prefix.as_str()) {
                return &rule.category;
            }
        }
        "core"
    }
}

impl ApimapConfig {
    /// Load the policy tables.
    ///
    /// An explicit path must exist and parse. Without one, `.apimap.toml`
    /// in the working directory is used when present and well-formed; a
    /// malformed discovered file logs a warning and falls back to the
    /// defaults rather than aborting the run.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            let contents = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
            let config: ApimapConfig = toml::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            return Ok(config);
        }

        let discovered = Path::new(".apimap.toml");
        if discovered.exists() {
            if let Ok(contents) = fs::read_to_string(discovered) {
                match toml::from_str::<ApimapConfig>(&contents) {
                    Ok(config) => match config.validate() {
                        Ok(()) => return Ok(config),
                        Err(e) => {
                            log::warn!("Invalid .apimap.toml: {}. Using defaults.", e);
                        }
                    },
                    Err(e) => {
                        log::warn!("Failed to parse .apimap.toml: {}. Using defaults.", e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.namespaces.root_prefix.is_empty() {
            return Err("namespaces.root_prefix must not be empty".to_string());
        }
        for excluded in &self.namespaces.excluded {
            if excluded.prefix.is_empty() || excluded.tag.is_empty() {
                return Err("namespaces.excluded entries need a prefix and a tag".to_string());
            }
        }
        for rule in &self.categories.rules {
            if rule.prefix.is_empty() || rule.category.is_empty() {
                return Err("categories.rules entries need a prefix and a category".to_string());
            }
        }
        Ok(())
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            root_prefix: default_root_prefix(),
            external: default_external(),
            protocol_prefix: default_protocol_prefix(),
            universal_base_types: default_universal_base_types(),
            event_seed_packages: default_event_seed_packages(),
            excluded: default_excluded(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            tier1: default_tier1_seeds(),
            tier2: default_tier2_seeds(),
            tier3: default_tier3_seeds(),
        }
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            rules: default_category_rules(),
        }
    }
}

fn default_root_prefix() -> String {
    "com.".to_string()
}

// protocol.packets.* and protocol.io.* are excluded (network internals),
// but protocol root types (GameMode, BlockPosition, ...) are allowed
// through: many are the only definition of fundamental game concepts.
fn default_excluded() -> Vec<ExcludedPackage> {
    [
        ("com.hypixel.hytale.builtin.", "builtin"),
        ("com.hypixel.hytale.protocol.packets.", "protocol"),
        ("com.hypixel.hytale.protocol.io.", "protocol"),
        ("com.hypixel.hytale.procedurallib.", "procedural"),
    ]
    .into_iter()
    .map(|(prefix, tag)| ExcludedPackage {
        prefix: prefix.to_string(),
        tag: tag.to_string(),
    })
    .collect()
}

fn default_external() -> Vec<String> {
    [
        "java.",
        "javax.",
        "org.slf4j.",
        "org.bson.",
        "io.netty.",
        "org.jetbrains.",
        "org.intellij.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_protocol_prefix() -> String {
    "com.hypixel.hytale.protocol.".to_string()
}

fn default_universal_base_types() -> Vec<String> {
    ["java.lang.Object", "java.lang.Enum", "java.lang.Record"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_event_seed_packages() -> Vec<String> {
    [
        "com.hypixel.hytale.server.core.event",
        "com.hypixel.hytale.event",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_tier1_seeds() -> Vec<String> {
    [
        "com.hypixel.hytale.server.core.plugin.JavaPlugin",
        "com.hypixel.hytale.server.core.plugin.JavaPluginInit",
        "com.hypixel.hytale.server.core.plugin.PluginBase",
        "com.hypixel.hytale.common.plugin.PluginManifest",
        "com.hypixel.hytale.server.core.plugin.PluginManager",
        "com.hypixel.hytale.server.core.plugin.PluginState",
        "com.hypixel.hytale.common.plugin.PluginIdentifier",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_tier2_seeds() -> Vec<String> {
    [
        "com.hypixel.hytale.server.core.command.system.CommandRegistry",
        "com.hypixel.hytale.server.core.plugin.registry.AssetRegistry",
        "com.hypixel.hytale.server.core.plugin.registry.CodecMapRegistry",
        "com.hypixel.hytale.server.core.plugin.registry.MapKeyMapRegistry",
        "com.hypixel.hytale.server.core.command.system.CommandManager",
        "com.hypixel.hytale.event.EventRegistry",
        "com.hypixel.hytale.event.IEventBus",
        "com.hypixel.hytale.server.core.universe.world.meta.BlockStateRegistry",
        "com.hypixel.hytale.server.core.modules.entity.EntityRegistry",
        "com.hypixel.hytale.server.core.task.TaskRegistry",
        "com.hypixel.hytale.server.core.registry.ClientFeatureRegistry",
        "com.hypixel.hytale.server.core.plugin.registry.IRegistry",
        "com.hypixel.hytale.server.core.plugin.registry.CodecMapRegistry.Assets",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_tier3_seeds() -> Vec<String> {
    [
        "com.hypixel.hytale.event.IEvent",
        "com.hypixel.hytale.event.IAsyncEvent",
        "com.hypixel.hytale.event.IBaseEvent",
        "com.hypixel.hytale.event.ICancellable",
        "com.hypixel.hytale.event.EventPriority",
        "com.hypixel.hytale.event.EventRegistration",
        "com.hypixel.hytale.component.ComponentType",
        "com.hypixel.hytale.component.ComponentAccessor",
        "com.hypixel.hytale.component.SystemType",
        "com.hypixel.hytale.component.SystemGroup",
        "com.hypixel.hytale.component.Resource",
        "com.hypixel.hytale.registry.Registry",
        "com.hypixel.hytale.registry.Registration",
        "com.hypixel.hytale.server.core.command.system.CommandContext",
        "com.hypixel.hytale.server.core.command.system.CommandOwner",
        "com.hypixel.hytale.server.core.command.system.CommandSender",
        "com.hypixel.hytale.component.ComponentRegistryProxy",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_category_rules() -> Vec<CategoryRule> {
    [
        ("com.hypixel.hytale.server.core.plugin", "plugin"),
        ("com.hypixel.hytale.common.plugin", "plugin"),
        ("com.hypixel.hytale.server.core.event", "event"),
        ("com.hypixel.hytale.event", "event"),
        ("com.hypixel.hytale.server.core.command", "command"),
        ("com.hypixel.hytale.component", "component"),
        ("com.hypixel.hytale.server.core.modules.entity", "entity"),
        ("com.hypixel.hytale.server.core.entity", "entity"),
        ("com.hypixel.hytale.server.npc", "npc"),
        ("com.hypixel.hytale.registry", "registry"),
        ("com.hypixel.hytale.server.core.registry", "registry"),
        ("com.hypixel.hytale.server.core.asset", "asset"),
        ("com.hypixel.hytale.assetstore", "asset"),
        ("com.hypixel.hytale.codec", "codec"),
        ("com.hypixel.hytale.server.core.inventory", "inventory"),
        ("com.hypixel.hytale.server.core.universe", "universe"),
        ("com.hypixel.hytale.server.worldgen", "worldgen"),
        ("com.hypixel.hytale.server.core.prefab", "prefab"),
        ("com.hypixel.hytale.server.core.permissions", "permissions"),
        ("com.hypixel.hytale.server.core.ui", "ui"),
        ("com.hypixel.hytale.server.core.task", "task"),
        ("com.hypixel.hytale.server.core.modules", "modules"),
        ("com.hypixel.hytale.server.core.meta", "meta"),
        ("com.hypixel.hytale.math", "math"),
        ("com.hypixel.hytale.function", "util"),
        ("com.hypixel.hytale.common", "util"),
        ("com.hypixel.hytale.metrics", "metrics"),
        ("com.hypixel.hytale.logger", "logging"),
        ("com.hypixel.hytale.server.core.util", "util"),
        ("com.hypixel.hytale.server.core.io", "io"),
        ("com.hypixel.hytale.protocol", "protocol"),
        ("com.hypixel.hytale.server.core", "core"),
    ]
    .into_iter()
    .map(|(prefix, category)| CategoryRule {
        prefix: prefix.to_string(),
        category: category.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ApimapConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.seeds.tier1.is_empty());
        assert!(!config.categories.rules.is_empty());
    }

    #[test]
    fn test_category_first_match_wins() {
        let categories = CategoryConfig::default();
        // plugin rule is more specific than the trailing core rule
        assert_eq!(
            categories.categorize("com.hypixel.hytale.server.core.plugin.JavaPlugin"),
            "plugin"
        );
        assert_eq!(
            categories.categorize("com.hypixel.hytale.server.core.boot.Bootstrap"),
            "core"
        );
        assert_eq!(categories.categorize("com.elsewhere.Thing"), "core");
    }

    #[test]
    fn test_internal_tag_ordering() {
        let namespaces = NamespaceConfig::default();
        assert_eq!(
            namespaces.internal_tag("com.hypixel.hytale.protocol.packets.PlayPacket"),
            "protocol"
        );
        assert_eq!(
            namespaces.internal_tag("com.hypixel.hytale.protocol.GameMode"),
            "protocol"
        );
        assert_eq!(
            namespaces.internal_tag("com.hypixel.hytale.builtin.BuiltinThing"),
            "builtin"
        );
        assert_eq!(
            namespaces.internal_tag("com.hypixel.hytale.server.core.Foo"),
            "internal"
        );
    }

    #[test]
    fn test_event_seed_package_matching() {
        let namespaces = NamespaceConfig::default();
        assert!(namespaces.is_event_seed_package("com.hypixel.hytale.event"));
        assert!(namespaces.is_event_seed_package("com.hypixel.hytale.event.player"));
        assert!(namespaces.is_event_seed_package("com.hypixel.hytale.server.core.event"));
        // Prefix match alone is not enough; the boundary is a dot.
        assert!(!namespaces.is_event_seed_package("com.hypixel.hytale.eventide"));
    }

    #[test]
    fn test_toml_overrides_replace_tables() {
        let toml = r#"
            [namespaces]
            root_prefix = "net."
            external = ["java."]

            [[namespaces.excluded]]
            prefix = "net.acme.gen."
            tag = "generated"

            [seeds]
            tier1 = ["net.acme.api.Plugin"]
        "#;

        let config: ApimapConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.namespaces.root_prefix, "net.");
        assert_eq!(config.namespaces.excluded.len(), 1);
        assert_eq!(config.namespaces.excluded[0].tag, "generated");
        assert_eq!(config.seeds.tier1, vec!["net.acme.api.Plugin"]);
        // Untouched tables keep their defaults.
        assert!(!config.seeds.tier2.is_empty());
        assert_eq!(config.namespaces.protocol_prefix, default_protocol_prefix());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut config = ApimapConfig::default();
        config.namespaces.excluded.push(ExcludedPackage {
            prefix: String::new(),
            tag: "x".to_string(),
        });
        assert!(config.validate().is_err());
    }
}
