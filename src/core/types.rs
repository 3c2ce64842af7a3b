//! Class-index data model shared across the classifier.

use serde::{Deserialize, Serialize};

/// One type (class, interface, enum or record) discovered during
/// decompilation. Loaded once from `class-index.json` and read-only
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Fully qualified name, globally unique within the index.
    pub fqcn: String,
    /// Simple (unqualified) name.
    pub name: String,
    /// Declaring package.
    #[serde(default)]
    pub package: String,
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    /// Path of the decompiled source file, relative to the artifacts
    /// directory (e.g. `decompiled/com/...`). Absent when the indexer
    /// could not decompile the type.
    pub source_file: Option<String>,
}

impl TypeEntry {
    /// The fqcn this entry would have if it were top-level. A nested
    /// type's actual fqcn carries extra segments beyond `package.name`.
    pub fn expected_top_level_fqcn(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodEntry {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParamEntry>,
    #[serde(default)]
    pub throws: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(rename = "type", default)]
    pub ty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamEntry {
    #[serde(rename = "type", default)]
    pub ty: String,
}

/// On-disk input produced by the indexing phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassIndex {
    pub classes: Vec<TypeEntry>,
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum ApimapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type ApimapResult<T> = Result<T, ApimapError>;
