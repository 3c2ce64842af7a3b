//! Class-index input loading.
//!
//! The only hard failure mode in the tool: a missing or corrupt index
//! aborts the run before any classification starts. Everything else
//! degrades gracefully.

use crate::core::ClassIndex;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_class_index(path: &Path) -> Result<ClassIndex> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read class index {}", path.display()))?;
    let index: ClassIndex = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse class index {}", path.display()))?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("class-index.json");
        fs::write(
            &path,
            r#"{"classes": [{"fqcn": "com.a.Foo", "name": "Foo", "package": "com.a", "superclass": null, "source_file": null}]}"#,
        )
        .unwrap();

        let index = load_class_index(&path).unwrap();
        assert_eq!(index.classes.len(), 1);
    }

    #[test]
    fn test_missing_index_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_class_index(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_corrupt_index_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("class-index.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_class_index(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
