//! Catalog loading.
//!
//! The catalog file is a JSON array of module records. File order is the catalog
//! enumeration order: it decides row order, the first-seen order of checkbox values
//! and the order of manual sheet siblings.

use crate::error::{RepoError, Result};
use crate::model::ModuleRecord;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and validates the catalog at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ModuleRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let modules = from_json(&content)?;
    debug!(path = %path.display(), modules = modules.len(), "loaded catalog");
    Ok(modules)
}

pub fn from_json(content: &str) -> Result<Vec<ModuleRecord>> {
    let modules: Vec<ModuleRecord> = serde_json::from_str(content)?;
    ensure_unique_names(&modules)?;
    Ok(modules)
}

/// Serializes the catalog back to JSON, in catalog order.
pub fn to_json(modules: &[ModuleRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(modules)?)
}

pub fn ensure_unique_names(modules: &[ModuleRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for module in modules {
        if !seen.insert(module.name.as_str()) {
            return Err(RepoError::DuplicateModule(module.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModuleType, Origin};

    const CATALOG: &str = r#"[
        {"Name": "Wires", "Type": "Regular", "Origin": "Vanilla"},
        {"Name": "Knob", "Type": "Needy", "Origin": "Vanilla"},
        {"Name": "Wire Sequence", "Type": "Regular", "Origin": "Vanilla"}
    ]"#;

    #[test]
    fn preserves_file_order() {
        let modules = from_json(CATALOG).unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Wires", "Knob", "Wire Sequence"]);
    }

    #[test]
    fn rejects_duplicate_names() {
        let json = r#"[
            {"Name": "Wires", "Type": "Regular", "Origin": "Vanilla"},
            {"Name": "Wires", "Type": "Regular", "Origin": "Mods"}
        ]"#;
        let err = from_json(json).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateModule(name) if name == "Wires"));
    }

    #[test]
    fn empty_catalog_is_valid() {
        assert!(from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = from_json("{not json").unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[test]
    fn to_json_round_trips() {
        let modules = vec![
            ModuleRecord::new("Wires", ModuleType::Regular, Origin::Vanilla).with_steam_id("1"),
        ];
        let json = to_json(&modules).unwrap();
        assert!(json.contains("\"SteamID\": \"1\""));
        assert_eq!(from_json(&json).unwrap(), modules);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG).unwrap();

        let modules = load(&path).unwrap();
        assert_eq!(modules.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RepoError::Io(_)));
    }
}
