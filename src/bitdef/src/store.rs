//! Persistent store of named definitions.
//!
//! All definitions live in one JSON file:
//!
//! ```text
//! {
//!   "Status": [["mode", 3], ["level", 5]],
//!   "ErrorWord": [["error_code", 8], ["module", 4]]
//! }
//! ```
//!
//! Every call reads the whole file, and every change rewrites it. There is no
//! locking and no atomic replace, so a crash in the middle of a write can
//! leave a truncated file. Reads treat a missing or unreadable file as an
//! empty store instead of failing.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::definition::Definition;

/// Default directory holding the definitions file
pub const DEFAULT_STORE_ROOT: &str = "config";

/// Default definitions file name
pub const DEFAULT_FILE_NAME: &str = "data_define.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a store keeps its file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub file_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_STORE_ROOT),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Full path of the definitions file
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }
}

/// A definition together with the name it is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDefinition {
    pub name: String,
    pub fields: Definition,
}

/// Ordered mapping of name to definition, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<NamedDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.fields)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace; a replaced entry keeps its position
    pub fn insert(&mut self, name: impl Into<String>, fields: Definition) -> Option<Definition> {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => Some(std::mem::replace(&mut entry.fields, fields)),
            None => {
                self.entries.push(NamedDefinition { name, fields });
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Definition> {
        let index = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(index).fields)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a NamedDefinition;
    type IntoIter = std::slice::Iter<'a, NamedDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.fields)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of definition names to field lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
                let mut catalog = Catalog::new();
                while let Some((name, raw)) = access.next_entry::<String, serde_json::Value>()? {
                    // Invalid entries are dropped one by one, never the whole file
                    match serde_json::from_value::<Definition>(raw) {
                        Ok(fields) => {
                            catalog.insert(name, fields);
                        }
                        Err(err) => {
                            tracing::warn!(
                                %name,
                                %err,
                                "skipping stored definition with invalid fields"
                            );
                        }
                    }
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// File-backed store of named definitions
#[derive(Debug, Clone)]
pub struct DefinitionStore {
    path: PathBuf,
}

impl DefinitionStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::at(config.path())
    }

    /// Store backed by an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, `None` when it does not exist
    fn read(&self) -> Result<Option<Catalog>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let catalog: Catalog = serde_json::from_str(&data)?;
        Ok(Some(catalog))
    }

    /// Replace the whole file, creating its directory if needed
    fn write(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// All stored definitions; empty when the file is missing or unreadable
    pub fn load(&self) -> Catalog {
        match self.read() {
            Ok(Some(catalog)) => catalog,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "definitions file does not exist");
                Catalog::new()
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to load definitions");
                Catalog::new()
            }
        }
    }

    pub fn load_single(&self, name: &str) -> Option<Definition> {
        self.load().remove(name)
    }

    /// Stored names in file order
    pub fn list_names(&self) -> Vec<String> {
        self.load().names().map(str::to_string).collect()
    }

    /// Store `fields` under `name`, replacing any existing definition
    pub fn save(&self, name: &str, fields: &Definition) -> Result<(), StoreError> {
        let mut catalog = self.load();
        catalog.insert(name, fields.clone());
        self.write(&catalog)?;

        tracing::info!(name, path = %self.path.display(), "saved definition");
        Ok(())
    }

    /// Remove every listed name that exists
    ///
    /// Returns whether anything was removed. The file is only rewritten when
    /// at least one name was present.
    pub fn delete<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = self.load();
        let mut deleted = false;

        for name in names {
            let name = name.as_ref();
            if catalog.remove(name).is_some() {
                tracing::debug!(name, "deleted definition");
                deleted = true;
            } else {
                tracing::debug!(name, "no such definition");
            }
        }

        if !deleted {
            return false;
        }

        match self.write(&catalog) {
            Ok(()) => {
                tracing::info!(remaining = catalog.len(), "definitions deleted");
                true
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to write definitions");
                false
            }
        }
    }

    /// Empty the store. Returns false when there was no file to clear.
    pub fn clear(&self) -> bool {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "nothing to clear");
            return false;
        }

        match self.write(&Catalog::new()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to clear definitions");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::FieldDefinition;

    fn fields(spec: &[(&str, u32)]) -> Definition {
        spec.iter()
            .map(|(name, width)| FieldDefinition::new(*name, *width).unwrap())
            .collect()
    }

    fn temp_store() -> (tempfile::TempDir, DefinitionStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            root: temp_dir.path().join("config"),
            file_name: DEFAULT_FILE_NAME.to_string(),
        };
        let store = DefinitionStore::new(&config);
        (temp_dir, store)
    }

    #[test]
    fn test_config_path() {
        let config = StoreConfig::default();
        assert_eq!(config.path(), PathBuf::from("config/data_define.json"));

        let config = StoreConfig::with_file_name("other.json");
        assert_eq!(config.path(), PathBuf::from("config/other.json"));
    }

    #[test]
    fn test_save_and_load_single() {
        let (_dir, store) = temp_store();
        store.save("s1", &fields(&[("a", 3)])).unwrap();

        assert_eq!(store.load_single("s1"), Some(fields(&[("a", 3)])));
        assert!(store.list_names().contains(&"s1".to_string()));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let (dir, store) = temp_store();
        assert!(!dir.path().join("config").exists());

        store.save("s1", &fields(&[("a", 3)])).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_overwrites_in_place() {
        let (_dir, store) = temp_store();
        store.save("first", &fields(&[("a", 1)])).unwrap();
        store.save("second", &fields(&[("b", 2)])).unwrap();
        store.save("first", &fields(&[("c", 3), ("d", 4)])).unwrap();

        assert_eq!(store.list_names(), vec!["first", "second"]);
        assert_eq!(store.load_single("first"), Some(fields(&[("c", 3), ("d", 4)])));
    }

    #[test]
    fn test_file_format() {
        let (_dir, store) = temp_store();
        store.save("s1", &fields(&[("a", 3), ("b", 5)])).unwrap();

        let data = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value, serde_json::json!({ "s1": [["a", 3], ["b", 5]] }));
    }

    #[test]
    fn test_reads_file_written_elsewhere() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{ "zeta": [["x", 1]], "alpha": [["y", 2], ["z", 30]] }"#,
        )
        .unwrap();

        assert_eq!(store.list_names(), vec!["zeta", "alpha"]);
        assert_eq!(store.load_single("alpha"), Some(fields(&[("y", 2), ("z", 30)])));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = temp_store();
        store.save("s1", &fields(&[("a", 3)])).unwrap();

        assert!(!store.delete(["missing"]));
        assert!(store.delete(["s1"]));
        assert_eq!(store.load_single("s1"), None);
    }

    #[test]
    fn test_delete_many_ignores_missing_names() {
        let (_dir, store) = temp_store();
        store.save("s1", &fields(&[("a", 3)])).unwrap();
        store.save("s2", &fields(&[("b", 4)])).unwrap();
        store.save("s3", &fields(&[("c", 5)])).unwrap();

        assert!(store.delete(vec!["s1".to_string(), "nope".to_string(), "s3".to_string()]));
        assert_eq!(store.list_names(), vec!["s2"]);
    }

    #[test]
    fn test_delete_without_names() {
        let (_dir, store) = temp_store();
        store.save("s1", &fields(&[("a", 3)])).unwrap();

        assert!(!store.delete(Vec::<String>::new()));
        assert_eq!(store.list_names(), vec!["s1"]);
    }

    #[test]
    fn test_delete_missing_does_not_create_file() {
        let (_dir, store) = temp_store();
        assert!(!store.delete(["s1"]));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear() {
        let (_dir, store) = temp_store();
        assert!(!store.clear());

        store.save("s1", &fields(&[("a", 3)])).unwrap();
        assert!(store.clear());
        assert!(store.load().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_missing_file() {
        let (_dir, store) = temp_store();
        assert!(store.load().is_empty());
        assert_eq!(store.load_single("anything"), None);
    }

    #[test]
    fn test_load_corrupt_file() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        for corrupt in ["{ not json", "[1, 2, 3]", r#"{ "s1": [["a", 0]] }"#, r#"{ "s1": [["a"]] }"#] {
            fs::write(store.path(), corrupt).unwrap();
            assert!(store.load().is_empty(), "expected empty load for {}", corrupt);
            assert!(store.list_names().is_empty());
        }
    }

    #[test]
    fn test_invalid_entry_does_not_hide_others() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{ "keep": [["a", 3]], "legacy": [["z", 0]], "huge": [["w", 99999999999]] }"#,
        )
        .unwrap();

        assert_eq!(store.list_names(), vec!["keep"]);
    }

    #[test]
    fn test_save_keeps_valid_neighbour_of_invalid_entry() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{ "keep": [["a", 3]], "legacy": [["z", 0]] }"#).unwrap();

        store.save("new", &fields(&[("b", 2)])).unwrap();

        assert_eq!(store.list_names(), vec!["keep", "new"]);
        assert_eq!(store.load_single("keep"), Some(fields(&[("a", 3)])));
    }

    #[test]
    fn test_save_replaces_corrupt_file() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "garbage").unwrap();

        store.save("s1", &fields(&[("a", 3)])).unwrap();
        assert_eq!(store.list_names(), vec!["s1"]);
    }

    #[test]
    fn test_catalog_duplicate_keys_keep_first_position() {
        let catalog: Catalog =
            serde_json::from_str(r#"{ "a": [["x", 1]], "b": [["y", 2]], "a": [["z", 3]] }"#)
                .unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(catalog.get("a"), Some(&fields(&[("z", 3)])));
    }
}
