use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// A key-value string store keyed by logical collection name. Collections
/// are read and written as whole JSON documents: no partial updates, no
/// versioning, last write wins.
pub trait CollectionStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory sink. Contents live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.collections.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.collections.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed sink: one `<key>.json` document per collection under a data
/// directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CollectionStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("reading collection {}", path.display()))?;
        Ok(Some(value))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("writing collection {}", path.display()))?;
        debug!("Persisted collection '{}' ({} bytes)", key, value.len());
        Ok(())
    }
}

/// Open the sink selected by configuration: a data directory if one is
/// configured, otherwise memory only.
pub fn open_store(data_dir: &str) -> Result<Box<dyn CollectionStore>> {
    if data_dir.is_empty() {
        debug!("No data directory configured, using in-memory store");
        Ok(Box::new(MemoryStore::new()))
    } else {
        Ok(Box::new(JsonFileStore::new(data_dir)?))
    }
}

/// Read a whole collection, treating a missing key as empty.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn CollectionStore,
    key: &str,
) -> Result<Vec<T>> {
    match store.read(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("deserializing collection '{}'", key)),
        None => Ok(Vec::new()),
    }
}

/// Serialize and write back a whole collection.
pub fn store_collection<T: Serialize>(
    store: &mut dyn CollectionStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let raw = serde_json::to_string(items)
        .with_context(|| format!("serializing collection '{}'", key))?;
    store.write(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.read("appointments").unwrap().is_none());

        store.write("appointments", "[]").unwrap();
        assert_eq!(store.read("appointments").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path()).unwrap();

        let items = vec![Entry { name: "a".into(), count: 1 }];
        store_collection(&mut store, "entries", &items).unwrap();

        // A fresh store over the same directory sees the data.
        let reopened = JsonFileStore::new(dir.path()).unwrap();
        let loaded: Vec<Entry> = load_collection(&reopened, "entries").unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        let loaded: Vec<Entry> = load_collection(&store, "nothing").unwrap();
        assert!(loaded.is_empty());
    }
}
