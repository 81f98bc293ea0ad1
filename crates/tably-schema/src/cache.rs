use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tably_store::write_atomic;
use tably_tabular::{infer_schema, Schema};
use tracing::{debug, info};

use crate::error::{SchemaError, SchemaResult};

/// Persistent map from tracked path to its pinned [`Schema`].
#[derive(Debug)]
pub struct SchemaCache {
    file: PathBuf,
    entries: BTreeMap<String, Schema>,
}

impl SchemaCache {
    /// Load the cache stored at `file`. A missing file is an empty cache.
    pub fn load(file: &Path) -> SchemaResult<Self> {
        let entries = match std::fs::read(file) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SchemaError::Corrupt {
                path: file.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            file: file.to_path_buf(),
            entries,
        })
    }

    /// The schema pinned for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.entries.get(key)
    }

    /// Return the pinned schema for `key`, inferring it from `source` and
    /// persisting it if the key is not cached yet.
    pub fn resolve(&mut self, key: &str, source: &Path) -> SchemaResult<Schema> {
        if let Some(schema) = self.entries.get(key) {
            debug!(key, "schema cache hit");
            return Ok(schema.clone());
        }
        let schema = infer_schema(source)?;
        info!(key, columns = schema.len(), "pinned inferred schema");
        self.entries.insert(key.to_string(), schema.clone());
        self.save()?;
        Ok(schema)
    }

    /// Drop the pinned schema for `key` and persist. Returns the removed
    /// schema, if there was one.
    pub fn remove(&mut self, key: &str) -> SchemaResult<Option<Schema>> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    /// Cached keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Write the cache to disk atomically.
    pub fn save(&self) -> SchemaResult<()> {
        let json = serde_json::to_vec_pretty(&self.entries).map_err(std::io::Error::from)?;
        write_atomic(&self.file, &json)?;
        Ok(())
    }
}
