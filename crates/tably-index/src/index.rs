//! The staging area and its on-disk form.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use tably_store::write_atomic;
use tably_types::ObjectId;
use tracing::debug;

use crate::error::{IndexError, IndexResult};

/// Result of staging a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// The index now records a new hash for the path.
    Staged,
    /// Nothing changed.
    Unchanged,
}

/// Tracked path to staged file recipe hash.
///
/// Serialized as a flat JSON object, `{"data/a.csv": "<hex>"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StagingIndex {
    entries: BTreeMap<String, ObjectId>,
}

impl StagingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index stored at `path`. A missing file is an empty index.
    pub fn load(path: &Path) -> IndexResult<Self> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| IndexError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the index to `path` atomically.
    pub fn save(&self, path: &Path) -> IndexResult<()> {
        let json = serde_json::to_vec_pretty(self).map_err(std::io::Error::from)?;
        write_atomic(path, &json)?;
        debug!(entries = self.entries.len(), "saved index");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The staged hash for `path`.
    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    /// Record `recipe` as the staged content of `path`.
    pub fn stage(&mut self, path: &str, recipe: ObjectId) -> IndexResult<StageOutcome> {
        if path.is_empty() {
            return Err(IndexError::InvalidPath("empty path".to_string()));
        }
        if self.entries.get(path) == Some(&recipe) {
            return Ok(StageOutcome::Unchanged);
        }
        self.entries.insert(path.to_string(), recipe);
        Ok(StageOutcome::Staged)
    }

    /// Remove `path` from the index.
    pub fn unstage(&mut self, path: &str) -> IndexResult<ObjectId> {
        self.entries
            .remove(path)
            .ok_or_else(|| IndexError::PathNotFound(path.to_string()))
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_same_hash_twice_is_unchanged() {
        let mut index = StagingIndex::new();
        let id = ObjectId::from_bytes(b"recipe");
        assert_eq!(index.stage("a.csv", id).unwrap(), StageOutcome::Staged);
        assert_eq!(index.stage("a.csv", id).unwrap(), StageOutcome::Unchanged);
        assert_eq!(index.len(), 1);

        let other = ObjectId::from_bytes(b"recipe2");
        assert_eq!(index.stage("a.csv", other).unwrap(), StageOutcome::Staged);
        assert_eq!(index.get("a.csv"), Some(&other));
    }

    #[test]
    fn empty_path_is_rejected() {
        let mut index = StagingIndex::new();
        assert!(matches!(
            index.stage("", ObjectId::from_bytes(b"x")),
            Err(IndexError::InvalidPath(_))
        ));
    }

    #[test]
    fn persists_as_flat_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        assert!(StagingIndex::load(&path).unwrap().is_empty());

        let mut index = StagingIndex::new();
        let id = ObjectId::from_bytes(b"r");
        index.stage("data/a.csv", id).unwrap();
        index.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["data/a.csv"], serde_json::Value::String(id.to_hex()));
        assert_eq!(StagingIndex::load(&path).unwrap(), index);
    }

    #[test]
    fn unstage_and_clear() {
        let mut index = StagingIndex::new();
        index.stage("a.csv", ObjectId::from_bytes(b"a")).unwrap();
        index.stage("b.csv", ObjectId::from_bytes(b"b")).unwrap();
        index.unstage("a.csv").unwrap();
        assert!(index.unstage("a.csv").is_err());
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, b"[1,2").unwrap();
        assert!(matches!(StagingIndex::load(&path), Err(IndexError::Corrupt { .. })));
    }
}
