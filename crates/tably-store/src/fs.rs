use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tably_types::{Namespace, ObjectId};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::fsutil::write_atomic;
use crate::traits::ObjectStore;

/// Filesystem-backed object store.
///
/// Layout under `root`:
/// ```text
/// chunks/<sha256>
/// recipes/<sha256>
/// manifests/<sha256>
/// ```
/// Objects are written through a temp file and renamed into place, so a
/// crash never leaves a partially written object under its final name.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create the namespace directories under `root` and open the store.
    pub fn init(root: &Path) -> StoreResult<Self> {
        for ns in Namespace::ALL {
            std::fs::create_dir_all(root.join(ns.dir_name()))?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Open an existing store, checking that every namespace directory exists.
    pub fn open(root: &Path) -> StoreResult<Self> {
        for ns in Namespace::ALL {
            if !root.join(ns.dir_name()).is_dir() {
                return Err(StoreError::NotInitialized(root.display().to_string()));
            }
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The directory holding all namespaces.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file that holds `id` in `namespace`.
    pub fn object_path(&self, id: &ObjectId, namespace: Namespace) -> PathBuf {
        self.root.join(namespace.dir_name()).join(id.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, data: &[u8], namespace: Namespace) -> StoreResult<ObjectId> {
        let id = ObjectId::from_bytes(data);
        let path = self.object_path(&id, namespace);
        if path.exists() {
            debug!(%namespace, id = %id.short_hex(), "object already stored");
            return Ok(id);
        }
        write_atomic(&path, data)?;
        debug!(%namespace, id = %id.short_hex(), size = data.len(), "stored object");
        Ok(id)
    }

    fn read(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<Option<Vec<u8>>> {
        let data = match std::fs::read(self.object_path(id, namespace)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let computed = ObjectId::from_bytes(&data);
        if computed != *id {
            return Err(StoreError::HashMismatch {
                id: *id,
                namespace,
                computed,
            });
        }
        Ok(Some(data))
    }

    fn exists(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<bool> {
        Ok(self.object_path(id, namespace).is_file())
    }

    fn list(&self, namespace: Namespace) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(self.root.join(namespace.dir_name()))? {
            let entry = entry?;
            // Skip in-flight temp files and anything else that is not a hash.
            if let Some(name) = entry.file_name().to_str() {
                if let Ok(id) = ObjectId::from_hex(name) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
