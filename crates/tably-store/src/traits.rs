use tably_types::{Namespace, ObjectId};

use crate::error::{StoreError, StoreResult};

/// Content-addressed, namespaced object store.
///
/// All implementations must satisfy these invariants:
/// - The returned ID is the SHA-256 of the bytes, independent of namespace.
/// - `put` is idempotent: if the object already exists in that namespace,
///   nothing is written.
/// - Objects are never mutated or deleted.
/// - The store never interprets object contents.
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `namespace` and return its content-addressed ID.
    fn put(&self, data: &[u8], namespace: Namespace) -> StoreResult<ObjectId>;

    /// Read an object.
    ///
    /// Returns `Ok(None)` if the object does not exist in `namespace`.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether an object exists in `namespace`.
    fn exists(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<bool>;

    /// All object IDs stored in `namespace`, sorted.
    fn list(&self, namespace: Namespace) -> StoreResult<Vec<ObjectId>>;

    /// Read an object that must exist.
    fn get(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<Vec<u8>> {
        self.read(id, namespace)?
            .ok_or(StoreError::NotFound { id: *id, namespace })
    }
}
