use std::collections::HashMap;
use std::sync::RwLock;

use tably_types::{Namespace, ObjectId};

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind a
/// `RwLock`. Objects are cloned on read/write.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<(Namespace, ObjectId), Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects stored in `namespace`.
    pub fn len(&self, namespace: Namespace) -> usize {
        self.objects
            .read()
            .expect("lock poisoned")
            .keys()
            .filter(|(ns, _)| *ns == namespace)
            .count()
    }

    /// Returns `true` if no object is stored in any namespace.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, data: &[u8], namespace: Namespace) -> StoreResult<ObjectId> {
        let id = ObjectId::from_bytes(data);
        let mut map = self.objects.write().expect("lock poisoned");
        map.entry((namespace, id)).or_insert_with(|| data.to_vec());
        Ok(id)
    }

    fn read(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(&(namespace, *id)).cloned())
    }

    fn exists(&self, id: &ObjectId, namespace: Namespace) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(&(namespace, *id)))
    }

    fn list(&self, namespace: Namespace) -> StoreResult<Vec<ObjectId>> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map
            .keys()
            .filter(|(ns, _)| *ns == namespace)
            .map(|(_, id)| *id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.objects.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read() {
        let store = InMemoryObjectStore::new();
        let id = store.put(b"hello world", Namespace::Chunk).unwrap();
        assert_eq!(store.read(&id, Namespace::Chunk).unwrap().unwrap(), b"hello world");
    }

    #[test]
    fn idempotent_put() {
        let store = InMemoryObjectStore::new();
        store.put(b"x", Namespace::Manifest).unwrap();
        store.put(b"x", Namespace::Manifest).unwrap();
        assert_eq!(store.len(Namespace::Manifest), 1);
    }

    #[test]
    fn same_bytes_in_two_namespaces_are_two_objects() {
        let store = InMemoryObjectStore::new();
        let a = store.put(b"", Namespace::Chunk).unwrap();
        let b = store.put(b"", Namespace::Recipe).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(Namespace::Chunk), 1);
        assert_eq!(store.len(Namespace::Recipe), 1);
    }
}
