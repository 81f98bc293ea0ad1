use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tably_recipe::canonical_json;
use tably_store::ObjectStore;
use tably_types::{Namespace, ObjectId};

use crate::error::{LedgerError, LedgerResult};

/// A commit: one directory recipe plus its place in history.
///
/// Stored as sorted-key JSON in the `manifest` namespace:
///
/// ```json
/// {"message":"...","parent":"<hex>"|null,"recipe":"<hex>","timestamp":"2024-01-01T00:00:00Z"}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Previous commit; `null` for a root commit. The key must be present.
    #[serde(deserialize_with = "present_option")]
    pub parent: Option<ObjectId>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Directory recipe hash.
    pub recipe: ObjectId,
}

fn present_option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ObjectId>, D::Error> {
    Option::<ObjectId>::deserialize(d)
}

impl Manifest {
    /// Store this manifest and return its hash.
    pub fn store(&self, store: &dyn ObjectStore) -> LedgerResult<ObjectId> {
        Ok(store.put(&canonical_json(self)?, Namespace::Manifest)?)
    }

    /// Load the manifest `id`, or `None` if it is not stored.
    pub fn load(store: &dyn ObjectStore, id: &ObjectId) -> LedgerResult<Option<Self>> {
        let Some(bytes) = store.read(id, Namespace::Manifest)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| LedgerError::CorruptManifest {
                id: *id,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tably_store::InMemoryObjectStore;

    use super::*;

    fn sample() -> Manifest {
        Manifest {
            parent: None,
            message: "first".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            recipe: ObjectId::from_bytes(b"dir"),
        }
    }

    #[test]
    fn stores_sorted_json() {
        let store = InMemoryObjectStore::new();
        let id = sample().store(&store).unwrap();
        let text = String::from_utf8(store.get(&id, Namespace::Manifest).unwrap()).unwrap();
        assert!(text.starts_with("{\"message\":\"first\",\"parent\":null,\"recipe\":"));
        assert!(text.contains("\"timestamp\":\"2024-05-01T12:00:00Z\""));
        assert_eq!(Manifest::load(&store, &id).unwrap(), Some(sample()));
    }

    #[test]
    fn missing_parent_key_is_corrupt() {
        let store = InMemoryObjectStore::new();
        let json = format!(
            r#"{{"message":"m","recipe":"{}","timestamp":"2024-05-01T12:00:00Z"}}"#,
            ObjectId::from_bytes(b"dir").to_hex()
        );
        let id = store.put(json.as_bytes(), Namespace::Manifest).unwrap();
        assert!(matches!(
            Manifest::load(&store, &id),
            Err(LedgerError::CorruptManifest { .. })
        ));
    }

    #[test]
    fn absent_manifest_is_none() {
        let store = InMemoryObjectStore::new();
        assert!(Manifest::load(&store, &ObjectId::from_bytes(b"x")).unwrap().is_none());
    }
}
