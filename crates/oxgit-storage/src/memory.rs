use std::collections::HashMap;
use std::sync::RwLock;

use crate::backend::ObjectBackend;
use crate::error::StoreResult;
use crate::object_id::ObjectId;

/// In-memory, HashMap-based backend.
///
/// Intended for tests and embedding. Holds the same compressed bytes the
/// loose backend would write to disk.
pub struct InMemoryBackend {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all stored IDs.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Overwrite the raw bytes stored for `id`.
    ///
    /// Bypasses the immutability rule so tests can simulate on-disk damage.
    pub fn replace_raw(&self, id: ObjectId, data: Vec<u8>) {
        self.objects.write().expect("lock poisoned").insert(id, data);
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBackend for InMemoryBackend {
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write_raw(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        map.entry(*id).or_insert_with(|| data.to_vec());
        Ok(())
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_is_idempotent() {
        let backend = InMemoryBackend::new();
        let id = ObjectId::hash(b"x");
        backend.write_raw(&id, b"first").unwrap();
        backend.write_raw(&id, b"first").unwrap();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.read_raw(&id).unwrap().unwrap(), b"first");
    }

    #[test]
    fn test_missing_reads_none() {
        let backend = InMemoryBackend::default();
        assert!(backend.is_empty());
        assert!(backend.read_raw(&ObjectId::hash(b"absent")).unwrap().is_none());
    }

    #[test]
    fn test_all_ids_sorted() {
        let backend = InMemoryBackend::new();
        for data in [&b"a"[..], b"b", b"c"] {
            backend.write_raw(&ObjectId::hash(data), data).unwrap();
        }
        let ids = backend.all_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
