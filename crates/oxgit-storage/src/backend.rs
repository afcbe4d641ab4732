use crate::error::StoreResult;
use crate::object_id::ObjectId;

/// Raw storage for compressed objects, keyed by identifier.
///
/// Backends never interpret the bytes they hold. Encoding, hashing and
/// compression happen in [`ObjectStore`](crate::ObjectStore), so every
/// backend sees exactly what would land on disk.
pub trait ObjectBackend {
    /// Read the stored bytes for `id`.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>>;

    /// Store `data` under `id`.
    ///
    /// Writing an id that is already present is accepted; content addressing
    /// guarantees the bytes are identical.
    fn write_raw(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()>;

    /// Check whether an object exists.
    fn contains(&self, id: &ObjectId) -> StoreResult<bool>;
}

impl<B: ObjectBackend + ?Sized> ObjectBackend for &B {
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        (**self).read_raw(id)
    }

    fn write_raw(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()> {
        (**self).write_raw(id, data)
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        (**self).contains(id)
    }
}
