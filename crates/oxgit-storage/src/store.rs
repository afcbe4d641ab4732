//! Content-addressed object store.
//!
//! Writes run encode → hash → compress → backend; reads run the reverse.

use tracing::{debug, warn};

use crate::backend::ObjectBackend;
use crate::compress::{compress, decompress};
use crate::error::{StoreError, StoreResult};
use crate::object::{self, DecodeMode, Object, ObjectKind};
use crate::object_id::ObjectId;

/// Object store over any [`ObjectBackend`].
#[derive(Debug)]
pub struct ObjectStore<B> {
    backend: B,
    decode_mode: DecodeMode,
}

impl<B: ObjectBackend> ObjectStore<B> {
    /// Create a store that decodes leniently.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            decode_mode: DecodeMode::default(),
        }
    }

    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }

    /// Compute the identifier `content` would be stored under, without
    /// writing anything.
    pub fn hash(&self, kind: ObjectKind, content: &[u8]) -> ObjectId {
        object::hash(kind, content)
    }

    /// Store `content` and return its identifier.
    pub fn put(&self, kind: ObjectKind, content: &[u8]) -> StoreResult<ObjectId> {
        let canonical = object::encode(kind, content);
        let id = ObjectId::hash(&canonical);
        let packed = compress(&canonical)?;
        self.backend.write_raw(&id, &packed)?;
        debug!(%id, %kind, size = content.len(), "put object");
        Ok(id)
    }

    /// Read and decode the object named by `id`.
    pub fn get(&self, id: &ObjectId) -> StoreResult<Object> {
        let packed = self
            .backend
            .read_raw(id)?
            .ok_or(StoreError::NotFound(*id))?;

        let canonical = decompress(&packed).inspect_err(|e| {
            warn!(%id, error = %e, "stored object failed to decompress");
        })?;
        let object = object::decode(&canonical, self.decode_mode).inspect_err(|e| {
            warn!(%id, error = %e, "stored object failed to decode");
        })?;

        debug!(%id, kind = %object.kind, size = object.content.len(), "get object");
        Ok(object)
    }

    /// Check whether `id` is present.
    pub fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        self.backend.contains(id)
    }
}
