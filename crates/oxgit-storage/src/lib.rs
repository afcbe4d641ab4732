//! oxgit Storage Layer
//!
//! A content-addressed object database laid out like git's loose objects.
//! Objects are serialized as `<kind> <size>\0<content>`, named by the SHA-1 of
//! that serialization, zlib-compressed, and stored under
//! `objects/<first two hex chars>/<remaining 38>`.
//!
//! # Storage Backends
//!
//! [`ObjectStore`] runs over any [`ObjectBackend`]:
//!
//! - [`LooseBackend`] -- one file per object on disk
//! - [`InMemoryBackend`] -- `HashMap`-based store for tests and embedding

pub mod backend;
pub mod compress;
pub mod error;
pub mod loose;
pub mod memory;
pub mod object;
pub mod object_id;
pub mod repository;
pub mod store;

pub use backend::ObjectBackend;
pub use error::{StoreError, StoreResult};
pub use loose::{LooseBackend, ShardLayout};
pub use memory::InMemoryBackend;
pub use object::{DecodeMode, Object, ObjectHeader, ObjectKind};
pub use object_id::{ObjectId, ObjectIdError};
pub use repository::{Repository, StorageConfig};
pub use store::ObjectStore;
