use std::path::PathBuf;

use crate::object_id::{ObjectId, ObjectIdError};

/// Errors from repository and object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure other than an absorbed "already exists".
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compressor rejected its input or output buffer.
    #[error("compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// The requested object has no file in the store.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// Stored bytes are not a well-formed zlib stream.
    #[error("corrupt object stream: {0}")]
    CorruptStream(String),

    /// Decompressed bytes do not form a valid object.
    #[error("malformed object: {0}")]
    MalformedObject(String),

    /// An identifier string is not 40 hex characters.
    #[error("invalid object identifier: {0}")]
    InvalidIdentifier(#[from] ObjectIdError),

    /// A caller-supplied value is outside the documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configured root has no object database.
    #[error("not a repository: {}", .0.display())]
    NotARepository(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
