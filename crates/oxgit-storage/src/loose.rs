//! Loose object storage on the filesystem.
//!
//! Each object is one compressed file under the objects directory, sharded
//! by the leading characters of its hex identifier:
//!
//! ```text
//! objects/0a/5159e4fd9efdc3530c880fa15b672f08d47421
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::ObjectBackend;
use crate::error::{StoreError, StoreResult};
use crate::object_id::{HEX_LEN, ObjectId};

/// Default number of hex characters used for the shard directory.
pub const DEFAULT_SHARD_WIDTH: usize = 2;

/// How identifiers are split into a shard directory and a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardLayout {
    width: usize,
}

impl ShardLayout {
    /// Create a layout using the first `width` hex characters as the
    /// directory name.
    ///
    /// Both halves must be non-empty, so `width` must be in `1..40`.
    pub fn new(width: usize) -> StoreResult<Self> {
        if width == 0 || width >= HEX_LEN {
            return Err(StoreError::InvalidArgument(format!(
                "shard width must be between 1 and {}, got {width}",
                HEX_LEN - 1
            )));
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Split an identifier into `(directory, file name)`.
    pub fn split(&self, id: &ObjectId) -> (String, String) {
        let mut hex = id.to_hex();
        let file = hex.split_off(self.width);
        (hex, file)
    }
}

impl Default for ShardLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_SHARD_WIDTH,
        }
    }
}

/// Filesystem backend storing one file per object.
#[derive(Debug, Clone)]
pub struct LooseBackend {
    objects_dir: PathBuf,
    layout: ShardLayout,
}

impl LooseBackend {
    pub fn new(objects_dir: impl Into<PathBuf>, layout: ShardLayout) -> Self {
        Self {
            objects_dir: objects_dir.into(),
            layout,
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    pub fn layout(&self) -> ShardLayout {
        self.layout
    }

    /// Path of the file holding `id`.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        let (dir, file) = self.layout.split(id);
        self.objects_dir.join(dir).join(file)
    }

    /// Path of the file holding the object named by a hex string.
    pub fn object_path_for_hex(&self, hex: &str) -> StoreResult<PathBuf> {
        let id = ObjectId::from_hex(hex)?;
        Ok(self.object_path(&id))
    }
}

impl ObjectBackend for LooseBackend {
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let path = self.object_path(id);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn write_raw(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()> {
        let path = self.object_path(id);
        if path.exists() {
            debug!(%id, "object already present, skipping write");
            return Ok(());
        }

        if let Some(shard_dir) = path.parent() {
            match fs::create_dir(shard_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(StoreError::io(shard_dir, e)),
            }
        }

        // A reader never sees a half-written object: the final name only
        // appears once the bytes are complete.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data).map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }

        debug!(%id, path = %path.display(), bytes = data.len(), "wrote loose object");
        Ok(())
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        let path = self.object_path(id);
        path.try_exists().map_err(|e| StoreError::io(path, e))
    }
}
