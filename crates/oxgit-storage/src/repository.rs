//! Repository layout and initialization.
//!
//! A repository root holds the object database and the `HEAD` pointer:
//!
//! ```text
//! <git_dir>/HEAD       ref: refs/heads/main
//! <git_dir>/refs/
//! <git_dir>/objects/
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::loose::{LooseBackend, ShardLayout};
use crate::object::DecodeMode;
use crate::store::ObjectStore;

const OBJECTS_DIR: &str = "objects";
const REFS_DIR: &str = "refs";
const HEAD_FILE: &str = "HEAD";

/// Repository storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory of the repository (the `.git` directory)
    pub git_dir: PathBuf,
    /// Branch `HEAD` points at after init
    pub default_branch: String,
    /// Object path sharding
    pub shard_layout: ShardLayout,
    /// Header validation applied on reads
    pub decode_mode: DecodeMode,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            git_dir: PathBuf::from(".git"),
            default_branch: "main".to_string(),
            shard_layout: ShardLayout::default(),
            decode_mode: DecodeMode::Lenient,
        }
    }
}

impl StorageConfig {
    pub fn with_git_dir(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
            ..Self::default()
        }
    }
}

/// An initialized repository.
#[derive(Debug, Clone)]
pub struct Repository {
    config: StorageConfig,
}

impl Repository {
    /// Create the repository skeleton, tolerating parts that already exist.
    ///
    /// `HEAD` is rewritten each time with the same content, so repeated
    /// calls leave the layout unchanged.
    pub fn init(config: StorageConfig) -> StoreResult<Self> {
        let git_dir = &config.git_dir;
        fs::create_dir_all(git_dir).map_err(|e| StoreError::io(git_dir, e))?;
        create_dir_if_absent(&git_dir.join(OBJECTS_DIR))?;
        create_dir_if_absent(&git_dir.join(REFS_DIR))?;

        let head = git_dir.join(HEAD_FILE);
        let head_content = format!("ref: refs/heads/{}\n", config.default_branch);
        fs::write(&head, head_content).map_err(|e| StoreError::io(&head, e))?;

        info!(git_dir = %git_dir.display(), "initialized repository");
        Ok(Self { config })
    }

    /// Open an existing repository.
    pub fn open(config: StorageConfig) -> StoreResult<Self> {
        let objects_dir = config.git_dir.join(OBJECTS_DIR);
        if !objects_dir.is_dir() {
            return Err(StoreError::NotARepository(config.git_dir));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn git_dir(&self) -> &Path {
        &self.config.git_dir
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.config.git_dir.join(OBJECTS_DIR)
    }

    pub fn refs_dir(&self) -> PathBuf {
        self.config.git_dir.join(REFS_DIR)
    }

    pub fn head_path(&self) -> PathBuf {
        self.config.git_dir.join(HEAD_FILE)
    }

    /// Object store over this repository's loose objects.
    pub fn object_store(&self) -> ObjectStore<LooseBackend> {
        let backend = LooseBackend::new(self.objects_dir(), self.config.shard_layout);
        ObjectStore::new(backend).with_decode_mode(self.config.decode_mode)
    }
}

fn create_dir_if_absent(path: &Path) -> StoreResult<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(config.git_dir, PathBuf::from(".git"));
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.shard_layout.width(), 2);
        assert_eq!(config.decode_mode, DecodeMode::Lenient);
    }

    #[test]
    fn test_paths() {
        let repo = Repository {
            config: StorageConfig::with_git_dir("/data/.git"),
        };
        assert_eq!(repo.objects_dir(), PathBuf::from("/data/.git/objects"));
        assert_eq!(repo.refs_dir(), PathBuf::from("/data/.git/refs"));
        assert_eq!(repo.head_path(), PathBuf::from("/data/.git/HEAD"));
    }

    #[test]
    fn test_init_writes_head() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::with_git_dir(temp_dir.path().join(".git"));
        let repo = Repository::init(config).unwrap();
        let head = fs::read_to_string(repo.head_path()).unwrap();
        assert_eq!(head, "ref: refs/heads/main\n");
    }

    #[test]
    fn test_init_custom_branch() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            default_branch: "trunk".to_string(),
            ..StorageConfig::with_git_dir(temp_dir.path().join(".git"))
        };
        let repo = Repository::init(config).unwrap();
        let head = fs::read_to_string(repo.head_path()).unwrap();
        assert_eq!(head, "ref: refs/heads/trunk\n");
    }

    #[test]
    fn test_open_requires_objects_dir() {
        let temp_dir = TempDir::new().unwrap();
        let result = Repository::open(StorageConfig::with_git_dir(temp_dir.path()));
        assert!(matches!(result, Err(StoreError::NotARepository(_))));
    }

    #[test]
    fn test_init_fails_when_git_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let git_dir = temp_dir.path().join(".git");
        fs::write(&git_dir, b"not a directory").unwrap();
        let result = Repository::init(StorageConfig::with_git_dir(git_dir));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
