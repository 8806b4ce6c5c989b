use std::fs::File;
use std::path::{Path, PathBuf};

use nix::fcntl::{Flock, FlockArg};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};
use crate::types::RepoMetadata;

/// name of the metadata directory at the repository root
pub const METADATA_DIR: &str = ".mrvc";

/// name of the optional ignore file at the repository root
pub const IGNORE_FILE: &str = ".mrvcignore";

/// a mrvc repository: a working directory plus its .mrvc directory
pub struct Repo {
    root: PathBuf,
    config: Config,
}

impl Repo {
    /// initialize a new repository rooted at the given path
    ///
    /// fails without touching anything if .mrvc already exists.
    pub fn init(root: &Path, name: &str, author: &str) -> Result<Self> {
        let root = crate::fs::normalize(root)?;
        let meta_dir = root.join(METADATA_DIR);
        if meta_dir.exists() {
            return Err(Error::AlreadyInitialized(root));
        }

        std::fs::create_dir_all(&root).with_path(&root)?;

        // create_dir, not create_dir_all: a concurrent init fails here
        match std::fs::create_dir(&meta_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyInitialized(root));
            }
            Err(e) => {
                return Err(Error::Io {
                    path: meta_dir,
                    source: e,
                })
            }
        }

        let repo = Self {
            root,
            config: Config::default(),
        };

        std::fs::create_dir_all(repo.objects_path()).with_path(repo.objects_path())?;
        std::fs::create_dir_all(repo.tmp_path()).with_path(repo.tmp_path())?;

        let metadata = RepoMetadata::new(name, author, chrono::Utc::now().timestamp_millis());
        let json = serde_json::to_string_pretty(&metadata)?;
        std::fs::write(repo.metadata_path(), json).with_path(repo.metadata_path())?;

        repo.config.save(&repo.config_path())?;

        info!(root = %repo.root.display(), name, author, "initialized repository");
        Ok(repo)
    }

    /// open an existing repository
    pub fn open(root: &Path) -> Result<Self> {
        let root = crate::fs::normalize(root)?;
        if !root.join(METADATA_DIR).is_dir() {
            return Err(Error::NoRepo(root));
        }

        let config = Config::load_or_default(&root.join(METADATA_DIR).join("config.toml"))?;

        Ok(Self { root, config })
    }

    /// working directory root (absolute, normalized)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// mutable access to configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// save configuration changes
    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_path())
    }

    /// read metadata.json
    pub fn metadata(&self) -> Result<RepoMetadata> {
        let path = self.metadata_path();
        let content = std::fs::read_to_string(&path).with_path(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// path to the .mrvc directory
    pub fn meta_path(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    /// path to config.toml
    pub fn config_path(&self) -> PathBuf {
        self.meta_path().join("config.toml")
    }

    /// path to metadata.json
    pub fn metadata_path(&self) -> PathBuf {
        self.meta_path().join("metadata.json")
    }

    /// path to HEAD
    pub fn head_path(&self) -> PathBuf {
        self.meta_path().join("HEAD")
    }

    /// path to objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.meta_path().join("objects")
    }

    /// path to tmp directory (for atomic writes)
    pub fn tmp_path(&self) -> PathBuf {
        self.meta_path().join("tmp")
    }

    /// path to lock file
    pub fn lock_path(&self) -> PathBuf {
        self.meta_path().join("lock")
    }

    /// acquire exclusive lock on repository
    /// returns a guard that releases the lock on drop
    pub fn lock(&self) -> Result<RepoLock> {
        let lock_path = self.lock_path();
        let file = File::create(&lock_path).with_path(&lock_path)?;

        let flock = Flock::lock(file, FlockArg::LockExclusiveNonblock)
            .map_err(|_| Error::LockContention)?;

        Ok(RepoLock { _flock: flock })
    }
}

/// guard that holds repository lock until dropped
pub struct RepoLock {
    _flock: Flock<File>,
}
