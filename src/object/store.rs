use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use tracing::trace;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{compute_object_hash, Hash};
use crate::repo::Repo;

/// persist bytes under their hash
///
/// idempotent: an object that already exists is left untouched.
/// the caller is responsible for `hash` actually being the digest of `content`.
pub fn write_object(repo: &Repo, hash: &Hash, content: &[u8]) -> Result<()> {
    let (dir, file) = hash.to_path_components();
    let shard_dir = repo.objects_path().join(&dir);
    let object_path = shard_dir.join(&file);

    // dedup: identical content already stored
    if object_path.exists() {
        trace!(%hash, "object already present");
        return Ok(());
    }

    fs::create_dir_all(&shard_dir).with_path(&shard_dir)?;
    let tmp_dir = repo.tmp_path();
    fs::create_dir_all(&tmp_dir).with_path(&tmp_dir)?;

    // atomic write: temp -> fsync -> rename
    let tmp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(content).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    fs::rename(&tmp_path, &object_path).with_path(&object_path)?;

    // fsync parent directory
    let dir_file = File::open(&shard_dir).with_path(&shard_dir)?;
    dir_file.sync_all().with_path(&shard_dir)?;

    trace!(%hash, bytes = content.len(), "stored object");
    Ok(())
}

/// read the bytes stored under `hash`, verifying their digest
pub fn read_object(repo: &Repo, hash: &Hash) -> Result<Vec<u8>> {
    let path = object_path(repo, hash);

    let content = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    if compute_object_hash(&content) != *hash {
        return Err(Error::CorruptObject(*hash));
    }

    Ok(content)
}

/// get the filesystem path to an object
pub fn object_path(repo: &Repo, hash: &Hash) -> PathBuf {
    let (dir, file) = hash.to_path_components();
    repo.objects_path().join(dir).join(file)
}

/// check if an object exists in the store
pub fn object_exists(repo: &Repo, hash: &Hash) -> bool {
    object_path(repo, hash).exists()
}
