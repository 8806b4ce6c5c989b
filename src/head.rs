use std::fs::{self, File};
use std::io::Write;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::repo::Repo;

/// read HEAD
///
/// returns `None` when HEAD is absent or blank, i.e. there are no commits yet.
pub fn read_head(repo: &Repo) -> Result<Option<Hash>> {
    let head_path = repo.head_path();

    let content = match fs::read_to_string(&head_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Io {
                path: head_path,
                source: e,
            })
        }
    };

    let hex = content.trim();
    if hex.is_empty() {
        return Ok(None);
    }
    Hash::from_hex(hex).map(Some)
}

/// move HEAD to a new commit
pub fn write_head(repo: &Repo, hash: &Hash) -> Result<()> {
    let head_path = repo.head_path();
    let tmp_dir = repo.tmp_path();
    fs::create_dir_all(&tmp_dir).with_path(&tmp_dir)?;

    // atomic write: temp -> fsync -> rename
    let tmp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(hash.to_hex().as_bytes()).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    fs::rename(&tmp_path, &head_path).with_path(&head_path)?;

    // fsync parent directory
    let meta_dir = repo.meta_path();
    let dir = File::open(&meta_dir).with_path(&meta_dir)?;
    dir.sync_all().with_path(&meta_dir)?;

    Ok(())
}
