use std::path::Path;

use crate::error::{IoResultExt, Result};
use crate::hash::{compute_blob_hash, Hash};
use crate::object::store::{read_object, write_object};
use crate::repo::Repo;

/// write a blob to the object store
///
/// returns the blob hash, which can be used to reference this blob.
pub fn write_blob(repo: &Repo, content: &[u8]) -> Result<Hash> {
    let hash = compute_blob_hash(content);
    write_object(repo, &hash, content)?;
    Ok(hash)
}

/// read a file from the working directory and store it as a blob
pub fn write_blob_from_file(repo: &Repo, path: &Path) -> Result<Hash> {
    let content = std::fs::read(path).with_path(path)?;
    write_blob(repo, &content)
}

/// read a blob from the object store
pub fn read_blob(repo: &Repo, hash: &Hash) -> Result<Vec<u8>> {
    read_object(repo, hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::object_exists;
    use crate::Error;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path(), "test", "tester").unwrap();
        (dir, repo)
    }

    #[test]
    fn test_write_and_read_blob() {
        let (_dir, repo) = test_repo();

        let content = b"hello, world!";
        let hash = write_blob(&repo, content).unwrap();

        assert!(object_exists(&repo, &hash));
        assert_eq!(read_blob(&repo, &hash).unwrap(), content);
    }

    #[test]
    fn test_blob_hash_is_content_digest() {
        let (_dir, repo) = test_repo();

        let hash = write_blob(&repo, b"hello").unwrap();
        assert_eq!(hash, compute_blob_hash(b"hello"));
    }

    #[test]
    fn test_blob_deduplication() {
        let (dir, repo) = test_repo();

        std::fs::write(dir.path().join("one.txt"), "duplicate content").unwrap();
        std::fs::write(dir.path().join("two.txt"), "duplicate content").unwrap();

        let h1 = write_blob_from_file(&repo, &dir.path().join("one.txt")).unwrap();
        let h2 = write_blob_from_file(&repo, &dir.path().join("two.txt")).unwrap();
        assert_eq!(h1, h2);

        // exactly one object on disk
        let (shard, _) = h1.to_path_components();
        let count = std::fs::read_dir(repo.objects_path().join(shard))
            .unwrap()
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_write_blob_from_missing_file() {
        let (dir, repo) = test_repo();

        let result = write_blob_from_file(&repo, &dir.path().join("nope.txt"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_read_nonexistent_blob() {
        let (_dir, repo) = test_repo();

        let result = read_blob(&repo, &Hash::ZERO);
        assert!(matches!(result, Err(Error::ObjectNotFound(_))));
    }
}
