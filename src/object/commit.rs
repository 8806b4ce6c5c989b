use crate::error::Result;
use crate::hash::{compute_object_hash, Hash};
use crate::object::store::{read_object, write_object};
use crate::repo::Repo;
use crate::types::Commit;

/// write a commit to the object store
pub fn write_commit(repo: &Repo, commit: &Commit) -> Result<Hash> {
    let bytes = serde_json::to_vec(commit)?;
    let hash = compute_object_hash(&bytes);
    write_object(repo, &hash, &bytes)?;
    Ok(hash)
}

/// read a commit from the object store
pub fn read_commit(repo: &Repo, hash: &Hash) -> Result<Commit> {
    let bytes = read_object(repo, hash)?;
    let commit: Commit = serde_json::from_slice(&bytes)?;
    Ok(commit)
}
