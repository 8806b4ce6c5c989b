use crate::error::Result;
use crate::hash::{compute_object_hash, Hash};
use crate::object::store::{read_object, write_object};
use crate::repo::Repo;
use crate::types::Tree;

/// write a tree to the object store
///
/// trees are serialized as compact JSON; entries are already in canonical
/// order, so the hash depends only on the entry set.
pub fn write_tree(repo: &Repo, tree: &Tree) -> Result<Hash> {
    let bytes = serde_json::to_vec(tree)?;
    let hash = compute_object_hash(&bytes);
    write_object(repo, &hash, &bytes)?;
    Ok(hash)
}

/// read a tree from the object store
pub fn read_tree(repo: &Repo, hash: &Hash) -> Result<Tree> {
    let bytes = read_object(repo, hash)?;
    let tree: Tree = serde_json::from_slice(&bytes)?;
    Ok(tree)
}
