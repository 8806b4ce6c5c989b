use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::hash::Hash;
use crate::head::read_head;
use crate::object::{read_commit, read_tree};
use crate::repo::Repo;
use crate::types::EntryKind;

/// a file recorded in a commit, with its full path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsTreeEntry {
    pub path: String,
    pub hash: Hash,
}

impl fmt::Display for LsTreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob {}\t{}", self.hash, self.path)
    }
}

/// list every file in a commit, sorted by path
///
/// defaults to HEAD; with no commits the listing is empty.
pub fn ls_tree(repo: &Repo, commit: Option<Hash>) -> Result<Vec<LsTreeEntry>> {
    let commit_hash = match commit {
        Some(hash) => hash,
        None => match read_head(repo)? {
            Some(hash) => hash,
            None => return Ok(Vec::new()),
        },
    };

    let commit = read_commit(repo, &commit_hash)?;
    let files = flatten_tree(repo, &commit.tree)?;

    Ok(files
        .into_iter()
        .map(|(path, hash)| LsTreeEntry { path, hash })
        .collect())
}

/// map every blob reachable from `tree` to its slash-joined path
pub fn flatten_tree(repo: &Repo, tree: &Hash) -> Result<BTreeMap<String, Hash>> {
    let mut files = BTreeMap::new();
    flatten_into(repo, tree, "", &mut files)?;
    Ok(files)
}

fn flatten_into(
    repo: &Repo,
    tree_hash: &Hash,
    prefix: &str,
    files: &mut BTreeMap<String, Hash>,
) -> Result<()> {
    let tree = read_tree(repo, tree_hash)?;

    for entry in tree.entries() {
        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{}/{}", prefix, entry.name)
        };

        match entry.kind {
            EntryKind::Blob => {
                files.insert(path, entry.hash);
            }
            EntryKind::Tree => flatten_into(repo, &entry.hash, &path, files)?,
        }
    }

    Ok(())
}
