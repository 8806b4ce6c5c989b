use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::fs::relative_slash_path;
use crate::hash::Hash;
use crate::object::{write_blob_from_file, write_tree};
use crate::repo::Repo;
use crate::types::{EntryKind, Tree, TreeEntry};

/// entries collected for one directory, keyed so a re-added name overwrites
type PendingTree = BTreeMap<(String, EntryKind), Hash>;

/// store blobs for `files` and build the directory trees above them
///
/// `files` are absolute, normalized paths under the repository root.
/// directories are keyed by their relative path (`""` is the root) and
/// finalized deepest first, so every subtree hash exists before its parent
/// is hashed. returns the root tree hash.
#[instrument(skip_all, fields(files = files.len()))]
pub fn build_tree(repo: &Repo, files: &BTreeSet<PathBuf>) -> Result<Hash> {
    if files.is_empty() {
        return Err(Error::NoFilesToCommit);
    }

    let mut pending: HashMap<String, PendingTree> = HashMap::new();
    let mut children: HashMap<String, BTreeSet<String>> = HashMap::new();
    pending.insert(String::new(), PendingTree::new());

    for path in files {
        let rel = relative_slash_path(repo.root(), path)
            .filter(|rel| !rel.is_empty())
            .ok_or_else(|| Error::OutsideRepository(path.clone()))?;

        let blob = write_blob_from_file(repo, path)?;
        trace!(path = %rel, %blob, "stored blob");

        let (dir, name) = split_parent(&rel);
        pending
            .entry(dir.to_string())
            .or_default()
            .insert((name.to_string(), EntryKind::Blob), blob);

        // link every ancestor so directories holding only subdirectories
        // still get a tree; stop once an edge is already known
        let mut current = dir;
        while !current.is_empty() {
            let (parent, _) = split_parent(current);
            pending.entry(parent.to_string()).or_default();
            if !children
                .entry(parent.to_string())
                .or_default()
                .insert(current.to_string())
            {
                break;
            }
            current = parent;
        }
    }

    let mut dirs: Vec<String> = pending.keys().cloned().collect();
    dirs.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));

    let mut tree_hashes: HashMap<String, Hash> = HashMap::with_capacity(dirs.len());
    for dir in dirs {
        let mut entries = pending.remove(&dir).unwrap_or_default();

        if let Some(subdirs) = children.get(&dir) {
            for child in subdirs {
                let (_, name) = split_parent(child);
                entries.insert((name.to_string(), EntryKind::Tree), tree_hashes[child]);
            }
        }

        let tree = Tree::new(
            entries
                .into_iter()
                .map(|((name, kind), hash)| TreeEntry::new(name, kind, hash))
                .collect(),
        )?;
        let hash = write_tree(repo, &tree)?;
        let shown = if dir.is_empty() { "/" } else { dir.as_str() };
        debug!(dir = shown, %hash, entries = tree.len(), "stored tree");

        tree_hashes.insert(dir, hash);
    }

    tree_hashes.get("").copied().ok_or(Error::NoFilesToCommit)
}

/// split a relative path into (parent dir, last component)
fn split_parent(rel: &str) -> (&str, &str) {
    match rel.rfind('/') {
        Some(i) => (&rel[..i], &rel[i + 1..]),
        None => ("", rel),
    }
}

/// number of components; the root has depth 0
fn depth(dir: &str) -> usize {
    if dir.is_empty() {
        0
    } else {
        dir.matches('/').count() + 1
    }
}
