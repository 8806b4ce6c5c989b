use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::fs::{file_exists, list_tracked_files, normalize_against, relative_slash_path};
use crate::hash::Hash;
use crate::head::{read_head, write_head};
use crate::object::write_commit;
use crate::ops::tree_builder::build_tree;
use crate::repo::{Repo, METADATA_DIR};
use crate::types::Commit;

/// which working files a commit should include
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    /// every file the ignore-aware scan reports
    All,
    /// explicit paths; relative ones resolve against the repository root
    Paths(Vec<PathBuf>),
}

/// a validated commit request
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub message: String,
    pub author: String,
    pub files: FileSelection,
}

impl CommitRequest {
    pub fn new(
        message: impl Into<String>,
        author: impl Into<String>,
        files: FileSelection,
    ) -> Self {
        Self {
            message: message.into(),
            author: author.into(),
            files,
        }
    }

    /// commit every tracked file
    pub fn all(message: impl Into<String>, author: impl Into<String>) -> Self {
        Self::new(message, author, FileSelection::All)
    }

    /// commit the given paths
    pub fn paths<I, P>(message: impl Into<String>, author: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(
            message,
            author,
            FileSelection::Paths(paths.into_iter().map(Into::into).collect()),
        )
    }
}

/// snapshot the selected files and advance HEAD
///
/// every file is validated before any object is written. blobs and trees are
/// stored first, then the commit, and HEAD moves last; a failure anywhere
/// leaves HEAD where it was. the repository lock is held across the HEAD
/// read-modify-write.
#[instrument(skip_all, fields(root = %repo.root().display()))]
pub fn commit(repo: &Repo, request: &CommitRequest) -> Result<Hash> {
    let files = resolve_files(repo, &request.files)?;

    let _lock = repo.lock()?;

    let tree = build_tree(repo, &files)?;
    let parent = read_head(repo)?;

    let commit = Commit::new(tree, parent, &request.author, &request.message);
    let hash = write_commit(repo, &commit)?;
    write_head(repo, &hash)?;

    info!(
        %hash,
        %tree,
        parent = %parent.map(|p| p.to_hex()).unwrap_or_default(),
        files = files.len(),
        "created commit"
    );

    Ok(hash)
}

/// expand a selection into a deduplicated set of absolute file paths
pub fn resolve_files(repo: &Repo, selection: &FileSelection) -> Result<BTreeSet<PathBuf>> {
    let root = repo.root();

    let resolved: BTreeSet<PathBuf> = match selection {
        FileSelection::All => list_tracked_files(root, &repo.config().scan)?
            .into_iter()
            .collect(),
        FileSelection::Paths(paths) => {
            if paths.is_empty() {
                return Err(Error::NoFilesToCommit);
            }

            let mut resolved = BTreeSet::new();
            for path in paths {
                let abs = normalize_against(root, path);
                if !file_exists(&abs) {
                    return Err(Error::MissingSourceFile(abs));
                }

                // the metadata directory is not part of the working tree
                match relative_slash_path(root, &abs) {
                    Some(rel)
                        if !rel.is_empty()
                            && rel.split('/').next() != Some(METADATA_DIR) => {}
                    _ => return Err(Error::OutsideRepository(abs)),
                }

                resolved.insert(abs);
            }
            resolved
        }
    };

    if resolved.is_empty() {
        return Err(Error::NoFilesToCommit);
    }
    Ok(resolved)
}
