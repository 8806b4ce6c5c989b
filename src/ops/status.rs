use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::fs::{list_tracked_files, relative_slash_path};
use crate::hash::hash_file;
use crate::head::read_head;
use crate::object::read_commit;
use crate::ops::ls_tree::flatten_tree;
use crate::repo::Repo;
use crate::types::{Status, StatusReport};

/// compare the working tree against HEAD
///
/// a missing or corrupt HEAD commit or tree is an error, not an empty status.
#[instrument(skip_all, fields(root = %repo.root().display()))]
pub fn status(repo: &Repo) -> Result<Status> {
    let Some(head) = read_head(repo)? else {
        return Ok(Status::NoCommits);
    };

    let commit = read_commit(repo, &head)?;
    let recorded = flatten_tree(repo, &commit.tree)?;
    let working = list_tracked_files(repo.root(), &repo.config().scan)?;

    debug!(recorded = recorded.len(), working = working.len(), "comparing");

    let mut report = StatusReport::default();
    let mut seen = HashSet::with_capacity(working.len());

    for path in &working {
        let Some(rel) = relative_slash_path(repo.root(), path) else {
            continue;
        };

        match recorded.get(&rel) {
            None => report.untracked.push(rel.clone()),
            Some(expected) => {
                if hash_file(path)? != *expected {
                    report.modified.push(rel.clone());
                }
            }
        }

        seen.insert(rel);
    }

    report.deleted.extend(
        recorded
            .into_keys()
            .filter(|path| !seen.contains(path)),
    );

    Ok(report.into_status())
}
