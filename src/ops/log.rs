use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, SecondsFormat};
use tracing::warn;

use crate::error::Result;
use crate::hash::Hash;
use crate::head::read_head;
use crate::object::read_commit;
use crate::repo::Repo;
use crate::types::Commit;

/// commit with its hash for log output
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub hash: Hash,
    pub commit: Commit,
}

/// walk the history from HEAD, newest first
pub fn log(repo: &Repo, max_count: Option<usize>) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    let mut visited = HashSet::new();
    let mut next = read_head(repo)?;

    while let Some(hash) = next {
        if max_count.is_some_and(|max| entries.len() >= max) {
            break;
        }

        if !visited.insert(hash) {
            warn!(%hash, "history loops back on itself, stopping");
            break;
        }

        let commit = read_commit(repo, &hash)?;
        next = commit.parent;
        entries.push(LogEntry { hash, commit });
    }

    Ok(entries)
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit {}", self.hash)?;
        writeln!(f, "Author: {}", self.commit.author)?;
        writeln!(f, "Date:   {}", format_millis(self.commit.timestamp))?;

        writeln!(f)?;
        for line in self.commit.message.lines() {
            writeln!(f, "    {}", line)?;
        }

        Ok(())
    }
}

fn format_millis(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => millis.to_string(),
    }
}
