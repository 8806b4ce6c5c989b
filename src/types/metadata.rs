use serde::{Deserialize, Serialize};

/// repository identity written once by `init`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    pub author: String,
    /// unix timestamp in milliseconds, kept as a decimal string
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl RepoMetadata {
    pub fn new(name: impl Into<String>, author: impl Into<String>, created_at_millis: i64) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            created_at: created_at_millis.to_string(),
        }
    }

    /// creation time in milliseconds, if the stored value parses
    pub fn created_at_millis(&self) -> Option<i64> {
        self.created_at.parse().ok()
    }
}

/// working-tree change classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Modified,
    Deleted,
    Untracked,
}

impl ChangeKind {
    /// group heading used by status output
    pub fn heading(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "Modified",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::Untracked => "Untracked",
        }
    }
}
