use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// a commit object pointing to a tree with metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// root tree hash
    pub tree: Hash,
    /// previous commit, encoded as an empty string on the first commit
    #[serde(with = "parent_hash")]
    pub parent: Option<Hash>,
    /// commit message
    pub message: String,
    /// author identity
    pub author: String,
    /// unix timestamp in milliseconds
    pub timestamp: i64,
}

impl Commit {
    /// create a new commit stamped with the current time
    pub fn new(
        tree: Hash,
        parent: Option<Hash>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(
            tree,
            parent,
            author,
            chrono::Utc::now().timestamp_millis(),
            message,
        )
    }

    /// create a new commit with explicit timestamp
    pub fn with_timestamp(
        tree: Hash,
        parent: Option<Hash>,
        author: impl Into<String>,
        timestamp: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tree,
            parent,
            message: message.into(),
            author: author.into(),
            timestamp,
        }
    }

    /// is this the first commit in the history
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

mod parent_hash {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::hash::Hash;

    pub fn serialize<S>(parent: &Option<Hash>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match parent {
            Some(hash) => serializer.serialize_str(&hash.to_hex()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Hash>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        Hash::from_hex(s).map(Some).map_err(serde::de::Error::custom)
    }
}
