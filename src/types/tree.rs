use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash::Hash;

/// a directory tree - collection of entries sorted by (name, kind)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// create a new tree, validating and sorting entries
    pub fn new(mut entries: Vec<TreeEntry>) -> Result<Self> {
        for entry in &entries {
            validate_entry_name(&entry.name)?;
        }

        entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        for window in entries.windows(2) {
            if window[0].sort_key() == window[1].sort_key() {
                return Err(Error::DuplicateEntryName(format!(
                    "{} ({})",
                    window[0].name,
                    window[0].kind.type_name()
                )));
            }
        }

        Ok(Self { entries })
    }

    /// create an empty tree
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    /// get entries slice
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// look up entry by name
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// is tree empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// validate an entry name
fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidEntryName("empty name".to_string()));
    }
    if name.contains('/') {
        return Err(Error::InvalidEntryName(format!(
            "name contains '/': {}",
            name
        )));
    }
    if name.contains('\0') {
        return Err(Error::InvalidEntryName(format!(
            "name contains null byte: {}",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(Error::InvalidEntryName(format!("reserved name: {}", name)));
    }
    Ok(())
}

/// a single entry in a tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub hash: Hash,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind, hash: Hash) -> Self {
        Self {
            name: name.into(),
            kind,
            hash,
        }
    }

    pub fn blob(name: impl Into<String>, hash: Hash) -> Self {
        Self::new(name, EntryKind::Blob, hash)
    }

    pub fn tree(name: impl Into<String>, hash: Hash) -> Self {
        Self::new(name, EntryKind::Tree, hash)
    }

    fn sort_key(&self) -> (&[u8], EntryKind) {
        (self.name.as_bytes(), self.kind)
    }
}

/// kind of tree entry
///
/// ordering puts `Blob` before `Tree`, which breaks ties between
/// equal names the same way comparing the serialized type names would.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// file content
    Blob,
    /// subdirectory
    Tree,
}

impl EntryKind {
    /// get the type name for display and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            EntryKind::Blob => "blob",
            EntryKind::Tree => "tree",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryKind::Tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(byte: u8) -> Hash {
        Hash::from_bytes([byte; 32])
    }

    #[test]
    fn test_tree_empty() {
        let t = Tree::empty();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn test_tree_sorting() {
        let entries = vec![
            TreeEntry::blob("zebra", Hash::ZERO),
            TreeEntry::tree("alpha", Hash::ZERO),
            TreeEntry::blob("beta", Hash::ZERO),
        ];
        let tree = Tree::new(entries).unwrap();
        let names: Vec<_> = tree.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "zebra"]);
    }

    #[test]
    fn test_tree_same_name_different_kind() {
        let entries = vec![
            TreeEntry::tree("same", h(1)),
            TreeEntry::blob("same", h(2)),
        ];
        let tree = Tree::new(entries).unwrap();
        assert_eq!(tree.entries()[0].kind, EntryKind::Blob);
        assert_eq!(tree.entries()[1].kind, EntryKind::Tree);
    }

    #[test]
    fn test_tree_get() {
        let entries = vec![
            TreeEntry::blob("alpha", h(1)),
            TreeEntry::tree("beta", h(2)),
        ];
        let tree = Tree::new(entries).unwrap();

        assert_eq!(tree.get("alpha").unwrap().hash, h(1));
        assert!(tree.get("beta").unwrap().kind.is_tree());
        assert!(tree.get("gamma").is_none());
    }

    #[test]
    fn test_tree_rejects_bad_names() {
        for name in ["", "foo/bar", "foo\0bar", ".", ".."] {
            let entries = vec![TreeEntry::blob(name, Hash::ZERO)];
            assert!(
                matches!(Tree::new(entries), Err(Error::InvalidEntryName(_))),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn test_tree_rejects_duplicates() {
        let entries = vec![
            TreeEntry::blob("same", h(1)),
            TreeEntry::blob("same", h(2)),
        ];
        assert!(matches!(
            Tree::new(entries),
            Err(Error::DuplicateEntryName(_))
        ));
    }

    #[test]
    fn test_tree_json_shape() {
        let tree = Tree::new(vec![TreeEntry::blob("a.txt", h(0xab))]).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            format!(
                "{{\"entries\":[{{\"name\":\"a.txt\",\"type\":\"blob\",\"hash\":\"{}\"}}]}}",
                h(0xab).to_hex()
            )
        );
    }

    #[test]
    fn test_tree_json_determinism() {
        // same entry set in any order encodes to identical bytes
        let tree1 = Tree::new(vec![
            TreeEntry::blob("b", h(1)),
            TreeEntry::tree("a", h(2)),
        ])
        .unwrap();
        let tree2 = Tree::new(vec![
            TreeEntry::tree("a", h(2)),
            TreeEntry::blob("b", h(1)),
        ])
        .unwrap();

        assert_eq!(
            serde_json::to_vec(&tree1).unwrap(),
            serde_json::to_vec(&tree2).unwrap()
        );
    }

    #[test]
    fn test_entry_kind_type_names() {
        assert_eq!(EntryKind::Blob.type_name(), "blob");
        assert_eq!(EntryKind::Tree.type_name(), "tree");
        assert!(!EntryKind::Blob.is_tree());
    }
}
