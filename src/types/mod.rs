mod commit;
mod metadata;
mod status;
mod tree;

pub use commit::Commit;
pub use metadata::{ChangeKind, RepoMetadata};
pub use status::{Status, StatusReport};
pub use tree::{EntryKind, Tree, TreeEntry};
