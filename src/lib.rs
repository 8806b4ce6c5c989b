//! mrvc - minimal content-addressed version control
//!
//! snapshots files of a working directory into an object store under
//! `.mrvc/`, links snapshots into a linear history, and compares the working
//! directory against the latest snapshot.
//!
//! # Core concepts
//!
//! - **Blob**: raw file bytes, addressed by their SHA-256
//! - **Tree**: a directory listing of `(name, kind, hash)` entries (canonical JSON)
//! - **Commit**: a root tree plus parent, author, message and timestamp (canonical JSON)
//! - **HEAD**: plain-text hash of the latest commit; absent means no commits
//!
//! # Layout
//!
//! ```text
//! <root>/.mrvc/metadata.json     {name, author, createdAt}
//! <root>/.mrvc/config.toml       scan options
//! <root>/.mrvc/HEAD              latest commit hash
//! <root>/.mrvc/objects/ab/cdef…  one file per object
//! <root>/.mrvcignore             optional ignore patterns
//! ```
//!
//! # Example usage
//!
//! ```no_run
//! use mrvc::{ops, Repo};
//! use std::path::Path;
//!
//! let repo = Repo::init(Path::new("/path/to/work"), "demo", "alice").unwrap();
//!
//! let request = ops::CommitRequest::paths("first", "alice", ["a.txt"]);
//! let hash = ops::commit(&repo, &request).unwrap();
//!
//! println!("{}", hash);
//! println!("{}", ops::status(&repo).unwrap());
//! ```

mod config;
mod error;
mod hash;
mod head;
mod object;
mod repo;

pub mod fs;
pub mod logging;
pub mod ops;
pub mod types;

pub use config::{Config, ScanOptions};
pub use error::{Error, Result};
pub use hash::{compute_blob_hash, compute_object_hash, hash_file, BlobHasher, Hash};
pub use head::{read_head, write_head};
pub use object::{
    object_exists, object_path, read_blob, read_commit, read_object, read_tree, write_blob,
    write_blob_from_file, write_commit, write_object, write_tree,
};
pub use repo::{Repo, RepoLock, IGNORE_FILE, METADATA_DIR};
pub use types::{
    ChangeKind, Commit, EntryKind, RepoMetadata, Status, StatusReport, Tree, TreeEntry,
};
