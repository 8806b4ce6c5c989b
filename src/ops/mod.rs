//! high-level operations on mrvc repositories

mod commit;
mod log;
mod ls_tree;
mod status;
mod tree_builder;

pub use commit::{commit, resolve_files, CommitRequest, FileSelection};
pub use log::{log, LogEntry};
pub use ls_tree::{flatten_tree, ls_tree, LsTreeEntry};
pub use status::status;
pub use tree_builder::build_tree;
