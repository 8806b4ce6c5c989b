pub mod blob;
pub mod commit;
pub mod store;
pub mod tree;

pub use blob::{read_blob, write_blob, write_blob_from_file};
pub use commit::{read_commit, write_commit};
pub use store::{object_exists, object_path, read_object, write_object};
pub use tree::{read_tree, write_tree};
