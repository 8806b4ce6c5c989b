//! working-directory access: path normalization, ignore rules, scanning

mod ignore;
mod path;
mod scan;

pub use ignore::IgnoreRules;
pub use path::{file_exists, normalize, normalize_against, relative_slash_path};
pub use scan::list_tracked_files;
