use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanOptions;
use crate::error::{Error, Result};
use crate::fs::{relative_slash_path, IgnoreRules};
use crate::repo::METADATA_DIR;

/// list the files a commit of "everything" would include
///
/// walks `root` without descending into symlinked directories and returns
/// absolute paths of regular files, plus symlinks whose target is a regular
/// file (the same set `file_exists` accepts), sorted. directories are pruned
/// as a whole when excluded.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn list_tracked_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let ignore = if options.apply_ignore_file {
        IgnoreRules::load(root)?
    } else {
        IgnoreRules::empty()
    };

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(root, entry, options, &ignore));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e.into(),
        })?;
        if entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(files = files.len(), "scanned working directory");
    Ok(files)
}

fn is_excluded(root: &Path, entry: &DirEntry, options: &ScanOptions, ignore: &IgnoreRules) -> bool {
    // the root itself is never excluded
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_dir();

    if options.exclude_metadata_dir && is_dir && entry.file_name() == METADATA_DIR {
        return true;
    }

    if options.exclude_nested_repositories && is_dir && entry.path().join(METADATA_DIR).is_dir() {
        return true;
    }

    if !ignore.is_empty() {
        if let Some(rel) = relative_slash_path(root, entry.path()) {
            if ignore.is_ignored(&rel, is_dir) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn rel_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| relative_slash_path(root, f).unwrap())
            .collect()
    }

    #[test]
    fn test_lists_files_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/c")).unwrap();
        fs::write(root.join("z.txt"), "z").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b/c/d.txt"), "d").unwrap();
        fs::create_dir(root.join("empty")).unwrap();

        let files = list_tracked_files(root, &ScanOptions::default()).unwrap();
        assert_eq!(rel_names(root, &files), vec!["a.txt", "b/c/d.txt", "z.txt"]);
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_symlinks_listed_dir_symlinks_not_descended() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real/inner.txt"), "i").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(root.join("a.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("dirlink")).unwrap();
        std::os::unix::fs::symlink(root.join("nowhere"), root.join("dangling")).unwrap();

        let files = list_tracked_files(root, &ScanOptions::default()).unwrap();
        assert_eq!(
            rel_names(root, &files),
            vec!["a.txt", "link.txt", "real/inner.txt"]
        );
    }

    #[test]
    fn test_excludes_metadata_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".mrvc/objects/ab")).unwrap();
        fs::write(root.join(".mrvc/HEAD"), "x").unwrap();
        fs::write(root.join(".mrvc/objects/ab/cd"), "x").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join(".mrvcignore"), "").unwrap();

        let files = list_tracked_files(root, &ScanOptions::default()).unwrap();
        // the ignore file itself is an ordinary tracked file
        assert_eq!(rel_names(root, &files), vec![".mrvcignore", "a.txt"]);

        let all = ScanOptions {
            exclude_metadata_dir: false,
            ..ScanOptions::default()
        };
        let files = list_tracked_files(root, &all).unwrap();
        assert!(rel_names(root, &files).contains(&".mrvc/HEAD".to_string()));
    }

    #[test]
    fn test_excludes_nested_repositories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub/.mrvc")).unwrap();
        fs::write(root.join("sub/inner.txt"), "i").unwrap();
        fs::write(root.join("top.txt"), "t").unwrap();

        let files = list_tracked_files(root, &ScanOptions::default()).unwrap();
        assert_eq!(rel_names(root, &files), vec!["top.txt"]);

        let nested = ScanOptions {
            exclude_nested_repositories: false,
            ..ScanOptions::default()
        };
        let files = list_tracked_files(root, &nested).unwrap();
        assert_eq!(rel_names(root, &files), vec!["sub/inner.txt", "top.txt"]);
    }

    #[test]
    fn test_applies_ignore_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("build/obj")).unwrap();
        fs::write(root.join(".mrvcignore"), "# build output\nbuild/\n*.log\n").unwrap();
        fs::write(root.join("build/obj/x.o"), "o").unwrap();
        fs::write(root.join("run.log"), "l").unwrap();
        fs::write(root.join("main.c"), "c").unwrap();

        let files = list_tracked_files(root, &ScanOptions::default()).unwrap();
        assert_eq!(rel_names(root, &files), vec![".mrvcignore", "main.c"]);

        let raw = ScanOptions {
            apply_ignore_file: false,
            ..ScanOptions::default()
        };
        let files = list_tracked_files(root, &raw).unwrap();
        assert_eq!(files.len(), 4);
    }
}
