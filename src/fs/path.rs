//! path normalization without touching the filesystem

use std::path::{Component, Path, PathBuf};

use crate::error::{IoResultExt, Result};

/// make a path absolute and lexically clean
///
/// relative paths are joined onto the current directory. `.` components are
/// dropped and `..` pops the previous component. symlinks are not resolved, so
/// two spellings of the same location normalize identically only when they
/// share a lexical form.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().with_path(path)?;
        cwd.join(path)
    };
    Ok(clean(&absolute))
}

/// make a path absolute against `base` instead of the current directory
pub fn normalize_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // never pops past the root
                if out.parent().is_some() {
                    out.pop();
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// repository-relative path with `/` separators
///
/// returns `Some("")` for the root itself and `None` when `path` is not under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// true for an existing regular file, following symlinks
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absolute() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")).unwrap(),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize(Path::new("/../x")).unwrap(), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("/a/b/")).unwrap(), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_normalize_relative_uses_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(normalize(Path::new("x/y")).unwrap(), cwd.join("x/y"));
    }

    #[test]
    fn test_normalize_against() {
        let base = Path::new("/repo");
        assert_eq!(
            normalize_against(base, Path::new("src/../a.txt")),
            PathBuf::from("/repo/a.txt")
        );
        assert_eq!(
            normalize_against(base, Path::new("/elsewhere/b")),
            PathBuf::from("/elsewhere/b")
        );
    }

    #[test]
    fn test_relative_slash_path() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_slash_path(root, Path::new("/repo/a/b.txt")),
            Some("a/b.txt".to_string())
        );
        assert_eq!(relative_slash_path(root, root), Some(String::new()));
        assert_eq!(relative_slash_path(root, Path::new("/other/a")), None);
        // component-wise, not string prefix
        assert_eq!(relative_slash_path(root, Path::new("/repository/a")), None);
    }

    #[test]
    fn test_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(file_exists(&file));
        assert!(!file_exists(dir.path()));
        assert!(!file_exists(&dir.path().join("missing")));
    }
}
