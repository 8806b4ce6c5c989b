use std::fmt;

use crate::types::ChangeKind;

/// outcome of comparing the working directory against HEAD
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// HEAD is empty, nothing to compare against
    NoCommits,
    /// working directory matches HEAD
    Clean,
    /// at least one path differs
    Changes(StatusReport),
}

impl Status {
    pub fn is_clean(&self) -> bool {
        matches!(self, Status::Clean)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NoCommits => write!(f, "No commits yet."),
            Status::Clean => write!(f, "clean"),
            Status::Changes(report) => write!(f, "{}", report),
        }
    }
}

/// path-sorted change groups, disjoint by construction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.deleted.is_empty() && self.untracked.is_empty()
    }

    /// groups in display order
    pub fn groups(&self) -> [(ChangeKind, &[String]); 3] {
        [
            (ChangeKind::Modified, self.modified.as_slice()),
            (ChangeKind::Deleted, self.deleted.as_slice()),
            (ChangeKind::Untracked, self.untracked.as_slice()),
        ]
    }

    /// sort every group and fold into a status
    pub fn into_status(mut self) -> Status {
        self.modified.sort();
        self.deleted.sort();
        self.untracked.sort();

        if self.is_empty() {
            Status::Clean
        } else {
            Status::Changes(self)
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, paths) in self.groups() {
            if paths.is_empty() {
                continue;
            }
            writeln!(f, "{}:", kind.heading())?;
            for path in paths {
                writeln!(f, "  {}", path)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        assert_eq!(StatusReport::default().into_status(), Status::Clean);
    }

    #[test]
    fn test_into_status_sorts_groups() {
        let report = StatusReport {
            modified: vec!["b".into(), "a".into()],
            deleted: vec![],
            untracked: vec!["z/y".into(), "x".into()],
        };

        match report.into_status() {
            Status::Changes(r) => {
                assert_eq!(r.modified, vec!["a", "b"]);
                assert_eq!(r.untracked, vec!["x", "z/y"]);
            }
            other => panic!("expected changes, got {other:?}"),
        }
    }

    #[test]
    fn test_display_groups() {
        let status = StatusReport {
            modified: vec!["a.txt".into()],
            deleted: vec![],
            untracked: vec!["b.txt".into(), "c/d.txt".into()],
        }
        .into_status();

        assert_eq!(
            status.to_string(),
            "Modified:\n  a.txt\n\nUntracked:\n  b.txt\n  c/d.txt\n\n"
        );
    }

    #[test]
    fn test_display_terminal_states() {
        assert_eq!(Status::NoCommits.to_string(), "No commits yet.");
        assert_eq!(Status::Clean.to_string(), "clean");
        assert!(Status::Clean.is_clean());
    }
}
