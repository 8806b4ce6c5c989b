//! .mrvcignore parsing and matching
//!
//! one pattern per line; blank lines and lines starting with `#` are skipped.
//! patterns are matched against the repository-relative, `/`-separated path:
//!
//! - `dir/` excludes everything under `dir`
//! - `*suffix` is a literal suffix match and `prefix*` a literal prefix match;
//!   `?` and `[` have no special meaning in either
//! - a `*` only inside the pattern (`src/*.rs`) makes it a glob where `*`
//!   also crosses `/`
//! - anything else must equal the relative path exactly

use std::path::Path;

use tracing::debug;

use crate::error::{IoResultExt, Result};
use crate::repo::IGNORE_FILE;

#[derive(Debug, Clone)]
enum Rule {
    Dir(String),
    Suffix(String),
    Prefix(String),
    /// `*` prefix and suffix: either affix may match
    Affix { suffix: String, prefix: String },
    Glob(glob::Pattern),
    Exact(String),
}

impl Rule {
    fn parse(pattern: &str) -> Self {
        if pattern.ends_with('/') {
            return Rule::Dir(pattern.to_string());
        }

        match (pattern.strip_prefix('*'), pattern.strip_suffix('*')) {
            (Some(suffix), Some(prefix)) if pattern.len() > 1 => {
                return Rule::Affix {
                    suffix: suffix.to_string(),
                    prefix: prefix.to_string(),
                }
            }
            (Some(suffix), _) => return Rule::Suffix(suffix.to_string()),
            (None, Some(prefix)) => return Rule::Prefix(prefix.to_string()),
            (None, None) => {}
        }

        // `*` only inside the pattern, e.g. `src/*.rs`
        if pattern.contains('*') {
            if let Ok(glob) = glob::Pattern::new(pattern) {
                return Rule::Glob(glob);
            }
        }
        Rule::Exact(pattern.to_string())
    }

    fn matches(&self, rel: &str, is_dir: bool) -> bool {
        match self {
            Rule::Dir(prefix) => {
                rel.starts_with(prefix.as_str()) || (is_dir && format!("{}/", rel) == *prefix)
            }
            Rule::Suffix(suffix) => rel.ends_with(suffix.as_str()),
            Rule::Prefix(prefix) => rel.starts_with(prefix.as_str()),
            Rule::Affix { suffix, prefix } => {
                rel.ends_with(suffix.as_str()) || rel.starts_with(prefix.as_str())
            }
            Rule::Glob(glob) => glob.matches(rel),
            Rule::Exact(exact) => rel == exact,
        }
    }
}

/// compiled ignore patterns for one repository
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// no patterns: nothing is ignored
    pub fn empty() -> Self {
        Self::default()
    }

    /// compile patterns from ignore-file text
    pub fn parse(content: &str) -> Self {
        let rules = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Rule::parse)
            .collect();
        Self { rules }
    }

    /// read `<root>/.mrvcignore`; a missing file means no patterns
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(IGNORE_FILE);
        if !path.is_file() {
            return Ok(Self::empty());
        }
        let content = std::fs::read_to_string(&path).with_path(&path)?;
        let rules = Self::parse(&content);
        debug!(patterns = rules.len(), "loaded ignore file");
        Ok(rules)
    }

    /// number of compiled patterns
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// does any pattern exclude this relative path
    pub fn is_ignored(&self, rel: &str, is_dir: bool) -> bool {
        self.rules.iter().any(|rule| rule.matches(rel, is_dir))
    }
}
