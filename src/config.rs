use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, Result};

/// repository configuration stored in .mrvc/config.toml
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// working-directory scan behaviour
    #[serde(default)]
    pub scan: ScanOptions,
}

impl Config {
    /// load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// load config, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_path(path)?;
        Ok(())
    }
}

/// what the working-directory scan leaves out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// skip the repository's own .mrvc directory
    #[serde(default = "default_true")]
    pub exclude_metadata_dir: bool,
    /// skip subdirectories that are repositories themselves
    #[serde(default = "default_true")]
    pub exclude_nested_repositories: bool,
    /// apply .mrvcignore patterns
    #[serde(default = "default_true")]
    pub apply_ignore_file: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude_metadata_dir: true,
            exclude_nested_repositories: true,
            apply_ignore_file: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            scan: ScanOptions {
                exclude_metadata_dir: true,
                exclude_nested_repositories: false,
                apply_ignore_file: false,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scan, ScanOptions::default());
    }

    #[test]
    fn test_config_partial_scan_table() {
        let toml_str = r#"
[scan]
apply_ignore_file = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.scan.exclude_metadata_dir);
        assert!(config.scan.exclude_nested_repositories);
        assert!(!config.scan.apply_ignore_file);
    }

    #[test]
    fn test_config_load_or_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.scan.apply_ignore_file = false;
        config.save(&path).unwrap();

        assert_eq!(Config::load_or_default(&path).unwrap(), config);
    }

    #[test]
    fn test_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scan\nbroken").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(crate::Error::Config(_))
        ));
    }
}
