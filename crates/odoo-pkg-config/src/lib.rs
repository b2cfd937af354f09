//! odoo-pkg configuration
//!
//! The configuration file is optional. It can change where addons live and
//! extend the static tables used for dependency resolution:
//!
//! ```toml
//! addons_namespace = "odoo_addons"
//! readme_file = "README.rst"
//!
//! [series."10.0"]
//! core_dependency = "odoo>=10.0,<10.1dev"
//! addon_dependency_range = ">=10.0,<10.1dev"
//! base_addons = ["base", "web"]
//!
//! [series."8.0"]
//! extra_base_addons = ["sale"]
//!
//! [external_dependencies]
//! Levenshtein = "python-Levenshtein"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "ODOO_PKG_CONFIG";

/// Directory holding the addons of a packaging project
pub const DEFAULT_ADDONS_NAMESPACE: &str = "odoo_addons";

/// Long description file looked up next to the manifest
pub const DEFAULT_README_FILE: &str = "README.rst";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Per-series overrides; a full entry adds a new series, a partial one amends a known series
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_dependency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addon_dependency_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_addons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_base_addons: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addons_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme_file: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub series: BTreeMap<String, SeriesConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub external_dependencies: BTreeMap<String, String>,
}

impl Config {
    /// Config file location: explicit path, then `ODOO_PKG_CONFIG`, then the user config dir
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        resolve_path(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// Load the config, falling back to defaults when the file does not exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::path(explicit)?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn addons_namespace(&self) -> &str {
        self.addons_namespace
            .as_deref()
            .unwrap_or(DEFAULT_ADDONS_NAMESPACE)
    }

    pub fn readme_file(&self) -> &str {
        self.readme_file.as_deref().unwrap_or(DEFAULT_README_FILE)
    }
}

fn resolve_path(explicit: Option<&Path>, env_value: Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(env_path) = env_value {
        let trimmed = env_path.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    #[cfg(not(target_os = "windows"))]
    let config_dir = dirs::home_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join(".config");

    #[cfg(target_os = "windows")]
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoHomeDir)?;

    Ok(config_dir.join("odoo-pkg").join("odoo-pkg.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_precedence() -> Result<(), ConfigError> {
        let explicit = PathBuf::from("/tmp/explicit.toml");
        assert_eq!(
            resolve_path(Some(&explicit), Some("/tmp/env.toml".to_string()))?,
            explicit
        );
        assert_eq!(
            resolve_path(None, Some(" /tmp/env.toml ".to_string()))?,
            PathBuf::from("/tmp/env.toml")
        );
        let default = resolve_path(None, Some("   ".to_string()))?;
        assert!(default.ends_with("odoo-pkg/odoo-pkg.toml"));
        Ok(())
    }

    #[test]
    fn test_missing_file_gives_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let config = Config::load_from_path(&dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        assert_eq!(config.addons_namespace(), "odoo_addons");
        assert_eq!(config.readme_file(), "README.rst");
        Ok(())
    }

    #[test]
    fn test_load_full_config() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("odoo-pkg.toml");
        fs::write(
            &path,
            r#"
addons_namespace = "addons"

[series."10.0"]
core_dependency = "odoo>=10.0,<10.1dev"
addon_dependency_range = ">=10.0,<10.1dev"
base_addons = ["base", "web"]

[series."8.0"]
extra_base_addons = ["sale"]

[external_dependencies]
Levenshtein = "python-Levenshtein"
"#,
        )?;

        let config = Config::load(Some(&path))?;
        assert_eq!(config.addons_namespace(), "addons");
        assert_eq!(config.series.len(), 2);
        assert_eq!(
            config.series.get("10.0").and_then(|s| s.base_addons.clone()),
            Some(vec!["base".to_string(), "web".to_string()])
        );
        assert_eq!(
            config.series.get("8.0").map(|s| s.extra_base_addons.clone()),
            Some(vec!["sale".to_string()])
        );
        assert_eq!(
            config.external_dependencies.get("Levenshtein").map(String::as_str),
            Some("python-Levenshtein")
        );
        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("odoo-pkg.toml");
        fs::write(&path, "addons_namespace = [")?;
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
        Ok(())
    }
}
