//! Site configuration.
//!
//! Every value has a built-in default, so a plain `relsite scaffold` needs no
//! input at all. A TOML file can override any subset of keys:
//!
//! ```toml
//! [site]
//! title = "Acme Docs"
//! initial_version = "0.1.0"
//!
//! [pages]
//! branch = "gh-pages"
//! path = "/"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

/// Locale directories produced by the scaffold and copied into each release.
pub const LOCALES: [&str; 2] = ["ru", "en"];

/// File name looked up in the output root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "relsite.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub pages: PagesSection,
}

/// Values rendered into the HTML pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Title shown on the root and versioned landing pages
    pub title: String,
    /// Version listed as LATEST on the root page before any release
    pub initial_version: String,
}

/// Where the hosting platform serves the site from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesSection {
    pub branch: String,
    pub path: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Project Site".to_string(),
            initial_version: "1.0.0".to_string(),
        }
    }
}

impl Default for PagesSection {
    fn default() -> Self {
        Self {
            branch: "gh-pages".to_string(),
            path: "/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: SiteConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded site configuration");
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `relsite.toml` in `root` is
    /// used when present, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(Error::config("site.title cannot be empty"));
        }
        if self.site.initial_version.trim().is_empty() {
            return Err(Error::config("site.initial_version cannot be empty"));
        }
        if self.pages.branch.trim().is_empty() {
            return Err(Error::config("pages.branch cannot be empty"));
        }
        if !self.pages.path.starts_with('/') {
            return Err(Error::config(format!(
                "pages.path must start with '/', got '{}'",
                self.pages.path
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "Project Site");
        assert_eq!(config.site.initial_version, "1.0.0");
        assert_eq!(config.pages.branch, "gh-pages");
        assert_eq!(config.pages.path, "/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relsite.toml");
        std::fs::write(&path, "[site]\ntitle = \"Acme Docs\"\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site.title, "Acme Docs");
        assert_eq!(config.site.initial_version, "1.0.0");
        assert_eq!(config.pages.branch, "gh-pages");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relsite.toml");
        std::fs::write(&path, "[pages]\nbrnach = \"main\"\n").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_invalid_pages_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relsite.toml");
        std::fs::write(&path, "[pages]\npath = \"docs\"\n").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("pages.path"));
    }

    #[test]
    fn test_resolve_prefers_root_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[pages]\nbranch = \"site\"\n",
        )
        .unwrap();

        let config = SiteConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config.pages.branch, "site");
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_resolve_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(SiteConfig::resolve(Some(&missing), dir.path()).is_err());
    }
}
