//! Core types for the generation domain

use std::path::{Path, PathBuf};

/// A rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub permissions: Option<u32>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            permissions: None,
        }
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Some(0o755);
        self
    }

    /// Path relative to `root`, falling back to the full path.
    pub fn display_path(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_creation() {
        let artifact = Artifact::new("ru/index.html", "<html></html>");
        assert_eq!(artifact.path, PathBuf::from("ru/index.html"));
        assert_eq!(artifact.content, "<html></html>");
        assert!(artifact.permissions.is_none());
    }

    #[test]
    fn test_executable_artifact() {
        let artifact = Artifact::new("tool.py", "#!/usr/bin/env python3").executable();
        assert_eq!(artifact.permissions, Some(0o755));
    }

    #[test]
    fn test_display_path_relative_to_root() {
        let artifact = Artifact::new("/out/.github/workflows/deploy.yml", "");
        assert_eq!(
            artifact.display_path(Path::new("/out")),
            ".github/workflows/deploy.yml"
        );
        assert_eq!(
            artifact.display_path(Path::new("/elsewhere")),
            "/out/.github/workflows/deploy.yml"
        );
    }
}
