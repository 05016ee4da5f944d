//! Domain definitions for the template store
//!
//! Templates are named bundles of files (`site`, `release`). A bundle always
//! carries a `manifest.yml` describing which of its files become output and
//! where they land. The traits here let the bundles come from the binary
//! itself or from a directory on disk with the same layout.

use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::core::error::{Error, Result};
use crate::core::templates::manifest::{MANIFEST_FILE, TemplateManifest};

/// Summary of one template bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMetadata {
    /// Bundle name, also its top-level directory
    pub name: String,
    /// Description taken from the manifest
    pub description: Option<String>,
}

/// A raw file inside a template bundle
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// Path relative to the bundle root, always `/`-separated
    pub relative_path: String,
    pub contents: Vec<u8>,
}

impl TemplateFile {
    /// File contents as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.contents).map_err(|e| {
            Error::template(format!("{} is not valid UTF-8: {}", self.relative_path, e))
        })
    }
}

/// Read access to template bundles.
pub trait TemplateRepository {
    /// All bundles, sorted by name
    fn list_templates(&self) -> Vec<TemplateMetadata>;

    /// Every file of a bundle, sorted by relative path
    fn get_template_files(&self, name: &str) -> Vec<TemplateFile>;

    fn get_template(&self, name: &str) -> Option<TemplateMetadata> {
        self.list_templates().into_iter().find(|t| t.name == name)
    }

    fn has_template(&self, name: &str) -> bool {
        self.get_template(name).is_some()
    }

    /// Parse the manifest of a bundle.
    fn manifest(&self, name: &str) -> Result<TemplateManifest> {
        let files = self.get_template_files(name);
        let manifest = files
            .iter()
            .find(|f| f.relative_path == MANIFEST_FILE)
            .ok_or_else(|| Error::template(format!("Template not found: {name}")))?;
        TemplateManifest::parse(manifest.text()?)
    }
}

/// Writes template bundles to the filesystem, preserving their layout.
///
/// The exported tree can be edited and handed back through `--template-dir`.
pub trait TemplateExporter {
    /// Export one bundle to `{output_dir}/{template.name}/`.
    fn export_template(&self, template: &TemplateMetadata, output_dir: &Path) -> io::Result<()>;

    /// Export every bundle and return how many were written.
    fn export_all_templates(&self, output_dir: &Path) -> io::Result<usize>;
}

/// Exporter over any repository
pub struct RepositoryExporter<'a> {
    repository: &'a dyn TemplateRepository,
}

impl<'a> RepositoryExporter<'a> {
    pub fn new(repository: &'a dyn TemplateRepository) -> Self {
        Self { repository }
    }
}

impl TemplateExporter for RepositoryExporter<'_> {
    fn export_template(&self, template: &TemplateMetadata, output_dir: &Path) -> io::Result<()> {
        let template_output_dir = output_dir.join(&template.name);

        info!(
            template = %template.name,
            output_dir = %template_output_dir.display(),
            "Exporting template"
        );

        std::fs::create_dir_all(&template_output_dir)?;

        let files = self.repository.get_template_files(&template.name);
        let file_count = files.len();

        for file in files {
            let file_path = template_output_dir.join(&file.relative_path);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&file_path, &file.contents)?;

            debug!(file = %file_path.display(), "Exported template file");
        }

        info!(
            template = %template.name,
            file_count = file_count,
            "Template export completed"
        );

        Ok(())
    }

    fn export_all_templates(&self, output_dir: &Path) -> io::Result<usize> {
        let templates = self.repository.list_templates();
        let count = templates.len();

        info!(
            output_dir = %output_dir.display(),
            template_count = count,
            "Exporting all templates"
        );

        for template in &templates {
            self.export_template(template, output_dir)?;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct MockTemplateRepository;

    impl TemplateRepository for MockTemplateRepository {
        fn list_templates(&self) -> Vec<TemplateMetadata> {
            vec![TemplateMetadata {
                name: "site".to_string(),
                description: Some("Mock site".to_string()),
            }]
        }

        fn get_template_files(&self, name: &str) -> Vec<TemplateFile> {
            if name != "site" {
                return vec![];
            }
            vec![
                TemplateFile {
                    relative_path: "manifest.yml".to_string(),
                    contents: b"name: site\nfiles:\n  - source: a.tera\n    destination: a.txt\n"
                        .to_vec(),
                },
                TemplateFile {
                    relative_path: "nested/a.tera".to_string(),
                    contents: b"hello".to_vec(),
                },
            ]
        }
    }

    #[test]
    fn test_default_lookup_methods() {
        let repo = MockTemplateRepository;
        assert!(repo.has_template("site"));
        assert!(!repo.has_template("release"));
        assert_eq!(
            repo.get_template("site").unwrap().description.as_deref(),
            Some("Mock site")
        );
    }

    #[test]
    fn test_manifest_parsed_from_files() {
        let repo = MockTemplateRepository;
        let manifest = repo.manifest("site").unwrap();
        assert_eq!(manifest.name, "site");
        assert_eq!(manifest.files.len(), 1);
    }

    #[test]
    fn test_manifest_missing_template() {
        let repo = MockTemplateRepository;
        let err = repo.manifest("release").unwrap_err();
        assert!(err.to_string().contains("Template not found: release"));
    }

    #[test]
    fn test_export_preserves_layout() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MockTemplateRepository;
        let exporter = RepositoryExporter::new(&repo);

        let count = exporter.export_all_templates(temp_dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(temp_dir.path().join("site/manifest.yml").exists());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("site/nested/a.tera")).unwrap(),
            "hello"
        );
    }
}
