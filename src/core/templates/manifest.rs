//! Manifest file format for template bundles.
//!
//! Each bundle has a `manifest.yml` listing the files it produces, in output
//! order, and the destination of each relative to the output root.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Name of the manifest inside every bundle
pub const MANIFEST_FILE: &str = "manifest.yml";

/// The root manifest structure for a template bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// The name of the bundle
    pub name: String,

    /// A short description of what the bundle generates
    #[serde(default)]
    pub description: Option<String>,

    /// Files to render, in output order
    pub files: Vec<ManifestFile>,
}

/// Describes a single file to be generated from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Path to the template file, relative to the bundle directory
    pub source: String,

    /// Destination path for the generated file, relative to the output root
    pub destination: String,

    /// Mark the output executable on unix
    #[serde(default)]
    pub executable: bool,
}

impl TemplateManifest {
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: TemplateManifest = serde_yaml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for file in &self.files {
            let destination = std::path::Path::new(&file.destination);
            if file.destination.is_empty()
                || destination.is_absolute()
                || destination
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir))
            {
                return Err(Error::template(format!(
                    "Manifest '{}' has invalid destination '{}'",
                    self.name, file.destination
                )));
            }
            if !seen.insert(file.destination.as_str()) {
                return Err(Error::template(format!(
                    "Manifest '{}' writes '{}' twice",
                    self.name, file.destination
                )));
            }
        }
        Ok(())
    }
}
