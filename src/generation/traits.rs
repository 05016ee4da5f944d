//! Port interfaces for the generation domain

use std::path::Path;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::generation::{Artifact, RenderContext};

/// Renders a named template to text
pub trait TemplateRenderer: Send + Sync {
    /// `template` is `<bundle>/<relative path>`, e.g. `site/index.html.tera`
    fn render(&self, template: &str, context: &RenderContext) -> Result<String>;
}

/// Service for writing generated artifacts to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts, creating parent directories first
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<()>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Copy a file byte for byte, creating the destination's parent
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;
}
