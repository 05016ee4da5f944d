//! Emitter - renders a bundle's manifest and writes every file it lists

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::core::error::Result;
use crate::core::templates::TemplateManifest;
use crate::generation::{Artifact, OutputService, RenderContext, TemplateRenderer};

/// Turns a template bundle into files under an output root
pub struct Emitter {
    renderer: Arc<dyn TemplateRenderer>,
    output: Arc<dyn OutputService>,
    manifest: TemplateManifest,
}

impl Emitter {
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        output: Arc<dyn OutputService>,
        manifest: TemplateManifest,
    ) -> Self {
        Self {
            renderer,
            output,
            manifest,
        }
    }

    /// Render every manifest entry without touching the filesystem.
    pub fn plan(&self, root: &Path, context: &RenderContext) -> Result<Vec<Artifact>> {
        self.manifest
            .files
            .iter()
            .map(|file| {
                let template = format!("{}/{}", self.manifest.name, file.source);
                let content = self.renderer.render(&template, context)?;
                let artifact = Artifact::new(root.join(&file.destination), content);
                debug!(template = %template, destination = %file.destination, "Rendered template");
                Ok(if file.executable {
                    artifact.executable()
                } else {
                    artifact
                })
            })
            .collect()
    }

    /// Render and write. Stops at the first failing write.
    pub async fn emit(&self, root: &Path, context: &RenderContext) -> Result<Vec<Artifact>> {
        info!(
            template = %self.manifest.name,
            root = %root.display(),
            file_count = self.manifest.files.len(),
            "Emitting template"
        );

        let artifacts = self.plan(root, context)?;
        self.output.write_artifacts(&artifacts).await?;

        info!(template = %self.manifest.name, "Emission completed");
        Ok(artifacts)
    }
}
