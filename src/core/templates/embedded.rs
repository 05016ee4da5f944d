//! Templates embedded in the binary.
//!
//! The `templates/` directory is compiled in with `rust-embed`, so
//! `relsite` works right after `cargo install` and every run of a given binary
//! renders byte-identical output. Bundles are the top-level directories that
//! contain a `manifest.yml`.

use std::collections::BTreeSet;

use rust_embed::RustEmbed;

use crate::core::templates::manifest::{MANIFEST_FILE, TemplateManifest};
use crate::core::templates::repository::{TemplateFile, TemplateMetadata, TemplateRepository};

/// Container for all templates embedded at compile time.
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct EmbeddedTemplates;

/// `TemplateRepository` reading from the embedded files
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateRepository;

impl EmbeddedTemplateRepository {
    pub fn new() -> Self {
        Self
    }

    fn description(name: &str) -> Option<String> {
        let data = EmbeddedTemplates::get(&format!("{name}/{MANIFEST_FILE}"))?;
        let content = std::str::from_utf8(data.data.as_ref()).ok()?;
        TemplateManifest::parse(content).ok()?.description
    }
}

impl TemplateRepository for EmbeddedTemplateRepository {
    fn list_templates(&self) -> Vec<TemplateMetadata> {
        let names: BTreeSet<String> = EmbeddedTemplates::iter()
            .filter_map(|path| {
                let (name, rest) = path.split_once('/')?;
                (rest == MANIFEST_FILE).then(|| name.to_string())
            })
            .collect();

        names
            .into_iter()
            .map(|name| TemplateMetadata {
                description: Self::description(&name),
                name,
            })
            .collect()
    }

    fn get_template_files(&self, name: &str) -> Vec<TemplateFile> {
        let prefix = format!("{name}/");
        let mut files: Vec<TemplateFile> = EmbeddedTemplates::iter()
            .filter_map(|path| {
                let relative_path = path.strip_prefix(&prefix)?.to_string();
                let embedded = EmbeddedTemplates::get(&path)?;
                Some(TemplateFile {
                    relative_path,
                    contents: embedded.data.to_vec(),
                })
            })
            .collect();
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        files
    }
}
