//! Template store: embedded bundles, on-disk overrides, manifests and export.

pub mod embedded;
pub mod manifest;
pub mod repository;
pub mod source;

pub use embedded::{EmbeddedTemplateRepository, EmbeddedTemplates};
pub use manifest::{MANIFEST_FILE, ManifestFile, TemplateManifest};
pub use repository::{
    RepositoryExporter, TemplateExporter, TemplateFile, TemplateMetadata, TemplateRepository,
};
pub use source::{FileSystemTemplateRepository, TemplateSource};
