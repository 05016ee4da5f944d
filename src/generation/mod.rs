//! Generation domain - renders template bundles into files
//!
//! The `site` bundle is the scaffold itself: two locale pages, the root
//! landing page, the release workflow, the deployment README and the pages
//! helper script. [`scaffold`] wires the embedded (or overridden) templates,
//! the tera renderer and the filesystem output together and emits it.

pub mod context;
pub mod emitter;
pub mod traits;
pub mod types;

pub use context::*;
pub use emitter::*;
pub use traits::*;
pub use types::*;

use std::path::Path;
use std::sync::Arc;

use crate::core::config::SiteConfig;
use crate::core::error::Result;
use crate::core::templates::TemplateSource;
use crate::infrastructure::generation::TeraTemplateRenderer;
use crate::infrastructure::output::FileSystemOutputService;

/// Bundle emitted by `relsite scaffold`
pub const SITE_TEMPLATE: &str = "site";

/// Emit the site scaffold under `root`.
///
/// Existing files at the same paths are overwritten; running twice yields
/// byte-identical output.
pub async fn scaffold(
    root: &Path,
    config: &SiteConfig,
    source: &TemplateSource,
) -> Result<Vec<Artifact>> {
    config.validate()?;
    let repository = source.repository()?;
    let renderer = Arc::new(TeraTemplateRenderer::from_repository(repository.as_ref())?);
    let manifest = repository.manifest(SITE_TEMPLATE)?;

    let emitter = Emitter::new(
        renderer,
        Arc::new(FileSystemOutputService::new()),
        manifest,
    );
    emitter.emit(root, &RenderContext::for_site(config)?).await
}
