//! Release bookkeeping for the published site.
//!
//! Publishing a release adds a `v<version>/` snapshot of the locale pages and
//! rewrites the root `index.html` so it lists every version directory newest
//! first, with the one just released marked LATEST. The emitted workflow does
//! this on the hosted runner; [`Releaser`] does the same thing in a local
//! working tree.

pub mod version;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::config::{LOCALES, SiteConfig};
use crate::core::error::{Error, Result};
use crate::core::templates::{TemplateManifest, TemplateSource};
use crate::generation::{Artifact, OutputService, RenderContext, TemplateRenderer};
use crate::infrastructure::generation::TeraTemplateRenderer;
use crate::infrastructure::output::FileSystemOutputService;

pub use version::{VersionKey, compare, sort_descending};

/// Bundle holding the per-version landing page
pub const RELEASE_TEMPLATE: &str = "release";

/// Root page template, shared with the scaffold
pub const ROOT_INDEX_TEMPLATE: &str = "site/index.html.tera";

pub const ROOT_INDEX_FILE: &str = "index.html";

/// Names a directory must match to be listed as a version
pub const VERSION_DIR_PATTERN: &str = r"^v[0-9][0-9A-Za-z._+-]*$";

static VERSION_DIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(VERSION_DIR_PATTERN).expect("version directory pattern is valid"));

pub fn is_version_dir(name: &str) -> bool {
    VERSION_DIR_RE.is_match(name)
}

/// Directory name for a release tag: `1.2.0` and `v1.2.0` both give `v1.2.0`.
pub fn version_dir_name(tag: &str) -> Result<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(Error::release("release tag cannot be empty"));
    }
    let number = tag.strip_prefix('v').unwrap_or(tag);
    let dir = format!("v{number}");
    if !is_version_dir(&dir) {
        return Err(Error::release(format!(
            "tag '{tag}' gives directory '{dir}', which does not match {VERSION_DIR_PATTERN}"
        )));
    }
    Ok(dir)
}

/// One line of the version list on the root page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Directory name, e.g. `v1.2.0`
    pub dir: String,
    /// Display number, e.g. `1.2.0`
    pub number: String,
    pub latest: bool,
}

impl VersionEntry {
    pub fn new(dir: &str, latest: bool) -> Self {
        Self {
            dir: dir.to_string(),
            number: dir.strip_prefix('v').unwrap_or(dir).to_string(),
            latest,
        }
    }
}

/// Version directories directly under `root`, newest first.
pub async fn discover_versions(root: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(root).await.map_err(|e| {
        Error::release(format!(
            "Failed to list version directories in {}: {}",
            root.display(),
            e
        ))
    })?;

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if is_version_dir(name) => names.push(name.to_string()),
            _ => {}
        }
    }

    sort_descending(&mut names);
    debug!(root = %root.display(), versions = ?names, "Discovered version directories");
    Ok(names)
}

/// Build the listing, flagging `current_dir` as latest.
pub fn version_entries<S: AsRef<str>>(names: &[S], current_dir: &str) -> Vec<VersionEntry> {
    let mut sorted: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    sort_descending(&mut sorted);
    sorted
        .into_iter()
        .map(|name| VersionEntry::new(name, name == current_dir))
        .collect()
}

/// What a release changed
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    pub version_dir: PathBuf,
    /// Every file written, snapshot first, root index last
    pub written: Vec<PathBuf>,
    pub versions: Vec<VersionEntry>,
}

/// Applies a release to a site working tree
pub struct Releaser {
    renderer: Arc<dyn TemplateRenderer>,
    output: Arc<dyn OutputService>,
    manifest: TemplateManifest,
    config: SiteConfig,
}

impl Releaser {
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        output: Arc<dyn OutputService>,
        manifest: TemplateManifest,
        config: SiteConfig,
    ) -> Self {
        Self {
            renderer,
            output,
            manifest,
            config,
        }
    }

    /// Copy the locale directories into the version directory and write its
    /// landing page. Returns the written paths.
    pub async fn snapshot(&self, root: &Path, tag: &str) -> Result<Vec<PathBuf>> {
        let dir = version_dir_name(tag)?;
        let version_root = root.join(&dir);
        let mut written = Vec::new();

        for locale in LOCALES {
            let source = root.join(locale);
            if !source.is_dir() {
                return Err(Error::release(format!(
                    "locale directory {} not found; run `relsite scaffold` first",
                    source.display()
                )));
            }

            for entry in WalkDir::new(&source).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    Error::release(format!("Failed to walk {}: {}", source.display(), e))
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&source)
                    .map_err(|e| Error::release(e.to_string()))?;
                let target = version_root.join(locale).join(relative);
                self.output.copy_file(entry.path(), &target).await?;
                written.push(target);
            }
        }

        let mut context = RenderContext::base(&self.config);
        context.add_variable("version_dir", JsonValue::from(dir.as_str()));
        context.add_variable("version", JsonValue::from(VersionEntry::new(&dir, true).number));

        let mut artifacts = Vec::with_capacity(self.manifest.files.len());
        for file in &self.manifest.files {
            let template = format!("{}/{}", self.manifest.name, file.source);
            let content = self.renderer.render(&template, &context)?;
            artifacts.push(Artifact::new(version_root.join(&file.destination), content));
        }
        self.output.write_artifacts(&artifacts).await?;
        written.extend(artifacts.into_iter().map(|a| a.path));

        info!(version_dir = %dir, file_count = written.len(), "Created version snapshot");
        Ok(written)
    }

    /// Rewrite the root page listing every version directory under `root`.
    pub async fn regenerate_index(&self, root: &Path, tag: &str) -> Result<Vec<VersionEntry>> {
        let current = version_dir_name(tag)?;
        let names = discover_versions(root).await?;
        if !names.contains(&current) {
            warn!(version_dir = %current, "Released version has no directory; nothing marked latest");
        }
        let versions = version_entries(&names, &current);

        let mut context = RenderContext::base(&self.config);
        context.add_serialized("versions", &versions)?;
        context.add_variable(
            "site_version",
            JsonValue::from(VersionEntry::new(&current, true).number),
        );

        let content = self.renderer.render(ROOT_INDEX_TEMPLATE, &context)?;
        self.output
            .write_artifacts(&[Artifact::new(root.join(ROOT_INDEX_FILE), content)])
            .await?;

        info!(version_count = versions.len(), latest = %current, "Regenerated root index");
        Ok(versions)
    }

    /// Snapshot, then regenerate the root page.
    pub async fn release(&self, root: &Path, tag: &str) -> Result<ReleaseSummary> {
        let version_dir = root.join(version_dir_name(tag)?);
        let mut written = self.snapshot(root, tag).await?;
        let versions = self.regenerate_index(root, tag).await?;
        written.push(root.join(ROOT_INDEX_FILE));

        Ok(ReleaseSummary {
            version_dir,
            written,
            versions,
        })
    }
}

/// Apply release `tag` to the site under `root`.
pub async fn release_site(
    root: &Path,
    tag: &str,
    config: &SiteConfig,
    source: &TemplateSource,
) -> Result<ReleaseSummary> {
    config.validate()?;
    let repository = source.repository()?;
    let renderer = Arc::new(TeraTemplateRenderer::from_repository(repository.as_ref())?);
    let manifest = repository.manifest(RELEASE_TEMPLATE)?;

    Releaser::new(
        renderer,
        Arc::new(FileSystemOutputService::new()),
        manifest,
        config.clone(),
    )
    .release(root, tag)
    .await
}
