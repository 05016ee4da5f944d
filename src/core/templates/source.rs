//! Template sources: the embedded bundles or a directory on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::{Error, Result};
use crate::core::templates::embedded::EmbeddedTemplateRepository;
use crate::core::templates::manifest::{MANIFEST_FILE, TemplateManifest};
use crate::core::templates::repository::{TemplateFile, TemplateMetadata, TemplateRepository};

/// Where templates are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    #[default]
    Embedded,
    /// A directory laid out like `relsite templates export` output
    FileSystem(PathBuf),
}

impl TemplateSource {
    pub fn from_option(template_dir: Option<PathBuf>) -> Self {
        template_dir.map_or(Self::Embedded, Self::FileSystem)
    }

    /// Open a repository for this source.
    pub fn repository(&self) -> Result<Box<dyn TemplateRepository>> {
        match self {
            Self::Embedded => Ok(Box::new(EmbeddedTemplateRepository::new())),
            Self::FileSystem(path) => Ok(Box::new(FileSystemTemplateRepository::open(path)?)),
        }
    }
}

/// `TemplateRepository` over a directory of bundles
#[derive(Debug, Clone)]
pub struct FileSystemTemplateRepository {
    root: PathBuf,
}

impl FileSystemTemplateRepository {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::template(format!(
                "Template directory not found: {}",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }
}

impl TemplateRepository for FileSystemTemplateRepository {
    fn list_templates(&self) -> Vec<TemplateMetadata> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut templates: Vec<TemplateMetadata> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(MANIFEST_FILE).is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let description = std::fs::read_to_string(entry.path().join(MANIFEST_FILE))
                    .ok()
                    .and_then(|content| TemplateManifest::parse(&content).ok())
                    .and_then(|manifest| manifest.description);
                Some(TemplateMetadata { name, description })
            })
            .collect();

        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    fn get_template_files(&self, name: &str) -> Vec<TemplateFile> {
        let bundle_root = self.root.join(name);
        let mut files = Vec::new();

        for entry in WalkDir::new(&bundle_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Ok(relative) = entry.path().strip_prefix(&bundle_root) else {
                continue;
            };
            let relative_path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            match std::fs::read(entry.path()) {
                Ok(contents) => {
                    debug!(file = %entry.path().display(), "Loaded template file");
                    files.push(TemplateFile {
                        relative_path,
                        contents,
                    });
                }
                Err(e) => warn!(file = %entry.path().display(), error = %e, "Skipping unreadable template file"),
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        files
    }
}
