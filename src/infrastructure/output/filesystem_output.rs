//! Filesystem-based output service implementation

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::generation::{Artifact, OutputService};

/// Output service that writes artifacts to the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<()> {
        for artifact in artifacts {
            if let Some(parent) = artifact.path.parent() {
                self.ensure_directory(parent).await?;
            }

            // Truncates any previous content
            let mut file = fs::File::create(&artifact.path).await.map_err(|e| {
                Error::output(format!(
                    "Failed to create file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            file.write_all(artifact.content.as_bytes())
                .await
                .map_err(|e| {
                    Error::output(format!(
                        "Failed to write file {}: {}",
                        artifact.path.display(),
                        e
                    ))
                })?;

            file.flush().await.map_err(|e| {
                Error::output(format!(
                    "Failed to flush file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            #[cfg(unix)]
            if let Some(mode) = artifact.permissions {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(mode);
                fs::set_permissions(&artifact.path, permissions)
                    .await
                    .map_err(|e| {
                        Error::output(format!(
                            "Failed to set permissions on {}: {}",
                            artifact.path.display(),
                            e
                        ))
                    })?;
            }

            debug!(path = %artifact.path.display(), bytes = artifact.content.len(), "Wrote artifact");
        }

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(path).await.map_err(|e| {
            Error::output(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent() {
            self.ensure_directory(parent).await?;
        }
        fs::copy(from, to).await.map_err(|e| {
            Error::output(format!(
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;
        debug!(from = %from.display(), to = %to.display(), "Copied file");
        Ok(())
    }
}
