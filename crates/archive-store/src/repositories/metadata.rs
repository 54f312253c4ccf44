//! Filesystem implementation of MetadataStore

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::instrument;

use archive_core::{DomainError, MetadataStore, RepoResult, WorkspaceMetadata};

use crate::layout::ArchiveLayout;

use super::error::{map_io_error, map_not_found, workspace_not_found};

/// Stores each workspace's metadata as `channel-metadata.json` in its directory
#[derive(Debug, Clone)]
pub struct FsMetadataStore {
    layout: ArchiveLayout,
}

impl FsMetadataStore {
    /// Create a new FsMetadataStore
    pub fn new(layout: ArchiveLayout) -> Self {
        Self { layout }
    }

    /// The workspace directory, which must already exist
    async fn existing_workspace_dir(&self, workspace: &str) -> RepoResult<PathBuf> {
        let dir = self.layout.workspace_dir(workspace)?;

        let is_dir = fs::metadata(&dir)
            .await
            .map_err(|e| map_not_found(&dir, &e, || workspace_not_found(workspace)))?
            .is_dir();
        if !is_dir {
            return Err(workspace_not_found(workspace));
        }
        Ok(dir)
    }
}

#[async_trait]
impl MetadataStore for FsMetadataStore {
    /// A workspace directory without a document reads as `None`; a missing
    /// workspace directory is `WorkspaceNotFound`
    #[instrument(skip(self))]
    async fn read(&self, workspace: &str) -> RepoResult<Option<WorkspaceMetadata>> {
        let path = self.layout.metadata_path(workspace)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.existing_workspace_dir(workspace).await?;
                tracing::debug!(workspace = %workspace, "no metadata document yet");
                return Ok(None);
            }
            Err(e) => return Err(map_io_error(&path, &e)),
        };

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::MetadataFormat(e.to_string()))?;
        WorkspaceMetadata::from_json(value).map(Some)
    }

    #[instrument(skip(self, metadata), fields(channels = metadata.len()))]
    async fn write(&self, workspace: &str, metadata: &WorkspaceMetadata) -> RepoResult<()> {
        let dir = self.existing_workspace_dir(workspace).await?;

        let body = serde_json::to_vec_pretty(metadata)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        let path = self.layout.metadata_path(workspace)?;
        let tmp = dir.join(format!(".{}.tmp", uuid::Uuid::new_v4()));

        fs::write(&tmp, &body)
            .await
            .map_err(|e| map_io_error(&tmp, &e))?;

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(map_io_error(&path, &e));
        }

        tracing::debug!(workspace = %workspace, bytes = body.len(), "metadata written");
        Ok(())
    }
}
