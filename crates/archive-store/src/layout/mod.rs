//! On-disk layout of an exported archive
//!
//! ```text
//! <data_root>/<workspace>/channel-metadata.json
//! <data_root>/<workspace>/<channel>/<page>.json
//! ```

use std::path::{Path, PathBuf};

use archive_core::{DomainError, RepoResult, METADATA_FILE_NAME};

/// Resolves workspace, channel and page paths under a data root
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    root: PathBuf,
}

impl ArchiveLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn workspace_dir(&self, workspace: &str) -> RepoResult<PathBuf> {
        Ok(self.root.join(validate_segment(workspace)?))
    }

    pub fn metadata_path(&self, workspace: &str) -> RepoResult<PathBuf> {
        Ok(self.workspace_dir(workspace)?.join(METADATA_FILE_NAME))
    }

    pub fn channel_dir(&self, workspace: &str, channel: &str) -> RepoResult<PathBuf> {
        Ok(self.workspace_dir(workspace)?.join(validate_segment(channel)?))
    }

    pub fn page_path(&self, workspace: &str, channel: &str, file_name: &str) -> RepoResult<PathBuf> {
        Ok(self
            .channel_dir(workspace, channel)?
            .join(validate_segment(file_name)?))
    }
}

/// Accept `name` only if it is a single, non-traversing path segment
pub fn validate_segment(name: &str) -> RepoResult<&str> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(DomainError::InvalidIdentifier(name.to_string()));
    }
    Ok(name)
}
