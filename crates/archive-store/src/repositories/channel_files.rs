//! Filesystem implementation of ChannelLoader

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::fs;
use tracing::instrument;

use archive_core::{ChannelLoader, DomainError, RepoResult};

use crate::layout::ArchiveLayout;

use super::error::{channel_not_found, file_not_found, map_io_error, map_not_found};

/// Reads channel page files from `<data_root>/<workspace>/<channel>/`
#[derive(Debug)]
pub struct FsChannelLoader {
    layout: ArchiveLayout,
    /// Directory listings keyed by `workspace:channel`, when enabled
    listings: Option<DashMap<String, Vec<String>>>,
}

impl FsChannelLoader {
    /// Create a loader without a listing cache
    pub fn new(layout: ArchiveLayout) -> Self {
        Self {
            layout,
            listings: None,
        }
    }

    /// Create a loader that remembers directory listings until `clear_cache`
    pub fn with_listing_cache(layout: ArchiveLayout) -> Self {
        Self {
            layout,
            listings: Some(DashMap::new()),
        }
    }

    /// Number of cached listings
    pub fn cached_listings(&self) -> usize {
        self.listings.as_ref().map_or(0, DashMap::len)
    }

    async fn read_listing(&self, workspace: &str, channel: &str) -> RepoResult<Vec<String>> {
        let dir = self.layout.channel_dir(workspace, channel)?;

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| map_not_found(&dir, &e, || channel_not_found(workspace, channel)))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| map_io_error(&dir, &e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| map_io_error(&entry.path(), &e))?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

fn listing_key(workspace: &str, channel: &str) -> String {
    format!("{workspace}:{channel}")
}

#[async_trait]
impl ChannelLoader for FsChannelLoader {
    #[instrument(skip(self))]
    async fn list_channel_files(&self, workspace: &str, channel: &str) -> RepoResult<Vec<String>> {
        let key = listing_key(workspace, channel);

        if let Some(names) = self
            .listings
            .as_ref()
            .and_then(|listings| listings.get(&key).map(|entry| entry.value().clone()))
        {
            tracing::trace!(key = %key, "listing cache hit");
            return Ok(names);
        }

        let names = self.read_listing(workspace, channel).await?;
        tracing::debug!(key = %key, files = names.len(), "listed channel directory");

        if let Some(listings) = &self.listings {
            listings.insert(key, names.clone());
        }
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn fetch_file(&self, workspace: &str, channel: &str, file_name: &str) -> RepoResult<Value> {
        let path = self.layout.page_path(workspace, channel, file_name)?;

        let bytes = fs::read(&path)
            .await
            .map_err(|e| map_not_found(&path, &e, || file_not_found(&path)))?;

        serde_json::from_slice(&bytes).map_err(|e| DomainError::PageFormat {
            file: file_name.to_string(),
            reason: e.to_string(),
        })
    }

    fn clear_cache(&self) {
        if let Some(listings) = &self.listings {
            tracing::debug!(entries = listings.len(), "clearing listing cache");
            listings.clear();
        }
    }

    fn forget_listing(&self, workspace: &str, channel: &str) {
        if let Some(listings) = &self.listings {
            listings.remove(&listing_key(workspace, channel));
        }
    }
}
