//! Storage ports - define the interface for reaching archived data
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (filesystem, HTTP, in-memory fakes in tests).

use async_trait::async_trait;
use serde_json::Value;

use crate::entities::WorkspaceMetadata;
use crate::error::DomainError;

/// Result type for storage operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Metadata Store
// ============================================================================

/// Durable per-workspace metadata documents
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Read the workspace document; `Ok(None)` when none has been written
    async fn read(&self, workspace: &str) -> RepoResult<Option<WorkspaceMetadata>>;

    /// Replace the workspace document wholesale
    async fn write(&self, workspace: &str, metadata: &WorkspaceMetadata) -> RepoResult<()>;
}

// ============================================================================
// Channel Loader
// ============================================================================

/// Access to the raw files of a channel directory
#[async_trait]
pub trait ChannelLoader: Send + Sync {
    /// List file names in the channel directory, in no particular order
    async fn list_channel_files(&self, workspace: &str, channel: &str) -> RepoResult<Vec<String>>;

    /// Fetch and parse one file
    async fn fetch_file(&self, workspace: &str, channel: &str, file_name: &str)
        -> RepoResult<Value>;

    /// Drop any cached directory listings; loaders without a cache ignore this
    fn clear_cache(&self) {}

    /// Drop the cached listing of one channel
    fn forget_listing(&self, _workspace: &str, _channel: &str) {}
}
