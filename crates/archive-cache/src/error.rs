//! Cache errors
//!
//! Every variant carries the underlying `DomainError` and is `Clone`, so one
//! failure can be delivered to all waiters of a shared load or count.

use archive_core::DomainError;
use thiserror::Error;

/// Count cache errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("failed to load metadata for workspace {workspace}: {source}")]
    Load {
        workspace: String,
        source: DomainError,
    },

    #[error("failed to count messages in {workspace}/{channel}: {source}")]
    Count {
        workspace: String,
        channel: String,
        source: DomainError,
    },

    #[error("failed to persist metadata for workspace {workspace}: {source}")]
    Persist {
        workspace: String,
        source: DomainError,
    },
}

impl CacheError {
    /// Underlying domain error
    pub fn domain(&self) -> &DomainError {
        match self {
            Self::Load { source, .. } | Self::Count { source, .. } | Self::Persist { source, .. } => {
                source
            }
        }
    }

    /// Workspace the failure belongs to
    pub fn workspace(&self) -> &str {
        match self {
            Self::Load { workspace, .. }
            | Self::Count { workspace, .. }
            | Self::Persist { workspace, .. } => workspace,
        }
    }

    /// Stage name for logs and API payloads
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::Count { .. } => "count",
            Self::Persist { .. } => "persist",
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        self.domain().code()
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
