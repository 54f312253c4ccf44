//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// `Clone` so a single failure can be handed to every waiter of a shared
/// in-flight operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Channel not found: {workspace}/{channel}")]
    ChannelNotFound { workspace: String, channel: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    // =========================================================================
    // Format Errors
    // =========================================================================
    #[error("Invalid metadata format: {0}")]
    MetadataFormat(String),

    #[error("Invalid page format in {file}: {reason}")]
    PageFormat { file: String, reason: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::WorkspaceNotFound(_) => "UNKNOWN_WORKSPACE",
            Self::ChannelNotFound { .. } => "UNKNOWN_CHANNEL",
            Self::FileNotFound(_) => "UNKNOWN_FILE",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::MetadataFormat(_) => "INVALID_METADATA_FORMAT",
            Self::PageFormat { .. } => "INVALID_PAGE_FORMAT",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkspaceNotFound(_) | Self::ChannelNotFound { .. } | Self::FileNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidIdentifier(_))
    }

    /// Check if this is a malformed-data error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::MetadataFormat(_) | Self::PageFormat { .. })
    }

    /// Check if this is a recoverable transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
