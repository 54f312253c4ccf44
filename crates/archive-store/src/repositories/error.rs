//! Error handling utilities for filesystem repositories

use std::io::{Error as IoError, ErrorKind};
use std::path::Path;

use archive_core::DomainError;

/// Convert an I/O error to DomainError
pub fn map_io_error(path: &Path, e: &IoError) -> DomainError {
    DomainError::Transport(format!("{}: {e}", path.display()))
}

/// Check for a missing path and return the given error, or the I/O fallback
pub fn map_not_found<F>(path: &Path, e: &IoError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if e.kind() == ErrorKind::NotFound {
        return on_missing();
    }
    map_io_error(path, e)
}

/// Create a "workspace not found" error
pub fn workspace_not_found(workspace: &str) -> DomainError {
    DomainError::WorkspaceNotFound(workspace.to_string())
}

/// Create a "channel not found" error
pub fn channel_not_found(workspace: &str, channel: &str) -> DomainError {
    DomainError::ChannelNotFound {
        workspace: workspace.to_string(),
        channel: channel.to_string(),
    }
}

/// Create a "file not found" error
pub fn file_not_found(path: &Path) -> DomainError {
    DomainError::FileNotFound(path.display().to_string())
}
