//! Path parameter extractors
//!
//! Workspace and channel names are checked here so that a bad segment
//! is rejected before it reaches the cache or the filesystem.

use archive_store::validate_segment;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::ApiError;

/// Extract path parameters, rejecting with an API error body
#[derive(Debug, Clone)]
pub struct ArchivePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ArchivePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ArchivePath(inner))
    }
}

/// Path parameters with workspace
#[derive(Debug, Deserialize)]
pub struct WorkspacePath {
    pub workspace: String,
}

impl WorkspacePath {
    /// Validated workspace name
    pub fn workspace(&self) -> Result<&str, ApiError> {
        Ok(validate_segment(&self.workspace)?)
    }
}

/// Path parameters with workspace and channel
#[derive(Debug, Deserialize)]
pub struct ChannelPath {
    pub workspace: String,
    pub channel: String,
}

impl ChannelPath {
    /// Validated workspace name
    pub fn workspace(&self) -> Result<&str, ApiError> {
        Ok(validate_segment(&self.workspace)?)
    }

    /// Validated channel name
    pub fn channel(&self) -> Result<&str, ApiError> {
        Ok(validate_segment(&self.channel)?)
    }
}
