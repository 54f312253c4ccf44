//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names are
//! camelCase to match the metadata document.

use std::collections::BTreeMap;

use archive_core::{ChannelMetadata, Message};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Count Responses
// ============================================================================

/// Count for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCountResponse {
    pub channel: String,
    pub message_count: u64,
    /// Served from the metadata document without recounting
    pub cached: bool,
    /// Durable in the metadata document
    pub persisted: bool,
}

/// Error detail embedded in a batch result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One channel's outcome in a batch count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CountResultResponse {
    Counted(MessageCountResponse),
    Failed { channel: String, error: ErrorBody },
}

impl CountResultResponse {
    pub fn channel(&self) -> &str {
        match self {
            Self::Counted(count) => &count.channel,
            Self::Failed { channel, .. } => channel,
        }
    }
}

/// Batch count results, in request order
#[derive(Debug, Clone, Serialize)]
pub struct CountBatchResponse {
    pub results: Vec<CountResultResponse>,
}

/// Cached metadata of a workspace
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMetadataResponse {
    pub workspace: String,
    pub loaded: bool,
    pub channels: BTreeMap<String, ChannelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<ErrorBody>,
}

// ============================================================================
// Thread Responses
// ============================================================================

/// A root message with its replies
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub message: Message,
    pub reply_count: usize,
    pub replies: Vec<Message>,
}

/// Assembled threads of a channel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadViewResponse {
    pub channel: String,
    pub roots: Vec<ThreadResponse>,
    /// Messages without a usable timestamp
    pub dropped_count: usize,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status of each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub data_root: String,
}

impl ReadinessResponse {
    pub fn ready(data_root_healthy: bool) -> Self {
        Self {
            status: if data_root_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                data_root: if data_root_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
