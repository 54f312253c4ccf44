//! Message count handlers

use archive_service::{CountBatchRequest, CountBatchResponse, CountService, MessageCountResponse};
use axum::{extract::State, Json};

use crate::extractors::{ArchivePath, ChannelPath, ValidatedJson, WorkspacePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Message count of one channel, computed and cached on first request
///
/// GET /api/v1/workspaces/:workspace/channels/:channel/count
pub async fn get_count(
    State(state): State<AppState>,
    ArchivePath(path): ArchivePath<ChannelPath>,
) -> ApiResult<Json<MessageCountResponse>> {
    let service = CountService::new(state.service_context());
    let response = service.get_count(path.workspace()?, path.channel()?).await?;
    Ok(Json(response))
}

/// Message counts of several channels, failures reported per channel
///
/// POST /api/v1/workspaces/:workspace/counts
pub async fn get_counts(
    State(state): State<AppState>,
    ArchivePath(path): ArchivePath<WorkspacePath>,
    ValidatedJson(request): ValidatedJson<CountBatchRequest>,
) -> ApiResult<Json<CountBatchResponse>> {
    let service = CountService::new(state.service_context());
    let response = service.get_counts(path.workspace()?, request).await?;
    Ok(Json(response))
}
