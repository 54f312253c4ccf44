//! Thread view handlers

use archive_service::{ThreadService, ThreadViewResponse};
use axum::{extract::State, Json};

use crate::extractors::{ArchivePath, ChannelPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Every message of a channel assembled into threads
///
/// GET /api/v1/workspaces/:workspace/channels/:channel/threads
pub async fn get_threads(
    State(state): State<AppState>,
    ArchivePath(path): ArchivePath<ChannelPath>,
) -> ApiResult<Json<ThreadViewResponse>> {
    let service = ThreadService::new(state.service_context());
    let response = service
        .get_threads(path.workspace()?, path.channel()?)
        .await?;
    Ok(Json(response))
}
