//! Workspace metadata handlers

use archive_service::{ClearMetadataQuery, CountService, WorkspaceMetadataResponse};
use archive_store::validate_segment;
use axum::{
    extract::{Query, State},
    Json,
};

use crate::extractors::{ArchivePath, WorkspacePath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Cached metadata of a workspace; never triggers a load
///
/// GET /api/v1/workspaces/:workspace/metadata
pub async fn get_metadata(
    State(state): State<AppState>,
    ArchivePath(path): ArchivePath<WorkspacePath>,
) -> ApiResult<Json<WorkspaceMetadataResponse>> {
    let service = CountService::new(state.service_context());
    Ok(Json(service.metadata(path.workspace()?)))
}

/// Forget cached counts of one channel, or of the whole workspace
///
/// DELETE /api/v1/workspaces/:workspace/metadata[?channel=name]
pub async fn clear_metadata(
    State(state): State<AppState>,
    ArchivePath(path): ArchivePath<WorkspacePath>,
    Query(query): Query<ClearMetadataQuery>,
) -> ApiResult<NoContent> {
    let workspace = path.workspace()?;
    let channel = query.channel.as_deref().map(validate_segment).transpose()?;

    let service = CountService::new(state.service_context());
    service.clear(workspace, channel).await?;
    Ok(NoContent)
}
