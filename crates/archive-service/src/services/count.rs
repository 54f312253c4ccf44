//! Count service
//!
//! Message counts per channel, backed by the count cache.

use tracing::{info, instrument};

use crate::dto::{
    CountBatchRequest, CountBatchResponse, CountResultResponse, MessageCountResponse,
    WorkspaceMetadataResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Count service
pub struct CountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CountService<'a> {
    /// Create a new CountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Message count for one channel
    #[instrument(skip(self))]
    pub async fn get_count(
        &self,
        workspace: &str,
        channel: &str,
    ) -> ServiceResult<MessageCountResponse> {
        let count = self
            .ctx
            .count_cache()
            .get_message_count(workspace, channel)
            .await?;

        Ok(MessageCountResponse::new(channel, &count))
    }

    /// Counts for several channels; failures are reported per channel
    #[instrument(skip(self, request), fields(channels = request.channels.len()))]
    pub async fn get_counts(
        &self,
        workspace: &str,
        request: CountBatchRequest,
    ) -> ServiceResult<CountBatchResponse> {
        let results = self
            .ctx
            .count_cache()
            .get_message_counts(workspace, &request.channels)
            .await;

        let results: Vec<CountResultResponse> =
            results.into_iter().map(CountResultResponse::from).collect();
        let failed = results
            .iter()
            .filter(|r| matches!(r, CountResultResponse::Failed { .. }))
            .count();
        if failed > 0 {
            info!(workspace = %workspace, failed, "batch count finished with failures");
        }

        Ok(CountBatchResponse { results })
    }

    /// Forget cached counts for one channel, or the whole workspace
    #[instrument(skip(self))]
    pub async fn clear(&self, workspace: &str, channel: Option<&str>) -> ServiceResult<()> {
        self.ctx
            .count_cache()
            .clear_metadata(workspace, channel)
            .await?;
        Ok(())
    }

    /// What the cache currently holds for a workspace
    pub fn metadata(&self, workspace: &str) -> WorkspaceMetadataResponse {
        let cache = self.ctx.count_cache();
        let snapshot = cache.snapshot(workspace);
        let last_error = cache
            .last_error()
            .filter(|err| err.workspace() == workspace);

        WorkspaceMetadataResponse::new(workspace, snapshot.as_deref(), last_error.as_ref())
    }
}
