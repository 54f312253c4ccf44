//! Thread service
//!
//! Builds the two-level thread view of a channel.

use archive_core::{assemble, ThreadView};
use tracing::{debug, instrument};

use crate::dto::ThreadViewResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::messages::load_channel_messages;

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Assemble every message of a channel into threads
    #[instrument(skip(self))]
    pub async fn load_view(&self, workspace: &str, channel: &str) -> ServiceResult<ThreadView> {
        let messages = load_channel_messages(self.ctx.loader(), workspace, channel).await?;
        let total = messages.len();

        let view = assemble(messages);
        if view.dropped > 0 {
            debug!(
                workspace = %workspace,
                channel = %channel,
                dropped = view.dropped,
                "messages without a usable timestamp dropped"
            );
        }
        debug!(
            workspace = %workspace,
            channel = %channel,
            total,
            roots = view.roots.len(),
            "threads assembled"
        );
        Ok(view)
    }

    /// Thread view of a channel as an API response
    pub async fn get_threads(
        &self,
        workspace: &str,
        channel: &str,
    ) -> ServiceResult<ThreadViewResponse> {
        let view = self.load_view(workspace, channel).await?;
        Ok(ThreadViewResponse::new(channel, view))
    }
}
