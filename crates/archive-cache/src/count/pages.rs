//! Counting messages across a channel's page files

use archive_core::{fetch_message_pages, ChannelLoader, RepoResult};

/// Total number of messages over every readable page of a channel
pub async fn count_channel_messages(
    loader: &dyn ChannelLoader,
    workspace: &str,
    channel: &str,
) -> RepoResult<u64> {
    let pages = fetch_message_pages(loader, workspace, channel).await?;
    let total = pages.iter().map(|page| page.entries.len() as u64).sum();

    tracing::debug!(
        workspace = %workspace,
        channel = %channel,
        pages = pages.len(),
        total,
        "counted channel messages"
    );
    Ok(total)
}
