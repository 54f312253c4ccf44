//! Reading every message of a channel

use archive_core::{fetch_message_pages, ChannelLoader, Message, RepoResult};

/// Concatenate the messages of every page in a channel
///
/// Pages are visited in file-name order. Entries that are not message
/// objects are skipped with a warning.
pub async fn load_channel_messages(
    loader: &dyn ChannelLoader,
    workspace: &str,
    channel: &str,
) -> RepoResult<Vec<Message>> {
    let pages = fetch_message_pages(loader, workspace, channel).await?;

    let mut messages = Vec::new();
    for page in pages {
        for entry in page.entries {
            match serde_json::from_value::<Message>(entry) {
                Ok(message) => messages.push(message),
                Err(e) => {
                    tracing::warn!(page = %page.name, error = %e, "unreadable message entry, skipped");
                }
            }
        }
    }

    Ok(messages)
}
