//! Page enumeration over a `ChannelLoader`

use futures::future::join_all;
use serde_json::Value;

use super::storage::{ChannelLoader, RepoResult};
use crate::entities::is_message_page;

/// One readable message page
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePage {
    pub name: String,
    pub entries: Vec<Value>,
}

/// Fetch every message page of a channel, in file-name order
///
/// Failing to list the channel is an error. A page that cannot be fetched,
/// or is not a JSON array, is skipped with a warning.
pub async fn fetch_message_pages(
    loader: &dyn ChannelLoader,
    workspace: &str,
    channel: &str,
) -> RepoResult<Vec<MessagePage>> {
    let mut names: Vec<String> = loader
        .list_channel_files(workspace, channel)
        .await?
        .into_iter()
        .filter(|name| is_message_page(name))
        .collect();
    names.sort();

    let fetched = join_all(
        names
            .iter()
            .map(|name| loader.fetch_file(workspace, channel, name)),
    )
    .await;

    let mut pages = Vec::with_capacity(names.len());
    for (name, result) in names.into_iter().zip(fetched) {
        match result {
            Ok(Value::Array(entries)) => pages.push(MessagePage { name, entries }),
            Ok(_) => {
                tracing::warn!(workspace = %workspace, channel = %channel, page = %name, "page is not a message array, skipped");
            }
            Err(e) => {
                tracing::warn!(workspace = %workspace, channel = %channel, page = %name, error = %e, "failed to load page, skipped");
            }
        }
    }
    Ok(pages)
}
