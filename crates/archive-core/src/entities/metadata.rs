//! Channel metadata - cached per-channel message counts for one workspace
//!
//! A `WorkspaceMetadata` is treated as an immutable snapshot: updates build a
//! new value instead of mutating one that other readers may hold.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::value_objects::ChannelKey;

/// Name of the per-workspace metadata document
pub const METADATA_FILE_NAME: &str = "channel-metadata.json";

/// Suffix shared by message-page files
pub const PAGE_SUFFIX: &str = ".json";

/// Check if a channel directory entry is a message page
pub fn is_message_page(file_name: &str) -> bool {
    file_name.ends_with(PAGE_SUFFIX) && file_name != METADATA_FILE_NAME
}

/// Cached count for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetadata {
    pub message_count: u64,
    pub last_counted: DateTime<Utc>,
}

impl ChannelMetadata {
    /// Create an entry counted now
    pub fn counted_now(message_count: u64) -> Self {
        Self {
            message_count,
            last_counted: Utc::now(),
        }
    }
}

/// Metadata document for one workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    #[serde(deserialize_with = "normalized_channels")]
    pub channels: BTreeMap<ChannelKey, ChannelMetadata>,
}

/// Channel entries keyed by normalized name
///
/// Names that normalize to the same key keep the most recently counted entry.
fn normalized_channels<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<ChannelKey, ChannelMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, ChannelMetadata>::deserialize(deserializer)?;

    let mut channels: BTreeMap<ChannelKey, ChannelMetadata> = BTreeMap::new();
    for (name, entry) in raw {
        let key = ChannelKey::new(&name);
        match channels.get(&key) {
            Some(kept) => {
                tracing::warn!(
                    channel = %name,
                    key = %key,
                    "duplicate channel entry in metadata document"
                );
                if entry.last_counted > kept.last_counted {
                    channels.insert(key, entry);
                }
            }
            None => {
                channels.insert(key, entry);
            }
        }
    }
    Ok(channels)
}

impl WorkspaceMetadata {
    /// Empty metadata, used when no durable copy exists
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and decode a metadata document
    ///
    /// A document without a `channels` object is a format error, not an empty
    /// workspace.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        match value.get("channels") {
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(DomainError::MetadataFormat(
                    "`channels` must be an object".to_string(),
                ))
            }
            None => {
                return Err(DomainError::MetadataFormat(
                    "missing `channels` field".to_string(),
                ))
            }
        }

        serde_json::from_value(value).map_err(|e| DomainError::MetadataFormat(e.to_string()))
    }

    /// Look up a channel entry
    pub fn get(&self, key: &ChannelKey) -> Option<&ChannelMetadata> {
        self.channels.get(key)
    }

    /// New snapshot with `key` set to `entry`
    #[must_use]
    pub fn with_channel(&self, key: ChannelKey, entry: ChannelMetadata) -> Self {
        let mut channels = self.channels.clone();
        channels.insert(key, entry);
        Self { channels }
    }

    /// New snapshot without `key`
    #[must_use]
    pub fn without_channel(&self, key: &ChannelKey) -> Self {
        let mut channels = self.channels.clone();
        channels.remove(key);
        Self { channels }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
