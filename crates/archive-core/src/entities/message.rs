//! Message entity - one record from a channel's message-page file

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Archived chat message
///
/// Field names follow the export format. Unknown fields are kept in `extra`
/// so a message serializes back with everything it was read with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_msg_id: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    /// Decimal seconds; doubles as the message id within a channel
    #[serde(default, deserialize_with = "lenient_string")]
    pub ts: String,
    /// Timestamp of the thread root when this message belongs to a thread
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub thread_ts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<Attachment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_kind() -> String {
    "message".to_string()
}

impl Message {
    /// Create a new Message
    pub fn new(ts: impl Into<String>, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            client_msg_id: None,
            kind: default_kind(),
            user: user.into(),
            text: text.into(),
            ts: ts.into(),
            thread_ts: None,
            reply_count: None,
            reactions: Vec::new(),
            files: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Mark this message as part of the thread rooted at `root_ts`
    pub fn in_thread(mut self, root_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(root_ts.into());
        self
    }

    /// Attach a file
    pub fn with_file(mut self, file: Attachment) -> Self {
        self.files.push(file);
        self
    }

    /// Check if message is a thread reply
    ///
    /// A thread root carries `thread_ts` equal to its own `ts` and is not a reply.
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.thread_root().is_some()
    }

    /// Timestamp of the root this message replies to, if it is a reply
    pub fn thread_root(&self) -> Option<&str> {
        self.thread_ts
            .as_deref()
            .filter(|root| *root != self.ts.as_str())
    }

    /// Check if the message carries a non-empty timestamp
    #[inline]
    pub fn has_timestamp(&self) -> bool {
        !self.ts.trim().is_empty()
    }

    /// Creation time of the first attachment, used when `ts` is absent
    pub fn attachment_created(&self) -> Option<&str> {
        self.files
            .first()
            .and_then(|file| file.created.as_deref())
            .map(str::trim)
            .filter(|created| !created.is_empty())
    }
}

/// File attachment on a message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_private: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Upload time; exports encode it as either a number or a string
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attachment {
    /// Create an attachment with only a creation time
    pub fn created_at(created: impl Into<String>) -> Self {
        Self {
            created: Some(created.into()),
            ..Self::default()
        }
    }
}

/// Emoji reaction summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub users: Vec<String>,
}

/// String-or-number field as found in exports
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Text(String),
    Number(serde_json::Number),
}

impl Lenient {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lenient>::deserialize(deserializer)?
        .map(Lenient::into_string)
        .unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lenient>::deserialize(deserializer)?.map(Lenient::into_string))
}
