//! Domain entities - archived messages and channel metadata

mod message;
mod metadata;

pub use message::{Attachment, Message, Reaction};
pub use metadata::{
    is_message_page, ChannelMetadata, WorkspaceMetadata, METADATA_FILE_NAME, PAGE_SUFFIX,
};
