//! # archive-core
//!
//! Domain layer for the chat archive viewer: message records, per-workspace
//! channel metadata, thread assembly, and the storage ports implemented by
//! infrastructure crates.
//! This crate has zero dependencies on infrastructure (filesystem, web framework, etc.).

pub mod entities;
pub mod error;
pub mod threads;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    is_message_page, Attachment, ChannelMetadata, Message, Reaction, WorkspaceMetadata,
    METADATA_FILE_NAME, PAGE_SUFFIX,
};
pub use error::DomainError;
pub use threads::{assemble, ThreadRow, ThreadView};
pub use traits::{fetch_message_pages, ChannelLoader, MessagePage, MetadataStore, RepoResult};
pub use value_objects::{ChannelKey, Timestamp, TimestampError};
