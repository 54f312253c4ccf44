//! Storage ports implemented by the infrastructure layer

mod pages;
mod storage;

pub use pages::{fetch_message_pages, MessagePage};
pub use storage::{ChannelLoader, MetadataStore, RepoResult};
