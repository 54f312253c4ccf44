//! # archive-cache
//!
//! In-memory cache of per-channel message counts, backed by the workspace
//! metadata document.
//!
//! ## Features
//!
//! - **Single-flight loads**: concurrent first requests for a workspace share
//!   one store read
//! - **Lazy counting**: a channel missing from the document is counted from
//!   its pages once, then written back
//! - **Invalidation**: clear one channel or a whole workspace
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use archive_cache::CountCache;
//! use archive_store::{ArchiveLayout, FsChannelLoader, FsMetadataStore};
//!
//! let layout = ArchiveLayout::new("./public/data");
//! let cache = CountCache::new(
//!     Arc::new(FsMetadataStore::new(layout.clone())),
//!     Arc::new(FsChannelLoader::new(layout)),
//! );
//!
//! let count = cache.get_message_count("acme", "general").await?;
//! println!("{} messages", count.count);
//! ```

pub mod count;
pub mod error;

pub use count::{count_channel_messages, CountCache, CountSource, MessageCount};
pub use error::{CacheError, CacheResult};
