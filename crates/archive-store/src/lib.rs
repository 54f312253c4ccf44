//! # archive-store
//!
//! Storage layer implementing the archive-core ports over an exported
//! archive directory.
//!
//! ## Overview
//!
//! - Path layout and identifier validation
//! - `FsMetadataStore`: durable `channel-metadata.json` per workspace
//! - `FsChannelLoader`: channel directory listings and page files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use archive_store::{ArchiveLayout, FsChannelLoader, FsMetadataStore};
//! use archive_core::MetadataStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = ArchiveLayout::new("./public/data");
//!     let store = FsMetadataStore::new(layout.clone());
//!     let loader = FsChannelLoader::with_listing_cache(layout);
//!
//!     let metadata = store.read("acme").await?;
//!     Ok(())
//! }
//! ```

pub mod layout;
pub mod repositories;

// Re-export commonly used types
pub use layout::{validate_segment, ArchiveLayout};
pub use repositories::{FsChannelLoader, FsMetadataStore};
