//! Repository implementations
//!
//! Filesystem implementations of the storage ports defined in archive-core.

mod channel_files;
mod error;
mod metadata;

pub use channel_files::FsChannelLoader;
pub use metadata::FsMetadataStore;
