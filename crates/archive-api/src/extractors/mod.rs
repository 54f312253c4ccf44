//! Axum extractors for request handling
//!
//! Custom extractors for path segments and validated JSON bodies.

mod path;
mod validated;

pub use path::{ArchivePath, ChannelPath, WorkspacePath};
pub use validated::ValidatedJson;
