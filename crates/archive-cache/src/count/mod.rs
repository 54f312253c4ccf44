//! Lazily computed, write-back message counts

mod cache;
mod pages;


pub use cache::{CountCache, CountSource, MessageCount};
pub use pages::count_channel_messages;
