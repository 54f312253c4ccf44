//! Thread reconstruction
//!
//! Turns a flat collection of channel messages into chronologically ordered
//! root messages, each with its chronologically ordered replies.

mod assembler;
mod view;

pub use assembler::{assemble, repair_timestamp};
pub use view::{ThreadRow, ThreadView};
