//! Value objects - immutable types that represent domain concepts

mod channel_key;
mod timestamp;

pub use channel_key::ChannelKey;
pub use timestamp::{Timestamp, TimestampError};
