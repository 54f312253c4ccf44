//! Business logic services
//!
//! Orchestrates the count cache, the channel loader and thread assembly.

pub mod context;
pub mod count;
pub mod error;
pub mod messages;
pub mod thread;


// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use count::CountService;
pub use error::{ServiceError, ServiceResult};
pub use messages::load_channel_messages;
pub use thread::ThreadService;
