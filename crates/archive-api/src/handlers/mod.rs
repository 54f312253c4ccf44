//! HTTP request handlers
//!
//! Handlers are organized by resource and delegate to the service layer.

pub mod counts;
pub mod health;
pub mod metadata;
pub mod threads;
