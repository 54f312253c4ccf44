//! Integration test utilities for the archive server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API over a scratch archive directory.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
