//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from cache and domain results to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{ClearMetadataQuery, CountBatchRequest, MAX_BATCH_CHANNELS};

pub use responses::{
    CountBatchResponse, CountResultResponse, ErrorBody, HealthChecks, HealthResponse,
    MessageCountResponse, ReadinessResponse, ThreadResponse, ThreadViewResponse,
    WorkspaceMetadataResponse,
};
