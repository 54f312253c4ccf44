//! # archive-service
//!
//! Application layer: message counts, cache invalidation and thread views,
//! plus the DTOs served by the HTTP API.

pub mod dto;
pub mod services;

pub use services::{
    load_channel_messages, CountService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, ThreadService,
};

pub use dto::{
    ClearMetadataQuery, CountBatchRequest, CountBatchResponse, CountResultResponse,
    HealthResponse, MessageCountResponse, ReadinessResponse, ThreadViewResponse,
    WorkspaceMetadataResponse,
};
