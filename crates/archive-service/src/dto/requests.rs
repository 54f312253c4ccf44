//! Request DTOs for API endpoints
//!
//! Request bodies implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Most channels accepted in one batch count request
pub const MAX_BATCH_CHANNELS: u64 = 200;

// ============================================================================
// Count Requests
// ============================================================================

/// Count several channels of one workspace
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CountBatchRequest {
    #[validate(
        length(min = 1, max = 200, message = "channels must list 1-200 names"),
        custom(function = "validate_channel_names")
    )]
    pub channels: Vec<String>,
}

fn validate_channel_names(channels: &[String]) -> Result<(), ValidationError> {
    if channels.iter().any(|name| name.trim().is_empty()) {
        let mut err = ValidationError::new("blank_channel");
        err.message = Some("channel names must not be blank".into());
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Metadata Requests
// ============================================================================

/// Query for clearing cached counts; no channel clears the whole workspace
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearMetadataQuery {
    pub channel: Option<String>,
}
