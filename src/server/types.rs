//! Response body types for the JSON endpoints.

use serde::Serialize;

/// Error payload returned with a server-error status when the pipeline
/// fails. Identifies the operation and carries a human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn feed_generation(message: impl Into<String>) -> Self {
        Self {
            error: "Failed to generate RSS feed".to_string(),
            message: message.into(),
        }
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}
