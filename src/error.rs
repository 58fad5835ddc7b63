//! Error type for the generation pipeline.
//!
//! Every failure on the request path, whether it comes from the client's
//! payload or from the language model, is reported the same way: status 400
//! with `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    // === Request errors ===
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid pair count '{0}': expected a positive integer")]
    InvalidPairCount(String),

    #[error("Pair count {requested} exceeds the maximum of {max}")]
    PairCountTooLarge { requested: u64, max: u32 },

    #[error("Unknown reading level '{key}' (expected one of: {expected})")]
    UnknownReadingLevel { key: String, expected: String },

    // === Sampling errors ===
    #[error("Cannot sample {requested} categories from a catalog of {available}")]
    CatalogTooSmall { requested: usize, available: usize },

    // === Language model errors ===
    #[error("No API key configured for the language model")]
    MissingApiKey,

    #[error("Language model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Language model returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Language model response contained no choices")]
    NoChoices,

    #[error("Language model refused the request: {0}")]
    Refusal(String),

    #[error("Malformed language model response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Whether the failure originated in the caller's payload.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBody(_)
                | Self::MissingField(_)
                | Self::InvalidField { .. }
                | Self::InvalidPairCount(_)
                | Self::PairCountTooLarge { .. }
                | Self::UnknownReadingLevel { .. }
        )
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::debug!(error = %self, "Rejected generation request");
        } else {
            tracing::warn!(error = %self, "Generation failed");
        }

        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
