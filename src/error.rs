// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use utoipa::ToSchema;

use crate::provider::ProviderError;

pub const MISSING_API_KEY_MESSAGE: &str = "API key not configured on server.";
pub const BLOCKED_MESSAGE: &str = "API call blocked. Check server logs.";
pub const GENERATION_FAILED_MESSAGE: &str = "Generation failed. Check server logs.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Invalid or empty response from Gemini API.";
pub const INVALID_JSON_MESSAGE: &str = "Gemini API returned invalid JSON.";

/// Global Application Error Enum.
/// Every variant maps to a status code and a `{"error": ...}` body. Upstream
/// details stay in the logs; the client only sees the generic message.
#[derive(Debug)]
pub enum AppError {
    // 500: the provider credential is not configured
    MissingApiKey,

    // 502: the provider refused the prompt or output (block reason, details)
    UpstreamBlocked { reason: String, message: Option<String> },

    // 502: generation stopped for a reason other than STOP
    UpstreamAbnormalFinish { reason: String, message: Option<String> },

    // 502: no candidates and no diagnostic
    UpstreamEmpty,

    // 502: text was returned but does not parse as JSON (parse error, raw text)
    UpstreamInvalidJson { error: String, raw: String },

    // 500: anything unexpected; the message reaches the client
    InternalServerError(String),

    // 400: the caller named a model that is not offered
    BadRequest(String),
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Logs the diagnostic detail, then returns the public message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::MissingApiKey => {
                tracing::error!("GEMINI_API_KEY environment variable not set.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MISSING_API_KEY_MESSAGE.to_string(),
                )
            }
            AppError::UpstreamBlocked { reason, message } => {
                tracing::error!(
                    "API call blocked due to {}. Details: {}",
                    reason,
                    message.as_deref().unwrap_or("none")
                );
                (StatusCode::BAD_GATEWAY, BLOCKED_MESSAGE.to_string())
            }
            AppError::UpstreamAbnormalFinish { reason, message } => {
                tracing::error!(
                    "Generation finished unexpectedly. Reason: {}. Details: {}",
                    reason,
                    message.as_deref().unwrap_or("none")
                );
                (StatusCode::BAD_GATEWAY, GENERATION_FAILED_MESSAGE.to_string())
            }
            AppError::UpstreamEmpty => {
                tracing::error!("{}", EMPTY_RESPONSE_MESSAGE);
                (StatusCode::BAD_GATEWAY, EMPTY_RESPONSE_MESSAGE.to_string())
            }
            AppError::UpstreamInvalidJson { error, raw } => {
                tracing::error!("Failed to parse JSON response from Gemini: {}", error);
                tracing::error!("Invalid JSON string received: {}", raw);
                (StatusCode::BAD_GATEWAY, INVALID_JSON_MESSAGE.to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {}", msg),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Provider failures (transport, upstream status, undecodable reply) take
/// the catch-all 500 path.
impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
