use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::warn;

use foursquare_client::{ParamsError, PlacesError};
use llm_client::LlmError;

/// Every failure the execute pipeline can produce. The mapping to an HTTP
/// status and a `{"detail": string}` body happens once, in `IntoResponse`,
/// so adding a variant forces a decision about its status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No complete location combination in the extracted parameters.
    #[error("Please specify a location for the search (e.g., 'near downtown LA', or provide coordinates).")]
    LocationMissing,

    /// A parameter failed its type check.
    #[error("Invalid parameter for '{field}': expected {expected}. Please check your request.")]
    FieldInvalid {
        field: &'static str,
        expected: &'static str,
    },

    /// The model answered in free text instead of invoking the search tool;
    /// its reply (or a fixed fallback) is surfaced to the caller.
    #[error("{0}")]
    LlmNoToolCall(String),

    /// The model produced a tool call whose arguments were not valid JSON.
    #[error("LLM returned invalid JSON for tool arguments.")]
    LlmMalformedArguments,

    /// Upstream rejected the search; the upstream status passes through.
    #[error("{message}")]
    UpstreamRejected { status: u16, message: String },

    /// Upstream 5xx; the specific code stays server-side.
    #[error("The restaurant service is currently unavailable. Please try again later.")]
    UpstreamUnavailable,

    /// The search service could not be reached at all.
    #[error("Could not connect to the restaurant service: {0}")]
    ServiceUnreachable(String),

    /// A required credential is absent from the environment.
    #[error("Foursquare API key is not configured.")]
    Misconfigured,

    /// Catch-all. The payload is logged, never surfaced.
    #[error("An internal server error occurred.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::LocationMissing
            | ApiError::FieldInvalid { .. }
            | ApiError::LlmNoToolCall(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::LlmMalformedArguments | ApiError::Misconfigured | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            warn!(error = %detail, "internal error in execute pipeline");
        }

        let status = self.status();
        let detail = self.to_string();
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<ParamsError> for ApiError {
    fn from(err: ParamsError) -> Self {
        match err {
            ParamsError::LocationMissing => ApiError::LocationMissing,
            ParamsError::FieldInvalid { field, expected } => {
                ApiError::FieldInvalid { field, expected }
            }
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<PlacesError> for ApiError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::Unreachable(msg) => ApiError::ServiceUnreachable(msg),
            PlacesError::Rejected { status, message } => {
                ApiError::UpstreamRejected { status, message }
            }
            PlacesError::Unavailable { .. } => ApiError::UpstreamUnavailable,
            PlacesError::MissingCredential => ApiError::Misconfigured,
            PlacesError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}
