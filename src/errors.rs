use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Error types for the Compass service.
/// Validation failures are raised before any narrator call and map to 400.
/// Narration and transport failures map to 500 and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum CompassError {
    #[error("Invalid or missing type. Must be \"call_option\" or \"stock_buy\".")]
    InvalidType,

    #[error("Missing field: {0}. Cannot compute trade consequences without it.")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse AI response as JSON.")]
    NarrationFormat(String),

    #[error("No response from AI model.")]
    NarrationUnavailable,

    #[error("network error: {0}")]
    Network(String),

    #[error("narration API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("config error: {0}")]
    Config(String),
}

impl CompassError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidType | Self::MissingField(_) | Self::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for CompassError {
    fn from(e: reqwest::Error) -> Self {
        CompassError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for CompassError {
    fn from(e: serde_json::Error) -> Self {
        CompassError::NarrationFormat(e.to_string())
    }
}

impl IntoResponse for CompassError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                Self::NarrationFormat(detail) => {
                    tracing::error!(detail = %detail, "narration response rejected")
                }
                other => tracing::error!(error = %other, "request failed"),
            }
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub type CompassResult<T> = Result<T, CompassError>;
