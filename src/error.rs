use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

/// Unified error type for the relay.
///
/// Every variant renders as `{"detail": ...}`, the envelope the dashboard
/// already understands. Upstream bodies are forwarded as-is.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    // ── Upstream ────────────────────────────────────────────────────────
    #[error("Upstream rejected the request: {0}")]
    UpstreamRejection(Value),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: Value },

    #[error("Upstream unreachable: {0}")]
    Transport(String),

    // ── Internal ────────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the access token in its query string.
        RelayError::Transport(e.without_url().to_string())
    }
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::UpstreamRejection(_) => StatusCode::BAD_REQUEST,
            // Mirrored as-is; 1xx cannot carry a final body and 200 means success.
            RelayError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| !s.is_informational() && *s != StatusCode::OK)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            RelayError::Transport(_) => StatusCode::BAD_GATEWAY,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            RelayError::UpstreamRejection(body) | RelayError::Upstream { body, .. } => body,
            other => Value::String(other.to_string()),
        };

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}
