use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::core::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid migration name: {0}")]
    InvalidName(String),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidName(_) => StatusCode::BAD_REQUEST,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid request",
            Self::InvalidName(_) => "Invalid migration name",
            Self::Backend(_) => "Backend request failed",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (
            status,
            Json(serde_json::json!({
                "success": false,
                "error": self.summary(),
                "details": self.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            })),
        )
            .into_response()
    }
}
