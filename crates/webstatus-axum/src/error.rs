//! Axum-specific error types and mappings.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Missing or wrong access token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => {
                let body = ErrorBody {
                    error: self.to_string(),
                    status: None,
                };
                let mut res = (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response();
                res.headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                res
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                let body = ErrorBody {
                    error: msg,
                    status: Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("Serialization: {err}"))
    }
}
