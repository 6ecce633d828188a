//! Token authentication for the status route.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::{HeaderMap, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::error::HttpError;
use crate::state::AppState;

/// Alternative header carrying the token.
pub const TOKEN_HEADER: &str = "x-status-token";

/// The shared secret clients must present.
#[derive(Clone)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    pub fn new(token: &str) -> Self {
        Self(Arc::from(token.trim()))
    }

    /// Constant-time comparison with a presented token.
    pub fn matches(&self, presented: &str) -> bool {
        !self.0.is_empty() && bool::from(self.0.as_bytes().ct_eq(presented.as_bytes()))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Token presented by the client.
///
/// Sources, first match wins: `Authorization: Bearer`, `X-Status-Token`,
/// the `token` query parameter. Values are trimmed; blank counts as absent.
pub fn presented_token(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    };

    let bearer = header_value(header::AUTHORIZATION.as_str()).and_then(|auth| {
        auth.get(..7)
            .filter(|scheme| scheme.eq_ignore_ascii_case("bearer "))
            .map(|_| auth[7..].trim())
    });
    if let Some(token) = bearer {
        return Some(token.to_string()).filter(|t| !t.is_empty());
    }

    if let Some(token) = header_value(TOKEN_HEADER).filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    Query::<TokenQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.token)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Auth middleware: reject requests without the right token.
pub async fn require_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let authorized = presented_token(req.headers(), req.uri())
        .is_some_and(|token| state.token.matches(&token));

    if authorized {
        next.run(req).await
    } else {
        tracing::warn!(
            path = %req.uri().path(),
            "Unauthorized status request - missing or invalid token"
        );
        HttpError::Unauthorized.into_response()
    }
}
