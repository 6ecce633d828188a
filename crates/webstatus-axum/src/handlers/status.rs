//! Status snapshot handler.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use sha1::{Digest, Sha1};

use crate::environment::{RequestEnvironment, ServerAddr};
use crate::error::HttpError;
use crate::state::AppState;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `GET /status.json`
///
/// Collects a fresh snapshot per request. The entity tag is the SHA-1 of
/// the exact body bytes, so it changes with every new `generatedAt` second.
pub async fn status_json(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, HttpError> {
    let (parts, _body) = request.into_parts();
    let local_addr = parts
        .extensions
        .get::<ConnectInfo<ServerAddr>>()
        .and_then(|ConnectInfo(addr)| addr.ip());
    let env = RequestEnvironment::new(&parts.headers, local_addr);
    let host = request_host(&parts.headers, &parts.uri);

    let snapshot = state.collector.collect(&host, &env).await;
    let body = snapshot.to_json_bytes()?;
    let etag = entity_tag(&body);
    let etag_value =
        HeaderValue::from_str(&etag).map_err(|e| HttpError::Internal(e.to_string()))?;

    if if_none_match(&parts.headers, &etag) {
        tracing::debug!(host = %host, "status unchanged");
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag_value)]).into_response());
    }

    tracing::debug!(host = %host, bytes = body.len(), "serving status snapshot");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (header::ETAG, etag_value),
        ],
        body,
    )
        .into_response())
}

/// Quoted lowercase hex SHA-1 of `body`.
pub fn entity_tag(body: &[u8]) -> String {
    format!("\"{}\"", hex::encode(Sha1::digest(body)))
}

fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.split(',').any(|candidate| candidate.trim() == etag))
}

/// Host the client asked for, without port, lowercased.
fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    uri.host()
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .map(strip_port)
        })
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return authority
            .find(']')
            .map_or(authority, |end| &authority[..=end]);
    }
    authority
        .rsplit_once(':')
        .map_or(authority, |(host, _port)| host)
}
