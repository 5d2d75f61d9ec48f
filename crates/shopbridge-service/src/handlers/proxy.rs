//! Pass-through proxy for storefront and dashboard API calls.
//!
//! Storefront pages call `/api/...` on this service; the call is relayed to
//! the same path on the backend and the backend's status and body are
//! returned unchanged. JSON and multipart bodies pass through as raw bytes.
//! Of the backend's response headers only those in
//! [`RELAYED_RESPONSE_HEADERS`](shopbridge_backend::RELAYED_RESPONSE_HEADERS)
//! come back.
//!
//! The path is forwarded exactly as received, still percent-encoded, so an
//! encoded `/` or `?` stays inside its segment. Dot segments are refused.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{OriginalUri, RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use shopbridge_backend::ForwardRequest;

use crate::auth::BearerToken;
use crate::error::ApiError;
use crate::state::AppState;

/// Relay `/api/{path}` to the backend.
pub async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Some(path) = api_path(&uri) else {
        tracing::debug!(method = %method, uri = %uri, "Rejected proxy path");
        return Err(ApiError::BadRequest("Invalid API path".into()));
    };

    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let token = header(AUTHORIZATION).as_deref().and_then(BearerToken::parse);
    let anonymous_allowed = method == Method::GET && state.config.is_public_path(path);
    if token.is_none() && !anonymous_allowed {
        tracing::debug!(method = %method, path = %path, "Rejected proxy request without token");
        return Err(ApiError::Unauthorized);
    }

    let request = ForwardRequest {
        method,
        path: format!("/api/{path}"),
        query,
        authorization: token.map(|t| t.header_value()),
        content_type: header(CONTENT_TYPE),
        accept: header(ACCEPT),
        body: body.to_vec(),
    };

    let relayed = state.backend.forward(request).await.map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Backend unreachable");
        ApiError::from(e)
    })?;

    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, Body::from(relayed.body)).into_response();
    response.headers_mut().extend(relayed.headers);

    Ok(response)
}

/// The raw, still-encoded path below `/api/`.
///
/// `None` when the path has a `.` or `..` segment, literal or percent-encoded.
fn api_path(uri: &Uri) -> Option<&str> {
    let path = uri.path().strip_prefix("/api/")?;
    let has_dot_segment = path.split('/').any(|segment| {
        let segment = segment.to_ascii_lowercase().replace("%2e", ".");
        segment == "." || segment == ".."
    });
    (!path.is_empty() && !has_dot_segment).then_some(path)
}
